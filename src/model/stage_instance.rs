use serde::{Deserialize, Serialize};
use serenity::model::id::{ChannelId, GuildId, StageInstanceId};

/// Live stage attached to a stage channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInstanceData {
    pub id: StageInstanceId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub topic: String,
    #[serde(default)]
    pub privacy_level: u8,
}

/// Body of a create stage instance request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageInstanceCreate {
    pub channel_id: ChannelId,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_start_notification: Option<bool>,
}

impl StageInstanceCreate {
    pub fn new(channel_id: ChannelId, topic: impl Into<String>) -> Self {
        Self {
            channel_id,
            topic: topic.into(),
            privacy_level: None,
            send_start_notification: None,
        }
    }
}
