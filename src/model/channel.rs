use serde::{Deserialize, Serialize};
use serenity::model::Permissions;
use serenity::model::Timestamp;
use serenity::model::id::{ChannelId, GuildId, MessageId};
use std::fmt;
use thiserror::Error;

/// Channel discriminant
///
/// Serialized as the integer value the Discord API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ChannelType {
    GuildText,
    Dm,
    GuildVoice,
    GuildCategory,
    GuildNews,
    GuildStore,
    GuildStage,
}

impl ChannelType {
    pub const ALL: [ChannelType; 7] = [
        ChannelType::GuildText,
        ChannelType::Dm,
        ChannelType::GuildVoice,
        ChannelType::GuildCategory,
        ChannelType::GuildNews,
        ChannelType::GuildStore,
        ChannelType::GuildStage,
    ];

    pub const fn value(self) -> u8 {
        match self {
            ChannelType::GuildText => 0,
            ChannelType::Dm => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::GuildCategory => 4,
            ChannelType::GuildNews => 5,
            ChannelType::GuildStore => 6,
            ChannelType::GuildStage => 13,
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.value())
    }
}

impl From<ChannelType> for u8 {
    fn from(kind: ChannelType) -> Self {
        kind.value()
    }
}

/// Integer that does not name a supported channel type
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unknown channel type {0}")]
pub struct UnknownChannelType(pub u8);

impl TryFrom<u8> for ChannelType {
    type Error = UnknownChannelType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ChannelType::ALL
            .into_iter()
            .find(|kind| kind.value() == value)
            .ok_or(UnknownChannelType(value))
    }
}

/// Channel object as returned by the API
///
/// Which optional fields are meaningful depends on `kind`; the channel
/// entity guards access to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelData {
    pub id: ChannelId,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// Resolved permissions of the invoking member (interaction payloads only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<MessageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pin_timestamp: Option<Timestamp>,
}

impl ChannelData {
    /// Bare channel of the given type with every optional field unset
    pub fn new(id: ChannelId, kind: ChannelType) -> Self {
        Self {
            id,
            kind,
            name: None,
            guild_id: None,
            position: None,
            permissions: None,
            parent_id: None,
            topic: None,
            nsfw: false,
            bitrate: None,
            user_limit: None,
            last_message_id: None,
            last_pin_timestamp: None,
        }
    }
}
