use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serenity::model::id::{ApplicationId, ChannelId, GuildId, WebhookId};

use super::{Icon, User};

/// Webhook that posts messages with its token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingWebhook {
    pub id: WebhookId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSourceGuild {
    pub id: GuildId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSourceChannel {
    pub id: ChannelId,
    pub name: String,
}

/// Webhook created by following a news channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFollowerWebhook {
    pub id: WebhookId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_guild: Option<WebhookSourceGuild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_channel: Option<WebhookSourceChannel>,
}

/// Webhook owned by an application (interactions)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationWebhook {
    pub id: WebhookId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
}

/// Concrete webhook variant, selected by the integer `type` field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WebhookEnvelope")]
pub enum Webhook {
    Incoming(IncomingWebhook),
    ChannelFollower(ChannelFollowerWebhook),
    Application(ApplicationWebhook),
}

impl Webhook {
    pub fn id(&self) -> WebhookId {
        match self {
            Webhook::Incoming(w) => w.id,
            Webhook::ChannelFollower(w) => w.id,
            Webhook::Application(w) => w.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Webhook::Incoming(w) => w.name.as_deref(),
            Webhook::ChannelFollower(w) => w.name.as_deref(),
            Webhook::Application(w) => w.name.as_deref(),
        }
    }

    /// Channel the webhook posts into (application webhooks have none)
    pub fn channel_id(&self) -> Option<ChannelId> {
        match self {
            Webhook::Incoming(w) => w.channel_id,
            Webhook::ChannelFollower(w) => w.channel_id,
            Webhook::Application(_) => None,
        }
    }

    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            Webhook::Incoming(w) => w.guild_id,
            Webhook::ChannelFollower(w) => w.guild_id,
            Webhook::Application(_) => None,
        }
    }

    /// Secure token; only incoming webhooks carry one
    pub fn token(&self) -> Option<&str> {
        match self {
            Webhook::Incoming(w) => w.token.as_deref(),
            _ => None,
        }
    }

    /// Integer `type` value used on the wire
    pub fn kind(&self) -> u8 {
        match self {
            Webhook::Incoming(_) => 1,
            Webhook::ChannelFollower(_) => 2,
            Webhook::Application(_) => 3,
        }
    }
}

/// Raw webhook payload before its `type` tag is resolved
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl WebhookEnvelope {
    /// Decode the remaining fields as the variant named by the tag
    pub fn into_webhook(self) -> Result<Webhook, serde_json::Error> {
        let fields = serde_json::Value::Object(self.fields);
        match self.kind {
            1 => serde_json::from_value(fields).map(Webhook::Incoming),
            2 => serde_json::from_value(fields).map(Webhook::ChannelFollower),
            3 => serde_json::from_value(fields).map(Webhook::Application),
            other => Err(serde_json::Error::custom(format!(
                "unknown webhook type {other}"
            ))),
        }
    }
}

impl TryFrom<WebhookEnvelope> for Webhook {
    type Error = serde_json::Error;

    fn try_from(envelope: WebhookEnvelope) -> Result<Self, Self::Error> {
        envelope.into_webhook()
    }
}

/// Body of a modify webhook request (bot authorized)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebhookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
}

/// Body of a modify webhook request authorized by token; cannot move channels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebhookUpdateWithToken {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Icon>,
}

/// Body of an execute webhook request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebhookMessageCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub tts: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<serde_json::Value>,
    /// Creates a forum thread with this name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl WebhookMessageCreate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebhookMessageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<serde_json::Value>>,
}
