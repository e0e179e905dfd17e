//! Wire representations of Discord API resources
//!
//! These types mirror the JSON bodies exchanged with the REST API. The
//! entity layer wraps some of them with a client back-reference.

mod channel;
mod guild;
mod icon;
mod invite;
mod message;
mod stage_instance;
mod user;
mod voice;
mod webhook;

pub use channel::{ChannelData, ChannelType, UnknownChannelType};
pub use guild::{Guild, Member};
pub use icon::{Icon, IconType};
pub use invite::{InviteChannel, InviteCreate, InviteData, InviteGuild};
pub use message::{BulkDeleteMessages, MessageCreate, MessageData, MessageReference, MessageUpdate};
pub use stage_instance::{StageInstanceCreate, StageInstanceData};
pub use user::User;
pub use voice::VoiceRegion;
pub use webhook::{
    ApplicationWebhook, ChannelFollowerWebhook, IncomingWebhook, Webhook, WebhookEnvelope,
    WebhookMessageCreate, WebhookMessageUpdate, WebhookSourceChannel, WebhookSourceGuild,
    WebhookUpdate, WebhookUpdateWithToken,
};
