//! Channel entity
//!
//! One [`Channel`] type represents every channel kind. Operations are grouped
//! by [`Capability`]; each one checks the channel type before touching
//! type-specific fields or issuing a request. Calling an operation on a
//! channel type that does not support it is a programming error and panics.

use anyhow::Context as _;
use serenity::model::id::{ChannelId, GuildId, MessageId, StageInstanceId};
use serenity::model::{Permissions, Timestamp};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

use super::{Message, StageInstance, live_context};
use crate::cache::CacheStrategy;
use crate::context::ClientContext;
use crate::model::{
    ChannelData, ChannelType, Guild, Member, MessageCreate, MessageUpdate, StageInstanceCreate,
};
use crate::rest::{RequestOpts, RestResult};

/// Family of channel operations gated on the channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    MessageBearing,
    GuildScoped,
    TextCapable,
    VoiceCapable,
    NewsCapable,
    StageCapable,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::MessageBearing,
        Capability::GuildScoped,
        Capability::TextCapable,
        Capability::VoiceCapable,
        Capability::NewsCapable,
        Capability::StageCapable,
    ];

    pub fn supports(self, kind: ChannelType) -> bool {
        use ChannelType::*;

        match self {
            Capability::MessageBearing => matches!(kind, Dm | GuildText | GuildNews),
            Capability::GuildScoped => !matches!(kind, Dm),
            Capability::TextCapable => matches!(kind, GuildText | GuildNews),
            Capability::VoiceCapable => matches!(kind, GuildVoice | GuildStage),
            Capability::NewsCapable => matches!(kind, GuildNews),
            Capability::StageCapable => matches!(kind, GuildStage),
        }
    }
}

/// Channel bound to a client context
#[derive(Clone)]
pub struct Channel {
    data: ChannelData,
    stage_instance_id: Option<StageInstanceId>,
    context: Weak<ClientContext>,
}

impl Channel {
    pub(crate) fn new(
        data: ChannelData,
        stage_instance_id: Option<StageInstanceId>,
        context: Weak<ClientContext>,
    ) -> Self {
        Self {
            data,
            stage_instance_id,
            context,
        }
    }

    /// Copy of this entity linked to another stage instance
    pub(crate) fn with_stage_instance(&self, stage_instance_id: Option<StageInstanceId>) -> Self {
        Self {
            data: self.data.clone(),
            stage_instance_id,
            context: Weak::clone(&self.context),
        }
    }

    /// Panic unless this channel type supports `capability`
    fn require(&self, capability: Capability, operation: &str) {
        if !capability.supports(self.data.kind) {
            panic!(
                "unsupported operation '{operation}' for channel type {}",
                self.data.kind
            );
        }
    }

    // Common

    pub fn id(&self) -> ChannelId {
        self.data.id
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    pub fn kind(&self) -> ChannelType {
        self.data.kind
    }

    pub fn data(&self) -> &ChannelData {
        &self.data
    }

    /// Owning context, unless it has been dropped
    pub fn context(&self) -> Option<Arc<ClientContext>> {
        self.context.upgrade()
    }

    pub(crate) fn stage_instance_id(&self) -> Option<StageInstanceId> {
        self.stage_instance_id
    }

    pub fn supports(&self, capability: Capability) -> bool {
        capability.supports(self.data.kind)
    }

    pub fn is_message_bearing(&self) -> bool {
        self.supports(Capability::MessageBearing)
    }

    pub fn is_guild_channel(&self) -> bool {
        self.supports(Capability::GuildScoped)
    }

    pub fn is_text_channel(&self) -> bool {
        self.supports(Capability::TextCapable)
    }

    pub fn is_voice_channel(&self) -> bool {
        self.supports(Capability::VoiceCapable)
    }

    pub fn is_news_channel(&self) -> bool {
        self.supports(Capability::NewsCapable)
    }

    pub fn is_stage_channel(&self) -> bool {
        self.supports(Capability::StageCapable)
    }

    pub fn is_dm_channel(&self) -> bool {
        self.data.kind == ChannelType::Dm
    }

    pub fn is_category(&self) -> bool {
        self.data.kind == ChannelType::GuildCategory
    }

    pub fn is_store_channel(&self) -> bool {
        self.data.kind == ChannelType::GuildStore
    }

    // Message-bearing

    pub fn last_message_id(&self) -> Option<MessageId> {
        self.require(Capability::MessageBearing, "last_message_id");
        self.data.last_message_id
    }

    pub fn last_pin_timestamp(&self) -> Option<Timestamp> {
        self.require(Capability::MessageBearing, "last_pin_timestamp");
        self.data.last_pin_timestamp
    }

    pub async fn create_message(
        &self,
        message_create: &MessageCreate,
        opts: &RequestOpts,
    ) -> RestResult<Message> {
        self.require(Capability::MessageBearing, "create_message");
        let context = live_context(&self.context)?;
        let data = context
            .rest()
            .channels()
            .create_message(self.id(), message_create, opts)
            .await?;
        Ok(context
            .entity_builder()
            .create_message(data, CacheStrategy::No))
    }

    pub async fn update_message(
        &self,
        message_id: MessageId,
        message_update: &MessageUpdate,
        opts: &RequestOpts,
    ) -> RestResult<Message> {
        self.require(Capability::MessageBearing, "update_message");
        let context = live_context(&self.context)?;
        let data = context
            .rest()
            .channels()
            .update_message(self.id(), message_id, message_update, opts)
            .await?;
        Ok(context
            .entity_builder()
            .create_message(data, CacheStrategy::No))
    }

    pub async fn delete_message(
        &self,
        message_id: MessageId,
        opts: &RequestOpts,
    ) -> RestResult<()> {
        self.require(Capability::MessageBearing, "delete_message");
        let context = live_context(&self.context)?;
        context
            .rest()
            .channels()
            .delete_message(self.id(), message_id, opts)
            .await?;
        context.caches().messages.remove(&message_id);
        Ok(())
    }

    /// Delete `message_ids` with a single request
    pub async fn bulk_delete_messages(
        &self,
        message_ids: &[MessageId],
        opts: &RequestOpts,
    ) -> RestResult<()> {
        self.require(Capability::MessageBearing, "bulk_delete_messages");
        let context = live_context(&self.context)?;
        context
            .rest()
            .channels()
            .bulk_delete_messages(self.id(), message_ids, opts)
            .await?;
        for message_id in message_ids {
            context.caches().messages.remove(message_id);
        }
        Ok(())
    }

    // Guild-scoped

    pub fn guild_id(&self) -> Option<GuildId> {
        self.require(Capability::GuildScoped, "guild_id");
        self.data.guild_id
    }

    /// Owning guild from the cache
    pub fn guild(&self) -> Option<Arc<Guild>> {
        self.require(Capability::GuildScoped, "guild");
        let guild_id = self.data.guild_id?;
        self.context.upgrade()?.caches().guilds.get(&guild_id)
    }

    /// Resolved permissions of the invoking member, when known
    pub fn permissions(&self) -> Option<Permissions> {
        self.require(Capability::GuildScoped, "permissions");
        self.data.permissions
    }

    pub fn parent_id(&self) -> Option<ChannelId> {
        self.require(Capability::GuildScoped, "parent_id");
        self.data.parent_id
    }

    /// Parent category from the cache
    pub fn parent(&self) -> Option<Arc<Channel>> {
        self.require(Capability::GuildScoped, "parent");
        let parent_id = self.data.parent_id?;
        self.context
            .upgrade()?
            .caches()
            .channels
            .get(&parent_id)
            .filter(|parent| parent.is_category())
    }

    pub fn position(&self) -> Option<i32> {
        self.require(Capability::GuildScoped, "position");
        self.data.position
    }

    // Text-capable

    pub fn nsfw(&self) -> bool {
        self.require(Capability::TextCapable, "nsfw");
        self.data.nsfw
    }

    pub fn topic(&self) -> Option<&str> {
        self.require(Capability::TextCapable, "topic");
        self.data.topic.as_deref()
    }

    // Voice-capable

    /// Join this channel through the context's audio controller
    pub async fn connect(&self) -> anyhow::Result<()> {
        self.require(Capability::VoiceCapable, "connect");
        let guild_id = self
            .data
            .guild_id
            .with_context(|| format!("Voice channel {} has no guild id", self.id()))?;
        let context = self
            .context
            .upgrade()
            .context("Client context was dropped")?;
        debug!(%guild_id, channel_id = %self.id(), "Connecting to voice channel");
        context.audio().connect(guild_id, self.id()).await
    }

    pub fn bitrate(&self) -> Option<u32> {
        self.require(Capability::VoiceCapable, "bitrate");
        self.data.bitrate
    }

    pub fn user_limit(&self) -> Option<u32> {
        self.require(Capability::VoiceCapable, "user_limit");
        self.data.user_limit
    }

    // News-capable

    pub async fn crosspost_message(
        &self,
        message_id: MessageId,
        opts: &RequestOpts,
    ) -> RestResult<Message> {
        self.require(Capability::NewsCapable, "crosspost_message");
        let context = live_context(&self.context)?;
        let data = context
            .rest()
            .channels()
            .crosspost_message(self.id(), message_id, opts)
            .await?;
        Ok(context
            .entity_builder()
            .create_message(data, CacheStrategy::No))
    }

    // Stage-capable

    /// Live stage instance from the cache
    pub fn stage_instance(&self) -> Option<Arc<StageInstance>> {
        self.require(Capability::StageCapable, "stage_instance");
        let stage_instance_id = self.stage_instance_id?;
        self.context
            .upgrade()?
            .caches()
            .stage_instances
            .get(&stage_instance_id)
    }

    /// Start a stage instance in this channel
    ///
    /// The cached channel entity is rebuilt to point at the new instance;
    /// `self` is left unchanged.
    pub async fn create_stage_instance(
        &self,
        topic: impl Into<String>,
        opts: &RequestOpts,
    ) -> RestResult<StageInstance> {
        self.require(Capability::StageCapable, "create_stage_instance");
        let context = live_context(&self.context)?;
        let stage_instance_create = StageInstanceCreate::new(self.id(), topic);
        let data = context
            .rest()
            .stage_instances()
            .create_stage_instance(&stage_instance_create, opts)
            .await?;
        Ok(context
            .entity_builder()
            .create_stage_instance(data, CacheStrategy::NoWs))
    }

    /// Whether `member` may moderate this stage
    ///
    /// Administrators always can. Otherwise the member needs to manage the
    /// channel and to mute and move speakers. Members without resolved
    /// permissions are not moderators.
    pub fn is_moderator(&self, member: &Member) -> bool {
        self.require(Capability::StageCapable, "is_moderator");
        let Some(permissions) = member.permissions else {
            return false;
        };
        let moderation =
            Permissions::MANAGE_CHANNELS | Permissions::MUTE_MEMBERS | Permissions::MOVE_MEMBERS;
        permissions.contains(Permissions::ADMINISTRATOR) || permissions.contains(moderation)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("data", &self.data)
            .field("stage_instance_id", &self.stage_instance_id)
            .finish_non_exhaustive()
    }
}
