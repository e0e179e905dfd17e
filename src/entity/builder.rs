use std::sync::{Arc, Weak};
use tracing::debug;

use super::{Channel, Invite, Message, StageInstance};
use crate::cache::CacheStrategy;
use crate::context::ClientContext;
use crate::model::{ChannelData, Guild, InviteData, MessageData, StageInstanceData};

/// Turns wire payloads into entities and registers them in the cache
pub struct EntityBuilder {
    context: Arc<ClientContext>,
}

impl EntityBuilder {
    pub(crate) fn new(context: Arc<ClientContext>) -> Self {
        Self { context }
    }

    fn should_cache(&self, strategy: CacheStrategy) -> bool {
        strategy.should_cache(self.context.gateway_connected())
    }

    /// Build a channel entity
    ///
    /// A stage instance already linked to the cached channel is carried over.
    pub fn create_channel(&self, data: ChannelData, strategy: CacheStrategy) -> Channel {
        let channels = &self.context.caches().channels;
        let context = Arc::downgrade(&self.context);
        if !self.should_cache(strategy) {
            let stage_instance_id = channels
                .get(&data.id)
                .and_then(|cached| cached.stage_instance_id());
            return Channel::new(data, stage_instance_id, context);
        }

        debug!(channel_id = %data.id, kind = %data.kind, "Caching channel");
        let channel = channels.upsert(data.id, &|cached| {
            let stage_instance_id = cached.and_then(Channel::stage_instance_id);
            Channel::new(data.clone(), stage_instance_id, Weak::clone(&context))
        });
        Channel::clone(&channel)
    }

    pub fn create_message(&self, data: MessageData, strategy: CacheStrategy) -> Message {
        let message = Message::new(data, Arc::downgrade(&self.context));
        if self.should_cache(strategy) {
            self.context
                .caches()
                .messages
                .put(message.id(), message.clone());
        }
        message
    }

    pub fn create_guild(&self, data: Guild, strategy: CacheStrategy) -> Arc<Guild> {
        if self.should_cache(strategy) {
            self.context.caches().guilds.put(data.id, data)
        } else {
            Arc::new(data)
        }
    }

    /// Build a stage instance entity
    ///
    /// When its stage channel is cached, the channel entity is rebuilt with
    /// the new stage instance id.
    pub fn create_stage_instance(
        &self,
        data: StageInstanceData,
        strategy: CacheStrategy,
    ) -> StageInstance {
        let stage_instance = StageInstance::new(data, Arc::downgrade(&self.context));
        if !self.should_cache(strategy) {
            return stage_instance;
        }

        let caches = self.context.caches();
        caches
            .stage_instances
            .put(stage_instance.id(), stage_instance.clone());

        let channel_id = stage_instance.channel_id();
        let stage_instance_id = stage_instance.id();
        let linked = caches.channels.alter(&channel_id, &|channel| {
            Some(channel.with_stage_instance(Some(stage_instance_id)))
        });
        if linked.is_some() {
            debug!(%channel_id, %stage_instance_id, "Linked stage instance to channel");
        }
        stage_instance
    }

    /// Build an invite entity; invites are never cached
    pub fn create_invite(&self, data: InviteData) -> Invite {
        Invite::new(data, Arc::downgrade(&self.context))
    }
}
