use serenity::model::id::{ChannelId, GuildId, StageInstanceId};
use std::fmt;
use std::sync::{Arc, Weak};

use super::{Channel, live_context};
use crate::context::ClientContext;
use crate::model::StageInstanceData;
use crate::rest::{RequestOpts, RestResult};

#[derive(Clone)]
pub struct StageInstance {
    data: StageInstanceData,
    context: Weak<ClientContext>,
}

impl StageInstance {
    pub(crate) fn new(data: StageInstanceData, context: Weak<ClientContext>) -> Self {
        Self { data, context }
    }

    pub fn id(&self) -> StageInstanceId {
        self.data.id
    }

    pub fn guild_id(&self) -> GuildId {
        self.data.guild_id
    }

    pub fn channel_id(&self) -> ChannelId {
        self.data.channel_id
    }

    pub fn topic(&self) -> &str {
        &self.data.topic
    }

    pub fn data(&self) -> &StageInstanceData {
        &self.data
    }

    /// Stage channel from the cache
    pub fn channel(&self) -> Option<Arc<Channel>> {
        self.context
            .upgrade()?
            .caches()
            .channels
            .get(&self.data.channel_id)
    }

    /// End the stage and unlink it from the cached channel
    pub async fn delete(&self, opts: &RequestOpts) -> RestResult<()> {
        let context = live_context(&self.context)?;
        context
            .rest()
            .stage_instances()
            .delete_stage_instance(self.channel_id(), opts)
            .await?;

        let caches = context.caches();
        let stage_instance_id = self.id();
        caches.stage_instances.remove(&stage_instance_id);
        // A newer instance may have been linked meanwhile
        caches.channels.alter(&self.channel_id(), &|channel| {
            (channel.stage_instance_id() == Some(stage_instance_id))
                .then(|| channel.with_stage_instance(None))
        });
        Ok(())
    }
}

impl fmt::Debug for StageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageInstance")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
