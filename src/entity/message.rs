use serenity::model::id::{ChannelId, MessageId};
use std::fmt;
use std::sync::{Arc, Weak};

use super::{Channel, live_context};
use crate::cache::CacheStrategy;
use crate::context::ClientContext;
use crate::model::{MessageData, MessageUpdate};
use crate::rest::{RequestOpts, RestResult};

/// Message bound to a client context
#[derive(Clone)]
pub struct Message {
    data: MessageData,
    context: Weak<ClientContext>,
}

impl Message {
    pub(crate) fn new(data: MessageData, context: Weak<ClientContext>) -> Self {
        Self { data, context }
    }

    pub fn id(&self) -> MessageId {
        self.data.id
    }

    pub fn channel_id(&self) -> ChannelId {
        self.data.channel_id
    }

    pub fn content(&self) -> &str {
        &self.data.content
    }

    pub fn data(&self) -> &MessageData {
        &self.data
    }

    /// Channel from the cache
    pub fn channel(&self) -> Option<Arc<Channel>> {
        self.context
            .upgrade()?
            .caches()
            .channels
            .get(&self.data.channel_id)
    }

    pub async fn update(
        &self,
        message_update: &MessageUpdate,
        opts: &RequestOpts,
    ) -> RestResult<Message> {
        let context = live_context(&self.context)?;
        let data = context
            .rest()
            .channels()
            .update_message(self.channel_id(), self.id(), message_update, opts)
            .await?;
        Ok(context
            .entity_builder()
            .create_message(data, CacheStrategy::No))
    }

    pub async fn delete(&self, opts: &RequestOpts) -> RestResult<()> {
        let context = live_context(&self.context)?;
        context
            .rest()
            .channels()
            .delete_message(self.channel_id(), self.id(), opts)
            .await?;
        context.caches().messages.remove(&self.id());
        Ok(())
    }

    /// Publish to channels following this news channel
    pub async fn crosspost(&self, opts: &RequestOpts) -> RestResult<Message> {
        let context = live_context(&self.context)?;
        let data = context
            .rest()
            .channels()
            .crosspost_message(self.channel_id(), self.id(), opts)
            .await?;
        Ok(context
            .entity_builder()
            .create_message(data, CacheStrategy::No))
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
