use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;
use tracing::debug;

use super::{RequestOpts, RestClient, RestResult, encode_body};
use crate::model::{BulkDeleteMessages, ChannelData, MessageCreate, MessageData, MessageUpdate};
use crate::route::{
    BULK_DELETE_MESSAGES, CREATE_MESSAGE, CROSSPOST_MESSAGE, DELETE_MESSAGE, GET_CHANNEL,
    QueryValues, UPDATE_MESSAGE,
};

#[derive(Clone)]
pub struct ChannelService {
    rest_client: Arc<dyn RestClient>,
}

impl ChannelService {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }

    pub async fn get_channel(
        &self,
        channel_id: ChannelId,
        opts: &RequestOpts,
    ) -> RestResult<ChannelData> {
        let route = GET_CHANNEL.compile(QueryValues::new(), &[&channel_id])?;
        self.rest_client.request(route, None, opts).await
    }

    pub async fn create_message(
        &self,
        channel_id: ChannelId,
        message_create: &MessageCreate,
        opts: &RequestOpts,
    ) -> RestResult<MessageData> {
        let route = CREATE_MESSAGE.compile(QueryValues::new(), &[&channel_id])?;
        let body = encode_body(message_create)?;
        self.rest_client.request(route, Some(body), opts).await
    }

    pub async fn update_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        message_update: &MessageUpdate,
        opts: &RequestOpts,
    ) -> RestResult<MessageData> {
        let route = UPDATE_MESSAGE.compile(QueryValues::new(), &[&channel_id, &message_id])?;
        let body = encode_body(message_update)?;
        self.rest_client.request(route, Some(body), opts).await
    }

    pub async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        opts: &RequestOpts,
    ) -> RestResult<()> {
        let route = DELETE_MESSAGE.compile(QueryValues::new(), &[&channel_id, &message_id])?;
        self.rest_client.request_discard(route, None, opts).await
    }

    /// Delete several messages in one request
    ///
    /// The bulk endpoint rejects fewer than two ids, so a single id goes
    /// through the single-delete route and an empty slice sends nothing.
    pub async fn bulk_delete_messages(
        &self,
        channel_id: ChannelId,
        message_ids: &[MessageId],
        opts: &RequestOpts,
    ) -> RestResult<()> {
        match message_ids {
            [] => {
                debug!(%channel_id, "Bulk delete called without message ids, skipping");
                Ok(())
            }
            [message_id] => self.delete_message(channel_id, *message_id, opts).await,
            _ => {
                let route = BULK_DELETE_MESSAGES.compile(QueryValues::new(), &[&channel_id])?;
                let body = encode_body(&BulkDeleteMessages {
                    messages: message_ids.to_vec(),
                })?;
                self.rest_client.request_discard(route, Some(body), opts).await
            }
        }
    }

    /// Publish a news channel message to following channels
    pub async fn crosspost_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        opts: &RequestOpts,
    ) -> RestResult<MessageData> {
        let route = CROSSPOST_MESSAGE.compile(QueryValues::new(), &[&channel_id, &message_id])?;
        self.rest_client.request(route, None, opts).await
    }
}
