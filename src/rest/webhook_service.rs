use serde::Serialize;
use serenity::model::id::{ChannelId, MessageId, WebhookId};
use std::sync::Arc;

use super::{RequestOpts, RestClient, RestError, RestResult, encode_body};
use crate::model::{
    MessageData, Webhook, WebhookEnvelope, WebhookMessageCreate, WebhookMessageUpdate,
    WebhookUpdate, WebhookUpdateWithToken,
};
use crate::route::{
    CREATE_WEBHOOK_MESSAGE, CREATE_WEBHOOK_MESSAGE_GITHUB, CREATE_WEBHOOK_MESSAGE_SLACK,
    CompiledRoute, DELETE_WEBHOOK, DELETE_WEBHOOK_MESSAGE, DELETE_WEBHOOK_WITH_TOKEN, GET_WEBHOOK,
    GET_WEBHOOK_WITH_TOKEN, QueryValues, Route, UPDATE_WEBHOOK, UPDATE_WEBHOOK_MESSAGE,
    UPDATE_WEBHOOK_WITH_TOKEN,
};

/// Webhook management and execution
///
/// `*_with_token` operations and message operations authenticate with the
/// webhook token in the path and do not send the bot token.
#[derive(Clone)]
pub struct WebhookService {
    rest_client: Arc<dyn RestClient>,
}

impl WebhookService {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }

    async fn request_webhook(
        &self,
        route: CompiledRoute,
        body: Option<serde_json::Value>,
        opts: &RequestOpts,
    ) -> RestResult<Webhook> {
        let envelope: WebhookEnvelope = self.rest_client.request(route, body, opts).await?;
        envelope.into_webhook().map_err(RestError::Decode)
    }

    pub async fn get_webhook(
        &self,
        webhook_id: WebhookId,
        opts: &RequestOpts,
    ) -> RestResult<Webhook> {
        let route = GET_WEBHOOK.compile(QueryValues::new(), &[&webhook_id])?;
        self.request_webhook(route, None, opts).await
    }

    pub async fn update_webhook(
        &self,
        webhook_id: WebhookId,
        webhook_update: &WebhookUpdate,
        opts: &RequestOpts,
    ) -> RestResult<Webhook> {
        let route = UPDATE_WEBHOOK.compile(QueryValues::new(), &[&webhook_id])?;
        let body = encode_body(webhook_update)?;
        self.request_webhook(route, Some(body), opts).await
    }

    pub async fn delete_webhook(
        &self,
        webhook_id: WebhookId,
        opts: &RequestOpts,
    ) -> RestResult<()> {
        let route = DELETE_WEBHOOK.compile(QueryValues::new(), &[&webhook_id])?;
        self.rest_client.request_discard(route, None, opts).await
    }

    pub async fn get_webhook_with_token(
        &self,
        webhook_id: WebhookId,
        webhook_token: &str,
        opts: &RequestOpts,
    ) -> RestResult<Webhook> {
        let route =
            GET_WEBHOOK_WITH_TOKEN.compile(QueryValues::new(), &[&webhook_id, &webhook_token])?;
        self.request_webhook(route, None, opts).await
    }

    pub async fn update_webhook_with_token(
        &self,
        webhook_id: WebhookId,
        webhook_token: &str,
        webhook_update: &WebhookUpdateWithToken,
        opts: &RequestOpts,
    ) -> RestResult<Webhook> {
        let route =
            UPDATE_WEBHOOK_WITH_TOKEN.compile(QueryValues::new(), &[&webhook_id, &webhook_token])?;
        let body = encode_body(webhook_update)?;
        self.request_webhook(route, Some(body), opts).await
    }

    pub async fn delete_webhook_with_token(
        &self,
        webhook_id: WebhookId,
        webhook_token: &str,
        opts: &RequestOpts,
    ) -> RestResult<()> {
        let route =
            DELETE_WEBHOOK_WITH_TOKEN.compile(QueryValues::new(), &[&webhook_id, &webhook_token])?;
        self.rest_client.request_discard(route, None, opts).await
    }

    /// Shared execute-webhook flow for the native, Slack and GitHub routes
    ///
    /// `wait` and `thread_id` are only added to the query when requested.
    /// Without `wait` the API returns no message, so `None` is returned.
    #[allow(clippy::too_many_arguments)]
    async fn create_message_on<B: Serialize + Sync + ?Sized>(
        &self,
        template: &Route,
        webhook_id: WebhookId,
        webhook_token: &str,
        payload: &B,
        wait: bool,
        thread_id: Option<ChannelId>,
        opts: &RequestOpts,
    ) -> RestResult<Option<MessageData>> {
        let mut query = QueryValues::new();
        if wait {
            query.insert("wait", true);
        }
        if let Some(thread_id) = thread_id {
            query.insert("thread_id", thread_id);
        }
        let route = template.compile(query, &[&webhook_id, &webhook_token])?;
        let body = encode_body(payload)?;

        if wait {
            self.rest_client.request(route, Some(body), opts).await.map(Some)
        } else {
            self.rest_client
                .request_discard(route, Some(body), opts)
                .await
                .map(|()| None)
        }
    }

    pub async fn create_message(
        &self,
        webhook_id: WebhookId,
        webhook_token: &str,
        message_create: &WebhookMessageCreate,
        wait: bool,
        thread_id: Option<ChannelId>,
        opts: &RequestOpts,
    ) -> RestResult<Option<MessageData>> {
        self.create_message_on(
            &CREATE_WEBHOOK_MESSAGE,
            webhook_id,
            webhook_token,
            message_create,
            wait,
            thread_id,
            opts,
        )
        .await
    }

    /// Execute with a Slack-compatible payload
    pub async fn create_message_slack<B: Serialize + Sync + ?Sized>(
        &self,
        webhook_id: WebhookId,
        webhook_token: &str,
        payload: &B,
        wait: bool,
        thread_id: Option<ChannelId>,
        opts: &RequestOpts,
    ) -> RestResult<Option<MessageData>> {
        self.create_message_on(
            &CREATE_WEBHOOK_MESSAGE_SLACK,
            webhook_id,
            webhook_token,
            payload,
            wait,
            thread_id,
            opts,
        )
        .await
    }

    /// Execute with a GitHub event payload
    pub async fn create_message_github<B: Serialize + Sync + ?Sized>(
        &self,
        webhook_id: WebhookId,
        webhook_token: &str,
        payload: &B,
        wait: bool,
        thread_id: Option<ChannelId>,
        opts: &RequestOpts,
    ) -> RestResult<Option<MessageData>> {
        self.create_message_on(
            &CREATE_WEBHOOK_MESSAGE_GITHUB,
            webhook_id,
            webhook_token,
            payload,
            wait,
            thread_id,
            opts,
        )
        .await
    }

    pub async fn update_message(
        &self,
        webhook_id: WebhookId,
        webhook_token: &str,
        message_id: MessageId,
        message_update: &WebhookMessageUpdate,
        thread_id: Option<ChannelId>,
        opts: &RequestOpts,
    ) -> RestResult<MessageData> {
        let mut query = QueryValues::new();
        if let Some(thread_id) = thread_id {
            query.insert("thread_id", thread_id);
        }
        let route =
            UPDATE_WEBHOOK_MESSAGE.compile(query, &[&webhook_id, &webhook_token, &message_id])?;
        let body = encode_body(message_update)?;
        self.rest_client.request(route, Some(body), opts).await
    }

    pub async fn delete_message(
        &self,
        webhook_id: WebhookId,
        webhook_token: &str,
        message_id: MessageId,
        thread_id: Option<ChannelId>,
        opts: &RequestOpts,
    ) -> RestResult<()> {
        let mut query = QueryValues::new();
        if let Some(thread_id) = thread_id {
            query.insert("thread_id", thread_id);
        }
        let route =
            DELETE_WEBHOOK_MESSAGE.compile(query, &[&webhook_id, &webhook_token, &message_id])?;
        self.rest_client.request_discard(route, None, opts).await
    }
}
