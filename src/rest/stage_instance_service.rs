use serenity::model::id::ChannelId;
use std::sync::Arc;

use super::{RequestOpts, RestClient, RestResult, encode_body};
use crate::model::{StageInstanceCreate, StageInstanceData};
use crate::route::{CREATE_STAGE_INSTANCE, DELETE_STAGE_INSTANCE, GET_STAGE_INSTANCE, QueryValues};

#[derive(Clone)]
pub struct StageInstanceService {
    rest_client: Arc<dyn RestClient>,
}

impl StageInstanceService {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }

    /// Stage instance currently live in `channel_id`
    pub async fn get_stage_instance(
        &self,
        channel_id: ChannelId,
        opts: &RequestOpts,
    ) -> RestResult<StageInstanceData> {
        let route = GET_STAGE_INSTANCE.compile(QueryValues::new(), &[&channel_id])?;
        self.rest_client.request(route, None, opts).await
    }

    pub async fn create_stage_instance(
        &self,
        stage_instance_create: &StageInstanceCreate,
        opts: &RequestOpts,
    ) -> RestResult<StageInstanceData> {
        let route = CREATE_STAGE_INSTANCE.compile(QueryValues::new(), &[])?;
        let body = encode_body(stage_instance_create)?;
        self.rest_client.request(route, Some(body), opts).await
    }

    pub async fn delete_stage_instance(
        &self,
        channel_id: ChannelId,
        opts: &RequestOpts,
    ) -> RestResult<()> {
        let route = DELETE_STAGE_INSTANCE.compile(QueryValues::new(), &[&channel_id])?;
        self.rest_client.request_discard(route, None, opts).await
    }
}
