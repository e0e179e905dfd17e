use serenity::model::id::{ChannelId, GuildId};
use std::sync::Arc;
use tracing::debug;

use super::{RequestOpts, RestClient, RestResult, encode_body};
use crate::model::{InviteCreate, InviteData};
use crate::route::{
    CREATE_INVITE, DELETE_INVITE, GET_CHANNEL_INVITES, GET_GUILD_INVITES, GET_INVITE,
    QueryValues,
};

#[derive(Clone)]
pub struct InviteService {
    rest_client: Arc<dyn RestClient>,
}

impl InviteService {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }

    /// Resolve an invite by code
    ///
    /// # Arguments
    ///
    /// * `with_counts` - Include approximate member and presence counts
    /// * `with_expiration` - Include the expiration date
    pub async fn get_invite(
        &self,
        code: &str,
        with_counts: bool,
        with_expiration: bool,
        opts: &RequestOpts,
    ) -> RestResult<InviteData> {
        let mut query = QueryValues::new();
        if with_counts {
            query.insert("with_counts", true);
        }
        if with_expiration {
            query.insert("with_expiration", true);
        }
        let route = GET_INVITE.compile(query, &[&code])?;
        self.rest_client.request(route, None, opts).await
    }

    pub async fn create_invite(
        &self,
        channel_id: ChannelId,
        invite_create: &InviteCreate,
        opts: &RequestOpts,
    ) -> RestResult<InviteData> {
        let route = CREATE_INVITE.compile(QueryValues::new(), &[&channel_id])?;
        let body = encode_body(invite_create)?;
        let invite: InviteData = self.rest_client.request(route, Some(body), opts).await?;
        debug!(%channel_id, code = %invite.code, "Invite created");
        Ok(invite)
    }

    /// Delete an invite, returning it as it was
    pub async fn delete_invite(&self, code: &str, opts: &RequestOpts) -> RestResult<InviteData> {
        let route = DELETE_INVITE.compile(QueryValues::new(), &[&code])?;
        self.rest_client.request(route, None, opts).await
    }

    pub async fn get_guild_invites(
        &self,
        guild_id: GuildId,
        opts: &RequestOpts,
    ) -> RestResult<Vec<InviteData>> {
        let route = GET_GUILD_INVITES.compile(QueryValues::new(), &[&guild_id])?;
        self.rest_client.request(route, None, opts).await
    }

    pub async fn get_channel_invites(
        &self,
        channel_id: ChannelId,
        opts: &RequestOpts,
    ) -> RestResult<Vec<InviteData>> {
        let route = GET_CHANNEL_INVITES.compile(QueryValues::new(), &[&channel_id])?;
        self.rest_client.request(route, None, opts).await
    }
}
