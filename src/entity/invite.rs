use std::fmt;
use std::sync::Weak;
use tracing::debug;

use super::live_context;
use crate::context::ClientContext;
use crate::model::InviteData;
use crate::rest::{RequestOpts, RestResult};
use crate::route::{INVITE_URL, QueryValues};

/// Invite bound to a client context
#[derive(Clone)]
pub struct Invite {
    data: InviteData,
    context: Weak<ClientContext>,
}

impl Invite {
    pub(crate) fn new(data: InviteData, context: Weak<ClientContext>) -> Self {
        Self { data, context }
    }

    pub fn code(&self) -> &str {
        &self.data.code
    }

    pub fn data(&self) -> &InviteData {
        &self.data
    }

    /// Public invite link, e.g. `https://discord.gg/abc`
    ///
    /// Computed from the code on every call. Returns an empty string when
    /// the code cannot form a link.
    pub fn url(&self) -> String {
        match INVITE_URL.compile(QueryValues::new(), &[&self.data.code]) {
            Ok(route) => route.url(),
            Err(err) => {
                debug!(code = %self.data.code, error = %err, "Failed to build invite URL");
                String::new()
            }
        }
    }

    /// Delete this invite, returning it as the API last saw it
    pub async fn delete(&self, opts: &RequestOpts) -> RestResult<Invite> {
        let context = live_context(&self.context)?;
        let data = context
            .rest()
            .invites()
            .delete_invite(&self.data.code, opts)
            .await?;
        Ok(context.entity_builder().create_invite(data))
    }
}

impl fmt::Debug for Invite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invite")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
