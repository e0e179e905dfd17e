//! Client-bound entities
//!
//! Entities wrap a wire model together with a weak handle to the
//! [`ClientContext`] they were built from, so they can issue follow-up
//! requests and resolve related entities from the cache. Cached entities do
//! not keep the context alive.

pub mod builder;
pub mod channel;
pub mod invite;
pub mod message;
pub mod stage_instance;

pub use builder::EntityBuilder;
pub use channel::{Capability, Channel};
pub use invite::Invite;
pub use message::Message;
pub use stage_instance::StageInstance;

use std::sync::{Arc, Weak};

use crate::context::ClientContext;
use crate::rest::{RestError, RestResult};

fn live_context(context: &Weak<ClientContext>) -> RestResult<Arc<ClientContext>> {
    context.upgrade().ok_or(RestError::ContextDropped)
}
