use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serenity::model::id::ChannelId;
use tracing::debug;

use crate::adapters::{AudioController, NoAudioController};
use crate::cache::{CacheStrategy, Caches};
use crate::entity::{Channel, EntityBuilder, Invite};
use crate::rest::{RequestOpts, RestClient, RestResult, RestServices};

/// Shared state behind every entity of one client
///
/// Entities hold a `Weak` handle to this context. Once the last `Arc` is
/// dropped their requests fail with [`RestError::ContextDropped`].
///
/// [`RestError::ContextDropped`]: crate::rest::RestError::ContextDropped
pub struct ClientContext {
    rest: RestServices,
    caches: Caches,
    audio: Arc<dyn AudioController>,
    gateway_connected: AtomicBool,
}

impl ClientContext {
    pub fn new(rest_client: Arc<dyn RestClient>, audio: Arc<dyn AudioController>) -> Arc<Self> {
        Arc::new(Self {
            rest: RestServices::new(rest_client),
            caches: Caches::default(),
            audio,
            gateway_connected: AtomicBool::new(false),
        })
    }

    /// Context whose voice channels refuse to connect
    pub fn without_audio(rest_client: Arc<dyn RestClient>) -> Arc<Self> {
        Self::new(rest_client, Arc::new(NoAudioController))
    }

    pub fn rest(&self) -> &RestServices {
        &self.rest
    }

    pub fn caches(&self) -> &Caches {
        &self.caches
    }

    pub fn audio(&self) -> &Arc<dyn AudioController> {
        &self.audio
    }

    /// Whether a gateway session keeps the caches up to date
    pub fn gateway_connected(&self) -> bool {
        self.gateway_connected.load(Ordering::Acquire)
    }

    pub fn set_gateway_connected(&self, connected: bool) {
        self.gateway_connected.store(connected, Ordering::Release);
    }

    pub fn entity_builder(self: &Arc<Self>) -> EntityBuilder {
        EntityBuilder::new(Arc::clone(self))
    }

    /// Fetch a channel and wrap it as an entity
    pub async fn fetch_channel(
        self: &Arc<Self>,
        channel_id: ChannelId,
        opts: &RequestOpts,
    ) -> RestResult<Channel> {
        let data = self.rest.channels().get_channel(channel_id, opts).await?;
        Ok(self.entity_builder().create_channel(data, CacheStrategy::NoWs))
    }

    /// Resolve an invite code with member counts and expiration
    pub async fn fetch_invite(
        self: &Arc<Self>,
        code: &str,
        opts: &RequestOpts,
    ) -> RestResult<Invite> {
        let data = self.rest.invites().get_invite(code, true, true, opts).await?;
        Ok(self.entity_builder().create_invite(data))
    }

    /// Drop every cached entity
    pub fn shutdown(&self) {
        debug!(
            channels = self.caches.channels.len(),
            messages = self.caches.messages.len(),
            "Clearing entity caches"
        );
        self.caches.clear();
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("gateway_connected", &self.gateway_connected())
            .field("cached_channels", &self.caches.channels.len())
            .finish_non_exhaustive()
    }
}
