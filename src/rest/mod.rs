//! Request pipeline and resource services
//!
//! Every service operation compiles exactly one route and hands it to the
//! shared [`RestClient`]. Errors are returned unchanged.

pub mod channel_service;
pub mod client;
pub mod error;
pub mod invite_service;
pub mod options;
pub mod stage_instance_service;
pub mod voice_service;
pub mod webhook_service;

pub use channel_service::ChannelService;
pub use client::{HttpRestClient, RestClient, TransportSettings, encode_body};
pub use error::{ApiError, RestError, RestResult};
pub use invite_service::InviteService;
pub use options::RequestOpts;
pub use stage_instance_service::StageInstanceService;
pub use voice_service::VoiceService;
pub use webhook_service::WebhookService;

use std::sync::Arc;

/// All resource services sharing one executor
#[derive(Clone)]
pub struct RestServices {
    rest_client: Arc<dyn RestClient>,
    channels: ChannelService,
    invites: InviteService,
    stage_instances: StageInstanceService,
    voice: VoiceService,
    webhooks: WebhookService,
}

impl RestServices {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self {
            channels: ChannelService::new(rest_client.clone()),
            invites: InviteService::new(rest_client.clone()),
            stage_instances: StageInstanceService::new(rest_client.clone()),
            voice: VoiceService::new(rest_client.clone()),
            webhooks: WebhookService::new(rest_client.clone()),
            rest_client,
        }
    }

    pub fn rest_client(&self) -> &Arc<dyn RestClient> {
        &self.rest_client
    }

    pub fn channels(&self) -> &ChannelService {
        &self.channels
    }

    pub fn invites(&self) -> &InviteService {
        &self.invites
    }

    pub fn stage_instances(&self) -> &StageInstanceService {
        &self.stage_instances
    }

    pub fn voice(&self) -> &VoiceService {
        &self.voice
    }

    pub fn webhooks(&self) -> &WebhookService {
        &self.webhooks
    }
}
