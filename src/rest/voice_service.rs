use std::sync::Arc;

use super::{RequestOpts, RestClient, RestResult};
use crate::model::VoiceRegion;
use crate::route::{GET_VOICE_REGIONS, QueryValues};

#[derive(Clone)]
pub struct VoiceService {
    rest_client: Arc<dyn RestClient>,
}

impl VoiceService {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }

    /// List regions usable when setting a voice or stage channel's `rtc_region`
    pub async fn get_voice_regions(&self, opts: &RequestOpts) -> RestResult<Vec<VoiceRegion>> {
        let route = GET_VOICE_REGIONS.compile(QueryValues::new(), &[])?;
        self.rest_client.request(route, None, opts).await
    }
}
