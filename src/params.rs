use anyhow::Context as _;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::rest::TransportSettings;
use crate::route::RouteBase;

fn default_api_url() -> String {
    RouteBase::Api.default_url().to_string()
}

/// Default HTTP request timeout in seconds
fn default_http_timeout() -> u64 {
    30
}

/// Default HTTP connection timeout in seconds
fn default_http_connect_timeout() -> u64 {
    10
}

/// Default number of transport retries per request
fn default_max_retries() -> u32 {
    3
}

/// Default first retry delay in milliseconds
fn default_retry_delay_ms() -> u64 {
    500
}

#[derive(Deserialize, Clone)]
pub struct Params {
    pub discord_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub insecure_mode: bool,

    // HTTP Client Configuration
    #[serde(default = "default_http_timeout")]
    pub http_timeout: u64,
    #[serde(default = "default_http_connect_timeout")]
    pub http_connect_timeout: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Invite code resolved at startup
    #[serde(default)]
    pub invite_code: Option<String>,
}

/// Mask sensitive strings by showing only first and last few characters
fn mask_token(s: &str) -> String {
    const VISIBLE_CHARS: usize = 4;

    if s.len() <= VISIBLE_CHARS * 2 {
        // If string is too short, mask everything except first char
        return match s.chars().next() {
            Some(first) => format!("{first}***"),
            None => "<empty>".to_string(),
        };
    }

    match (s.get(..VISIBLE_CHARS), s.get(s.len() - VISIBLE_CHARS..)) {
        (Some(head), Some(tail)) => format!("{head}***{tail}"),
        _ => "***".to_string(),
    }
}

impl std::fmt::Debug for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("discord_token", &mask_token(&self.discord_token))
            .field("api_url", &self.api_url)
            .field("insecure_mode", &self.insecure_mode)
            .field("http_timeout", &self.http_timeout)
            .field("http_connect_timeout", &self.http_connect_timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("invite_code", &self.invite_code)
            .finish()
    }
}

impl Params {
    pub fn new() -> anyhow::Result<Params> {
        envy::from_env::<Params>().context("Failed to load configuration")
    }

    pub fn api_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api_url).context("Parsing API_URL")
    }

    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            timeout: Duration::from_secs(self.http_timeout),
            connect_timeout: Duration::from_secs(self.http_connect_timeout),
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            insecure_mode: self.insecure_mode,
        }
    }
}
