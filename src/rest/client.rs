use anyhow::Context as _;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serenity::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::error::{ApiError, RestError, RestResult};
use super::options::RequestOpts;
use crate::route::{CompiledRoute, RouteBase};

/// `DiscordBot (url, version)` as required by the API
const DISCORD_USER_AGENT: &str = concat!(
    "DiscordBot (",
    env!("CARGO_PKG_REPOSITORY"),
    ", ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Upper bound for the backoff between transport retries
const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Request executor
///
/// Implementations perform one logical exchange per call and must be safe
/// to share between concurrent callers.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Send `route` with an optional JSON body and validate the status
    ///
    /// # Returns
    ///
    /// * `Ok(bytes)` - Body of a success response (may be empty)
    /// * `Err(RestError::Api { .. })` - Non-success status with the remote error payload
    /// * `Err(RestError::Transport(_))` - Connection or timeout failure
    async fn execute(
        &self,
        route: CompiledRoute,
        body: Option<serde_json::Value>,
        opts: &RequestOpts,
    ) -> RestResult<Vec<u8>>;
}

impl dyn RestClient {
    /// Execute and decode the response body into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        route: CompiledRoute,
        body: Option<serde_json::Value>,
        opts: &RequestOpts,
    ) -> RestResult<T> {
        let bytes = self.execute(route, body, opts).await?;
        serde_json::from_slice(&bytes).map_err(RestError::Decode)
    }

    /// Execute and drop the response body after status validation
    pub async fn request_discard(
        &self,
        route: CompiledRoute,
        body: Option<serde_json::Value>,
        opts: &RequestOpts,
    ) -> RestResult<()> {
        self.execute(route, body, opts).await.map(|_| ())
    }
}

/// Serialize a request body for [`RestClient::execute`]
pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> RestResult<serde_json::Value> {
    serde_json::to_value(body).map_err(RestError::Encode)
}

/// Transport tuning for [`HttpRestClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Retries after a connect failure, or a timeout of an idempotent
    /// request (0 disables retrying)
    pub max_retries: u32,
    /// First backoff delay, doubled per retry
    pub retry_delay: Duration,
    /// Accept invalid TLS certificates
    pub insecure_mode: bool,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
            insecure_mode: false,
        }
    }
}

/// Executor backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpRestClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpRestClient {
    /// Create a new HttpRestClient
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL that API routes are appended to
    /// * `token` - Bot token, with or without the `Bot ` prefix
    /// * `settings` - Timeouts, retry policy and TLS mode
    pub fn new(
        api_url: Url,
        token: Option<String>,
        settings: &TransportSettings,
    ) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .danger_accept_invalid_certs(settings.insecure_mode)
            .build()
            .context("Building HTTP Client")?;

        let token = token.map(|t| t.strip_prefix("Bot ").unwrap_or(&t).to_string());

        Ok(Self {
            client,
            api_url: api_url.as_str().trim_end_matches('/').to_string(),
            token,
            max_retries: settings.max_retries,
            retry_delay: settings.retry_delay,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn resolve_url(&self, route: &CompiledRoute) -> String {
        match route.base() {
            RouteBase::Api => format!("{}{}", self.api_url, route.route()),
            RouteBase::InviteUrl => route.url(),
        }
    }

    fn build_request(
        &self,
        route: &CompiledRoute,
        url: &str,
        body: Option<&serde_json::Value>,
        opts: &RequestOpts,
    ) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(route.method().clone(), url)
            .header(USER_AGENT, DISCORD_USER_AGENT);

        if route.requires_auth() {
            if let Some(token) = &self.token {
                request = request.header(AUTHORIZATION, format!("Bot {token}"));
            }
        }
        if let Some(reason) = &opts.reason {
            request = request.header(
                "X-Audit-Log-Reason",
                utf8_percent_encode(reason, NON_ALPHANUMERIC).to_string(),
            );
        }
        for (name, value) in &opts.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = opts.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    async fn read_response(
        &self,
        route: &CompiledRoute,
        response: reqwest::Response,
    ) -> RestResult<Vec<u8>> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            debug!(%status, route = route.template(), len = bytes.len(), "API request succeeded");
            return Ok(bytes.to_vec());
        }

        let error = ApiError::from_body(&bytes);
        debug!(
            %status,
            route = route.template(),
            code = error.code,
            message = %error.message,
            "API request rejected"
        );
        Err(RestError::Api { status, error })
    }
}

/// Whether a failed send may be repeated without duplicating side effects
///
/// A timed out request may already have been processed, so only idempotent
/// methods retry on timeouts. Connect failures never reached the server.
fn is_retryable_failure(method: &Method, err: &reqwest::Error) -> bool {
    if err.is_connect() {
        return true;
    }
    err.is_timeout()
        && matches!(
            *method,
            Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS
        )
}

#[async_trait]
impl RestClient for HttpRestClient {
    async fn execute(
        &self,
        route: CompiledRoute,
        body: Option<serde_json::Value>,
        opts: &RequestOpts,
    ) -> RestResult<Vec<u8>> {
        let url = self.resolve_url(&route);
        let max_retries = opts.max_retries.unwrap_or(self.max_retries);
        let mut delay = self.retry_delay;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(
                attempt,
                method = %route.method(),
                route = route.template(),
                "Sending API request"
            );

            let request = self.build_request(&route, &url, body.as_ref(), opts);
            match request.send().await {
                Ok(response) => return self.read_response(&route, response).await,
                Err(err)
                    if attempt <= max_retries && is_retryable_failure(route.method(), &err) =>
                {
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        route = route.template(),
                        "Transport error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
                Err(err) => return Err(RestError::Transport(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{GET_VOICE_REGIONS, INVITE_URL, QueryValues};

    fn client(token: Option<&str>) -> HttpRestClient {
        HttpRestClient::new(
            Url::parse("https://example.com/api/v10/").unwrap(),
            token.map(str::to_string),
            &TransportSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_http_rest_client_creation_insecure() {
        let settings = TransportSettings {
            insecure_mode: true,
            ..TransportSettings::default()
        };
        let api_url = Url::parse("https://example.com").unwrap();
        let client = HttpRestClient::new(api_url, None, &settings);
        assert!(client.is_ok());
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        assert_eq!(client(None).api_url(), "https://example.com/api/v10");
    }

    #[test]
    fn test_token_prefix_normalized() {
        assert_eq!(client(Some("Bot abc")).token.as_deref(), Some("abc"));
        assert_eq!(client(Some("abc")).token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_resolve_url_per_base() {
        let client = client(None);
        let api = GET_VOICE_REGIONS.compile(QueryValues::new(), &[]).unwrap();
        let link = INVITE_URL.compile(QueryValues::new(), &[&"abc"]).unwrap();

        assert_eq!(client.resolve_url(&api), "https://example.com/api/v10/voice/regions");
        assert_eq!(client.resolve_url(&link), "https://discord.gg/abc");
    }
}
