use std::time::Duration;

/// Per-request options passed through to the transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOpts {
    /// Audit log reason (`X-Audit-Log-Reason`)
    pub reason: Option<String>,
    pub headers: Vec<(String, String)>,
    /// Overrides the client-wide timeout
    pub timeout: Option<Duration>,
    /// Overrides the client-wide transport retry count
    pub max_retries: Option<u32>,
}

impl RequestOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}
