use reqwest::{Method, StatusCode};
use routecord::rest::{ApiError, RequestOpts, RestClient, RestError, RestResult};
use routecord::route::CompiledRoute;
use serde_json::Value;
use serenity::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One request as seen by the executor
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    /// Path plus query
    pub route: String,
    pub requires_auth: bool,
    pub body: Option<Value>,
    #[allow(dead_code)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    Empty,
    Api { status: u16, body: Value },
}

/// Executor that records calls and replays queued responses
///
/// With the queue empty every call succeeds with an empty body.
#[derive(Default)]
pub struct MockRestClient {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<MockResponse>>,
}

impl MockRestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: 応答を1件積んだMockRestClientを作成
    pub fn with_response(response: MockResponse) -> Self {
        let mock = Self::new();
        mock.push_response(response);
        mock
    }

    pub fn push_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RestClient for MockRestClient {
    async fn execute(
        &self,
        route: CompiledRoute,
        body: Option<Value>,
        opts: &RequestOpts,
    ) -> RestResult<Vec<u8>> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: route.method().clone(),
            route: route.route(),
            requires_auth: route.requires_auth(),
            body,
            reason: opts.reason.clone(),
        });

        let response = self.responses.lock().unwrap().pop_front();
        match response {
            Some(MockResponse::Json(value)) => Ok(serde_json::to_vec(&value).unwrap()),
            Some(MockResponse::Empty) | None => Ok(Vec::new()),
            Some(MockResponse::Api { status, body }) => Err(RestError::Api {
                status: StatusCode::from_u16(status).unwrap(),
                error: ApiError::from_body(&serde_json::to_vec(&body).unwrap()),
            }),
        }
    }
}
