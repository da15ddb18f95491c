// Common test utilities and helpers

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::config::Config;
use crate::services::llm::{CompletionRequest, LLMClient, LLMError};
use crate::{AppState, build_router};

/// Provider stand-in that records requests and replays a fixed outcome
pub struct FakeLLMClient {
    reply: Result<String, LLMError>,
    configured: bool,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl FakeLLMClient {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(answer.to_string()), configured: true, calls: Mutex::default() })
    }

    pub fn failing(error: LLMError) -> Arc<Self> {
        Arc::new(Self { reply: Err(error), configured: true, calls: Mutex::default() })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(LLMError::Authentication),
            configured: false,
            calls: Mutex::default(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LLMClient for FakeLLMClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LLMError> {
        self.calls.lock().unwrap().push(request.clone());
        self.reply.clone()
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Defaults, with paths relative to the crate root where tests run
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.content.dir = "content".to_string();
    config.static_config.web_root = "static".to_string();
    config
}

pub fn test_app(client: Arc<FakeLLMClient>) -> Router {
    test_app_with(test_config(), client)
}

pub fn test_app_with(config: Config, client: Arc<FakeLLMClient>) -> Router {
    build_router(Arc::new(AppState::new(config, client)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse { status, headers, body }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_in(app: Router, uri: &str, body: &str, accept_language: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT_LANGUAGE, accept_language)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
