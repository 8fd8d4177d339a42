//! Common test utilities and fixtures for integration tests

#![allow(dead_code, clippy::expect_used)]

use afrifiscal_core::Config;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use std::sync::Once;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub mod fixtures;

pub use fixtures::*;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Test configuration builder
pub struct TestConfigBuilder {
    config: Config,
}

impl TestConfigBuilder {
    /// Create a new test configuration builder
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Point the API client at a mock server
    pub fn with_api(mut self, server: &MockServer) -> Self {
        self.config.api.base_url = format!("{}/api", server.uri());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.api.timeout_seconds = seconds;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve `body` as JSON for `GET /api{endpoint}`
pub async fn mount_json(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer `GET /api{endpoint}` with a bare status code
pub async fn mount_status(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/api{endpoint}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Dashboard router talking to a mock analytics API
pub fn test_app(server: &MockServer) -> Router {
    let config = TestConfigBuilder::new().with_api(server).build();
    afrifiscal_web::build_app(config).expect("app builds")
}

/// Issue a GET against the router and collect status, content type and body
pub async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let (status, headers, body) = get_with_headers(app, uri).await;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    (status, content_type, body)
}

/// Issue a GET against the router and collect status, headers and body
pub async fn get_with_headers(app: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("valid request"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");

    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}
