#![allow(dead_code)]

/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Router built over an in-memory store
/// - Request helpers that carry the session cookie
/// - Waiting for detached access log writes

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use cinelog_api::app::{build_router, AppState, SESSION_COOKIE_NAME};
use cinelog_api::config::Config;
use cinelog_shared::access_logger::AccessLogger;
use cinelog_shared::store::InMemoryStore;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub app: Router,
    pub logger: AccessLogger,
}

/// Configuration used by every router test
pub fn test_config() -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("DATABASE_URL", "postgresql://unused/cinelog".to_string()),
        ("SESSION_SECRET", "test-session-secret-".repeat(4)),
        (
            "PUBLIC_DIR",
            concat!(env!("CARGO_MANIFEST_DIR"), "/public").to_string(),
        ),
    ]);

    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

impl TestContext {
    /// Creates a new test context with an empty store
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Creates a test context with an adjusted configuration
    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(store.clone(), config);
        let logger = state.access_logger.clone();
        let app = build_router(state).unwrap();

        TestContext { store, app, logger }
    }

    /// Sends a request through the full middleware stack
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().call(request).await.unwrap()
    }

    /// GET with an optional session cookie
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// DELETE with an optional session cookie
    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// POST a JSON body with an optional session cookie
    pub async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Registers an account and asserts it was created
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .post_json(
                "/auth/register",
                serde_json::json!({ "username": username, "password": password }),
                None,
            )
            .await;
        let body = body_json(response).await;
        assert_eq!(body["success"], true, "register failed: {}", body);
    }

    /// Logs in and returns the session cookie (`name=value`)
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/auth/login",
                serde_json::json!({ "username": username, "password": password }),
                None,
            )
            .await;
        let cookie = session_cookie(&response).expect("login did not set a session cookie");
        let body = body_json(response).await;
        assert_eq!(body["success"], true, "login failed: {}", body);
        cookie
    }

    /// Waits until every dispatched access log write has finished
    pub async fn settle(&self) {
        let logger = &self.logger;
        wait_for(|| async move { logger.pending() == 0 }, 5)
            .await
            .unwrap();
    }
}

/// Extracts the session cookie pair from a `Set-Cookie` header
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{}=", SESSION_COOKIE_NAME)))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Reads a response body as JSON
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Reads a response body as text
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Helper to wait for condition with timeout
pub async fn wait_for<F, Fut>(
    condition: F,
    timeout_secs: u64,
) -> anyhow::Result<()>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_secs(timeout_secs);

    loop {
        if condition().await {
            return Ok(());
        }

        if start.elapsed() > timeout {
            anyhow::bail!("Condition not met within {} seconds", timeout_secs);
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }
}
