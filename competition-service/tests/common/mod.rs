//! Shared setup for competition-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use competition_service::{
    build_router,
    config::{CompetitionConfig, Environment, SwaggerConfig},
    services::{EntryGateway, MemoryEntryStore},
    AppState,
};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config() -> CompetitionConfig {
    CompetitionConfig {
        common: CoreConfig { port: 0 },
        environment: Environment::Dev,
        service_name: "competition-service-test".to_string(),
        service_version: "0.0.0-test".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        database: None,
        swagger: SwaggerConfig { enabled: false },
    }
}

/// Router wired to an in-memory store that the test can inspect.
pub struct TestApp {
    pub router: Router,
    pub store: Option<Arc<MemoryEntryStore>>,
}

impl TestApp {
    pub fn with_memory_store() -> Self {
        let store = Arc::new(MemoryEntryStore::new("competition_test"));
        let state = AppState {
            config: test_config(),
            entries: EntryGateway::new(store.clone()),
        };

        Self {
            router: build_router(state),
            store: Some(store),
        }
    }

    pub fn without_store() -> Self {
        let state = AppState {
            config: test_config(),
            entries: EntryGateway::unconfigured(),
        };

        Self {
            router: build_router(state),
            store: None,
        }
    }

    pub fn store(&self) -> &MemoryEntryStore {
        self.store.as_deref().expect("test app has no store")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Response headers only; the body may not be JSON.
    pub async fn headers(&self, uri: &str) -> (StatusCode, HeaderMap) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .expect("Failed to execute request");

        (response.status(), response.headers().clone())
    }

    pub async fn count(&self) -> u64 {
        let (status, body) = self.get("/api/competition/entries/count").await;
        assert_eq!(status, StatusCode::OK);
        body["count"].as_u64().expect("count should be an integer")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };

        (status, json)
    }
}
