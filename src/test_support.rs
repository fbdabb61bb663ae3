//! In-process harness for router tests.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower::ServiceExt;

use crate::config::Config;
use crate::reminders::ReminderScheduler;
use crate::services::{GeminiClient, RecipeClient};
use crate::store::{LocalStore, MemoryBackend, StorageBackend, StoreError};
use crate::AppState;

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(LocalStore::new(Arc::new(MemoryBackend::new())))
    }

    pub fn with_store(store: LocalStore) -> Self {
        let config = Arc::new(Config::for_tests());
        let (ws_tx, _) = broadcast::channel(16);

        let state = AppState {
            store,
            db: None,
            reminders: ReminderScheduler::new(),
            gemini: GeminiClient::from_config(&config),
            recipes: RecipeClient::from_config(&config),
            config,
            ws_tx: Some(ws_tx),
        };

        Self {
            router: crate::app(state.clone()),
            state,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }
}

/// Memory backend whose reads take `delay`, to widen read-modify-write windows.
#[derive(Clone)]
pub struct SlowReads {
    inner: MemoryBackend,
    delay: Duration,
}

impl SlowReads {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryBackend::new(),
            delay,
        }
    }
}

#[async_trait]
impl StorageBackend for SlowReads {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.write(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key).await
    }
}
