//! Shared utilities for integration tests.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use backend_api::config::{ServiceConfig, Settings};
use backend_api::database::probe::{BoxError, ConnectionOpener, ProbeConnection};
use backend_api::http::HttpServer;

/// Settings resolved from a fixed set of variables instead of the process environment.
pub fn settings_from(pairs: &[(&str, &str)]) -> Arc<Settings> {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Arc::new(Settings::from_lookup(|key: &str| {
        pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }))
}

/// Router for the given settings with default service configuration.
#[allow(dead_code)]
pub fn router(settings: Arc<Settings>) -> Router {
    HttpServer::new(ServiceConfig::default(), settings).router()
}

/// Send a request through the router and decode the JSON body.
#[allow(dead_code)]
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

#[allow(dead_code)]
pub async fn get(router: Router, path: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(router, request).await
}

/// Opener with a scripted outcome that counts closed connections.
#[allow(dead_code)]
pub struct ScriptedOpener {
    pub fail_connect: bool,
    pub delay: Duration,
    pub closed: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl ScriptedOpener {
    pub fn reachable() -> Self {
        Self {
            fail_connect: false,
            delay: Duration::ZERO,
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_connect: true,
            ..Self::reachable()
        }
    }

    pub fn closed_count(&self) -> Arc<AtomicUsize> {
        self.closed.clone()
    }
}

struct ScriptedConnection {
    closed: Arc<AtomicUsize>,
}

impl Drop for ScriptedConnection {
    fn drop(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProbeConnection for ScriptedConnection {
    async fn ping(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

#[async_trait]
impl ConnectionOpener for ScriptedOpener {
    async fn open(
        &self,
        _connection_string: &str,
        _connect_timeout: Duration,
    ) -> Result<Box<dyn ProbeConnection>, BoxError> {
        tokio::time::sleep(self.delay).await;
        if self.fail_connect {
            return Err("connection refused".into());
        }
        Ok(Box::new(ScriptedConnection {
            closed: self.closed.clone(),
        }))
    }
}
