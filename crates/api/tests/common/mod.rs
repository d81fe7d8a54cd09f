#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use issuetracker_core::filter::IssueFilter;
use issuetracker_core::issue::{Issue, IssueChanges, NewIssue};
use issuetracker_core::service::IssueService;
use issuetracker_core::store::{IssueStore, StoreError};
use issuetracker_core::types::IssueId;
use tower::ServiceExt;

use issuetracker_api::config::{LogFormat, ServerConfig};
use issuetracker_api::router::build_app_router;
use issuetracker_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        db_connect_timeout_secs: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<dyn IssueStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

/// Like [`build_test_app`], with a caller-supplied configuration.
pub fn build_test_app_with_config(store: Arc<dyn IssueStore>, config: ServerConfig) -> Router {
    let state = AppState {
        issues: IssueService::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A store whose every operation fails, for exercising 500 paths.
pub struct FailingStore;

impl FailingStore {
    fn err() -> StoreError {
        StoreError::Unavailable("secret-host:5432 refused connection".into())
    }
}

#[async_trait]
impl IssueStore for FailingStore {
    async fn find_many(&self, _filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        Err(Self::err())
    }

    async fn find_by_id(&self, _id: IssueId) -> Result<Option<Issue>, StoreError> {
        Err(Self::err())
    }

    async fn insert(&self, _issue: &NewIssue) -> Result<Issue, StoreError> {
        Err(Self::err())
    }

    async fn update_by_id(
        &self,
        _id: IssueId,
        _changes: &IssueChanges,
    ) -> Result<Option<Issue>, StoreError> {
        Err(Self::err())
    }

    async fn delete_by_id(&self, _id: IssueId) -> Result<bool, StoreError> {
        Err(Self::err())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(Self::err())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

pub async fn delete_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::DELETE, uri, body).await
}

pub async fn form_request(app: Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
