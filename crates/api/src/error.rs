use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use issuetracker_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for issue operation failures and adds transport
/// failures. Implements [`IntoResponse`] to produce the JSON error bodies
/// existing clients expect.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `issuetracker_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request body that could not be parsed at all.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(err) => core_error_response(&err),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({ "error": msg, "code": "BAD_REQUEST" })),
            )
                .into_response(),
        }
    }
}

/// Validation and not-found failures answer 200 with an `error` body, as
/// existing clients expect. Store failures answer 500; the cause is logged
/// and never sent.
fn core_error_response(err: &CoreError) -> Response {
    let status = match err.store_cause() {
        Some(cause) => {
            match err {
                CoreError::RetrievalFailed { project, .. }
                | CoreError::CreationFailed { project, .. } => {
                    tracing::error!(%project, error = %cause, "{err}");
                }
                _ => tracing::error!(id = ?err.echoed_id(), error = %cause, "{err}"),
            }
            StatusCode::INTERNAL_SERVER_ERROR
        }
        None => {
            tracing::debug!(id = ?err.echoed_id(), "{err}");
            StatusCode::OK
        }
    };

    let body = match err.echoed_id() {
        Some(id) => json!({ "error": err.to_string(), "_id": id }),
        None => json!({ "error": err.to_string() }),
    };

    (status, axum::Json(body)).into_response()
}
