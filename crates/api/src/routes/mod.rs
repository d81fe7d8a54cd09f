pub mod health;
pub mod issues;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /issues/{project}        list, create, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/issues", issues::router())
}
