//! Route definitions for the `/issues` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::issues;
use crate::state::AppState;

/// Routes mounted at `/issues`.
///
/// ```text
/// GET    /{project}     -> list (query string is the filter)
/// POST   /{project}     -> create
/// PUT    /{project}     -> update (id in body)
/// DELETE /{project}     -> delete (id in body)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{project}",
        get(issues::list)
            .post(issues::create)
            .put(issues::update)
            .delete(issues::delete),
    )
}
