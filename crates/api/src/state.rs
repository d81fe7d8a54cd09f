use std::sync::Arc;

use issuetracker_core::service::IssueService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Issue operations over the configured record store.
    pub issues: IssueService,
    pub config: Arc<ServerConfig>,
}
