//! Handlers for the `/issues/{project}` resource.
//!
//! Every operation is scoped by the `{project}` path segment; update and
//! delete address the record by the id in the body.

use axum::extract::{Path, Query, State};
use axum::Json;
use issuetracker_core::issue::{CreateIssueRequest, DeleteIssueRequest, Issue, UpdateIssueRequest};
use issuetracker_core::service::Confirmation;

use crate::error::AppResult;
use crate::extract::JsonOrForm;
use crate::state::AppState;

/// GET /api/issues/{project}
pub async fn list(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<Issue>>> {
    tracing::debug!(%project, filters = params.len(), "Listing issues");
    let issues = state.issues.list(&project, params).await?;
    Ok(Json(issues))
}

/// POST /api/issues/{project}
pub async fn create(
    State(state): State<AppState>,
    Path(project): Path<String>,
    JsonOrForm(input): JsonOrForm<CreateIssueRequest>,
) -> AppResult<Json<Issue>> {
    tracing::debug!(%project, "Creating issue");
    let issue = state.issues.create(&project, input).await?;
    Ok(Json(issue))
}

/// PUT /api/issues/{project}
pub async fn update(
    State(state): State<AppState>,
    Path(project): Path<String>,
    JsonOrForm(input): JsonOrForm<UpdateIssueRequest>,
) -> AppResult<Json<Confirmation>> {
    tracing::debug!(%project, "Updating issue");
    let confirmation = state.issues.update(input).await?;
    Ok(Json(confirmation))
}

/// DELETE /api/issues/{project}
pub async fn delete(
    State(state): State<AppState>,
    Path(project): Path<String>,
    JsonOrForm(input): JsonOrForm<DeleteIssueRequest>,
) -> AppResult<Json<Confirmation>> {
    tracing::debug!(%project, "Deleting issue");
    let confirmation = state.issues.delete(input).await?;
    Ok(Json(confirmation))
}
