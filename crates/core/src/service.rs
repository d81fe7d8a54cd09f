//! The issue resource service: list, create, update, delete.
//!
//! Stateless between calls; the only shared resource is the record store
//! handed in at construction.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::error::CoreError;
use crate::filter::IssueFilter;
use crate::issue::{CreateIssueRequest, DeleteIssueRequest, Issue, UpdateIssueRequest};
use crate::store::IssueStore;
use crate::types::IssueId;

/// Confirmation body for successful update and delete calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub result: &'static str,
    #[serde(rename = "_id")]
    pub id: String,
}

impl Confirmation {
    fn updated(id: String) -> Self {
        Self {
            result: "successfully updated",
            id,
        }
    }

    fn deleted(id: String) -> Self {
        Self {
            result: "successfully deleted",
            id,
        }
    }
}

/// Issue operations over an injected [`IssueStore`].
#[derive(Clone)]
pub struct IssueService {
    store: Arc<dyn IssueStore>,
}

impl IssueService {
    pub fn new(store: Arc<dyn IssueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn IssueStore> {
        &self.store
    }

    /// Every issue in `project` matching all query pairs.
    pub async fn list<I, K, V>(&self, project: &str, query: I) -> Result<Vec<Issue>, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let filter = IssueFilter::from_query(project, query);
        if filter.unsatisfiable {
            return Ok(Vec::new());
        }

        let issues = self
            .store
            .find_many(&filter)
            .await
            .map_err(|source| CoreError::RetrievalFailed {
                project: project.to_string(),
                source,
            })?;

        tracing::debug!(project, count = issues.len(), "Listed issues");
        Ok(issues)
    }

    /// Validate and persist a new issue, returning the stored record.
    pub async fn create(
        &self,
        project: &str,
        request: CreateIssueRequest,
    ) -> Result<Issue, CoreError> {
        let new_issue = request.into_new_issue(project, Utc::now())?;

        let issue = self
            .store
            .insert(&new_issue)
            .await
            .map_err(|source| CoreError::CreationFailed {
                project: project.to_string(),
                source,
            })?;

        tracing::info!(project, id = %issue.id, "Issue created");
        Ok(issue)
    }

    /// Apply a partial update.
    ///
    /// Checks run in a fixed order: missing id, then no fields sent, then
    /// unknown id. The merge is a single store write.
    pub async fn update(&self, request: UpdateIssueRequest) -> Result<Confirmation, CoreError> {
        let id_text = request.id().ok_or(CoreError::MissingId)?;

        let Some(changes) = request.changes(Utc::now()) else {
            return Err(CoreError::NoUpdateFields { id: id_text });
        };

        let Ok(id) = id_text.parse::<IssueId>() else {
            return Err(CoreError::UpdateFailed {
                id: id_text,
                source: None,
            });
        };

        match self.store.update_by_id(id, &changes).await {
            Ok(Some(_)) => {
                tracing::info!(%id, "Issue updated");
                Ok(Confirmation::updated(id_text))
            }
            Ok(None) => Err(CoreError::UpdateFailed {
                id: id_text,
                source: None,
            }),
            Err(source) => Err(CoreError::UpdateFailed {
                id: id_text,
                source: Some(source),
            }),
        }
    }

    /// Hard-delete an issue.
    pub async fn delete(&self, request: DeleteIssueRequest) -> Result<Confirmation, CoreError> {
        let id_text = request.id().ok_or(CoreError::MissingId)?;

        let not_found = |id: String| CoreError::DeleteFailed { id, source: None };
        let Ok(id) = id_text.parse::<IssueId>() else {
            return Err(not_found(id_text));
        };

        match self.store.delete_by_id(id).await {
            Ok(true) => {
                tracing::info!(%id, "Issue deleted");
                Ok(Confirmation::deleted(id_text))
            }
            Ok(false) => Err(not_found(id_text)),
            Err(source) => Err(CoreError::DeleteFailed {
                id: id_text,
                source: Some(source),
            }),
        }
    }
}
