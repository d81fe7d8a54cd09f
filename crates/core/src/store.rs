//! The record store seam.
//!
//! The service only talks to persistence through [`IssueStore`], so the
//! PostgreSQL backend, the in-memory backend and test doubles are
//! interchangeable. Every method is a single store operation; the trait
//! makes no promise about atomicity across calls.

use async_trait::async_trait;

use crate::filter::IssueFilter;
use crate::issue::{Issue, IssueChanges, NewIssue};
use crate::types::IssueId;

/// Failure inside a record store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("record store failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend could not be reached in time.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Abstract persistence collaborator for issues.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Every issue matching `filter`, in the store's natural order.
    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError>;

    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, StoreError>;

    /// Persist a new issue. The store assigns the id.
    async fn insert(&self, issue: &NewIssue) -> Result<Issue, StoreError>;

    /// Merge `changes` onto the stored issue in one write.
    ///
    /// Returns `None` if no issue with `id` exists.
    async fn update_by_id(
        &self,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Option<Issue>, StoreError>;

    /// Hard-delete an issue. Returns `true` if a record was removed.
    async fn delete_by_id(&self, id: IssueId) -> Result<bool, StoreError>;

    /// Cheap liveness probe used by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}
