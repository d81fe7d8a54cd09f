//! In-process [`IssueStore`].
//!
//! Used when no database is configured and by the test suites. Each call
//! takes the lock once, so single operations are atomic; nothing spans
//! calls. Ids are UUID v7, so map order is creation order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use issuetracker_core::filter::IssueFilter;
use issuetracker_core::issue::{Issue, IssueChanges, NewIssue};
use issuetracker_core::store::{IssueStore, StoreError};
use issuetracker_core::types::IssueId;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryIssueStore {
    issues: RwLock<BTreeMap<IssueId, Issue>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored issues across all projects.
    pub async fn len(&self) -> usize {
        self.issues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.issues.read().await.is_empty()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let issues = self.issues.read().await;
        Ok(issues
            .values()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, StoreError> {
        Ok(self.issues.read().await.get(&id).cloned())
    }

    async fn insert(&self, issue: &NewIssue) -> Result<Issue, StoreError> {
        let mut issues = self.issues.write().await;
        let mut id = IssueId::generate();
        while issues.contains_key(&id) {
            id = IssueId::generate();
        }
        let stored = issue.clone().into_issue(id);
        issues.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_by_id(
        &self,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Option<Issue>, StoreError> {
        let mut issues = self.issues.write().await;
        Ok(issues.get_mut(&id).map(|issue| {
            changes.apply_to(issue);
            issue.clone()
        }))
    }

    async fn delete_by_id(&self, id: IssueId) -> Result<bool, StoreError> {
        Ok(self.issues.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
