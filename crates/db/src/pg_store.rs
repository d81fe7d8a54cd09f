//! PostgreSQL-backed [`IssueStore`].

use async_trait::async_trait;
use issuetracker_core::filter::IssueFilter;
use issuetracker_core::issue::{Issue, IssueChanges, NewIssue};
use issuetracker_core::store::{IssueStore, StoreError};
use issuetracker_core::types::IssueId;

use crate::repositories::IssueRepo;
use crate::DbPool;

/// Record store over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgIssueStore {
    pool: DbPool,
}

impl PgIssueStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Pool timeouts surface as `Unavailable`; everything else is a backend failure.
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => StoreError::Unavailable("connection pool timed out".into()),
        sqlx::Error::PoolClosed => StoreError::Unavailable("connection pool closed".into()),
        other => StoreError::backend(other),
    }
}

#[async_trait]
impl IssueStore for PgIssueStore {
    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let rows = IssueRepo::list(&self.pool, filter)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Issue::from).collect())
    }

    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, StoreError> {
        let row = IssueRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Issue::from))
    }

    async fn insert(&self, issue: &NewIssue) -> Result<Issue, StoreError> {
        let row = IssueRepo::create(&self.pool, issue)
            .await
            .map_err(store_error)?;
        Ok(row.into())
    }

    async fn update_by_id(
        &self,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Option<Issue>, StoreError> {
        let row = IssueRepo::update(&self.pool, id, changes)
            .await
            .map_err(store_error)?;
        Ok(row.map(Issue::from))
    }

    async fn delete_by_id(&self, id: IssueId) -> Result<bool, StoreError> {
        IssueRepo::hard_delete(&self.pool, id)
            .await
            .map_err(store_error)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}
