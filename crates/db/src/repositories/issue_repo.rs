//! Repository for the `issues` table.

use issuetracker_core::filter::{Condition, IssueFilter};
use issuetracker_core::issue::{IssueChanges, NewIssue};
use issuetracker_core::types::IssueId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::issue::IssueRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_title, issue_title, issue_text, created_by, \
                       assigned_to, status_text, open, created_on, updated_on";

/// Provides CRUD operations for issues.
pub struct IssueRepo;

impl IssueRepo {
    /// Insert a new issue under a freshly generated id, returning the row.
    pub async fn create(pool: &PgPool, input: &NewIssue) -> Result<IssueRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO issues (id, project_title, issue_title, issue_text, created_by,
                                 assigned_to, status_text, open, created_on, updated_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IssueRow>(&query)
            .bind(IssueId::generate().as_uuid())
            .bind(&input.project_title)
            .bind(&input.issue_title)
            .bind(&input.issue_text)
            .bind(&input.created_by)
            .bind(&input.assigned_to)
            .bind(&input.status_text)
            .bind(input.open)
            .bind(input.created_on)
            .bind(input.updated_on)
            .fetch_one(pool)
            .await
    }

    /// Find an issue by id.
    pub async fn find_by_id(pool: &PgPool, id: IssueId) -> Result<Option<IssueRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issues WHERE id = $1");
        sqlx::query_as::<_, IssueRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(pool)
            .await
    }

    /// List issues in the filter's project matching every condition,
    /// oldest first.
    pub async fn list(pool: &PgPool, filter: &IssueFilter) -> Result<Vec<IssueRow>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM issues WHERE project_title = "));
        builder.push_bind(filter.project_title.clone());

        for condition in &filter.conditions {
            match condition {
                Condition::Id(id) => {
                    builder.push(" AND id = ").push_bind(id.as_uuid());
                }
                Condition::Text(field, value) => {
                    builder
                        .push(format_args!(" AND {} = ", field.name()))
                        .push_bind(value.clone());
                }
                Condition::Open(open) => {
                    builder.push(" AND open = ").push_bind(*open);
                }
                Condition::CreatedOn(ts) => {
                    builder.push(" AND created_on = ").push_bind(*ts);
                }
                Condition::UpdatedOn(ts) => {
                    builder.push(" AND updated_on = ").push_bind(*ts);
                }
            }
        }

        builder.push(" ORDER BY created_on, id");
        builder.build_query_as::<IssueRow>().fetch_all(pool).await
    }

    /// Merge `changes` onto an issue in a single statement.
    ///
    /// Only non-`None` fields are applied. `updated_on` never drops below
    /// `created_on`. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Option<IssueRow>, sqlx::Error> {
        let query = format!(
            "UPDATE issues SET
                issue_title = COALESCE($2, issue_title),
                issue_text = COALESCE($3, issue_text),
                created_by = COALESCE($4, created_by),
                assigned_to = COALESCE($5, assigned_to),
                status_text = COALESCE($6, status_text),
                open = COALESCE($7, open),
                updated_on = GREATEST($8, created_on)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IssueRow>(&query)
            .bind(id.as_uuid())
            .bind(&changes.issue_title)
            .bind(&changes.issue_text)
            .bind(&changes.created_by)
            .bind(&changes.assigned_to)
            .bind(&changes.status_text)
            .bind(changes.open)
            .bind(changes.updated_on)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an issue by id. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: IssueId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id.as_uuid())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
