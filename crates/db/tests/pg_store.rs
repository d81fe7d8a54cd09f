//! Integration tests for the PostgreSQL record store.
//!
//! Need a live database (`DATABASE_URL`); run with `cargo test -- --ignored`.

use chrono::Utc;
use issuetracker_core::filter::IssueFilter;
use issuetracker_core::issue::{IssueChanges, NewIssue};
use issuetracker_core::store::IssueStore;
use issuetracker_core::types::IssueId;
use issuetracker_db::PgIssueStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_issue(project: &str, created_by: &str) -> NewIssue {
    let now = Utc::now();
    NewIssue {
        project_title: project.to_string(),
        issue_title: "Test Issue".to_string(),
        issue_text: "This is a test issue.".to_string(),
        created_by: created_by.to_string(),
        assigned_to: String::new(),
        status_text: String::new(),
        open: true,
        created_on: now,
        updated_on: now,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn insert_and_find_by_id(pool: PgPool) {
    let store = PgIssueStore::new(pool);
    let created = store.insert(&new_issue("apitest", "Alma")).await.unwrap();

    let found = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.issue_title, "Test Issue");
    assert_eq!(found.project_title, "apitest");
    assert!(found.open);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_many_filters_by_project_and_fields(pool: PgPool) {
    let store = PgIssueStore::new(pool);
    store.insert(&new_issue("apitest", "Alma")).await.unwrap();
    store.insert(&new_issue("apitest", "Bob")).await.unwrap();
    store.insert(&new_issue("elsewhere", "Alma")).await.unwrap();

    let all = store
        .find_many(&IssueFilter::for_project("apitest"))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filter =
        IssueFilter::from_query("apitest", [("created_by", "Alma"), ("open", "true")]);
    let matching = store.find_many(&filter).await.unwrap();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].created_by, "Alma");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_is_a_partial_merge(pool: PgPool) {
    let store = PgIssueStore::new(pool);
    let created = store.insert(&new_issue("apitest", "Alma")).await.unwrap();

    let changes = IssueChanges {
        issue_title: Some("Beautiful title".to_string()),
        issue_text: None,
        created_by: None,
        assigned_to: None,
        status_text: None,
        open: Some(false),
        updated_on: Utc::now(),
    };
    let updated = store
        .update_by_id(created.id, &changes)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.issue_title, "Beautiful title");
    assert_eq!(updated.issue_text, created.issue_text);
    assert!(!updated.open);
    assert_eq!(updated.created_on, created.created_on);
    assert!(updated.updated_on >= created.updated_on);

    let missing = store
        .update_by_id(IssueId::generate(), &changes)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn delete_removes_the_row(pool: PgPool) {
    let store = PgIssueStore::new(pool);
    let created = store.insert(&new_issue("apitest", "Alma")).await.unwrap();

    assert!(store.delete_by_id(created.id).await.unwrap());
    assert!(!store.delete_by_id(created.id).await.unwrap());
    assert!(store.find_by_id(created.id).await.unwrap().is_none());
}
