//! Issue entity, request DTOs and the partial-update merge.
//!
//! Request DTOs keep every field as a raw JSON value so that the create and
//! update rules (what counts as missing, what counts as sent, how `open` is
//! read) live here rather than in serde's error path.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{IssueId, Timestamp};

/// A stored issue, exactly as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: IssueId,
    pub project_title: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: Timestamp,
    pub updated_on: Timestamp,
}

/// A validated issue ready for insertion. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub project_title: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: Timestamp,
    pub updated_on: Timestamp,
}

impl NewIssue {
    /// Attach a store-assigned id, producing the stored record.
    pub fn into_issue(self, id: IssueId) -> Issue {
        Issue {
            id,
            project_title: self.project_title,
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            status_text: self.status_text,
            open: self.open,
            created_on: self.created_on,
            updated_on: self.updated_on,
        }
    }
}

/// The set of changes one partial update applies. `None` leaves a field as is.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueChanges {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
    pub updated_on: Timestamp,
}

impl IssueChanges {
    /// Merge these changes onto `issue` in place.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(v) = &self.issue_title {
            issue.issue_title.clone_from(v);
        }
        if let Some(v) = &self.issue_text {
            issue.issue_text.clone_from(v);
        }
        if let Some(v) = &self.created_by {
            issue.created_by.clone_from(v);
        }
        if let Some(v) = &self.assigned_to {
            issue.assigned_to.clone_from(v);
        }
        if let Some(v) = &self.status_text {
            issue.status_text.clone_from(v);
        }
        if let Some(open) = self.open {
            issue.open = open;
        }
        issue.updated_on = self.updated_on.max(issue.created_on);
    }
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /api/issues/{project}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateIssueRequest {
    pub issue_title: Option<Value>,
    pub issue_text: Option<Value>,
    pub created_by: Option<Value>,
    pub assigned_to: Option<Value>,
    pub status_text: Option<Value>,
}

impl CreateIssueRequest {
    /// Validate the request and build the record to insert.
    ///
    /// The three required fields must be non-empty strings. `open` is always
    /// `true` and both timestamps are `now`.
    pub fn into_new_issue(self, project: &str, now: Timestamp) -> Result<NewIssue, CoreError> {
        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            required_text(self.issue_title),
            required_text(self.issue_text),
            required_text(self.created_by),
        ) else {
            return Err(CoreError::MissingFields);
        };

        Ok(NewIssue {
            project_title: project.to_string(),
            issue_title,
            issue_text,
            created_by,
            assigned_to: sent_text(self.assigned_to.as_ref()).unwrap_or_default(),
            status_text: sent_text(self.status_text.as_ref()).unwrap_or_default(),
            open: true,
            created_on: now,
            updated_on: now,
        })
    }
}

/// Body of `PUT /api/issues/{project}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIssueRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<Value>,
    pub issue_title: Option<Value>,
    pub issue_text: Option<Value>,
    pub created_by: Option<Value>,
    pub assigned_to: Option<Value>,
    pub status_text: Option<Value>,
    pub open: Option<Value>,
}

impl UpdateIssueRequest {
    /// The target id as sent, or `None` when absent or empty.
    pub fn id(&self) -> Option<String> {
        id_text(self.id.as_ref())
    }

    /// Collect the fields this request changes.
    ///
    /// A field is sent when its key is present with a non-null value.
    /// Returns `None` when no update field was sent at all.
    ///
    /// `assigned_to` and `status_text` accept `""`, which clears them. An
    /// empty value for a required text field is sent but leaves the stored
    /// value in place, so those fields never become empty.
    pub fn changes(&self, now: Timestamp) -> Option<IssueChanges> {
        let any_sent = [
            &self.issue_title,
            &self.issue_text,
            &self.created_by,
            &self.assigned_to,
            &self.status_text,
            &self.open,
        ]
        .iter()
        .any(|field| field.is_some());

        any_sent.then(|| IssueChanges {
            issue_title: sent_text(self.issue_title.as_ref()),
            issue_text: sent_text(self.issue_text.as_ref()),
            created_by: sent_text(self.created_by.as_ref()),
            assigned_to: scalar_text(self.assigned_to.as_ref()),
            status_text: scalar_text(self.status_text.as_ref()),
            open: self.open.as_ref().map(coerce_open),
            updated_on: now,
        })
    }
}

/// Body of `DELETE /api/issues/{project}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteIssueRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<Value>,
}

impl DeleteIssueRequest {
    pub fn id(&self) -> Option<String> {
        id_text(self.id.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Read an incoming `open` value.
///
/// Only the literal string `"false"` closes an issue; every other value,
/// including boolean `false`, opens it.
pub fn coerce_open(value: &Value) -> bool {
    !matches!(value, Value::String(s) if s == "false")
}

fn required_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Non-empty text of a scalar value.
fn sent_text(value: Option<&Value>) -> Option<String> {
    scalar_text(value).filter(|s| !s.is_empty())
}

/// Text of a scalar value. Numbers and booleans are stringified; null and
/// structured values have none.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn id_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
