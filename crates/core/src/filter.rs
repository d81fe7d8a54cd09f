//! Query-string filters for the list operation.
//!
//! Query values arrive as strings. Each recognised key is coerced to the
//! stored field's type the way a document store casts query values; a key
//! that names no field, or a value that cannot be cast, makes the whole
//! filter unsatisfiable so the list comes back empty.

use crate::issue::Issue;
use crate::types::{IssueId, Timestamp};

/// Text-valued issue fields that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    IssueTitle,
    IssueText,
    CreatedBy,
    AssignedTo,
    StatusText,
}

impl TextField {
    /// Column / wire name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Self::IssueTitle => "issue_title",
            Self::IssueText => "issue_text",
            Self::CreatedBy => "created_by",
            Self::AssignedTo => "assigned_to",
            Self::StatusText => "status_text",
        }
    }

    fn value(self, issue: &Issue) -> &str {
        match self {
            Self::IssueTitle => &issue.issue_title,
            Self::IssueText => &issue.issue_text,
            Self::CreatedBy => &issue.created_by,
            Self::AssignedTo => &issue.assigned_to,
            Self::StatusText => &issue.status_text,
        }
    }
}

/// One exact-equality condition on a stored field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Id(IssueId),
    Text(TextField, String),
    Open(bool),
    CreatedOn(Timestamp),
    UpdatedOn(Timestamp),
}

impl Condition {
    fn parse(key: &str, value: &str) -> Option<Self> {
        let text = |field| Some(Self::Text(field, value.to_string()));
        match key {
            "_id" => value.parse().ok().map(Self::Id),
            "issue_title" => text(TextField::IssueTitle),
            "issue_text" => text(TextField::IssueText),
            "created_by" => text(TextField::CreatedBy),
            "assigned_to" => text(TextField::AssignedTo),
            "status_text" => text(TextField::StatusText),
            "open" => match value {
                "true" => Some(Self::Open(true)),
                "false" => Some(Self::Open(false)),
                _ => None,
            },
            "created_on" => parse_timestamp(value).map(Self::CreatedOn),
            "updated_on" => parse_timestamp(value).map(Self::UpdatedOn),
            _ => None,
        }
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        match self {
            Self::Id(id) => issue.id == *id,
            Self::Text(field, value) => field.value(issue) == value,
            Self::Open(open) => issue.open == *open,
            Self::CreatedOn(ts) => issue.created_on == *ts,
            Self::UpdatedOn(ts) => issue.updated_on == *ts,
        }
    }
}

fn parse_timestamp(value: &str) -> Option<Timestamp> {
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&chrono::Utc))
}

/// Project scope plus the exact-match conditions of a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueFilter {
    pub project_title: String,
    pub conditions: Vec<Condition>,
    /// Set when some query pair can never match any record.
    pub unsatisfiable: bool,
}

impl IssueFilter {
    /// A filter selecting every issue in `project`.
    pub fn for_project(project: impl Into<String>) -> Self {
        Self {
            project_title: project.into(),
            conditions: Vec::new(),
            unsatisfiable: false,
        }
    }

    /// Build a filter from raw query pairs.
    ///
    /// A `project_title` pair never overrides the route scope.
    pub fn from_query<I, K, V>(project: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::for_project(project);
        for (key, value) in pairs {
            let key = key.as_ref();
            if key == "project_title" {
                continue;
            }
            match Condition::parse(key, value.as_ref()) {
                Some(condition) => filter.conditions.push(condition),
                None => {
                    tracing::debug!(key, "Query key cannot match any issue");
                    filter.unsatisfiable = true;
                }
            }
        }
        filter
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Whether `issue` is selected by this filter.
    pub fn matches(&self, issue: &Issue) -> bool {
        !self.unsatisfiable
            && issue.project_title == self.project_title
            && self.conditions.iter().all(|c| c.matches(issue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn issue(project: &str, created_by: &str, open: bool) -> Issue {
        let now = Utc::now();
        Issue {
            id: IssueId::generate(),
            project_title: project.into(),
            issue_title: "t".into(),
            issue_text: "x".into(),
            created_by: created_by.into(),
            assigned_to: String::new(),
            status_text: String::new(),
            open,
            created_on: now,
            updated_on: now,
        }
    }

    #[test]
    fn project_scope_only() {
        let filter = IssueFilter::from_query("apitest", Vec::<(String, String)>::new());
        assert!(filter.matches(&issue("apitest", "Alma", true)));
        assert!(!filter.matches(&issue("other", "Alma", true)));
    }

    #[test]
    fn query_cannot_escape_project_scope() {
        let filter = IssueFilter::from_query("apitest", [("project_title", "other")]);
        assert!(filter.conditions.is_empty());
        assert!(!filter.matches(&issue("other", "Alma", true)));
    }

    #[test]
    fn multiple_conditions_must_all_match() {
        let filter =
            IssueFilter::from_query("apitest", [("created_by", "Alma"), ("open", "true")]);
        assert!(filter.matches(&issue("apitest", "Alma", true)));
        assert!(!filter.matches(&issue("apitest", "Alma", false)));
        assert!(!filter.matches(&issue("apitest", "Bob", true)));
    }

    #[test]
    fn text_match_is_exact() {
        let filter = IssueFilter::from_query("apitest", [("created_by", "alma")]);
        assert!(!filter.matches(&issue("apitest", "Alma", true)));
    }

    #[test]
    fn unknown_key_matches_nothing() {
        let filter = IssueFilter::from_query("apitest", [("priority", "high")]);
        assert!(filter.unsatisfiable);
        assert!(!filter.matches(&issue("apitest", "Alma", true)));
    }

    #[test]
    fn uncastable_values_match_nothing() {
        for (key, value) in [("open", "yes"), ("_id", "nope"), ("created_on", "yesterday")] {
            let filter = IssueFilter::from_query("apitest", [(key, value)]);
            assert!(filter.unsatisfiable, "{key}={value} should be unsatisfiable");
        }
    }

    #[test]
    fn id_and_timestamp_conditions() {
        let target = issue("apitest", "Alma", true);
        let filter = IssueFilter::from_query(
            "apitest",
            [
                ("_id", target.id.to_string()),
                ("created_on", target.created_on.to_rfc3339()),
            ],
        );
        assert!(filter.matches(&target));
        assert!(!filter.matches(&issue("apitest", "Alma", true)));
    }
}
