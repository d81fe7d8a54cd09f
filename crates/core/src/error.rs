use crate::store::StoreError;

/// Every way an issue operation can fail.
///
/// Validation and not-found conditions carry no cause; store failures keep
/// the backend error as `source` so it can be logged but never shown to the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("required field(s) missing")]
    MissingFields,

    #[error("missing _id")]
    MissingId,

    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },

    #[error("could not update")]
    UpdateFailed {
        id: String,
        #[source]
        source: Option<StoreError>,
    },

    #[error("could not delete")]
    DeleteFailed {
        id: String,
        #[source]
        source: Option<StoreError>,
    },

    #[error("retrieval failed for project {project}")]
    RetrievalFailed {
        project: String,
        #[source]
        source: StoreError,
    },

    #[error("creation failed")]
    CreationFailed {
        project: String,
        #[source]
        source: StoreError,
    },
}

impl CoreError {
    /// The id to echo back to the caller, if the failure concerns one.
    pub fn echoed_id(&self) -> Option<&str> {
        match self {
            Self::NoUpdateFields { id }
            | Self::UpdateFailed { id, .. }
            | Self::DeleteFailed { id, .. } => Some(id),
            _ => None,
        }
    }

    /// The underlying store failure, if any.
    ///
    /// Errors without one are soft failures: bad input or a missing record.
    pub fn store_cause(&self) -> Option<&StoreError> {
        match self {
            Self::UpdateFailed { source, .. } | Self::DeleteFailed { source, .. } => {
                source.as_ref()
            }
            Self::RetrievalFailed { source, .. } | Self::CreationFailed { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_public_vocabulary() {
        assert_eq!(CoreError::MissingFields.to_string(), "required field(s) missing");
        assert_eq!(CoreError::MissingId.to_string(), "missing _id");
        assert_eq!(
            CoreError::NoUpdateFields { id: "x".into() }.to_string(),
            "no update field(s) sent"
        );
        assert_eq!(
            CoreError::RetrievalFailed {
                project: "apitest".into(),
                source: StoreError::Unavailable("down".into()),
            }
            .to_string(),
            "retrieval failed for project apitest"
        );
    }

    #[test]
    fn not_found_has_no_store_cause() {
        let err = CoreError::DeleteFailed {
            id: "abc".into(),
            source: None,
        };
        assert!(err.store_cause().is_none());
        assert_eq!(err.echoed_id(), Some("abc"));
    }

    #[test]
    fn store_failure_keeps_its_cause() {
        let err = CoreError::UpdateFailed {
            id: "abc".into(),
            source: Some(StoreError::Unavailable("timeout".into())),
        };
        assert!(err.store_cause().is_some());
    }
}
