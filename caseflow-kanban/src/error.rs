//! Error types for the placement engine

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Broad failure category, as reported to the calling layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The actor may not touch the targeted container, lane or application
    Authorization,
    /// A referenced id does not exist
    NotFound,
    /// Malformed input, rejected before any mutation
    Validation,
    /// The store failed; the transaction was rolled back
    Persistence,
}

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Referenced row does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Actor is neither the owner nor a privileged role
    #[error("not authorized to modify {resource} {id}")]
    Unauthorized { resource: String, id: String },

    /// Application has no lane in this family
    #[error("application {id} is not in any {lane}")]
    NotPlaced { id: String, lane: String },

    /// Missing required field
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// SQLite error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Blocking task failed to complete
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for KanbanError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl KanbanError {
    /// Create a not found error
    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Create an authorization error
    pub fn unauthorized(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::Unauthorized {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NotPlaced { .. }
            | Self::MissingField { .. }
            | Self::InvalidValue { .. }
            | Self::Config(_) => ErrorKind::Validation,
            Self::Database(_) | Self::Json(_) | Self::Io(_) | Self::Internal(_) => {
                ErrorKind::Persistence
            }
        }
    }

    /// Check if this is a retryable error (another writer held the database)
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::not_found("list", 12);
        assert_eq!(err.to_string(), "list not found: 12");

        let err = KanbanError::unauthorized("board", 3);
        assert_eq!(err.to_string(), "not authorized to modify board 3");
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            KanbanError::unauthorized("stage", 1).kind(),
            ErrorKind::Authorization
        );
        assert_eq!(KanbanError::not_found("service", 1).kind(), ErrorKind::NotFound);
        assert_eq!(
            KanbanError::invalid_value("position", "must be >= 0").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            KanbanError::Database(rusqlite::Error::QueryReturnedNoRows).kind(),
            ErrorKind::Persistence
        );
    }

    #[test]
    fn test_retryable() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(KanbanError::Database(busy).is_retryable());
        assert!(!KanbanError::not_found("board", 1).is_retryable());
    }
}
