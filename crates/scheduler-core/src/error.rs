use thiserror::Error;

use crate::recurrence::RuleError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Corrupt stored data: {0}")]
    Corrupt(String),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid repeat rule: {0}")]
    InvalidRule(#[from] RuleError),
}

/// Coarse classification of a [`CoreError`], used by front-ends to pick an
/// exit status or an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied something malformed. Never worth retrying.
    Validation,
    /// The addressed task does not exist.
    NotFound,
    /// The underlying store failed.
    Storage,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidInput(_) | CoreError::InvalidRule(_) => ErrorKind::Validation,
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::Database(_)
            | CoreError::Migration(_)
            | CoreError::Io(_)
            | CoreError::Corrupt(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CoreError::InvalidInput(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(CoreError::invalid("empty title").kind(), ErrorKind::Validation);
        assert_eq!(
            CoreError::InvalidRule(RuleError::UnknownKind("x".to_string())).kind(),
            ErrorKind::Validation
        );
        assert_eq!(CoreError::NotFound("7".to_string()).kind(), ErrorKind::NotFound);
        assert_eq!(
            CoreError::Database(sqlx::Error::RowNotFound).kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            CoreError::Corrupt("task 1 has date '2024-01-01'".to_string()).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_rule_error_message_is_surfaced() {
        let err = CoreError::from(RuleError::IntervalOutOfRange(401));
        assert_eq!(
            err.to_string(),
            "Invalid repeat rule: day interval 401 is out of range 1..=400"
        );
    }
}
