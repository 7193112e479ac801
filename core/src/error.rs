use std::time::Duration;
use thiserror::Error;

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error types for the todo service.
///
/// `NotFound` is kept distinct so callers can branch on it; everything the
/// store cannot recover from (driver failures, closed pools, timeouts) ends
/// up in one of the internal variants. Each variant maps to an HTTP status
/// code for API responses.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
/// use std::time::Duration;
///
/// let not_found = TodoError::not_found("does-not-exist");
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
///
/// let timeout = TodoError::timeout("get_all", Duration::from_secs(1));
/// assert!(timeout.is_internal());
/// assert_eq!(timeout.status_code(), 500);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No todo exists with the given id
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// Malformed or unacceptable client input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage failure, tagged with the operation and key that triggered it
    #[error("Database error in {operation}{}: {message}", format_key(.key))]
    Database {
        operation: &'static str,
        key: Option<String>,
        message: String,
    },

    /// Storage call exceeded its time budget
    #[error("Operation {operation} timed out after {timeout_ms} ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_key(key: &Option<String>) -> String {
    match key {
        Some(key) => format!(" (id={key})"),
        None => String::new(),
    }
}

impl TodoError {
    /// Create a not found error for a todo id
    pub fn not_found(id: &str) -> Self {
        Self::NotFound(id.to_string())
    }

    /// Create a validation error for an empty field
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Create a database error for the given operation and optional key
    pub fn database(operation: &'static str, key: Option<&str>, message: impl Into<String>) -> Self {
        Self::Database {
            operation,
            key: key.map(str::to_string),
            message: message.into(),
        }
    }

    /// Create a timeout error for the given operation
    pub fn timeout(operation: &'static str, limit: Duration) -> Self {
        Self::Timeout {
            operation,
            timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    /// Check if this error is an internal failure (storage, timeout, or otherwise)
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            TodoError::Database { .. } | TodoError::Timeout { .. } | TodoError::Internal(_)
        )
    }

    /// Convert to appropriate HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::NotFound(_) => 404,
            TodoError::Validation(_) => 400,
            TodoError::Database { .. } => 500,
            TodoError::Timeout { .. } => 500,
            TodoError::Internal(_) => 500,
        }
    }
}
