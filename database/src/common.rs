use sqlx::{sqlite::SqliteRow, Row};
use std::future::Future;
use std::time::Duration;
use todo_core::{
    error::{Result, TodoError},
    models::Todo,
};

/// Column list shared by every query that returns full todo rows
pub const TODO_COLUMNS: &str = "id, task, completed";

/// Check whether a database URL refers to an in-memory SQLite database
pub fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:")
}

/// Strip the `sqlite://` scheme so the remainder can be used as a file path
pub fn database_path(database_url: &str) -> &str {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
}

/// Convert SQLite row to Todo model
pub fn row_to_todo(operation: &'static str, row: &SqliteRow) -> Result<Todo> {
    let id: String = row
        .try_get("id")
        .map_err(|e| sqlx_error_to_todo_error(operation, None, e))?;
    let task: String = row
        .try_get("task")
        .map_err(|e| sqlx_error_to_todo_error(operation, Some(&id), e))?;
    let completed: bool = row
        .try_get("completed")
        .map_err(|e| sqlx_error_to_todo_error(operation, Some(&id), e))?;

    Ok(Todo { id, task, completed })
}

/// Convert SQLx error to TodoError
///
/// Not-found is decided by the caller from the query result, so every
/// driver error lands in `TodoError::Database` with the operation and key
/// attached for diagnostics.
pub fn sqlx_error_to_todo_error(operation: &'static str, key: Option<&str>, err: sqlx::Error) -> TodoError {
    let message = match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().unwrap_or_default();
            let message = db_err.message();
            if code == "1555" || code == "2067" || message.contains("UNIQUE constraint failed") {
                format!("Database constraint error: {message}")
            } else {
                format!("Database error: {message}")
            }
        }
        sqlx::Error::RowNotFound => "Unexpected RowNotFound error".to_string(),
        sqlx::Error::PoolTimedOut => "Connection pool timeout".to_string(),
        sqlx::Error::PoolClosed => "Connection pool closed".to_string(),
        sqlx::Error::Io(io_err) => format!("Database I/O error: {io_err}"),
        _ => format!("Database operation failed: {err}"),
    };

    TodoError::database(operation, key, message)
}

/// Run a store operation under a time budget
///
/// Expiry drops the inner future, which releases any pooled connection it
/// was holding, and reports `TodoError::Timeout`.
pub async fn with_timeout<T, F>(operation: &'static str, limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store operation timed out"
            );
            Err(TodoError::timeout(operation, limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_memory_url() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url(":memory:"));
        assert!(!is_memory_url("sqlite:///tmp/todo.sqlite"));
    }

    #[test]
    fn test_database_path() {
        assert_eq!(database_path("sqlite:///tmp/todo.sqlite"), "/tmp/todo.sqlite");
        assert_eq!(database_path("sqlite://todo.sqlite"), "todo.sqlite");
        assert_eq!(database_path("sqlite:todo.sqlite"), "todo.sqlite");
        assert_eq!(database_path("todo.sqlite"), "todo.sqlite");
    }

    #[test]
    fn test_pool_errors_map_to_database() {
        let err = sqlx_error_to_todo_error("get_all", None, sqlx::Error::PoolClosed);
        assert!(err.is_internal());
        assert_eq!(
            err,
            TodoError::database("get_all", None, "Connection pool closed")
        );

        let err = sqlx_error_to_todo_error("get_by_id", Some("abc"), sqlx::Error::PoolTimedOut);
        assert_eq!(
            err,
            TodoError::database("get_by_id", Some("abc"), "Connection pool timeout")
        );
    }

    #[tokio::test]
    async fn test_with_timeout_passes_through() {
        let result = with_timeout("noop", Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result, Ok(7));

        let result: Result<()> = with_timeout("noop", Duration::from_secs(1), async {
            Err(TodoError::not_found("x"))
        })
        .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result: Result<()> = with_timeout("slow", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert_eq!(
            result.unwrap_err(),
            TodoError::Timeout {
                operation: "slow",
                timeout_ms: 10
            }
        );
    }
}
