use crate::{
    error::Result,
    models::{NewTodo, Todo},
};
use async_trait::async_trait;

/// Store trait for todo persistence and retrieval operations
///
/// Implementations must be thread-safe and support concurrent access; the
/// HTTP layer shares a single store between all in-flight requests. Every
/// operation is expected to bound its own wait time and report expiry as
/// an error, never as a silent success.
///
/// Dropping a returned future cancels the operation. Single-statement
/// writes are atomic, so a cancelled call never leaves a half-applied row.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Get a todo by its id
    ///
    /// # Arguments
    /// * `id` - The todo id to look up
    ///
    /// # Returns
    /// * `Ok(Todo)` - The todo if found
    /// * `Err(TodoError::NotFound)` - If no todo exists with that id
    /// * `Err(TodoError::Database)` - If the database operation fails
    /// * `Err(TodoError::Timeout)` - If the operation exceeds its time budget
    async fn get_by_id(&self, id: &str) -> Result<Todo>;

    /// Get every stored todo, in implementation-defined order
    ///
    /// # Returns
    /// * `Ok(Vec<Todo>)` - All todos (empty when the store is empty)
    /// * `Err(TodoError::Database)` - If the database operation fails
    /// * `Err(TodoError::Timeout)` - If the operation exceeds its time budget
    async fn get_all(&self) -> Result<Vec<Todo>>;

    /// Create and persist a new todo
    ///
    /// The store assigns a fresh id and starts the todo as not completed.
    /// Task content is not validated here.
    ///
    /// # Returns
    /// * `Ok(Todo)` - The persisted todo
    /// * `Err(TodoError::Database)` - On constraint violation or connection failure
    /// * `Err(TodoError::Timeout)` - If the operation exceeds its time budget
    async fn create(&self, todo: NewTodo) -> Result<Todo>;

    /// Mark a todo as completed
    ///
    /// Marking an already completed todo again succeeds.
    ///
    /// # Returns
    /// * `Ok(Todo)` - The todo exactly as it is now stored
    /// * `Err(TodoError::NotFound)` - If no todo exists with that id
    /// * `Err(TodoError::Database)` - If the database operation fails
    /// * `Err(TodoError::Timeout)` - If the operation exceeds its time budget
    async fn mark_done(&self, id: &str) -> Result<Todo>;

    /// Check store connectivity
    ///
    /// # Returns
    /// * `Ok(())` - Store is healthy and connected
    /// * `Err(TodoError::Database)` - Store is unhealthy or closed
    async fn health_check(&self) -> Result<()>;

    /// Release all underlying connections
    ///
    /// Called once during shutdown. Operations issued after `close` fail
    /// with an internal error.
    async fn close(&self) -> Result<()>;
}
