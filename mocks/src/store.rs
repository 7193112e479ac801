//! Mock implementation of the TodoStore trait
//!
//! Provides a thread-safe in-memory store with:
//! - Error injection capabilities
//! - Latency injection for slow-store scenarios
//! - Call tracking for verification
//! - Close semantics matching a real connection pool

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use todo_core::{NewTodo, Result, Todo, TodoError, TodoStore};

/// Mock implementation of TodoStore for testing
///
/// Todos are kept in insertion order, so `get_all` lists them in the order
/// they were created.
#[derive(Clone)]
pub struct MockTodoStore {
    todos: Arc<Mutex<Vec<Todo>>>,
    error_injection: Arc<Mutex<Option<TodoError>>>,
    latency: Arc<Mutex<Option<Duration>>>,
    call_history: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl Default for MockTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Create mock store with pre-populated todos
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::new(Mutex::new(todos)),
            error_injection: Arc::new(Mutex::new(None)),
            latency: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TodoError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Delay every subsequent operation by `latency`
    pub fn inject_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }

    /// Remove injected latency
    pub fn clear_latency(&self) {
        *self.latency.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was called unexpectedly. Call history: {:?}",
            method,
            *history
        );
    }

    /// Number of stored todos
    pub fn len(&self) -> usize {
        self.todos.lock().len()
    }

    /// Whether the store holds no todos
    pub fn is_empty(&self) -> bool {
        self.todos.lock().is_empty()
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Record the call, wait out any injected latency, then fail if the
    /// store is closed or an error was injected
    async fn begin(&self, call: String) -> Result<()> {
        self.call_history.lock().push(call);

        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.is_closed() {
            return Err(TodoError::database("mock", None, "Connection pool closed"));
        }

        let mut error_opt = self.error_injection.lock();
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MockTodoStore {
    async fn get_by_id(&self, id: &str) -> Result<Todo> {
        self.begin(format!("get_by_id(id={id})")).await?;

        let todos = self.todos.lock();
        todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TodoError::not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<Todo>> {
        self.begin("get_all()".to_string()).await?;

        Ok(self.todos.lock().clone())
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo> {
        self.begin(format!("create(task={})", todo.task)).await?;

        let todo = todo.into_todo();
        self.todos.lock().push(todo.clone());
        Ok(todo)
    }

    async fn mark_done(&self, id: &str) -> Result<Todo> {
        self.begin(format!("mark_done(id={id})")).await?;

        let mut todos = self.todos.lock();
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::not_found(id))?;
        todo.mark_done();
        Ok(todo.clone())
    }

    async fn health_check(&self) -> Result<()> {
        self.begin("health_check()".to_string()).await
    }

    async fn close(&self) -> Result<()> {
        self.call_history.lock().push("close()".to_string());
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
