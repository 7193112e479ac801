use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item tracked by the service.
///
/// The `id` is assigned by the system at creation and never changes. The
/// `task` text is fixed at creation as well; the only mutation a todo ever
/// sees is being marked done.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::Todo;
///
/// let mut todo = Todo::new("fishing at the lake");
/// assert!(!todo.completed);
/// assert!(!todo.id.is_empty());
///
/// todo.mark_done();
/// assert!(todo.completed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    /// Opaque unique identifier (UUID v4)
    pub id: String,
    /// Task description
    pub task: String,
    /// Whether the task has been marked done
    pub completed: bool,
}

impl Todo {
    /// Create a not-yet-completed todo with a freshly generated id
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            task: task.into(),
            completed: false,
        }
    }

    /// Mark this todo as completed. Calling it again is a no-op.
    pub fn mark_done(&mut self) {
        self.completed = true;
    }
}

/// Data transfer object for creating new todos.
///
/// This is also the request body of `POST /todo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    /// Task description
    pub task: String,
}

impl NewTodo {
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into() }
    }

    /// Build the todo that will be persisted for this request
    pub fn into_todo(self) -> Todo {
        Todo::new(self.task)
    }
}
