//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - Todo construction with sensible defaults
//! - NewTodo create requests

use todo_core::{NewTodo, Todo};

/// Builder for constructing Todo instances in tests
pub struct TodoBuilder {
    todo: Todo,
}

impl Default for TodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoBuilder {
    /// Create new builder with a fresh id and default task
    pub fn new() -> Self {
        Self {
            todo: Todo::new("Test todo"),
        }
    }

    /// Set todo id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.todo.id = id.into();
        self
    }

    /// Set task text
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.todo.task = task.into();
        self
    }

    /// Mark the todo as completed
    pub fn completed(mut self) -> Self {
        self.todo.completed = true;
        self
    }

    /// Build the final Todo
    pub fn build(self) -> Todo {
        self.todo
    }
}

/// Builder for constructing NewTodo instances in tests
pub struct NewTodoBuilder {
    new_todo: NewTodo,
}

impl Default for NewTodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewTodoBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        Self {
            new_todo: NewTodo::new("New test todo"),
        }
    }

    /// Set task text
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.new_todo.task = task.into();
        self
    }

    /// Build the final NewTodo
    pub fn build(self) -> NewTodo {
        self.new_todo
    }
}
