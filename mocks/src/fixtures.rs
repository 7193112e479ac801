//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - A standard todo and create request
//! - Completed and pending todos
//! - Bulk todo generators

use todo_core::{NewTodo, Todo};

/// Task text used by the end-to-end scenario
pub const FISHING_TASK: &str = "fishing at the lake";

/// Create a basic test todo with sensible defaults
pub fn create_test_todo() -> Todo {
    Todo::new("A standard test todo")
}

/// Create a todo that has already been marked done
pub fn create_completed_todo() -> Todo {
    let mut todo = create_test_todo();
    todo.mark_done();
    todo
}

/// Create a standard create request
pub fn create_new_todo() -> NewTodo {
    NewTodo::new(FISHING_TASK)
}

/// Create multiple unique todos; every third one is completed
pub fn create_test_todos(count: usize) -> Vec<Todo> {
    (1..=count)
        .map(|i| {
            let mut todo = Todo::new(format!("Test todo {i}"));
            if i % 3 == 0 {
                todo.mark_done();
            }
            todo
        })
        .collect()
}
