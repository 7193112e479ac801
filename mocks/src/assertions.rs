//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Todo equality with clear error messages
//! - Collection-based assertions

use std::collections::HashSet;
use todo_core::Todo;

/// Assert todos are field-by-field equal
pub fn assert_todo_equals(actual: &Todo, expected: &Todo) {
    assert_eq!(actual.id, expected.id, "Todo ids don't match");
    assert_eq!(actual.task, expected.task, "Todo tasks don't match");
    assert_eq!(actual.completed, expected.completed, "Todo completion doesn't match");
}

/// Assert todo list contains a todo with the given id
pub fn assert_contains_todo_with_id(todos: &[Todo], id: &str) {
    assert!(
        todos.iter().any(|t| t.id == id),
        "Expected to find todo with id '{}' in todo list, but it wasn't found. Available ids: {:?}",
        id,
        todos.iter().map(|t| &t.id).collect::<Vec<_>>()
    );
}

/// Assert no two todos share an id
pub fn assert_unique_ids(todos: &[Todo]) {
    let mut seen = HashSet::new();
    for todo in todos {
        assert!(seen.insert(&todo.id), "Duplicate todo id '{}'", todo.id);
    }
}

/// Assert a todo was freshly created for the given task
pub fn assert_fresh_todo(todo: &Todo, task: &str) {
    assert!(!todo.id.is_empty(), "Created todo should have an id");
    assert_eq!(todo.task, task, "Created todo should preserve task");
    assert!(!todo.completed, "New todo should not be completed");
}
