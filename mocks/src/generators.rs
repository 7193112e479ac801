//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Task sentences
//! - Random todos
//! - Property-based testing strategies

use fake::faker::lorem::en::Sentence;
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use todo_core::{NewTodo, Todo};

/// Generate a realistic task description
pub fn generate_task() -> String {
    Sentence(2..8).fake()
}

/// Generate a random create request
pub fn generate_new_todo() -> NewTodo {
    NewTodo::new(generate_task())
}

/// Generate a random todo, completed about half of the time
pub fn generate_random_todo() -> Todo {
    let mut todo = Todo::new(generate_task());
    if rand::thread_rng().gen_bool(0.5) {
        todo.mark_done();
    }
    todo
}

/// Proptest strategy for task text that passes validation
pub fn task_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .,!?'-]{1,120}".prop_filter("task must not be blank", |s| !s.trim().is_empty())
}

/// Proptest strategy for arbitrary task text, including blank and non-ASCII input
pub fn any_task_strategy() -> impl Strategy<Value = String> {
    any::<String>()
}

/// Proptest strategy for complete todos
pub fn todo_strategy() -> impl Strategy<Value = Todo> {
    (task_strategy(), any::<bool>()).prop_map(|(task, completed)| {
        let mut todo = Todo::new(task);
        todo.completed = completed;
        todo
    })
}
