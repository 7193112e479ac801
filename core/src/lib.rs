//! Todo Core Library
//!
//! This crate provides the domain model, error taxonomy, and store trait for
//! the todo service. The database and HTTP crates depend on the types and
//! interfaces defined here.
//!
//! # Architecture
//!
//! - [`models`] - The `Todo` entity and its creation request
//! - [`error`] - Error types and result handling
//! - [`store`] - Store trait for todo persistence
//! - [`validation`] - Request validation utilities
//!
//! # Example
//!
//! ```rust
//! use todo_core::{NewTodo, TodoValidator};
//!
//! let request = NewTodo::new("fishing at the lake");
//! TodoValidator::validate_new_todo(&request).unwrap();
//!
//! let todo = request.into_todo();
//! assert!(!todo.completed);
//! ```

pub mod error;
pub mod models;
pub mod store;
pub mod validation;

pub use error::{Result, TodoError};
pub use models::{NewTodo, Todo};
pub use store::TodoStore;
pub use validation::TodoValidator;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_crate_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "todo-core");
    }

    #[test]
    fn test_re_exports() {
        let todo = Todo::new("re-exported");
        assert!(!todo.completed);

        let error = TodoError::not_found(&todo.id);
        assert!(error.is_not_found());
    }
}
