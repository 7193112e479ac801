//! Database crate for the todo service
//!
//! This crate provides the SQLite implementation of the `TodoStore` trait,
//! backed by a sqlx connection pool with bounded per-call timeouts.
//!
//! # Features
//!
//! - SQLite database support with WAL mode for file-backed databases
//! - Isolated in-memory databases for tests
//! - Configurable pool sizing, connection lifetime, and query timeouts
//! - Table bootstrap through embedded migrations
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTodoStore;
//! use todo_core::{NewTodo, TodoStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteTodoStore::new("sqlite::memory:").await?;
//!     store.migrate().await?;
//!
//!     let todo = store.create(NewTodo::new("fishing at the lake")).await?;
//!     assert!(!todo.completed);
//!
//!     store.close().await?;
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;

pub use sqlite::{SqliteTodoStore, StoreOptions, DEFAULT_QUERY_TIMEOUT};

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, Todo},
    store::TodoStore,
};
