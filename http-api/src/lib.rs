//! HTTP API for the todo service
//!
//! This crate exposes any [`TodoStore`] implementation over a small JSON HTTP
//! surface built on axum. It provides:
//!
//! - Route handlers for listing, fetching, creating and completing todos
//! - Error mapping from core errors to HTTP status codes
//! - Per-request logging middleware
//! - A server with signal-driven graceful shutdown
//!
//! # Usage
//!
//! ```no_run
//! use http_api::{shutdown_signal, TodoServer};
//! use mocks::MockTodoStore;
//! use std::sync::Arc;
//!
//! async fn start_server() -> Result<(), http_api::ServerError> {
//!     // In real usage, you would use database::SqliteTodoStore
//!     let store = Arc::new(MockTodoStore::new());
//!     TodoServer::new(store)
//!         .serve_with_shutdown("127.0.0.1:8080", shutdown_signal())
//!         .await
//! }
//! ```

pub mod error;
pub mod handlers;
pub mod request_logger;
pub mod server;

// Re-export key types for easier usage
pub use error::ApiError;
pub use server::{shutdown_signal, AppState, ServerError, ServerOptions, TodoServer};

// Re-export core types for external consumers
pub use todo_core::{NewTodo, Todo, TodoError, TodoStore};
