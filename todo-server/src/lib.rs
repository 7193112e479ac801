//! Todo Server Library
//!
//! This library provides the process-level pieces of the todo service:
//! configuration loading, logging setup, and wiring the SQLite store into
//! the HTTP server.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_server, create_store, ensure_database_directory, initialize_app};
pub use telemetry::init_telemetry;
