//! Mock implementations and test utilities for the todo service
//!
//! This crate provides testing infrastructure including:
//! - An in-memory `TodoStore` with error and latency injection
//! - Realistic test data generators
//! - Custom assertion helpers
//! - Property-based testing strategies
//! - Contract tests every `TodoStore` implementation must pass

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod store;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use store::MockTodoStore;
