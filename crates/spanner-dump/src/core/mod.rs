//! Core data model shared across the dump pipeline.
//!
//! - [`schema`]: table metadata driving each dump pass
//! - [`value`]: typed column values with per-case validity
//! - [`identifier`]: identifier validation and backtick quoting
//!
//! These types are database-agnostic: the row and schema sources produce
//! them, and the encoder, graph, and writer consume them without any
//! knowledge of the transport that fetched them.

pub mod identifier;
pub mod schema;
pub mod value;

// Re-export commonly used types for convenience
pub use identifier::{quote_ident, validate_identifier};
pub use schema::Table;
pub use value::{Row, Value};
