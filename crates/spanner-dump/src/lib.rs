//! # spanner-dump
//!
//! Library for exporting a Cloud Spanner database (rows plus schema DDL) as
//! executable SQL statements, with support for:
//!
//! - **Round-trip-safe literals** for every Spanner type, including
//!   FLOAT64, NUMERIC, BYTES, JSON, and arrays
//! - **Batched statements** grouping rows into size-bounded
//!   INSERT / INSERT OR UPDATE statements
//! - **Dependency-ordered dumps** so interleaved children follow their
//!   parents
//! - **Per-table row filters** and snapshot-timestamp reads
//!
//! Database access is abstracted behind the [`source`] traits; the library
//! itself holds no connection and issues no queries.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use spanner_dump::{DumpConfig, Dumper};
//! # use spanner_dump::source::{RowSource, SchemaSource};
//! # fn sources() -> (Arc<dyn SchemaSource>, Arc<dyn RowSource>) { unimplemented!() }
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = DumpConfig::load("dump.yaml")?;
//! let (schema, rows) = sources();
//! let mut dumper = Dumper::new(config, schema, rows, std::io::stdout())?;
//! let summary = dumper.dump().await?;
//! println!("Dumped {} rows", summary.rows_dumped);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod ddl;
pub mod encode;
pub mod error;
pub mod graph;
pub mod orchestrator;
pub mod source;
pub mod writer;

// Re-exports for convenient access
pub use config::{DumpConfig, TableFilter};
pub use crate::core::{Row, Table, Value};
pub use encode::{encode_row, encode_value};
pub use error::{DumpError, Result};
pub use graph::DependencyGraph;
pub use orchestrator::{DumpSummary, Dumper};
pub use source::{ReadRequest, RowSource, SchemaSource};
pub use writer::{BufferedWriter, DEFAULT_BULK_SIZE};
