//! Trait seams to the database-facing collaborators.
//!
//! The dump core never talks to a database. Schema metadata, DDL text, and
//! row data arrive through these traits; transport, sessions, and the
//! read-only snapshot query live behind them.
//!
//! # Streaming
//!
//! [`RowSource::read_rows`] returns a channel receiver rather than a
//! collected Vec so large tables stream with backpressure: the source fills
//! the channel from its own task while the dumper drains it one row at a
//! time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::core::schema::Table;
use crate::core::value::Row;
use crate::error::Result;

/// Parameters for one table's row stream.
#[derive(Debug, Clone)]
pub struct ReadRequest {
    /// Table to read.
    pub table: String,

    /// Columns to read, in table column order.
    pub columns: Vec<String>,

    /// WHERE expression selecting rows, handed to the source verbatim.
    /// Absent means all rows.
    pub filter: Option<String>,

    /// Snapshot timestamp to read at, if the run is pinned to one.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Supplies schema metadata and DDL text.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch table descriptors for the named tables, or for every base
    /// table when `names` is empty.
    ///
    /// Implementations return tables in ascending name order when no names
    /// are given, and in request order otherwise.
    async fn list_tables(&self, names: &[String]) -> Result<Vec<Table>>;

    /// Fetch the database's DDL statements, unterminated, in definition
    /// order.
    async fn list_ddl(&self) -> Result<Vec<String>>;
}

/// Streams typed rows for one table at a time.
pub trait RowSource: Send + Sync {
    /// Start streaming rows matching the request.
    ///
    /// The receiver yields rows until the table is exhausted; an `Err` item
    /// ends the stream and aborts the dump.
    fn read_rows(&self, request: ReadRequest) -> mpsc::Receiver<Result<Row>>;
}
