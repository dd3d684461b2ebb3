//! Batched statement writer: encoded rows to size-bounded SQL statements.
//!
//! Rows for one table accumulate in a buffer and are emitted as a single
//! multi-row `INSERT` (or `INSERT OR UPDATE` in upsert mode) whenever the
//! buffer reaches the bulk size, plus one final partial statement at table
//! end. Row order within a statement is write order; nothing is reordered
//! or deduplicated.

use std::io::Write;

use tracing::debug;

use crate::core::identifier::quote_ident;
use crate::core::schema::Table;
use crate::error::Result;

/// Rows per statement when no bulk size is configured.
///
/// Spanner caps mutations per commit at 20,000; 100 rows per statement stays
/// within that for any realistic column count.
pub const DEFAULT_BULK_SIZE: usize = 100;

/// Buffers encoded rows for one table and flushes them as batched
/// INSERT/UPSERT statements.
pub struct BufferedWriter<'a, W: Write> {
    table: &'a Table,
    out: &'a mut W,
    bulk_size: usize,
    upsert: bool,
    buffer: Vec<Vec<String>>,
}

impl<'a, W: Write> BufferedWriter<'a, W> {
    /// Create a writer for one table's dump pass.
    ///
    /// A `bulk_size` of zero selects [`DEFAULT_BULK_SIZE`].
    pub fn new(table: &'a Table, out: &'a mut W, bulk_size: usize, upsert: bool) -> Self {
        let bulk_size = if bulk_size == 0 {
            DEFAULT_BULK_SIZE
        } else {
            bulk_size
        };
        Self {
            table,
            out,
            bulk_size,
            upsert,
            buffer: Vec::with_capacity(bulk_size),
        }
    }

    /// Buffer one encoded row, flushing automatically when the buffer
    /// reaches the bulk size.
    pub fn write(&mut self, row: Vec<String>) -> Result<()> {
        self.buffer.push(row);
        if self.buffer.len() >= self.bulk_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Emit any buffered rows as one statement and clear the buffer.
    ///
    /// A no-op on an empty buffer. Must be called once more at table end to
    /// emit the final partial batch.
    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let verb = if self.upsert {
            "INSERT OR UPDATE INTO"
        } else {
            "INSERT INTO"
        };
        let tuples = self
            .buffer
            .iter()
            .map(|row| format!("({})", row.join(", ")))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            self.out,
            "{} {} ({}) VALUES {};",
            verb,
            quote_ident(&self.table.name),
            self.table.quoted_column_list(),
            tuples
        )?;

        debug!(
            table = %self.table.name,
            rows = self.buffer.len(),
            "flushed statement"
        );
        self.buffer.clear();
        Ok(())
    }
}
