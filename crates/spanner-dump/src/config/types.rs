//! Dump job configuration types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::writer::DEFAULT_BULK_SIZE;

/// Root configuration for one dump run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Tables to dump, optionally with per-table row filters. Empty means
    /// every base table in the database.
    #[serde(default)]
    pub tables: Vec<TableFilter>,

    /// Rows per INSERT statement. Zero selects the default bulk size.
    #[serde(default = "default_bulk_size")]
    pub bulk_size: usize,

    /// Emit INSERT OR UPDATE statements instead of plain INSERTs.
    #[serde(default)]
    pub upsert: bool,

    /// Order tables so parents are dumped before their children.
    #[serde(default)]
    pub sort: bool,

    /// Skip the DDL pass.
    #[serde(default)]
    pub no_ddl: bool,

    /// Skip the data pass.
    #[serde(default)]
    pub no_data: bool,

    /// Read rows as of this snapshot timestamp. Handed to the row source
    /// verbatim; never interpreted here.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

fn default_bulk_size() -> usize {
    DEFAULT_BULK_SIZE
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            tables: Vec::new(),
            bulk_size: DEFAULT_BULK_SIZE,
            upsert: false,
            sort: false,
            no_ddl: false,
            no_data: false,
            timestamp: None,
        }
    }
}

impl DumpConfig {
    /// The configured bulk size, with zero normalized to the default.
    pub fn effective_bulk_size(&self) -> usize {
        if self.bulk_size == 0 {
            DEFAULT_BULK_SIZE
        } else {
            self.bulk_size
        }
    }

    /// Names of the requested tables, in configuration order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    /// The row filter configured for a table, if any.
    pub fn filter_for(&self, table: &str) -> Option<&str> {
        self.tables
            .iter()
            .find(|t| t.name == table)
            .and_then(|t| t.filter.as_deref())
    }
}

/// One requested table with an optional row filter expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Table name (unquoted).
    pub name: String,

    /// WHERE expression selecting the rows to dump; absent means all rows.
    #[serde(default)]
    pub filter: Option<String>,
}

impl TableFilter {
    /// Select a whole table.
    pub fn all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: None,
        }
    }

    /// Select a table restricted by a WHERE expression.
    pub fn with_filter(name: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: Some(filter.into()),
        }
    }
}
