//! Table metadata used to drive a dump run.
//!
//! A [`Table`] is a database-agnostic description of one base table
//! restricted to the requested dump set: its name, its columns in ordinal
//! order, and the parent table it is interleaved in (or references), if any.
//! Built once from schema metadata and read-only afterward.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::identifier::quote_ident;

/// Metadata for one table in the dump set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name (unquoted).
    pub name: String,

    /// Column names in ordinal order. Unique, order-significant.
    pub columns: Vec<String>,

    /// Parent table name for interleaved/child tables, if any.
    #[serde(default)]
    pub parent: Option<String>,
}

impl Table {
    /// Create a table with no parent.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            parent: None,
        }
    }

    /// Set the parent table name.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Backtick-quoted, comma-separated column list for SELECT and INSERT
    /// headers.
    pub fn quoted_column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Name: {:?}, Columns: {:?}}}", self.name, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_column_list_empty() {
        let table = Table::new("T", vec![]);
        assert_eq!(table.quoted_column_list(), "");
    }

    #[test]
    fn test_quoted_column_list_single() {
        let table = Table::new("T", vec!["C1".to_string()]);
        assert_eq!(table.quoted_column_list(), "`C1`");
    }

    #[test]
    fn test_quoted_column_list_multiple() {
        let table = Table::new("T", vec!["C1".to_string(), "C2".to_string()]);
        assert_eq!(table.quoted_column_list(), "`C1`, `C2`");
    }

    #[test]
    fn test_with_parent() {
        let table = Table::new("Child", vec!["Id".to_string()]).with_parent("Parent");
        assert_eq!(table.parent.as_deref(), Some("Parent"));
    }
}
