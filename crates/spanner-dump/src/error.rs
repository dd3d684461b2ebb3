//! Error types for the dump library.

use thiserror::Error;

/// Main error type for dump operations.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A column value could not be classified into any supported type
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The dependency graph of the requested tables is not acyclic
    #[error("Cyclic dependency detected among tables: {tables:?}")]
    CyclicDependency { tables: Vec<String> },

    /// A NUMERIC value exceeds the representable precision
    #[error("NUMERIC value {value} exceeds {max_integer_digits} integer / {max_fraction_digits} fraction digits")]
    NumericOverflow {
        value: String,
        max_integer_digits: u64,
        max_fraction_digits: u64,
    },

    /// Schema metadata retrieval failed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Row source failed while streaming a table
    #[error("Source error for table {table}: {message}")]
    Source { table: String, message: String },

    /// IO error (writing to the output stream)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DumpError {
    /// Create a Source error for a specific table
    pub fn source(table: impl Into<String>, message: impl Into<String>) -> Self {
        DumpError::Source {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;
