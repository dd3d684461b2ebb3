//! Identifier validation and quoting for generated SQL.
//!
//! Table and column names cannot be parameterized in SQL statements, so any
//! identifier interpolated into generated text is validated for suspicious
//! content and backtick-quoted (GoogleSQL dialect), with embedded backticks
//! doubled.

use crate::error::{DumpError, Result};

/// Maximum identifier length. Spanner allows 128 characters.
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validate an identifier for security issues.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes (injection vector)
/// - Identifiers exceeding maximum length
///
/// # Errors
///
/// Returns `DumpError::Config` for invalid identifiers with a descriptive
/// message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DumpError::Config("Identifier cannot be empty".to_string()));
    }

    if name.contains('\0') {
        return Err(DumpError::Config(format!(
            "Identifier contains null byte (possible injection attempt): {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(DumpError::Config(format!(
            "Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Quote an identifier using backticks, doubling embedded backticks.
///
/// Quoting tolerates reserved words and special characters; validation is a
/// separate concern handled at configuration/schema load time via
/// [`validate_identifier`].
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
