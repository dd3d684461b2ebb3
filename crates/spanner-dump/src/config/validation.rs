//! Configuration validation.

use std::collections::HashSet;

use crate::config::DumpConfig;
use crate::core::identifier::validate_identifier;
use crate::error::{DumpError, Result};

/// Validate a dump configuration.
///
/// Checks every requested table name is a valid identifier and appears only
/// once. Bulk size is not checked here: zero is defined to mean the default.
pub fn validate(config: &DumpConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for table in &config.tables {
        validate_identifier(&table.name)?;
        if !seen.insert(table.name.as_str()) {
            return Err(DumpError::Config(format!(
                "Table {:?} is requested more than once",
                table.name
            )));
        }
    }
    Ok(())
}
