//! Table-name extraction from DDL statements.
//!
//! The DDL pass emits schema statements verbatim; when the dump is
//! restricted to a table subset, each statement is kept or skipped based on
//! the table it targets. This is the only DDL parsing the tool does —
//! anything beyond pulling the table name out of CREATE TABLE,
//! CREATE INDEX, and ALTER TABLE forms is out of scope.

use once_cell::sync::Lazy;
use regex::Regex;

static INDEX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*CREATE\s+(?:UNIQUE\s+|NULL_FILTERED\s+)?INDEX\s+[a-zA-Z0-9_`]+\s+ON\s+`?([a-zA-Z0-9_]+)`?",
    )
    .expect("valid regex")
});

static TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*CREATE\s+TABLE\s+`?([a-zA-Z0-9_]+)`?").expect("valid regex"));

static ALTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*ALTER\s+TABLE\s+`?([a-zA-Z0-9_]+)`?").expect("valid regex"));

/// Extract the table a DDL statement targets.
///
/// Recognizes `CREATE TABLE`, `CREATE [UNIQUE|NULL_FILTERED] INDEX ... ON`,
/// and `ALTER TABLE`, with or without backtick quoting. Returns `None` for
/// any other statement.
pub fn parse_table_name(ddl: &str) -> Option<String> {
    for re in [&*INDEX_RE, &*TABLE_RE, &*ALTER_RE] {
        if let Some(captures) = re.captures(ddl) {
            return Some(captures[1].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table() {
        assert_eq!(
            parse_table_name("CREATE TABLE Singers (Id INT64) PRIMARY KEY (Id)").as_deref(),
            Some("Singers")
        );
        assert_eq!(
            parse_table_name("CREATE TABLE `Singers` (Id INT64) PRIMARY KEY (Id)").as_deref(),
            Some("Singers")
        );
        assert_eq!(
            parse_table_name("  CREATE  TABLE  Singers (Id INT64)").as_deref(),
            Some("Singers")
        );
    }

    #[test]
    fn test_create_index() {
        assert_eq!(
            parse_table_name("CREATE INDEX SingersByName ON Singers(Name)").as_deref(),
            Some("Singers")
        );
        assert_eq!(
            parse_table_name("CREATE UNIQUE INDEX SingersByName ON `Singers`(Name)").as_deref(),
            Some("Singers")
        );
        assert_eq!(
            parse_table_name("CREATE NULL_FILTERED INDEX Idx ON Albums(Title)").as_deref(),
            Some("Albums")
        );
    }

    #[test]
    fn test_alter_table() {
        assert_eq!(
            parse_table_name("ALTER TABLE Albums ADD COLUMN Genre STRING(MAX)").as_deref(),
            Some("Albums")
        );
        assert_eq!(
            parse_table_name("ALTER TABLE `Albums` ADD COLUMN Genre STRING(MAX)").as_deref(),
            Some("Albums")
        );
    }

    #[test]
    fn test_unrecognized_statement() {
        assert_eq!(parse_table_name("DROP TABLE Singers"), None);
        assert_eq!(parse_table_name("CREATE VIEW V AS SELECT 1"), None);
        assert_eq!(parse_table_name(""), None);
    }
}
