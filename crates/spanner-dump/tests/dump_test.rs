//! End-to-end dump tests over in-memory schema and row sources.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use spanner_dump::source::{ReadRequest, RowSource, SchemaSource};
use spanner_dump::{DumpConfig, DumpError, Dumper, Result, Row, Table, TableFilter, Value};

struct MemorySchema {
    tables: Vec<Table>,
    ddl: Vec<String>,
}

#[async_trait]
impl SchemaSource for MemorySchema {
    async fn list_tables(&self, names: &[String]) -> Result<Vec<Table>> {
        if names.is_empty() {
            let mut all = self.tables.clone();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            return Ok(all);
        }
        names
            .iter()
            .map(|name| {
                self.tables
                    .iter()
                    .find(|t| &t.name == name)
                    .cloned()
                    .ok_or_else(|| DumpError::Schema(format!("no such table {:?}", name)))
            })
            .collect()
    }

    async fn list_ddl(&self) -> Result<Vec<String>> {
        Ok(self.ddl.clone())
    }
}

struct MemoryRows {
    rows: HashMap<String, Vec<Row>>,
    requests: Mutex<Vec<ReadRequest>>,
}

impl MemoryRows {
    fn new(rows: HashMap<String, Vec<Row>>) -> Self {
        Self {
            rows,
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl RowSource for MemoryRows {
    fn read_rows(&self, request: ReadRequest) -> mpsc::Receiver<Result<Row>> {
        let rows = self.rows.get(&request.table).cloned().unwrap_or_default();
        self.requests.lock().unwrap().push(request);

        let (tx, rx) = mpsc::channel(rows.len().max(1));
        for row in rows {
            tx.try_send(Ok(row)).unwrap();
        }
        rx
    }
}

fn singers_fixture() -> (Arc<MemorySchema>, Arc<MemoryRows>) {
    let schema = Arc::new(MemorySchema {
        tables: vec![
            Table::new("Singers", vec!["Id".to_string(), "Name".to_string()]),
            Table::new("Albums", vec!["Id".to_string(), "Title".to_string()])
                .with_parent("Singers"),
        ],
        ddl: vec![
            "CREATE TABLE Singers (Id INT64, Name STRING(MAX)) PRIMARY KEY (Id)".to_string(),
            "CREATE TABLE Albums (Id INT64, Title STRING(MAX)) PRIMARY KEY (Id)".to_string(),
            "CREATE INDEX AlbumsByTitle ON Albums(Title)".to_string(),
        ],
    });

    let mut rows = HashMap::new();
    rows.insert(
        "Singers".to_string(),
        vec![
            vec![Value::from(1i64), Value::from("Marc")],
            vec![Value::from(2i64), Value::from("Catalina")],
        ],
    );
    rows.insert(
        "Albums".to_string(),
        vec![vec![Value::from(10i64), Value::String(None)]],
    );

    (schema, Arc::new(MemoryRows::new(rows)))
}

#[tokio::test]
async fn dumps_ddl_then_data() {
    let (schema, rows) = singers_fixture();
    let config = DumpConfig {
        tables: vec![TableFilter::all("Singers"), TableFilter::all("Albums")],
        ..Default::default()
    };

    let mut dumper = Dumper::new(config, schema, rows, Vec::new()).unwrap();
    let summary = dumper.dump().await.unwrap();
    let output = String::from_utf8(dumper.into_inner()).unwrap();

    assert_eq!(
        output,
        "CREATE TABLE Singers (Id INT64, Name STRING(MAX)) PRIMARY KEY (Id);\n\
         CREATE TABLE Albums (Id INT64, Title STRING(MAX)) PRIMARY KEY (Id);\n\
         CREATE INDEX AlbumsByTitle ON Albums(Title);\n\
         INSERT INTO `Singers` (`Id`, `Name`) VALUES (1, \"Marc\"), (2, \"Catalina\");\n\
         INSERT INTO `Albums` (`Id`, `Title`) VALUES (10, NULL);\n"
    );
    assert_eq!(summary.tables_dumped, 2);
    assert_eq!(summary.rows_dumped, 3);
}

#[tokio::test]
async fn ddl_pass_filters_to_requested_tables() {
    let (schema, rows) = singers_fixture();
    let config = DumpConfig {
        tables: vec![TableFilter::all("Albums")],
        no_data: true,
        ..Default::default()
    };

    let mut dumper = Dumper::new(config, schema, rows, Vec::new()).unwrap();
    dumper.dump().await.unwrap();
    let output = String::from_utf8(dumper.into_inner()).unwrap();

    // the Singers DDL is skipped; both Albums statements survive
    assert_eq!(
        output,
        "CREATE TABLE Albums (Id INT64, Title STRING(MAX)) PRIMARY KEY (Id);\n\
         CREATE INDEX AlbumsByTitle ON Albums(Title);\n"
    );
}

#[tokio::test]
async fn sort_mode_orders_parents_first() {
    let (schema, rows) = singers_fixture();
    // Albums requested before its parent; sort mode must fix the order
    let config = DumpConfig {
        tables: vec![TableFilter::all("Albums"), TableFilter::all("Singers")],
        sort: true,
        no_ddl: true,
        ..Default::default()
    };

    let mut dumper = Dumper::new(config, schema, rows, Vec::new()).unwrap();
    dumper.dump().await.unwrap();
    let output = String::from_utf8(dumper.into_inner()).unwrap();

    let singers_at = output.find("INSERT INTO `Singers`").unwrap();
    let albums_at = output.find("INSERT INTO `Albums`").unwrap();
    assert!(singers_at < albums_at);
}

#[tokio::test]
async fn sort_mode_rejects_cyclic_schemas() {
    let schema = Arc::new(MemorySchema {
        tables: vec![
            Table::new("A", vec!["Id".to_string()]).with_parent("B"),
            Table::new("B", vec!["Id".to_string()]).with_parent("A"),
        ],
        ddl: vec![],
    });
    let rows = Arc::new(MemoryRows::new(HashMap::new()));
    let config = DumpConfig {
        tables: vec![TableFilter::all("A"), TableFilter::all("B")],
        sort: true,
        no_ddl: true,
        ..Default::default()
    };

    let mut dumper = Dumper::new(config, schema, rows, Vec::<u8>::new()).unwrap();
    let result = dumper.dump().await;
    assert!(matches!(result, Err(DumpError::CyclicDependency { .. })));
}

#[tokio::test]
async fn upsert_mode_switches_statement_verb() {
    let (schema, rows) = singers_fixture();
    let config = DumpConfig {
        tables: vec![TableFilter::all("Singers")],
        upsert: true,
        no_ddl: true,
        ..Default::default()
    };

    let mut dumper = Dumper::new(config, schema, rows, Vec::new()).unwrap();
    dumper.dump().await.unwrap();
    let output = String::from_utf8(dumper.into_inner()).unwrap();

    assert!(output.starts_with("INSERT OR UPDATE INTO `Singers`"));
}

#[tokio::test]
async fn bulk_size_splits_statements() {
    let (schema, rows) = singers_fixture();
    let config = DumpConfig {
        tables: vec![TableFilter::all("Singers")],
        bulk_size: 1,
        no_ddl: true,
        ..Default::default()
    };

    let mut dumper = Dumper::new(config, schema, rows, Vec::new()).unwrap();
    dumper.dump().await.unwrap();
    let output = String::from_utf8(dumper.into_inner()).unwrap();

    assert_eq!(
        output,
        "INSERT INTO `Singers` (`Id`, `Name`) VALUES (1, \"Marc\");\n\
         INSERT INTO `Singers` (`Id`, `Name`) VALUES (2, \"Catalina\");\n"
    );
}

#[tokio::test]
async fn filters_and_timestamp_reach_the_row_source() {
    let (schema, rows) = singers_fixture();
    let timestamp = "2024-03-01T00:00:00Z".parse().unwrap();
    let config = DumpConfig {
        tables: vec![TableFilter::with_filter("Singers", "Id > 100")],
        timestamp: Some(timestamp),
        no_ddl: true,
        ..Default::default()
    };

    let mut dumper = Dumper::new(config, schema, rows.clone(), Vec::<u8>::new()).unwrap();
    dumper.dump().await.unwrap();

    let requests = rows.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].table, "Singers");
    assert_eq!(requests[0].columns, vec!["Id", "Name"]);
    assert_eq!(requests[0].filter.as_deref(), Some("Id > 100"));
    assert_eq!(requests[0].timestamp, Some(timestamp));
}

/// Yields one good row, then the given error.
struct FailingRows(fn(String) -> DumpError);

impl RowSource for FailingRows {
    fn read_rows(&self, request: ReadRequest) -> mpsc::Receiver<Result<Row>> {
        let (tx, rx) = mpsc::channel(2);
        tx.try_send(Ok(vec![Value::from(1i64), Value::from("ok")]))
            .unwrap();
        tx.try_send(Err((self.0)(request.table))).unwrap();
        rx
    }
}

async fn dump_with_failing_rows(source: FailingRows) -> Result<()> {
    let (schema, _) = singers_fixture();
    let config = DumpConfig {
        tables: vec![TableFilter::all("Singers")],
        no_ddl: true,
        ..Default::default()
    };

    let mut dumper = Dumper::new(config, schema, Arc::new(source), Vec::<u8>::new()).unwrap();
    dumper.dump().await.map(|_| ())
}

#[tokio::test]
async fn transport_errors_abort_the_dump() {
    let result = dump_with_failing_rows(FailingRows(|table| {
        DumpError::source(table, "session lost")
    }))
    .await;
    assert!(matches!(result, Err(DumpError::Source { .. })));
}

#[tokio::test]
async fn encoding_errors_propagate_verbatim() {
    let result = dump_with_failing_rows(FailingRows(|_| {
        DumpError::Encoding("unsupported column type ARRAY<STRUCT>".to_string())
    }))
    .await;
    match result {
        Err(DumpError::Encoding(message)) => {
            assert_eq!(message, "unsupported column type ARRAY<STRUCT>");
        }
        other => panic!("expected encoding error, got {:?}", other),
    }
}
