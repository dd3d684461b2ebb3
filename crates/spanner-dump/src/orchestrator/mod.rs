//! Dump orchestrator - sequences the DDL and data passes.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DumpConfig;
use crate::core::schema::Table;
use crate::ddl;
use crate::encode::encode_row;
use crate::error::Result;
use crate::graph::DependencyGraph;
use crate::source::{ReadRequest, RowSource, SchemaSource};
use crate::writer::BufferedWriter;

/// Dump orchestrator.
///
/// Thin sequencing layer: resolves the table order, then streams each table
/// through the row encoder into a per-table buffered writer. All database
/// access goes through the [`SchemaSource`] and [`RowSource`] seams; output
/// is a stream of newline-terminated SQL statements on `out`.
pub struct Dumper<W: Write> {
    config: DumpConfig,
    schema: Arc<dyn SchemaSource>,
    rows: Arc<dyn RowSource>,
    out: W,
}

/// Result of a dump run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpSummary {
    /// When the dump started.
    pub started_at: DateTime<Utc>,

    /// When the dump completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Tables dumped in the data pass.
    pub tables_dumped: usize,

    /// Total rows written across all tables.
    pub rows_dumped: u64,
}

impl<W: Write> Dumper<W> {
    /// Create a dumper for one run. Validates the configuration.
    pub fn new(
        config: DumpConfig,
        schema: Arc<dyn SchemaSource>,
        rows: Arc<dyn RowSource>,
        out: W,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            schema,
            rows,
            out,
        })
    }

    /// Consume the dumper and return its output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run the dump: DDL pass (unless `no_ddl`), then data pass (unless
    /// `no_data`).
    pub async fn dump(&mut self) -> Result<DumpSummary> {
        let started_at = Utc::now();

        if !self.config.no_ddl {
            info!("Dumping DDL statements");
            self.dump_ddl().await?;
        }

        let (tables_dumped, rows_dumped) = if self.config.no_data {
            (0, 0)
        } else {
            self.dump_tables().await?
        };

        let completed_at = Utc::now();
        let duration_seconds = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;
        info!(
            tables = tables_dumped,
            rows = rows_dumped,
            "Dump completed in {:.2}s",
            duration_seconds
        );

        Ok(DumpSummary {
            started_at,
            completed_at,
            duration_seconds,
            tables_dumped,
            rows_dumped,
        })
    }

    /// Emit the database DDL, restricted to the requested tables when a
    /// table filter is configured.
    async fn dump_ddl(&mut self) -> Result<()> {
        let statements = self.schema.list_ddl().await?;
        let requested: HashSet<String> = self.config.table_names().into_iter().collect();

        for statement in statements {
            if !requested.is_empty() {
                match ddl::parse_table_name(&statement) {
                    Some(name) if requested.contains(&name) => {}
                    _ => continue,
                }
            }
            writeln!(self.out, "{};", statement)?;
        }

        Ok(())
    }

    /// Dump every requested table, one at a time, fully draining each
    /// table's row stream before moving to the next.
    async fn dump_tables(&mut self) -> Result<(usize, u64)> {
        let tables = self.resolve_tables().await?;
        info!("Dumping {} tables", tables.len());

        let bulk_size = self.config.effective_bulk_size();
        let mut total_rows = 0u64;

        for table in &tables {
            let request = ReadRequest {
                table: table.name.clone(),
                columns: table.columns.clone(),
                filter: self.config.filter_for(&table.name).map(str::to_string),
                timestamp: self.config.timestamp,
            };
            let mut stream = self.rows.read_rows(request);

            let mut writer = BufferedWriter::new(table, &mut self.out, bulk_size, self.config.upsert);
            let mut rows = 0u64;
            while let Some(row) = stream.recv().await {
                writer.write(encode_row(&row?)?)?;
                rows += 1;
            }
            writer.flush()?;

            debug!(table = %table.name, rows, "table dumped");
            total_rows += rows;
        }

        Ok((tables.len(), total_rows))
    }

    /// Resolve the tables to dump and their order: configuration order (or
    /// source order when no tables are configured), or parents-first
    /// topological order in sort mode.
    async fn resolve_tables(&self) -> Result<Vec<Table>> {
        let names = self.config.table_names();
        let tables = self.schema.list_tables(&names).await?;

        if !self.config.sort {
            return Ok(tables);
        }

        let order = DependencyGraph::build(&tables).topological_order()?;
        let mut by_name: HashMap<String, Table> =
            tables.into_iter().map(|t| (t.name.clone(), t)).collect();
        Ok(order.iter().filter_map(|name| by_name.remove(name)).collect())
    }
}
