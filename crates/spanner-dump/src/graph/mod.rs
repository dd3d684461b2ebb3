//! Table dependency graph and topological ordering.
//!
//! Child tables (interleaved in, or referencing, a parent) must be dumped
//! after their parent so every emitted row can be inserted as soon as it is
//! read back. The graph is built from the requested table set only: a parent
//! outside that set does not create an edge, and such children become roots.
//!
//! The sort is Kahn's in-degree elimination with an ordered worklist, so the
//! order among independent tables is always ascending by name — two runs
//! over the same schema produce byte-identical dumps. The returned order
//! places every parent before all of its descendants; there is no
//! child-first intermediate to reverse.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::core::schema::Table;
use crate::error::{DumpError, Result};

/// Dependency graph over a requested set of tables.
#[derive(Debug)]
pub struct DependencyGraph {
    /// parent name -> names of its children within the requested set
    children: BTreeMap<String, Vec<String>>,
    /// table name -> number of parents within the requested set (0 or 1 for
    /// interleaved schemas, but the sort handles arbitrary in-degrees)
    in_degree: BTreeMap<String, usize>,
}

impl DependencyGraph {
    /// Build the graph for the given tables.
    ///
    /// An edge is added from a child to its parent only when the parent is
    /// itself part of the set; tables with no in-set parent are roots.
    pub fn build(tables: &[Table]) -> Self {
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut in_degree: BTreeMap<String, usize> = BTreeMap::new();

        for table in tables {
            in_degree.entry(table.name.clone()).or_insert(0);
        }
        for table in tables {
            if let Some(parent) = &table.parent {
                if !in_degree.contains_key(parent) {
                    continue;
                }
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(table.name.clone());
                *in_degree.entry(table.name.clone()).or_insert(0) += 1;
            }
        }

        Self {
            children,
            in_degree,
        }
    }

    /// Compute a dump order in which every parent precedes all of its
    /// descendants.
    ///
    /// Ties among independent tables break by ascending name. If the graph
    /// contains a cycle, no usable order exists and the unresolvable tables
    /// are reported.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        let mut in_degree = self.in_degree.clone();
        let mut ready: BinaryHeap<Reverse<String>> = in_degree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(name, _)| Reverse(name.clone()))
            .collect();

        let mut order = Vec::with_capacity(in_degree.len());
        while let Some(Reverse(name)) = ready.pop() {
            if let Some(kids) = self.children.get(&name) {
                for child in kids {
                    let d = in_degree
                        .get_mut(child)
                        .ok_or_else(|| DumpError::Schema(format!("unknown table {:?}", child)))?;
                    *d -= 1;
                    if *d == 0 {
                        ready.push(Reverse(child.clone()));
                    }
                }
            }
            order.push(name);
        }

        if order.len() < in_degree.len() {
            // BTreeMap keys are already in ascending name order
            let remaining: Vec<String> = in_degree
                .keys()
                .filter(|name| !order.contains(*name))
                .cloned()
                .collect();
            return Err(DumpError::CyclicDependency { tables: remaining });
        }

        Ok(order)
    }
}
