//! Graph output for visualization
//!
//! Walks a whole query result, decodes every cell, and aggregates one
//! deduplicated node set and edge set that a client can render directly.
//!
//! Any column may hold nodes, edges, paths, lists of those, or unrelated
//! data. Graph elements are keyed by their canonical id (first occurrence
//! wins); everything else is kept under `other` with its column name.
//! When a query returns edges without their endpoints (`RETURN r`), blank
//! placeholder nodes are synthesized so the graph stays connected.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

use crate::agtype::{build_path, decode, AgValue, Edge, Node, Path, RawValue};

/// One result row: column name and raw cell, in column order.
pub type Row = Vec<(String, RawValue)>;

/// A non-graph value and the column it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OtherValue {
    pub column: String,
    pub value: AgValue,
}

/// Aggregated graph payload of one result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Unique by id, in first-encountered order
    pub nodes: Vec<Node>,
    /// Unique by id, in first-encountered order
    pub edges: Vec<Edge>,
    pub paths: Vec<Path>,
    pub other: Vec<OtherValue>,
}

/// Extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Synthesize blank nodes for edge endpoints missing from the result
    pub placeholder_endpoints: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            placeholder_endpoints: true,
        }
    }
}

/// Accumulates graph elements across the rows of one result set.
///
/// Each extractor is private to one call; nothing is shared between
/// extractions.
#[derive(Debug, Default)]
pub struct GraphExtractor {
    options: ExtractOptions,
    result: ExtractionResult,
    seen_nodes: HashSet<String>,
    seen_edges: HashSet<String>,
}

impl GraphExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn push_row(&mut self, row: Row) {
        for (column, raw) in row {
            self.push_cell(&column, raw);
        }
    }

    /// Decode one cell and file it as graph data or as `other`.
    pub fn push_cell(&mut self, column: &str, raw: RawValue) {
        match decode(raw) {
            AgValue::Node(node) => self.insert_node(node),
            AgValue::Edge(edge) => self.insert_edge(edge),
            AgValue::Path(path) => self.insert_path(path),
            AgValue::List(items) => {
                if let Some(path) = build_path(&items) {
                    self.insert_path(path);
                } else if !self.harvest_list(&items) {
                    log::debug!("Column '{}': list without graph elements", column);
                    self.push_other(column, AgValue::List(items));
                }
            }
            value => self.push_other(column, value),
        }
    }

    /// Finish the extraction, running the endpoint-completion pass.
    pub fn finish(mut self) -> ExtractionResult {
        if self.options.placeholder_endpoints && !self.result.edges.is_empty() {
            self.complete_endpoints();
        }
        log::debug!(
            "Extracted {} nodes, {} edges, {} paths, {} other values",
            self.result.nodes.len(),
            self.result.edges.len(),
            self.result.paths.len(),
            self.result.other.len()
        );
        self.result
    }

    fn insert_node(&mut self, node: Node) {
        if self.seen_nodes.insert(node.id.clone()) {
            self.result.nodes.push(node);
        }
    }

    fn insert_edge(&mut self, edge: Edge) {
        if self.seen_edges.insert(edge.id.clone()) {
            self.result.edges.push(edge);
        }
    }

    fn insert_path(&mut self, path: Path) {
        for segment in &path.segments {
            self.insert_node(segment.start_node.clone());
            self.insert_edge(segment.edge.clone());
            self.insert_node(segment.end_node.clone());
        }
        // Covers paths that produced no segments
        for element in &path.elements {
            match element {
                AgValue::Node(node) => self.insert_node(node.clone()),
                AgValue::Edge(edge) => self.insert_edge(edge.clone()),
                _ => {}
            }
        }
        self.result.paths.push(path);
    }

    /// Insert the graph elements of a list, item by item. Nested lists are
    /// scanned the same way. Returns whether anything was found.
    fn harvest_list(&mut self, items: &[AgValue]) -> bool {
        let mut found = false;
        for item in items {
            match item {
                AgValue::Node(node) => {
                    self.insert_node(node.clone());
                    found = true;
                }
                AgValue::Edge(edge) => {
                    self.insert_edge(edge.clone());
                    found = true;
                }
                AgValue::Path(path) => {
                    self.insert_path(path.clone());
                    found = true;
                }
                AgValue::List(inner) => match build_path(inner) {
                    Some(path) => {
                        self.insert_path(path);
                        found = true;
                    }
                    None => found |= self.harvest_list(inner),
                },
                _ => {}
            }
        }
        found
    }

    fn push_other(&mut self, column: &str, value: AgValue) {
        self.result.other.push(OtherValue {
            column: column.to_string(),
            value,
        });
    }

    fn complete_endpoints(&mut self) {
        let missing: Vec<String> = self
            .result
            .edges
            .iter()
            .flat_map(|edge| [edge.source.clone(), edge.target.clone()])
            .filter(|id| !self.seen_nodes.contains(id))
            .collect();

        let before = self.result.nodes.len();
        for id in missing {
            self.insert_node(Node::placeholder(id));
        }
        let added = self.result.nodes.len() - before;
        if added > 0 {
            log::debug!("Added {} placeholder endpoint nodes", added);
        }
    }
}

/// Extract graph elements from decoded driver rows.
pub fn extract<I>(rows: I) -> ExtractionResult
where
    I: IntoIterator<Item = Row>,
{
    extract_with(rows, ExtractOptions::default())
}

pub fn extract_with<I>(rows: I, options: ExtractOptions) -> ExtractionResult
where
    I: IntoIterator<Item = Row>,
{
    let mut extractor = GraphExtractor::new(options);
    for row in rows {
        extractor.push_row(row);
    }
    extractor.finish()
}

/// Extract from rows given as JSON objects (column order is preserved).
/// Rows that are not objects are skipped.
pub fn extract_json_rows(rows: &[JsonValue], options: ExtractOptions) -> ExtractionResult {
    let rows = rows.iter().filter_map(|row| match row {
        JsonValue::Object(columns) => Some(
            columns
                .iter()
                .map(|(column, cell)| (column.clone(), RawValue::Json(cell.clone())))
                .collect::<Row>(),
        ),
        other => {
            log::debug!("Skipping non-object result row: {}", other);
            None
        }
    });
    extract_with(rows, options)
}
