//! Canonical agtype value model
//!
//! Apache AGE hands graph query results back as `agtype`. Depending on the
//! driver and on how the column was cast, the same vertex can arrive as a
//! native mapping, as JSON text with a `::vertex` marker, as AGE's own
//! brace/semicolon literal, or as a driver object. Everything is normalized
//! into [`AgValue`]:
//!
//! ```text
//! Null | Bool | Number | String | List | Map      -- pass-through data
//! Node { id, label, properties }                  -- type: "node"
//! Edge { id, label, source, target, properties }  -- type: "edge"
//! Path { segments, elements, node_ids, ... }      -- type: "path"
//! ```
//!
//! Identifiers are always [`CanonicalId`] strings so that 64-bit AGE graph ids
//! survive consumers whose numbers are IEEE doubles.

pub mod decoder;
pub mod encoding;
pub mod path;
mod raw;

use serde::Serialize;
use serde_json::{Number, Value as JsonValue};
use std::collections::BTreeMap;

pub use decoder::{decode, decode_json};
pub use path::build_path;
pub use raw::{DriverElement, RawValue};

/// Decimal-string form of an entity identifier.
pub type CanonicalId = String;

/// Property map of a node or edge. Ordered so serialized output is stable.
pub type Properties = BTreeMap<String, AgValue>;

/// A decoded agtype value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgValue {
    Null,
    Bool(bool),
    /// Numbers are passed through untouched (i64, u64 or f64).
    Number(Number),
    String(String),
    List(Vec<AgValue>),
    Map(BTreeMap<String, AgValue>),
    Node(Node),
    Edge(Edge),
    Path(Path),
}

/// A graph vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "node")]
pub struct Node {
    pub id: CanonicalId,
    /// Always a single label; AGE vertices carry exactly one.
    pub label: String,
    pub properties: Properties,
}

/// A directed graph edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "edge")]
pub struct Edge {
    pub id: CanonicalId,
    pub label: String,
    /// Id of the start vertex
    pub source: CanonicalId,
    /// Id of the end vertex
    pub target: CanonicalId,
    pub properties: Properties,
}

/// One `node -[edge]-> node` hop of a [`Path`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start_node: Node,
    pub edge: Edge,
    pub end_node: Node,
}

/// A traversal: alternating nodes and edges.
///
/// `elements` always keeps the raw decoded element list, so a path whose
/// elements did not line up into segments can still be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "path")]
pub struct Path {
    pub segments: Vec<Segment>,
    pub elements: Vec<AgValue>,
    /// Unique node ids in first-seen order
    pub node_ids: Vec<CanonicalId>,
    /// Unique edge ids in first-seen order
    pub edge_ids: Vec<CanonicalId>,
    pub start_node_id: Option<CanonicalId>,
    pub end_node_id: Option<CanonicalId>,
}

impl Node {
    pub fn new(id: impl Into<CanonicalId>, label: impl Into<String>, properties: Properties) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            properties,
        }
    }

    /// Blank-labeled stand-in for an edge endpoint the query did not return.
    pub fn placeholder(id: impl Into<CanonicalId>) -> Self {
        Node::new(id, "", Properties::new())
    }
}

impl Edge {
    pub fn new(
        id: impl Into<CanonicalId>,
        label: impl Into<String>,
        source: impl Into<CanonicalId>,
        target: impl Into<CanonicalId>,
        properties: Properties,
    ) -> Self {
        Edge {
            id: id.into(),
            label: label.into(),
            source: source.into(),
            target: target.into(),
            properties,
        }
    }
}

impl AgValue {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            AgValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            AgValue::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            AgValue::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AgValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for nodes, edges and paths.
    pub fn is_graph_element(&self) -> bool {
        matches!(self, AgValue::Node(_) | AgValue::Edge(_) | AgValue::Path(_))
    }

    /// Render back into plain JSON (the API response shape).
    pub fn to_json(&self) -> JsonValue {
        match self {
            AgValue::Null => JsonValue::Null,
            AgValue::Bool(b) => JsonValue::Bool(*b),
            AgValue::Number(n) => JsonValue::Number(n.clone()),
            AgValue::String(s) => JsonValue::String(s.clone()),
            AgValue::List(items) => JsonValue::Array(items.iter().map(AgValue::to_json).collect()),
            AgValue::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            AgValue::Node(_) | AgValue::Edge(_) | AgValue::Path(_) => {
                serde_json::to_value(self).unwrap_or(JsonValue::Null)
            }
        }
    }
}

/// Structural lift of plain JSON. No classification happens here; use
/// [`decode`] to turn vertex/edge/path shapes into typed values.
impl From<JsonValue> for AgValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => AgValue::Null,
            JsonValue::Bool(b) => AgValue::Bool(b),
            JsonValue::Number(n) => AgValue::Number(n),
            JsonValue::String(s) => AgValue::String(s),
            JsonValue::Array(items) => AgValue::List(items.into_iter().map(AgValue::from).collect()),
            JsonValue::Object(map) => {
                AgValue::Map(map.into_iter().map(|(k, v)| (k, AgValue::from(v))).collect())
            }
        }
    }
}

impl From<Node> for AgValue {
    fn from(node: Node) -> Self {
        AgValue::Node(node)
    }
}

impl From<Edge> for AgValue {
    fn from(edge: Edge) -> Self {
        AgValue::Edge(edge)
    }
}

impl From<Path> for AgValue {
    fn from(path: Path) -> Self {
        AgValue::Path(path)
    }
}
