//! agegraph - agtype decoding and graph extraction for Apache AGE
//!
//! This crate turns raw Apache AGE query output into renderable graph data:
//! - agtype decoding of every physical shape a driver can hand back
//! - Path reconstruction from alternating node/edge element lists
//! - Deduplicated node/edge extraction across a whole result set
//! - RETURN column inference for wrapping Cypher in AGE's `cypher()` SQL call
//!
//! All entry points are pure and synchronous; they never fail on malformed
//! input and can be called concurrently without coordination.

pub mod agtype;
pub mod config;
pub mod graph_output;
pub mod query_wrapper;
pub mod utils;

pub use agtype::{decode, AgValue, Edge, Node, Path, RawValue, Segment};
pub use graph_output::{extract, ExtractionResult};
pub use query_wrapper::{infer_return_columns, wrap_cypher_query};
