//! Graph element extraction across whole result sets

use agegraph::agtype::{DriverElement, RawValue};
use agegraph::graph_output::{extract, extract_json_rows, ExtractOptions, ExtractionResult, Row};
use serde_json::{json, Value};
use std::collections::HashSet;

fn json_rows(rows: Value) -> ExtractionResult {
    match rows {
        Value::Array(rows) => extract_json_rows(&rows, ExtractOptions::default()),
        _ => ExtractionResult::default(),
    }
}

fn assert_invariants(result: &ExtractionResult) {
    let node_ids: HashSet<&str> = result.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids.len(), result.nodes.len(), "duplicate node ids");

    let edge_ids: HashSet<&str> = result.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edge_ids.len(), result.edges.len(), "duplicate edge ids");

    for edge in &result.edges {
        assert!(node_ids.contains(edge.source.as_str()), "missing source {}", edge.source);
        assert!(node_ids.contains(edge.target.as_str()), "missing target {}", edge.target);
    }

    for other in &result.other {
        assert!(!other.value.is_graph_element());
    }
}

#[test]
fn test_return_r_yields_placeholder_endpoints() {
    let result = json_rows(json!([
        {"r": {"id": 1, "label": "KNOWS", "start_id": 10, "end_id": 20, "properties": {}}}
    ]));

    assert_invariants(&result);
    assert_eq!(result.edges.len(), 1);
    let nodes: Vec<(&str, &str)> = result
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.label.as_str()))
        .collect();
    assert_eq!(nodes, vec![("10", ""), ("20", "")]);
}

#[test]
fn test_same_node_across_rows() {
    let result = json_rows(json!([
        {"n": {"id": 1, "label": "Person", "properties": {"name": "Alice"}}},
        {"n": {"id": 1, "label": "Person", "properties": {"name": "Alice"}}}
    ]));

    assert_invariants(&result);
    assert_eq!(result.nodes.len(), 1);
}

#[test]
fn test_typical_match_result() {
    // MATCH (a)-[r]->(b) RETURN a, r, b, a.name
    let result = json_rows(json!([
        {
            "a": r#"{"id": 1, "label": "Person", "properties": {"name": "Alice"}}::vertex"#,
            "r": r#"{"id": 100, "label": "KNOWS", "start_id": 1, "end_id": 2, "properties": {}}::edge"#,
            "b": r#"{"id": 2, "label": "Person", "properties": {"name": "Bob"}}::vertex"#,
            "name": "\"Alice\""
        },
        {
            "a": r#"{"id": 1, "label": "Person", "properties": {"name": "Alice"}}::vertex"#,
            "r": r#"{"id": 101, "label": "KNOWS", "start_id": 1, "end_id": 3, "properties": {}}::edge"#,
            "b": r#"{"id": 3, "label": "Person", "properties": {"name": "Cara"}}::vertex"#,
            "name": "\"Alice\""
        }
    ]));

    assert_invariants(&result);
    let node_ids: Vec<&str> = result.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, vec!["1", "2", "3"]);
    assert_eq!(result.edges.len(), 2);
    assert_eq!(result.other.len(), 2);
    assert_eq!(result.other[0].column, "name");
    assert_eq!(result.other[0].value.as_str(), Some("Alice"));
}

#[test]
fn test_path_column_feeds_nodes_and_edges() {
    let path = r#"[{"id": 1, "label": "A", "properties": {}}::vertex, {"id": 7, "label": "R", "start_id": 1, "end_id": 2, "properties": {}}::edge, {"id": 2, "label": "B", "properties": {}}::vertex, {"id": 8, "label": "R", "start_id": 2, "end_id": 3, "properties": {}}::edge, {"id": 3, "label": "C", "properties": {}}::vertex]::path"#;
    let result = json_rows(json!([{"p": path}, {"p": path}]));

    assert_invariants(&result);
    assert_eq!(result.paths.len(), 2);
    assert_eq!(result.paths[0].segments.len(), 2);
    assert_eq!(result.nodes.len(), 3);
    assert_eq!(result.edges.len(), 2);
}

#[test]
fn test_collected_paths_in_a_list_cell() {
    // MATCH p = ... RETURN collect(p)
    let result = json_rows(json!([{"ps": [
        {"path": [{"id": 1, "label": "A"}, {"id": 9, "label": "R", "start_id": 1, "end_id": 2}, {"id": 2, "label": "B"}]},
        {"path": [{"id": 2, "label": "B"}, {"id": 10, "label": "R", "start_id": 2, "end_id": 3}, {"id": 3, "label": "C"}]}
    ]}]));

    assert_invariants(&result);
    assert_eq!(result.paths.len(), 2);
    assert_eq!(result.nodes.len(), 3);
    assert!(result.other.is_empty());
}

#[test]
fn test_driver_rows() {
    let rows: Vec<Row> = vec![vec![
        (
            "a".to_string(),
            RawValue::Element(DriverElement::vertex(1, "Person", json!({"name": "Ann"}))),
        ),
        (
            "r".to_string(),
            RawValue::Element(DriverElement::edge(5, "KNOWS", 1, 2, json!({}))),
        ),
        ("n".to_string(), RawValue::Json(json!(3))),
    ]];

    let result = extract(rows);
    assert_invariants(&result);
    assert_eq!(result.nodes.len(), 2);
    assert_eq!(result.nodes[0].label, "Person");
    assert_eq!(result.other.len(), 1);
}

#[test]
fn test_result_serializes_to_api_shape() {
    let result = json_rows(json!([
        {"r": {"id": 1, "label": "KNOWS", "start_id": 10, "end_id": 20}, "c": 5}
    ]));

    let body = serde_json::to_value(&result).unwrap();
    assert_eq!(body["edges"][0]["type"], json!("edge"));
    assert_eq!(body["nodes"][0]["id"], json!("10"));
    assert_eq!(body["other"], json!([{"column": "c", "value": 5}]));
    assert_eq!(body["paths"], json!([]));
}

#[test]
fn test_deterministic_output() {
    let rows = json!([
        {"x": {"id": 3, "label": "C"}, "y": {"id": 1, "label": "A"}},
        {"x": {"id": 2, "label": "B"}, "y": {"id": 9, "label": "R", "start_id": 2, "end_id": 4}}
    ]);

    let first = json_rows(rows.clone());
    let second = json_rows(rows);
    assert_eq!(first, second);
    let node_ids: Vec<&str> = first.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, vec!["3", "1", "2", "4"]);
}
