//! Decoding of every agtype shape a driver can return

use agegraph::agtype::{decode, decode_json, AgValue, DriverElement, RawValue};
use serde_json::json;

#[test]
fn test_vertex_scenario() {
    let decoded = decode_json(&json!({"id": 7, "label": "Person", "properties": {"name": "Alice"}}));

    assert_eq!(
        decoded.to_json(),
        json!({"id": "7", "label": "Person", "properties": {"name": "Alice"}, "type": "node"})
    );
}

#[test]
fn test_edge_scenario() {
    let decoded = decode_json(&json!({
        "id": 1, "label": "KNOWS", "start_id": 10, "end_id": 20, "properties": {}
    }));

    assert_eq!(
        decoded.to_json(),
        json!({
            "id": "1", "label": "KNOWS", "source": "10", "target": "20",
            "properties": {}, "type": "edge"
        })
    );
}

#[test]
fn test_same_vertex_in_every_shape() {
    let shapes = vec![
        RawValue::Json(json!({"id": 844424930131969_u64, "label": "Person", "properties": {"name": "Ann"}})),
        RawValue::Json(json!(
            r#"{"id": 844424930131969, "label": "Person", "properties": {"name": "Ann"}}::vertex"#
        )),
        RawValue::Json(json!(
            r#"{id: 844424930131969; label: "Person"; properties: {"name": "Ann"}}"#
        )),
        RawValue::Element(DriverElement::vertex(
            844424930131969_u64,
            "Person",
            json!({"name": "Ann"}),
        )),
    ];

    let decoded: Vec<AgValue> = shapes.into_iter().map(decode).collect();
    for value in &decoded {
        assert_eq!(value, &decoded[0]);
    }
    assert_eq!(decoded[0].as_node().unwrap().id, "844424930131969");
}

#[test]
fn test_numeric_ids_are_always_strings() {
    for raw_id in [json!(42), json!("42"), json!(42.0), json!("0042")] {
        let decoded = decode_json(&json!({"id": raw_id, "label": "A"}));
        assert_eq!(decoded.as_node().unwrap().id, "42");
    }

    let decoded = decode_json(&json!({"id": "Airport:LAX", "label": "Airport"}));
    assert_eq!(decoded.as_node().unwrap().id, "Airport:LAX");
}

#[test]
fn test_label_list_forms() {
    let empty = decode_json(&json!({"id": 1, "label": [], "properties": {}}));
    assert_eq!(empty.as_node().unwrap().label, "");

    let single = decode_json(&json!({"id": 1, "label": ["Person"], "properties": {}}));
    assert_eq!(single.as_node().unwrap().label, "Person");
}

#[test]
fn test_list_of_agtype_text() {
    let decoded = decode_json(&json!([
        r#"{"id": 1, "label": "A", "properties": {}}::vertex"#,
        r#"{"id": 2, "label": "B", "properties": {}}::vertex"#
    ]));

    match decoded {
        AgValue::List(items) => {
            assert!(items.iter().all(|item| item.as_node().is_some()));
        }
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn test_path_round_trip_through_json_is_stable() {
    let text = r#"[{"id": 1, "label": "A", "properties": {}}::vertex, {"id": 3, "label": "R", "start_id": 1, "end_id": 2, "properties": {"since": 2020}}::edge, {"id": 2, "label": "B", "properties": {}}::vertex]::path"#;
    let path = decode_json(&json!(text));
    assert!(path.as_path().is_some());

    let again = decode_json(&path.to_json());
    assert_eq!(again, path);
}

#[test]
fn test_decoded_values_are_fixed_points() {
    let node = decode_json(&json!({"id": 7, "label": ["Person"], "properties": {"age": 30}}));
    let edge = decode_json(&json!({"id": 8, "label": "KNOWS", "startid": 7, "endid": 9}));

    for value in [node, edge] {
        assert_eq!(decode(RawValue::Decoded(value.clone())), value);
        assert_eq!(decode_json(&value.to_json()), value);
    }
}

#[test]
fn test_age_literal_string_values_are_lossless() {
    let decoded = decode_json(&json!(
        r#"{id: 1; label: "A"; properties: {"a": "x;y", "b": "label: x"}}"#
    ));

    let node = decoded.as_node().unwrap();
    assert_eq!(node.label, "A");
    assert_eq!(node.properties["a"].as_str(), Some("x;y"));
    assert_eq!(node.properties["b"].as_str(), Some("label: x"));
}
