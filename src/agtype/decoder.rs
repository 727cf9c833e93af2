//! agtype Value Decoder
//!
//! Classifies one raw result cell and normalizes it into an [`AgValue`].
//!
//! # Priority
//!
//! 1. null stays null
//! 2. mappings are classified structurally (edge, vertex, path, plain map)
//! 3. lists are decoded element by element
//! 4. text goes through [`encoding::parse_agtype_text`]; unparseable text is
//!    returned unchanged
//! 5. driver objects ([`DriverElement`]) become the equivalent mapping
//! 6. numbers and booleans pass through
//!
//! Decoding never fails, and a decoded node, edge or path fed back in (either
//! as an [`AgValue`] or as its serialized JSON) decodes to itself.

use super::encoding::{self, TypeMarker};
use super::{AgValue, DriverElement, Edge, Node, Path, Properties, RawValue};
use crate::utils::id_encoding::canonical_id;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

type Mapping = BTreeMap<String, AgValue>;

/// Explicit endpoint spellings, in resolution order. `source`/`target` is the
/// decoder's own output shape and wins over the raw AGE spellings.
const ENDPOINT_KEY_PAIRS: [(&str, &str); 5] = [
    ("source", "target"),
    ("start_id", "end_id"),
    ("startid", "endid"),
    ("startId", "endId"),
    ("start_vertex_id", "end_vertex_id"),
];

/// Decode one raw cell.
pub fn decode(raw: RawValue) -> AgValue {
    match raw {
        RawValue::Json(JsonValue::String(text)) => decode_text(text),
        RawValue::Json(value) => decode_value(AgValue::from(value)),
        RawValue::Element(element) => decode_element(element),
        RawValue::Decoded(AgValue::String(text)) => decode_text(text),
        RawValue::Decoded(value) => decode_value(value),
    }
}

/// Decode a borrowed JSON cell.
pub fn decode_json(value: &JsonValue) -> AgValue {
    decode(RawValue::Json(value.clone()))
}

fn decode_element(element: DriverElement) -> AgValue {
    classify_map(element.into_mapping())
}

/// Decode a whole cell of agtype text. Scalars such as `42` or `"Alice"`
/// (quoted) are parsed here, while strings nested in already-parsed data are
/// only re-parsed when they look like agtype themselves.
fn decode_text(text: String) -> AgValue {
    let Some(parsed) = encoding::parse_agtype_text(&text) else {
        return AgValue::String(text);
    };

    log::trace!(
        "Parsed agtype text as {:?} (marker {:?})",
        parsed.encoding,
        parsed.marker
    );

    match (parsed.marker, decode_value(AgValue::from(parsed.payload))) {
        (Some(TypeMarker::Path), AgValue::List(elements)) => {
            AgValue::Path(Path::from_elements(elements))
        }
        (_, decoded) => decoded,
    }
}

/// Decode a value nested inside a cell.
pub(crate) fn decode_value(value: AgValue) -> AgValue {
    match value {
        AgValue::Map(map) => classify_map(map),
        AgValue::List(items) => AgValue::List(items.into_iter().map(decode_value).collect()),
        AgValue::String(text) if encoding::looks_like_agtype(&text) => decode_text(text),
        // Scalars, and nodes/edges/paths that are canonical already
        other => other,
    }
}

fn classify_map(map: Mapping) -> AgValue {
    if map.contains_key("id") && map.contains_key("label") {
        return match find_endpoint_keys(&map) {
            Some(endpoints) => AgValue::Edge(build_edge(map, endpoints)),
            None => AgValue::Node(build_node(map)),
        };
    }

    if is_serialized_path(&map) {
        if let Some(AgValue::List(elements)) = map.get("elements") {
            return AgValue::Path(decode_path_elements(elements.clone()));
        }
    }

    if let Some(AgValue::List(elements)) = map.get("path") {
        return AgValue::Path(decode_path_elements(elements.clone()));
    }

    AgValue::Map(
        map.into_iter()
            .map(|(key, value)| (key, decode_value(value)))
            .collect(),
    )
}

/// The shape a decoded [`Path`] serializes to.
fn is_serialized_path(map: &Mapping) -> bool {
    map.get("type").and_then(AgValue::as_str) == Some("path")
        && matches!(map.get("elements"), Some(AgValue::List(_)))
}

fn decode_path_elements(elements: Vec<AgValue>) -> Path {
    Path::from_elements(elements.into_iter().map(decode_value).collect())
}

/// Find the key pair holding an edge's endpoints, if the mapping is an edge.
fn find_endpoint_keys(map: &Mapping) -> Option<(String, String)> {
    for (start, end) in ENDPOINT_KEY_PAIRS {
        if map.contains_key(start) && map.contains_key(end) {
            return Some((start.to_string(), end.to_string()));
        }
    }

    // Last resort for spellings outside the table (`startNodeId`, `end_node_id`).
    // Known false-positive risk: a plain map with keys such as `start_id` and
    // `weekend_id` also lands here.
    let start = map.keys().find(|key| is_endpoint_like(key, "start"))?;
    let end = map
        .keys()
        .find(|key| *key != start && is_endpoint_like(key, "end"))?;
    log::debug!(
        "Classified mapping as edge through endpoint heuristic: {} / {}",
        start,
        end
    );
    Some((start.clone(), end.clone()))
}

fn is_endpoint_like(key: &str, needle: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    lower.contains(needle) && lower.ends_with("id")
}

fn build_node(mut map: Mapping) -> Node {
    Node {
        id: map.get("id").map(canonical_id).unwrap_or_default(),
        label: normalize_label(map.get("label")),
        properties: take_properties(&mut map),
    }
}

fn build_edge(mut map: Mapping, (source_key, target_key): (String, String)) -> Edge {
    Edge {
        id: map.get("id").map(canonical_id).unwrap_or_default(),
        label: normalize_label(map.get("label")),
        source: map.get(&source_key).map(canonical_id).unwrap_or_default(),
        target: map.get(&target_key).map(canonical_id).unwrap_or_default(),
        properties: take_properties(&mut map),
    }
}

fn take_properties(map: &mut Mapping) -> Properties {
    match map.remove("properties") {
        Some(AgValue::Map(properties)) => properties
            .into_iter()
            .map(|(key, value)| (key, decode_value(value)))
            .collect(),
        _ => Properties::new(),
    }
}

/// A label is always one string: the first of a list, or the value's text.
fn normalize_label(label: Option<&AgValue>) -> String {
    match label {
        Some(AgValue::List(labels)) => labels.first().map(label_text).unwrap_or_default(),
        Some(value) => label_text(value),
        None => String::new(),
    }
}

fn label_text(value: &AgValue) -> String {
    match value {
        AgValue::String(s) => s.clone(),
        AgValue::Null => String::new(),
        AgValue::Number(n) => n.to_string(),
        AgValue::Bool(b) => b.to_string(),
        other => other.to_json().to_string(),
    }
}
