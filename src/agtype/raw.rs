//! Raw input boundary between the database driver adapter and the decoder.
//!
//! The adapter converts whatever its driver produced into one of these
//! variants; the decoder never probes object attributes at runtime.

use super::AgValue;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// One raw cell of a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Native containers, scalars, and agtype text in any recognized encoding
    Json(JsonValue),
    /// A driver-specific vertex/edge/path object, already unpacked into fields
    Element(DriverElement),
    /// A value that already went through the decoder
    Decoded(AgValue),
}

/// Driver graph object converted into typed optional fields.
///
/// Field names follow AGE's own vertex/edge layout; the adapter fills in
/// whichever the driver exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverElement {
    pub id: Option<JsonValue>,
    pub label: Option<JsonValue>,
    pub start_id: Option<JsonValue>,
    pub end_id: Option<JsonValue>,
    pub properties: Option<JsonValue>,
    /// Ordered vertex/edge elements when the object is a path
    pub path: Option<Vec<RawValue>>,
}

impl DriverElement {
    pub fn vertex(id: impl Into<JsonValue>, label: impl Into<JsonValue>, properties: JsonValue) -> Self {
        DriverElement {
            id: Some(id.into()),
            label: Some(label.into()),
            properties: Some(properties),
            ..Default::default()
        }
    }

    pub fn edge(
        id: impl Into<JsonValue>,
        label: impl Into<JsonValue>,
        start_id: impl Into<JsonValue>,
        end_id: impl Into<JsonValue>,
        properties: JsonValue,
    ) -> Self {
        DriverElement {
            id: Some(id.into()),
            label: Some(label.into()),
            start_id: Some(start_id.into()),
            end_id: Some(end_id.into()),
            properties: Some(properties),
            ..Default::default()
        }
    }

    pub fn path(elements: Vec<RawValue>) -> Self {
        DriverElement {
            path: Some(elements),
            ..Default::default()
        }
    }

    /// The equivalent mapping, using AGE's key spellings. Path elements are
    /// decoded on the way so the mapping holds canonical values.
    pub(crate) fn into_mapping(self) -> BTreeMap<String, AgValue> {
        let mut mapping = BTreeMap::new();
        let fields = [
            ("id", self.id),
            ("label", self.label),
            ("start_id", self.start_id),
            ("end_id", self.end_id),
            ("properties", self.properties),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                mapping.insert(key.to_string(), AgValue::from(value));
            }
        }
        if let Some(elements) = self.path {
            let decoded = elements.into_iter().map(super::decode).collect();
            mapping.insert("path".to_string(), AgValue::List(decoded));
        }
        mapping
    }
}

impl From<JsonValue> for RawValue {
    fn from(value: JsonValue) -> Self {
        RawValue::Json(value)
    }
}

impl From<DriverElement> for RawValue {
    fn from(element: DriverElement) -> Self {
        RawValue::Element(element)
    }
}

impl From<AgValue> for RawValue {
    fn from(value: AgValue) -> Self {
        RawValue::Decoded(value)
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Json(JsonValue::String(text.to_string()))
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Json(JsonValue::Null)
    }
}
