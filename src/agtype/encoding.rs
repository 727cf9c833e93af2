//! Recognized agtype text encodings
//!
//! When an agtype column is read as text, AGE appends a type marker and may
//! emit one of several near-JSON forms:
//!
//! ```text
//! {"id": 844424930131969, "label": "Person", "properties": {}}::vertex
//! [{"id": 1, ...}::vertex, {"id": 2, ...}::edge, {"id": 3, ...}::vertex]::path
//! {id: 1; label: "Person"; properties: {}}
//! 42
//! ```
//!
//! Text is handled by stripping the trailing marker, then trying each
//! [`RawEncoding`] in [`RawEncoding::PRIORITY`] order until one produces
//! strict JSON. Every normalizer here is a pure `&str -> String` function.

use regex::{Captures, Regex};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Unquoted AGE keys followed by a colon, e.g. `startid:` or `Label :`
static BARE_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(start_id|end_id|startid|endid|properties|label|id)\b\s*:").unwrap()
});

/// Element markers embedded in a path literal, after the element's closing brace
static EMBEDDED_MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\s*::\s*(?:vertex|edge)\b").unwrap());

/// Trailing type marker on agtype text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMarker {
    Vertex,
    Edge,
    Path,
    Agtype,
}

impl TypeMarker {
    pub const ALL: [TypeMarker; 4] = [
        TypeMarker::Vertex,
        TypeMarker::Edge,
        TypeMarker::Path,
        TypeMarker::Agtype,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            TypeMarker::Vertex => "::vertex",
            TypeMarker::Edge => "::edge",
            TypeMarker::Path => "::path",
            TypeMarker::Agtype => "::agtype",
        }
    }
}

/// A physical text form that can be normalized into strict JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEncoding {
    /// Already strict JSON
    Json,
    /// A `[...]` list whose elements carry `::vertex`/`::edge` markers
    SuffixedList,
    /// AGE's brace literal with bare keys and `;` separators
    AgeLiteral,
}

impl RawEncoding {
    pub const PRIORITY: [RawEncoding; 3] = [
        RawEncoding::Json,
        RawEncoding::SuffixedList,
        RawEncoding::AgeLiteral,
    ];

    /// Whether this encoding is worth trying on `body` at all.
    pub fn applies_to(self, body: &str) -> bool {
        match self {
            RawEncoding::Json => !body.is_empty(),
            RawEncoding::SuffixedList => {
                body.starts_with('[') && body.ends_with(']') && body.contains("::")
            }
            RawEncoding::AgeLiteral => body.starts_with('{') && body.ends_with('}'),
        }
    }

    pub fn normalize(self, body: &str) -> Cow<'_, str> {
        match self {
            RawEncoding::Json => Cow::Borrowed(body),
            RawEncoding::SuffixedList => Cow::Owned(strip_embedded_markers(body)),
            RawEncoding::AgeLiteral => Cow::Owned(normalize_age_literal(body)),
        }
    }
}

/// Result of successfully parsing agtype text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedText {
    pub payload: JsonValue,
    pub marker: Option<TypeMarker>,
    pub encoding: RawEncoding,
}

/// Split a trailing type marker off agtype text.
///
/// Surrounding whitespace is ignored; the returned body is trimmed.
pub fn strip_type_marker(text: &str) -> (&str, Option<TypeMarker>) {
    let trimmed = text.trim();
    for marker in TypeMarker::ALL {
        if let Some(body) = trimmed.strip_suffix(marker.suffix()) {
            return (body.trim_end(), Some(marker));
        }
    }
    (trimmed, None)
}

/// Quote the known bare AGE keys and turn `;` separators into commas.
///
/// Matched keys are lowercased (`ID:` becomes `"id":`) so case variants
/// classify the same way as AGE's canonical spelling. Double-quoted string
/// literals are copied through untouched, honouring backslash escapes.
pub fn normalize_age_literal(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 16);
    let mut segment_start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, byte) in body.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                out.push_str(&body[segment_start..=i]);
                segment_start = i + 1;
                in_string = false;
            }
        } else if byte == b'"' {
            out.push_str(&normalize_unquoted(&body[segment_start..i]));
            segment_start = i;
            in_string = true;
        }
    }

    // An unterminated string is left as is; the strict parse rejects it
    if in_string {
        out.push_str(&body[segment_start..]);
    } else {
        out.push_str(&normalize_unquoted(&body[segment_start..]));
    }
    out
}

/// Key quoting and separator rewrite for text outside string literals.
fn normalize_unquoted(segment: &str) -> String {
    let quoted = BARE_KEY_PATTERN.replace_all(segment, |caps: &Captures| {
        format!("\"{}\":", caps[1].to_ascii_lowercase())
    });
    quoted.replace(';', ",")
}

/// Drop `::vertex`/`::edge` markers that follow an element's closing brace.
pub fn strip_embedded_markers(body: &str) -> String {
    EMBEDDED_MARKER_PATTERN.replace_all(body, "}").into_owned()
}

/// Parse agtype text into JSON, trying each encoding in priority order.
///
/// Returns `None` when no encoding yields strict JSON; the caller keeps the
/// original string.
pub fn parse_agtype_text(text: &str) -> Option<ParsedText> {
    let (body, marker) = strip_type_marker(text);

    for encoding in RawEncoding::PRIORITY {
        if !encoding.applies_to(body) {
            continue;
        }
        let candidate = encoding.normalize(body);
        match serde_json::from_str::<JsonValue>(&candidate) {
            Ok(payload) => {
                return Some(ParsedText {
                    payload,
                    marker,
                    encoding,
                })
            }
            Err(e) => log::trace!("agtype text is not {:?}: {}", encoding, e),
        }
    }

    if marker.is_some() {
        log::warn!(
            "Could not parse agtype text with marker {:?}; keeping it as a string",
            marker
        );
    }
    None
}

/// Whether a string nested inside decoded data is itself agtype text worth
/// parsing (a marker, or a container literal).
pub fn looks_like_agtype(text: &str) -> bool {
    let (body, marker) = strip_type_marker(text);
    marker.is_some() || body.starts_with('{') || body.starts_with('[')
}
