//! Canonical identifier encoding
//!
//! AGE graph ids are 64-bit integers built as `(label_id << 48) | entry_id`,
//! e.g. `844424930131969`. JavaScript clients and anything else that stores
//! numbers as IEEE doubles silently round such values, so every id leaving
//! the decoder is a decimal string.
//!
//! ```text
//! 844424930131969     -> "844424930131969"
//! "007"               -> "7"
//! 7.0                 -> "7"
//! "Airport:LAX"       -> "Airport:LAX"   (non-numeric strings pass through)
//! ```

use crate::agtype::{AgValue, CanonicalId};

/// Convert a raw identifier value into its [`CanonicalId`].
pub fn canonical_id(value: &AgValue) -> CanonicalId {
    match value {
        AgValue::Null => String::new(),
        AgValue::Bool(b) => b.to_string(),
        AgValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.0}", f),
                    _ => n.to_string(),
                }
            }
        }
        AgValue::String(s) => canonical_numeric_string(s).unwrap_or_else(|| s.clone()),
        AgValue::Node(node) => node.id.clone(),
        AgValue::Edge(edge) => edge.id.clone(),
        AgValue::List(_) | AgValue::Map(_) | AgValue::Path(_) => value.to_json().to_string(),
    }
}

/// Re-render a numeric string (optional sign, ASCII digits) in decimal form.
///
/// Returns `None` for anything that is not an integer literal, or that does
/// not fit in an `i128`.
pub fn canonical_numeric_string(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<i128>().ok().map(|n| n.to_string())
}
