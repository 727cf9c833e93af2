//! RETURN column inference
//!
//! AGE's `cypher()` set-returning function needs a column definition list
//! that matches what the Cypher query returns. This module reads the names
//! off the query text without a full parse:
//!
//! ```text
//! MATCH (n) RETURN n AS node            -> ["node"]
//! MATCH (a)-[r]->(b) RETURN a, r.since  -> ["c1", "c2"]
//! RETURN {foo: 1, bar: 2} AS m          -> ["m"]
//! MATCH (n) DELETE n                    -> ["result"]
//! ```
//!
//! Scanning is delimiter aware: commas and keywords only count at bracket
//! depth zero and outside string literals. `()`, `[]` and `{}` share one depth
//! counter since they only need to be balanced collectively.

use regex::Regex;
use std::sync::LazyLock;

/// Column name used when no RETURN clause can be read.
pub const FALLBACK_COLUMN: &str = "result";

/// Trailing `AS alias` of a return expression
/// Captures: (1) alias
static ALIAS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\sAS\s+([A-Za-z_][A-Za-z0-9_]*)\s*$").unwrap()
});

/// Bracket depth and string state while walking query bytes.
#[derive(Debug, Default)]
struct ScanState {
    depth: usize,
    quote: Option<u8>,
    escaped: bool,
}

/// A closing bracket with no matching opener.
#[derive(Debug)]
struct Unbalanced;

impl ScanState {
    fn at_top_level(&self) -> bool {
        self.depth == 0 && self.quote.is_none()
    }

    fn advance(&mut self, byte: u8) -> Result<(), Unbalanced> {
        if let Some(quote) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == quote {
                self.quote = None;
            }
            return Ok(());
        }

        match byte {
            b'\'' | b'"' => self.quote = Some(byte),
            b'(' | b'[' | b'{' => self.depth += 1,
            b')' | b']' | b'}' => self.depth = self.depth.checked_sub(1).ok_or(Unbalanced)?,
            _ => {}
        }
        Ok(())
    }
}

/// Infer the result column names of a Cypher query.
///
/// Always returns at least one name; anything unreadable yields
/// `["result"]`.
pub fn infer_return_columns(query: &str) -> Vec<String> {
    let Some(start) = find_top_level_return(query) else {
        log::debug!("No top-level RETURN in query; using fallback column");
        return vec![FALLBACK_COLUMN.to_string()];
    };

    let expressions = match split_return_items(query, start) {
        Ok(expressions) => expressions,
        Err(Unbalanced) => {
            log::debug!("Unbalanced RETURN clause; using fallback column");
            return vec![FALLBACK_COLUMN.to_string()];
        }
    };

    let expressions: Vec<&str> = expressions
        .into_iter()
        .map(str::trim)
        .filter(|expr| !expr.is_empty())
        .collect();
    if expressions.is_empty() {
        return vec![FALLBACK_COLUMN.to_string()];
    }

    expressions
        .iter()
        .enumerate()
        .map(|(idx, expr)| column_name(expr, idx + 1))
        .collect()
}

/// Byte offset just past the first top-level `RETURN` keyword.
fn find_top_level_return(query: &str) -> Option<usize> {
    let bytes = query.as_bytes();
    let mut state = ScanState::default();

    for i in 0..bytes.len() {
        if state.at_top_level() && keyword_at(bytes, i, b"RETURN") {
            return Some(i + b"RETURN".len());
        }
        state.advance(bytes[i]).ok()?;
    }
    None
}

/// Split the RETURN clause starting at `start` into raw expressions.
///
/// Stops at a top-level `ORDER BY`, `LIMIT`, `SKIP`, `UNION` or `;`.
fn split_return_items(query: &str, start: usize) -> Result<Vec<&str>, Unbalanced> {
    let bytes = query.as_bytes();
    let mut state = ScanState::default();
    let mut expressions = Vec::new();
    let mut expr_start = start;
    let mut i = start;

    while i < bytes.len() {
        if state.at_top_level() {
            if bytes[i] == b';' || (is_clause_end(bytes, i) && !follows_as(bytes, i)) {
                break;
            }
            if bytes[i] == b',' {
                expressions.push(&query[expr_start..i]);
                expr_start = i + 1;
                i += 1;
                continue;
            }
        }
        state.advance(bytes[i])?;
        i += 1;
    }

    // Unclosed bracket or string at the end of the clause
    if !state.at_top_level() {
        return Err(Unbalanced);
    }
    expressions.push(&query[expr_start..i]);
    Ok(expressions)
}

fn is_clause_end(bytes: &[u8], i: usize) -> bool {
    if keyword_at(bytes, i, b"ORDER") {
        let mut j = i + b"ORDER".len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        return j > i + b"ORDER".len() && keyword_at(bytes, j, b"BY");
    }
    keyword_at(bytes, i, b"LIMIT") || keyword_at(bytes, i, b"SKIP") || keyword_at(bytes, i, b"UNION")
}

/// Whether the word at `i` is the alias of an `AS`, as in `RETURN n AS limit`.
fn follows_as(bytes: &[u8], i: usize) -> bool {
    let mut j = i;
    while j > 0 && bytes[j - 1].is_ascii_whitespace() {
        j -= 1;
    }
    j < i && j >= 2 && keyword_at(bytes, j - 2, b"AS")
}

/// Case-insensitive whole-word match of an ASCII keyword at `i`.
fn keyword_at(bytes: &[u8], i: usize, keyword: &[u8]) -> bool {
    let end = i + keyword.len();
    if end > bytes.len() || !bytes[i..end].eq_ignore_ascii_case(keyword) {
        return false;
    }
    let boundary_before = i == 0 || !is_word_byte(bytes[i - 1]);
    let boundary_after = end == bytes.len() || !is_word_byte(bytes[end]);
    boundary_before && boundary_after
}

/// Identifier bytes, plus `.` and `$` so `n.limit` and `$skip` are not keywords.
fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.' || byte == b'$' || byte >= 0x80
}

fn column_name(expression: &str, position: usize) -> String {
    match ALIAS_PATTERN.captures(expression) {
        Some(caps) => caps[1].to_string(),
        None => format!("c{}", position),
    }
}
