//! SQL wrapping of Cypher queries for Apache AGE
//!
//! AGE runs Cypher through a set-returning SQL function whose result columns
//! must be declared by the caller:
//!
//! ```text
//! SELECT * FROM cypher('social', $$ MATCH (n) RETURN n AS node $$) AS (node agtype)
//! ```
//!
//! The column list comes from [`infer_return_columns`].

pub mod return_columns;

pub use return_columns::{infer_return_columns, FALLBACK_COLUMN};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WrapError {
    #[error("Query text is empty")]
    EmptyQuery,

    #[error("Invalid graph name: {0:?} (must be a non-empty identifier)")]
    InvalidGraphName(String),

    #[error("Query text contains the $$ dollar-quote delimiter")]
    DollarQuote,
}

/// A wrapped query and the columns it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CypherSql {
    pub sql: String,
    pub columns: Vec<String>,
}

/// Graph names are embedded in a SQL string literal, so only plain
/// identifiers are accepted.
pub fn is_valid_graph_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Wrap a Cypher query in AGE's `cypher()` call.
///
/// # Errors
/// - `EmptyQuery` if the query is blank (nothing to infer columns from)
/// - `InvalidGraphName` if the graph name is not an identifier
/// - `DollarQuote` if the query would terminate the `$$` quoting early
///
/// # Example
/// ```
/// use agegraph::query_wrapper::wrap_cypher_query;
///
/// let wrapped = wrap_cypher_query("social", "MATCH (n) RETURN n AS node").unwrap();
/// assert_eq!(
///     wrapped.sql,
///     "SELECT * FROM cypher('social', $$ MATCH (n) RETURN n AS node $$) AS (node agtype)"
/// );
/// assert_eq!(wrapped.columns, vec!["node"]);
/// ```
pub fn wrap_cypher_query(graph_name: &str, query: &str) -> Result<CypherSql, WrapError> {
    let query = query.trim().trim_end_matches(';').trim_end();
    if query.is_empty() {
        return Err(WrapError::EmptyQuery);
    }
    if !is_valid_graph_name(graph_name) {
        return Err(WrapError::InvalidGraphName(graph_name.to_string()));
    }
    if query.contains("$$") {
        return Err(WrapError::DollarQuote);
    }

    let columns = infer_return_columns(query);
    let column_defs = columns
        .iter()
        .map(|c| format!("{} agtype", c))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "SELECT * FROM cypher('{}', $$ {} $$) AS ({})",
        graph_name, query, column_defs
    );
    log::debug!("Wrapped Cypher query with columns {:?}", columns);

    Ok(CypherSql { sql, columns })
}
