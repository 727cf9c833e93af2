//! RETURN column inference and SQL wrapping

use agegraph::query_wrapper::{infer_return_columns, wrap_cypher_query, WrapError};

#[test]
fn test_documented_scenarios() {
    assert_eq!(infer_return_columns("MATCH (n) RETURN n AS node"), vec!["node"]);
    assert_eq!(infer_return_columns("MATCH (n) RETURN n"), vec!["c1"]);
    assert_eq!(infer_return_columns("MATCH (n) DELETE n"), vec!["result"]);
    assert_eq!(infer_return_columns("RETURN (a, b"), vec!["result"]);
    assert_eq!(infer_return_columns("RETURN {foo: 1, bar: 2} AS m"), vec!["m"]);
}

#[test]
fn test_realistic_queries() {
    let cases = vec![
        (
            "MATCH (p:Person)-[:KNOWS]->(f) WHERE p.name = 'Alice, Jr.' RETURN p.name AS name, collect(f.name) AS friends ORDER BY name",
            vec!["name", "friends"],
        ),
        (
            "MATCH p = (a)-[*1..3]->(b) RETURN p, length(p) AS hops LIMIT 25",
            vec!["c1", "hops"],
        ),
        (
            "MATCH (n) WITH n, {a: [1, 2], b: 'x'} AS m RETURN n, m.a AS a",
            vec!["c1", "a"],
        ),
        (
            "MATCH (n)\nRETURN\n  n.id AS id,\n  labels(n) AS kinds\nSKIP 10",
            vec!["id", "kinds"],
        ),
        (
            "MATCH (n) RETURN DISTINCT n.city AS city",
            vec!["city"],
        ),
    ];

    for (query, expected) in cases {
        assert_eq!(infer_return_columns(query), expected, "query: {}", query);
    }
}

#[test]
fn test_wrap_typical_query() {
    let wrapped =
        wrap_cypher_query("social", "MATCH (a)-[r:KNOWS]->(b) RETURN a, r, b.name AS name").unwrap();

    assert_eq!(
        wrapped.sql,
        "SELECT * FROM cypher('social', $$ MATCH (a)-[r:KNOWS]->(b) RETURN a, r, b.name AS name $$) AS (c1 agtype, c2 agtype, name agtype)"
    );
    assert_eq!(wrapped.columns, vec!["c1", "c2", "name"]);
}

#[test]
fn test_wrap_rejects_blank_query() {
    assert_eq!(wrap_cypher_query("social", ""), Err(WrapError::EmptyQuery));
}
