//! Path reconstruction
//!
//! A decoded path element list should alternate `node, edge, node, ...`.
//! [`build_path`] walks it with a three-wide window: every `node, edge, node`
//! window becomes a [`Segment`] and the window advances by two, so a segment's
//! end node is the next segment's start candidate. A window that does not
//! line up advances by one, which yields a best-effort path from partially
//! well-formed input.

use super::{AgValue, CanonicalId, Path, Segment};

/// Build a segmented path from decoded elements.
///
/// Returns `None` when no segment could be formed; [`Path::from_elements`]
/// falls back to an elements-only path in that case.
pub fn build_path(elements: &[AgValue]) -> Option<Path> {
    let mut segments = Vec::new();
    let mut node_ids = Vec::new();
    let mut edge_ids = Vec::new();

    let mut i = 0;
    while i + 2 < elements.len() {
        match (&elements[i], &elements[i + 1], &elements[i + 2]) {
            (AgValue::Node(start), AgValue::Edge(edge), AgValue::Node(end)) => {
                push_unique(&mut node_ids, &start.id);
                push_unique(&mut node_ids, &end.id);
                push_unique(&mut edge_ids, &edge.id);
                segments.push(Segment {
                    start_node: start.clone(),
                    edge: edge.clone(),
                    end_node: end.clone(),
                });
                i += 2;
            }
            _ => i += 1,
        }
    }

    if segments.is_empty() {
        return None;
    }

    Some(Path {
        segments,
        elements: elements.to_vec(),
        node_ids,
        edge_ids,
        start_node_id: node_id_of(elements.first()),
        end_node_id: node_id_of(elements.last()),
    })
}

impl Path {
    /// Segmented path when possible, elements-only path otherwise.
    pub fn from_elements(elements: Vec<AgValue>) -> Path {
        match build_path(&elements) {
            Some(path) => path,
            None => {
                log::debug!(
                    "No node-edge-node segment in {} path elements; keeping elements only",
                    elements.len()
                );
                Path::elements_only(elements)
            }
        }
    }

    /// A path with no segments, keeping the raw elements for rendering.
    pub fn elements_only(elements: Vec<AgValue>) -> Path {
        Path {
            segments: Vec::new(),
            node_ids: Vec::new(),
            edge_ids: Vec::new(),
            start_node_id: node_id_of(elements.first()),
            end_node_id: node_id_of(elements.last()),
            elements,
        }
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn push_unique(ids: &mut Vec<CanonicalId>, id: &str) {
    if !ids.iter().any(|seen| seen == id) {
        ids.push(id.to_string());
    }
}

fn node_id_of(element: Option<&AgValue>) -> Option<CanonicalId> {
    element.and_then(AgValue::as_node).map(|node| node.id.clone())
}
