use crate::model::{Edge, Node};

/// Finds the upstream node a new node should be placed next to.
///
/// Only the first edge targeting `node_id` is consulted. Its source counts as
/// the reference only when it lives in the same group as the target;
/// connections that cross group boundaries are ignored for placement.
pub fn find_reference<'a>(node_id: &str, nodes: &'a [Node], edges: &[Edge]) -> Option<&'a Node> {
    let target = nodes.iter().find(|node| node.id == node_id)?;
    let edge = edges.iter().find(|edge| edge.target == node_id)?;
    let Some(source) = nodes.iter().find(|node| node.id == edge.source) else {
        tracing::debug!(node = node_id, source = %edge.source, "reference source missing");
        return None;
    };
    if source.parent_id != target.parent_id {
        tracing::debug!(
            node = node_id,
            source = %source.id,
            "reference ignored: source lives in a different group"
        );
        return None;
    }
    Some(source)
}
