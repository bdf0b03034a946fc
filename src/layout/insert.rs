use super::chain_push::cascade;
use super::position::compute_insert_position;
use super::reference::find_reference;
use crate::config::PlacementConfig;
use crate::model::{Edge, Node, Point, needs_layout};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub position: Point,
    pub pushed_nodes: BTreeMap<String, Point>,
    pub has_reference: bool,
    pub reference_node_id: Option<String>,
    pub converged: bool,
}

/// Places a single node and resolves the overlaps it causes. Returns `None`
/// when `node_id` is not part of `nodes`.
pub fn auto_insert(
    node_id: &str,
    nodes: &[Node],
    edges: &[Edge],
    config: &PlacementConfig,
) -> Option<InsertResult> {
    let node = nodes.iter().find(|node| node.id == node_id)?;
    let reference = find_reference(node_id, nodes, edges);
    let position = compute_insert_position(node, reference, nodes, config);
    tracing::debug!(
        node = node_id,
        reference = reference.map(|r| r.id.as_str()),
        x = position.x,
        y = position.y,
        "insert position"
    );

    let push = cascade(node_id, nodes, Some(position), config);
    Some(InsertResult {
        position,
        pushed_nodes: push.moved,
        has_reference: reference.is_some(),
        reference_node_id: reference.map(|r| r.id.clone()),
        converged: push.converged,
    })
}

/// Returns a copy of `nodes` with the insertion and every displacement applied.
pub fn apply_result(nodes: &[Node], node_id: &str, result: &InsertResult) -> Vec<Node> {
    let mut next = nodes.to_vec();
    apply_in_place(&mut next, node_id, result);
    next
}

// A pushed entry for the inserted node itself wins over the candidate position.
fn apply_in_place(nodes: &mut [Node], node_id: &str, result: &InsertResult) {
    for node in nodes.iter_mut() {
        if node.id == node_id {
            node.position = result.position;
        }
        if let Some(point) = result.pushed_nodes.get(&node.id) {
            node.position = *point;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingOutcome {
    pub nodes: Vec<Node>,
    pub processed_ids: Vec<String>,
    pub results: Vec<InsertResult>,
}

/// Places every pending node, one at a time in document order. Each placement
/// sees the positions applied by the ones before it.
pub fn process_pending(nodes: &[Node], edges: &[Edge], config: &PlacementConfig) -> PendingOutcome {
    let mut seen = HashSet::new();
    let pending: Vec<String> = nodes
        .iter()
        .filter(|node| needs_layout(node) && seen.insert(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect();

    let mut working = nodes.to_vec();
    let mut processed_ids = Vec::with_capacity(pending.len());
    let mut results = Vec::with_capacity(pending.len());

    for id in pending {
        let still_pending = working
            .iter()
            .find(|node| node.id == id)
            .is_some_and(needs_layout);
        // Lookups resolve an id to its first occurrence, so a pending copy
        // shadowed by an earlier placed node with the same id is left alone.
        if !still_pending {
            tracing::warn!(node = id.as_str(), "pending node shadowed by a placed duplicate id");
            continue;
        }
        let Some(result) = auto_insert(&id, &working, edges, config) else {
            continue;
        };
        apply_in_place(&mut working, &id, &result);
        processed_ids.push(id);
        results.push(result);
    }

    if !processed_ids.is_empty() {
        tracing::info!(placed = processed_ids.len(), "placed pending nodes");
    }

    PendingOutcome {
        nodes: working,
        processed_ids,
        results,
    }
}
