use super::geometry::{Rect, rect_overlaps};
use super::size::node_size;
use crate::config::PlacementConfig;
use crate::model::{Node, Point};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainPush {
    pub moved: BTreeMap<String, Point>,
    pub iterations: usize,
    // False when the bound cut the cascade short; the partial result still applies.
    pub converged: bool,
}

/// Pushes every sibling overlapping `trigger_id` to its right, then cascades
/// through whatever those siblings now overlap.
pub fn chain_push(trigger_id: &str, nodes: &[Node], config: &PlacementConfig) -> ChainPush {
    cascade(trigger_id, nodes, None, config)
}

/// Chain push over `nodes` as if `trigger_id` already sat at `placed_at`.
pub(super) fn cascade(
    trigger_id: &str,
    nodes: &[Node],
    placed_at: Option<Point>,
    config: &PlacementConfig,
) -> ChainPush {
    // First occurrence of an id is authoritative.
    let mut order: Vec<&Node> = Vec::with_capacity(nodes.len());
    let mut index: HashMap<&str, &Node> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if !index.contains_key(node.id.as_str()) {
            index.insert(node.id.as_str(), node);
            order.push(node);
        }
    }

    let Some(trigger) = index.get(trigger_id).copied() else {
        return ChainPush {
            converged: true,
            ..Default::default()
        };
    };

    let mut positions: HashMap<&str, Point> = order
        .iter()
        .map(|node| (node.id.as_str(), node.position))
        .collect();
    if let Some(point) = placed_at {
        positions.insert(trigger.id.as_str(), point);
    }

    let mut queue: VecDeque<&str> = VecDeque::from([trigger.id.as_str()]);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut moved = BTreeMap::new();
    let mut iterations = 0;

    while iterations < config.max_iterations {
        let Some(id) = queue.pop_front() else {
            break;
        };
        iterations += 1;
        if !visited.insert(id) {
            continue;
        }
        let node = index[id];
        let rect = Rect::at(positions[id], node_size(node, &config.catalog));

        for sibling in &order {
            let sibling_id = sibling.id.as_str();
            let sibling_pos = positions[sibling_id];
            if sibling_id == id
                || sibling.parent_id != node.parent_id
                || sibling.kind.is_container()
                || sibling_pos.is_pending()
            {
                continue;
            }
            let sibling_rect = Rect::at(sibling_pos, node_size(sibling, &config.catalog));
            if !rect_overlaps(&rect, &sibling_rect) {
                continue;
            }
            let push = rect.right() + config.gap - sibling_rect.x;
            if push <= 0.0 {
                continue;
            }
            let next = Point::new(sibling_pos.x + push, sibling_pos.y);
            tracing::debug!(
                pusher = id,
                node = sibling_id,
                from = sibling_pos.x,
                to = next.x,
                "chain push"
            );
            positions.insert(sibling_id, next);
            moved.insert(sibling.id.clone(), next);
            queue.push_back(sibling_id);
        }
    }

    let converged = queue.iter().all(|id| visited.contains(id));
    if !converged {
        tracing::warn!(
            trigger = trigger_id,
            iterations,
            pending = queue.len(),
            "chain push stopped at the iteration bound; applying partial result"
        );
    }

    ChainPush {
        moved,
        iterations,
        converged,
    }
}
