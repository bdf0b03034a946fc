use super::size::{node_height, node_width};
use crate::config::PlacementConfig;
use crate::model::{Node, Point, needs_layout};

/// Candidate position for a pending node: right of its reference, or at the
/// bottom of its group's stack when it has none.
pub fn compute_insert_position(
    node: &Node,
    reference: Option<&Node>,
    nodes: &[Node],
    config: &PlacementConfig,
) -> Point {
    match reference {
        Some(reference) => Point::new(
            reference.position.x + node_width(reference, &config.catalog) + config.gap,
            reference.position.y,
        ),
        None => Point::new(
            config.gap,
            bottom_of(node.parent_id.as_deref(), nodes, config),
        ),
    }
}

pub fn bottom_of(parent_id: Option<&str>, nodes: &[Node], config: &PlacementConfig) -> f64 {
    nodes
        .iter()
        .filter(|node| node.parent_id.as_deref() == parent_id && !needs_layout(node))
        .map(|node| node.position.y + node_height(node, &config.catalog))
        .fold(None, |max: Option<f64>, bottom| {
            Some(max.map_or(bottom, |current| current.max(bottom)))
        })
        .map_or(config.gap, |bottom| bottom + config.gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    #[test]
    fn empty_stack_starts_at_gap() {
        let config = PlacementConfig::default();
        let node = Node::pending("n", NodeKind::Text);
        let nodes = vec![node.clone()];
        assert_eq!(
            compute_insert_position(&node, None, &nodes, &config),
            Point::new(80.0, 80.0)
        );
    }

    #[test]
    fn right_of_reference() {
        let config = PlacementConfig::default();
        let reference =
            Node::new("r", NodeKind::Prompt, Point::new(200.0, 40.0)).with_size(300.0, 100.0);
        let node = Node::pending("n", NodeKind::Image);
        let nodes = vec![reference.clone(), node.clone()];
        assert_eq!(
            compute_insert_position(&node, Some(&reference), &nodes, &config),
            Point::new(580.0, 40.0)
        );
    }

    #[test]
    fn bottom_considers_only_placed_siblings_of_the_group() {
        let config = PlacementConfig::default();
        let nodes = vec![
            Node::new("g", NodeKind::Group, Point::new(0.0, 0.0)).with_size(900.0, 900.0),
            Node::new("c1", NodeKind::Text, Point::new(0.0, 0.0))
                .with_parent("g")
                .with_size(100.0, 50.0),
            Node::new("c2", NodeKind::Text, Point::new(300.0, 20.0))
                .with_parent("g")
                .with_size(100.0, 70.0),
            Node::pending("c3", NodeKind::Text).with_parent("g"),
            Node::new("other", NodeKind::Text, Point::new(0.0, 5000.0)).with_parent("h"),
        ];
        assert_eq!(bottom_of(Some("g"), &nodes, &config), 170.0);
        assert_eq!(bottom_of(None, &nodes, &config), 980.0);
        assert_eq!(bottom_of(Some("empty"), &nodes, &config), 80.0);
    }
}
