use canvas_autoplace::layout::{Rect, chain_push, node_size, rect_overlaps};
use canvas_autoplace::{
    Edge, Node, NodeKind, PlacementConfig, Point, needs_layout, process_pending,
};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        4 => Just(NodeKind::Text),
        2 => Just(NodeKind::Image),
        1 => Just(NodeKind::Group),
    ]
}

fn node_strategy() -> impl Strategy<Value = (NodeKind, i32, i32, u16, u16, u8, bool)> {
    (
        kind_strategy(),
        0i32..1500,
        0i32..1500,
        20u16..400,
        20u16..300,
        0u8..3,
        prop::bool::weighted(0.2),
    )
}

fn build_nodes(seeds: Vec<(NodeKind, i32, i32, u16, u16, u8, bool)>) -> Vec<Node> {
    seeds
        .into_iter()
        .enumerate()
        .map(|(i, (kind, x, y, w, h, parent, pending))| {
            let position = if pending {
                Point::new(-1.0, -1.0)
            } else {
                Point::new(f64::from(x), f64::from(y))
            };
            let mut node =
                Node::new(format!("n{i}"), kind, position).with_size(f64::from(w), f64::from(h));
            if parent > 0 {
                node = node.with_parent(format!("g{parent}"));
            }
            node
        })
        .collect()
}

fn row(widths: &[u16], spacing: &[u16], y: f64) -> Vec<Node> {
    let mut x = 0.0;
    widths
        .iter()
        .zip(spacing)
        .enumerate()
        .map(|(i, (w, extra))| {
            let node = Node::new(format!("r{i}"), NodeKind::Text, Point::new(x, y))
                .with_size(f64::from(*w), 100.0);
            x += f64::from(*w) + f64::from(*extra);
            node
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_chain_push_is_a_no_op_without_overlaps(
        widths in prop::collection::vec(20u16..400, 1..12),
        spacing in prop::collection::vec(0u16..200, 12),
        trigger in 0usize..12,
    ) {
        let nodes = row(&widths, &spacing, 0.0);
        let trigger = format!("r{}", trigger % nodes.len());
        let result = chain_push(&trigger, &nodes, &PlacementConfig::default());
        prop_assert!(result.moved.is_empty());
        prop_assert!(result.converged);
    }

    #[test]
    fn prop_chain_push_is_bounded_and_horizontal(
        seeds in prop::collection::vec(node_strategy(), 1..16),
        trigger in 0usize..16,
        max_iterations in 0usize..40,
    ) {
        let nodes = build_nodes(seeds);
        let trigger = format!("n{}", trigger % nodes.len());
        let config = PlacementConfig { max_iterations, ..Default::default() };
        let result = chain_push(&trigger, &nodes, &config);
        prop_assert!(result.iterations <= max_iterations);
        for (id, point) in &result.moved {
            let original = nodes.iter().find(|node| &node.id == id).unwrap();
            prop_assert!(!original.kind.is_container(), "container {} moved", id);
            prop_assert!(!needs_layout(original), "pending {} moved", id);
            prop_assert_eq!(point.y, original.position.y);
            prop_assert!(point.x > original.position.x);
        }
    }

    #[test]
    fn prop_batch_places_every_pending_node(
        seeds in prop::collection::vec(node_strategy(), 1..16),
        links in prop::collection::vec((0usize..16, 0usize..16), 0..10),
    ) {
        let nodes = build_nodes(seeds);
        let edges: Vec<Edge> = links
            .iter()
            .enumerate()
            .map(|(i, (s, t))| {
                Edge::new(format!("e{i}"), format!("n{}", s % nodes.len()), format!("n{}", t % nodes.len()))
            })
            .collect();
        let pending: Vec<String> = nodes
            .iter()
            .filter(|node| needs_layout(node))
            .map(|node| node.id.clone())
            .collect();
        let outcome = process_pending(&nodes, &edges, &PlacementConfig::default());
        prop_assert_eq!(&outcome.processed_ids, &pending);
        prop_assert!(outcome.nodes.iter().all(|node| !needs_layout(node)));
        prop_assert_eq!(outcome.nodes.len(), nodes.len());
    }

    #[test]
    fn prop_insert_into_uniform_row_leaves_no_overlaps(
        count in 1usize..10,
        width in 50u16..300,
        spacing in prop::collection::vec(0u16..250, 10),
    ) {
        let widths = vec![width; count];
        let mut nodes = row(&widths, &spacing[..count], 0.0);
        nodes.push(Node::pending("new", NodeKind::Image).with_size(f64::from(width), 100.0));
        let edges = vec![Edge::new("e", "r0", "new")];
        let config = PlacementConfig { max_iterations: 1000, ..Default::default() };

        let outcome = process_pending(&nodes, &edges, &config);
        let inserted = outcome.nodes.iter().find(|node| node.id == "new").unwrap();
        prop_assert_eq!(inserted.position, Point::new(f64::from(width) + config.gap, 0.0));
        prop_assert!(outcome.results[0].converged);
        for (i, a) in outcome.nodes.iter().enumerate() {
            for b in outcome.nodes.iter().skip(i + 1) {
                let ra = Rect::at(a.position, node_size(a, &config.catalog));
                let rb = Rect::at(b.position, node_size(b, &config.catalog));
                prop_assert!(!rect_overlaps(&ra, &rb), "{} overlaps {}", a.id, b.id);
            }
        }
    }
}
