use canvas_autoplace::config::PlacementConfig;
use canvas_autoplace::layout::{chain_push, process_pending};
use canvas_autoplace::model::{Edge, Node, NodeKind, Point};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// A placed source with `fan_out` pending outputs, all wanting the same slot.
fn fan_out_canvas(fan_out: usize) -> (Vec<Node>, Vec<Edge>) {
    let mut nodes = vec![Node::new("src", NodeKind::Prompt, Point::new(0.0, 0.0))];
    let mut edges = Vec::with_capacity(fan_out);
    for i in 0..fan_out {
        nodes.push(Node::pending(format!("out{i}"), NodeKind::Image));
        edges.push(Edge::new(format!("e{i}"), "src", format!("out{i}")));
    }
    (nodes, edges)
}

/// `rows` x `cols` grid of placed nodes, each column overlapping the next.
fn crowded_rows(rows: usize, cols: usize) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            nodes.push(
                Node::new(
                    format!("n{row}_{col}"),
                    NodeKind::Text,
                    Point::new(col as f64 * 150.0, row as f64 * 400.0),
                )
                .with_size(240.0, 160.0),
            );
        }
    }
    nodes
}

fn bench_process_pending(c: &mut Criterion) {
    let config = PlacementConfig::default();
    let mut group = c.benchmark_group("process_pending");
    for fan_out in [4usize, 16, 64] {
        let (nodes, edges) = fan_out_canvas(fan_out);
        group.bench_with_input(BenchmarkId::from_parameter(fan_out), &fan_out, |b, _| {
            b.iter(|| process_pending(black_box(&nodes), black_box(&edges), &config))
        });
    }
    group.finish();
}

fn bench_chain_push(c: &mut Criterion) {
    let config = PlacementConfig {
        max_iterations: 10_000,
        ..Default::default()
    };
    let mut group = c.benchmark_group("chain_push");
    for cols in [8usize, 32, 128] {
        let nodes = crowded_rows(4, cols);
        group.bench_with_input(BenchmarkId::from_parameter(cols), &cols, |b, _| {
            b.iter(|| chain_push(black_box("n0_0"), black_box(&nodes), &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_process_pending, bench_chain_push);
criterion_main!(benches);
