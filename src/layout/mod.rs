mod chain_push;
mod geometry;
mod insert;
mod position;
mod reference;
mod size;

pub use chain_push::{ChainPush, chain_push};
pub use geometry::{Rect, rect_overlaps};
pub use insert::{InsertResult, PendingOutcome, apply_result, auto_insert, process_pending};
pub use position::{bottom_of, compute_insert_position};
pub use reference::find_reference;
pub use size::{node_height, node_size, node_width, parse_dimension};

use crate::config::PlacementConfig;
use crate::model::Canvas;

pub const GAP: f64 = 80.0;

pub const DEFAULT_MAX_ITERATIONS: usize = 20;

#[derive(Debug, Clone)]
pub struct PlacedCanvas {
    pub canvas: Canvas,
    pub processed_ids: Vec<String>,
    pub results: Vec<InsertResult>,
}

pub fn place_canvas(canvas: &Canvas, config: &PlacementConfig) -> PlacedCanvas {
    let outcome = process_pending(&canvas.nodes, &canvas.edges, config);
    PlacedCanvas {
        canvas: Canvas {
            nodes: outcome.nodes,
            edges: canvas.edges.clone(),
            extra: canvas.extra.clone(),
        },
        processed_ids: outcome.processed_ids,
        results: outcome.results,
    }
}
