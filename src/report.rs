use crate::layout::PlacedCanvas;
use crate::model::Point;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementReport {
    pub placed: usize,
    pub displaced: usize,
    pub unconverged: Vec<String>,
    pub nodes: Vec<PlacedNodeReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedNodeReport {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub reference: Option<String>,
    pub pushed: Vec<PushedNodeReport>,
    pub converged: bool,
}

#[derive(Debug, Serialize)]
pub struct PushedNodeReport {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl PlacementReport {
    pub fn from_placed(placed: &PlacedCanvas) -> Self {
        let nodes: Vec<PlacedNodeReport> = placed
            .processed_ids
            .iter()
            .zip(&placed.results)
            .map(|(id, result)| PlacedNodeReport {
                id: id.clone(),
                x: result.position.x,
                y: result.position.y,
                reference: result.reference_node_id.clone(),
                pushed: result
                    .pushed_nodes
                    .iter()
                    .map(|(id, Point { x, y })| PushedNodeReport {
                        id: id.clone(),
                        x: *x,
                        y: *y,
                    })
                    .collect(),
                converged: result.converged,
            })
            .collect();

        PlacementReport {
            placed: nodes.len(),
            displaced: nodes.iter().map(|node| node.pushed.len()).sum(),
            unconverged: nodes
                .iter()
                .filter(|node| !node.converged)
                .map(|node| node.id.clone())
                .collect(),
            nodes,
        }
    }
}

pub fn write_report(path: &Path, placed: &PlacedCanvas) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let report = PlacementReport::from_placed(placed);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
