use canvas_autoplace::catalog::Size;
use canvas_autoplace::config::{checked_gap, checked_size};
use canvas_autoplace::model::Canvas;
use canvas_autoplace::{PlacementConfig, needs_layout, place_canvas};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOptions {
    gap: Option<f64>,
    max_iterations: Option<usize>,
    sizes: Option<BTreeMap<String, Size>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceResponse {
    canvas: Canvas,
    processed_ids: Vec<String>,
}

fn build_config(options: PlaceOptions) -> Result<PlacementConfig, String> {
    let mut config = PlacementConfig::default();
    if let Some(gap) = options.gap {
        config.gap = checked_gap("gap", gap).map_err(|error| error.to_string())?;
    }
    if let Some(max_iterations) = options.max_iterations {
        config.max_iterations = max_iterations;
    }
    for (kind, size) in options.sizes.unwrap_or_default() {
        let size = checked_size(&format!("sizes.{kind}"), size.width, size.height)
            .map_err(|error| error.to_string())?;
        config.catalog.set(kind, size);
    }
    Ok(config)
}

fn place_json(canvas_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<PlaceOptions>(raw).map_err(|error| error.to_string())?,
        None => PlaceOptions::default(),
    };
    let config = build_config(options)?;
    let canvas = Canvas::from_json(canvas_json).map_err(|error| error.to_string())?;
    let placed = place_canvas(&canvas, &config);
    let response = PlaceResponse {
        canvas: placed.canvas,
        processed_ids: placed.processed_ids,
    };
    serde_json::to_string(&response).map_err(|error| error.to_string())
}

/// Places every pending node of a canvas document. Returns
/// `{ canvas, processedIds }` as JSON.
#[wasm_bindgen]
pub fn process_pending_json(canvas_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    place_json(canvas_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

/// True when the canvas holds at least one node waiting for placement.
#[wasm_bindgen]
pub fn has_pending_nodes(canvas_json: &str) -> Result<bool, JsValue> {
    let canvas =
        Canvas::from_json(canvas_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    Ok(canvas.nodes.iter().any(needs_layout))
}
