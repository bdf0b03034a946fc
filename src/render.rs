use crate::catalog::SizeCatalog;
use crate::config::RenderConfig;
use crate::layout::{Rect, node_size};
use crate::model::{Canvas, Node, Point};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

fn absolute_rects<'a>(canvas: &'a Canvas, catalog: &SizeCatalog) -> Vec<(&'a Node, Rect)> {
    let index: HashMap<&str, &Node> = canvas
        .nodes
        .iter()
        .rev()
        .map(|node| (node.id.as_str(), node))
        .collect();

    canvas
        .nodes
        .iter()
        .filter(|node| !node.position.is_pending())
        .map(|node| {
            let mut origin = node.position;
            let mut parent = node.parent_id.as_deref();
            // Bounded walk so a malformed parent cycle cannot hang the preview.
            for _ in 0..canvas.nodes.len() {
                let Some(group) = parent.and_then(|id| index.get(id)) else {
                    break;
                };
                origin = Point::new(origin.x + group.position.x, origin.y + group.position.y);
                parent = group.parent_id.as_deref();
            }
            (node, Rect::at(origin, node_size(node, catalog)))
        })
        .collect()
}

fn depth(node: &Node, index: &HashMap<&str, &Node>, limit: usize) -> usize {
    let mut depth = 0;
    let mut parent = node.parent_id.as_deref();
    while let Some(group) = parent.and_then(|id| index.get(id)) {
        depth += 1;
        if depth >= limit {
            break;
        }
        parent = group.parent_id.as_deref();
    }
    depth
}

pub fn render_svg(canvas: &Canvas, catalog: &SizeCatalog, config: &RenderConfig) -> String {
    let mut rects = absolute_rects(canvas, catalog);
    let index: HashMap<&str, &Node> = canvas
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();
    // Groups first, outermost first, so children paint on top.
    rects.sort_by_key(|(node, _)| {
        (
            !node.kind.is_container(),
            depth(node, &index, canvas.nodes.len()),
        )
    });

    let pad = config.padding;
    let (min_x, min_y, max_x, max_y) = rects.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), (_, rect)| {
            (
                min_x.min(rect.x),
                min_y.min(rect.y),
                max_x.max(rect.right()),
                max_y.max(rect.bottom()),
            )
        },
    );
    let (origin_x, origin_y, width, height) = if rects.is_empty() {
        (0.0, 0.0, 200.0, 200.0)
    } else {
        (
            min_x - pad,
            min_y - pad,
            (max_x - min_x + pad * 2.0).max(200.0),
            (max_y - min_y + pad * 2.0).max(200.0),
        )
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"{origin_x:.2} {origin_y:.2} {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{origin_x:.2}\" y=\"{origin_y:.2}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));
    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        config.edge_color
    ));
    svg.push_str("</defs>");

    for (node, rect) in &rects {
        let (fill, dash, label_y) = if node.kind.is_container() {
            (&config.group_fill, " stroke-dasharray=\"6 4\"", rect.y + 20.0)
        } else {
            (&config.node_fill, "", rect.y + rect.height / 2.0)
        };
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"8\" ry=\"8\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.2\"{}/>",
            rect.x, rect.y, rect.width, rect.height, fill, config.stroke, dash
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{} ({})</text>",
            rect.x + 12.0,
            label_y,
            escape_xml(&config.font_family),
            config.font_size,
            config.text_color,
            escape_xml(&node.id),
            escape_xml(node.kind.as_str())
        ));
    }

    let centers: HashMap<&str, (f64, f64)> = rects
        .iter()
        .map(|(node, rect)| {
            (
                node.id.as_str(),
                (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0),
            )
        })
        .collect();
    for edge in &canvas.edges {
        let (Some(from), Some(to)) = (
            centers.get(edge.source.as_str()),
            centers.get(edge.target.as_str()),
        ) else {
            continue;
        };
        svg.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#arrow)\"/>",
            from.0, from.1, to.0, to.1, config.edge_color
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            println!("{svg}");
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
