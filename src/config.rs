use crate::catalog::{Size, SizeCatalog};
use crate::layout::{DEFAULT_MAX_ITERATIONS, GAP};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub gap: f64,
    pub max_iterations: usize,
    pub catalog: SizeCatalog,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            gap: GAP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            catalog: SizeCatalog::standard(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f64,
    pub background: String,
    pub node_fill: String,
    pub group_fill: String,
    pub stroke: String,
    pub edge_color: String,
    pub text_color: String,
    pub font_family: String,
    pub font_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 40.0,
            background: "#FFFFFF".to_string(),
            node_fill: "#F8FAFF".to_string(),
            group_fill: "#F7FAFF".to_string(),
            stroke: "#C7D2E5".to_string(),
            edge_color: "#7A8AA6".to_string(),
            text_color: "#1C2430".to_string(),
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub placement: PlacementConfig,
    pub render: RenderConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("invalid config value for `{key}`: {reason}")]
    Invalid { key: String, reason: &'static str },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SizeOverride {
    width: f64,
    height: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f64>,
    background: Option<String>,
    node_fill: Option<String>,
    group_fill: Option<String>,
    stroke: Option<String>,
    edge_color: Option<String>,
    text_color: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    gap: Option<f64>,
    max_iterations: Option<usize>,
    sizes: Option<BTreeMap<String, SizeOverride>>,
    fallback_size: Option<SizeOverride>,
    render: Option<RenderFile>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(gap) = parsed.gap {
        config.placement.gap = checked_gap("gap", gap)?;
    }
    if let Some(max_iterations) = parsed.max_iterations {
        config.placement.max_iterations = max_iterations;
    }
    if let Some(sizes) = parsed.sizes {
        for (kind, size) in sizes {
            let size = checked_size(&format!("sizes.{kind}"), size.width, size.height)?;
            config.placement.catalog.set(kind, size);
        }
    }
    if let Some(size) = parsed.fallback_size {
        config.placement.catalog.fallback = checked_size("fallbackSize", size.width, size.height)?;
    }

    if let Some(render) = parsed.render {
        let target = &mut config.render;
        if let Some(v) = render.width {
            target.width = v;
        }
        if let Some(v) = render.height {
            target.height = v;
        }
        if let Some(v) = render.padding {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid("render.padding", "must be a finite, non-negative number"));
            }
            target.padding = v;
        }
        if let Some(v) = render.background {
            target.background = v;
        }
        if let Some(v) = render.node_fill {
            target.node_fill = v;
        }
        if let Some(v) = render.group_fill {
            target.group_fill = v;
        }
        if let Some(v) = render.stroke {
            target.stroke = v;
        }
        if let Some(v) = render.edge_color {
            target.edge_color = v;
        }
        if let Some(v) = render.text_color {
            target.text_color = v;
        }
        if let Some(v) = render.font_family {
            target.font_family = v;
        }
        if let Some(v) = render.font_size {
            target.font_size = v;
        }
    }

    Ok(config)
}

pub fn checked_gap(key: &str, gap: f64) -> Result<f64, ConfigError> {
    if !gap.is_finite() || gap < 0.0 {
        return Err(invalid(key, "must be a finite, non-negative number"));
    }
    Ok(gap)
}

pub fn checked_size(key: &str, width: f64, height: f64) -> Result<Size, ConfigError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(width) || !valid(height) {
        return Err(invalid(key, "width and height must be positive finite numbers"));
    }
    Ok(Size::new(width, height))
}

fn invalid(key: &str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason,
    }
}
