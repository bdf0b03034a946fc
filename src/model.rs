use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Position that marks a node as waiting for automatic placement.
pub const PENDING_POSITION: Point = Point { x: -1.0, y: -1.0 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_pending(&self) -> bool {
        *self == PENDING_POSITION
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Prompt,
    Image,
    Video,
    Audio,
    Text,
    Script,
    Composition,
    Group,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Prompt => "prompt",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Script => "script",
            Self::Composition => "composition",
            Self::Group => "group",
            Self::Other(name) => name,
        }
    }

    /// Containers own a nested coordinate space and are never displaced.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Group)
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "prompt" => Self::Prompt,
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "text" => Self::Text,
            "script" => Self::Script,
            "composition" => Self::Composition,
            "group" => Self::Group,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other("default".to_string())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A size as it appears on the wire: producers send either numbers or CSS-ish
/// strings such as `"320px"`. Anything else is kept but never used as a size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeHint {
    Number(f64),
    Text(String),
    Other(Value),
}

impl From<f64> for SizeHint {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SizeHint {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<SizeHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<SizeHint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measured {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<SizeHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<SizeHint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Pending,
    Placed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: NodeKind,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<SizeHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<SizeHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<Measured>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: impl Into<NodeKind>, position: Point) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position,
            width: None,
            height: None,
            style: None,
            measured: None,
            parent_id: None,
            extra: Map::new(),
        }
    }

    pub fn pending(id: impl Into<String>, kind: impl Into<NodeKind>) -> Self {
        Self::new(id, kind, PENDING_POSITION)
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(SizeHint::Number(width));
        self.height = Some(SizeHint::Number(height));
        self
    }

    pub fn state(&self) -> NodeState {
        if self.position.is_pending() {
            NodeState::Pending
        } else {
            NodeState::Placed
        }
    }
}

pub fn needs_layout(node: &Node) -> bool {
    node.state() == NodeState::Pending
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("invalid canvas document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Canvas {
    pub fn from_json(input: &str) -> Result<Self, CanvasError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CanvasError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn pending_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|node| needs_layout(node))
            .map(|node| node.id.clone())
            .collect()
    }
}
