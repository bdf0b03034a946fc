use crate::model::NodeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeCatalog {
    pub sizes: BTreeMap<String, Size>,
    pub fallback: Size,
}

impl SizeCatalog {
    pub fn standard() -> Self {
        let sizes = [
            (NodeKind::Prompt, Size::new(320.0, 200.0)),
            (NodeKind::Image, Size::new(400.0, 300.0)),
            (NodeKind::Video, Size::new(480.0, 320.0)),
            (NodeKind::Audio, Size::new(360.0, 140.0)),
            (NodeKind::Text, Size::new(320.0, 240.0)),
            (NodeKind::Script, Size::new(360.0, 260.0)),
            (NodeKind::Composition, Size::new(500.0, 360.0)),
            (NodeKind::Group, Size::new(600.0, 400.0)),
        ]
        .into_iter()
        .map(|(kind, size)| (String::from(kind), size))
        .collect();
        Self {
            sizes,
            fallback: Size::new(240.0, 160.0),
        }
    }

    pub fn size_of(&self, kind: &NodeKind) -> Size {
        self.sizes
            .get(kind.as_str())
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn set(&mut self, kind: impl Into<NodeKind>, size: Size) {
        self.sizes.insert(String::from(kind.into()), size);
    }
}

impl Default for SizeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
