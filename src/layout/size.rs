use crate::catalog::{Size, SizeCatalog};
use crate::model::{Node, SizeHint};
use once_cell::sync::Lazy;
use regex::Regex;

// Longest leading decimal literal, the prefix JavaScript's parseFloat accepts.
static LEADING_FLOAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// Reads a usable dimension out of a wire value. Strings such as `"320px"`
/// yield their numeric prefix; non-finite or unparsable values yield `None`.
pub fn parse_dimension(hint: &SizeHint) -> Option<f64> {
    let value = match hint {
        SizeHint::Number(value) => *value,
        SizeHint::Text(text) => {
            let found = LEADING_FLOAT_RE.find(text.trim_start())?;
            found.as_str().parse::<f64>().ok()?
        }
        SizeHint::Other(_) => return None,
    };
    value.is_finite().then_some(value)
}

fn first_dimension<'a>(hints: impl IntoIterator<Item = Option<&'a SizeHint>>) -> Option<f64> {
    hints.into_iter().flatten().find_map(parse_dimension)
}

/// Effective width: measured, then explicit, then style, then catalog default.
pub fn node_width(node: &Node, catalog: &SizeCatalog) -> f64 {
    first_dimension([
        node.measured.as_ref().and_then(|m| m.width.as_ref()),
        node.width.as_ref(),
        node.style.as_ref().and_then(|s| s.width.as_ref()),
    ])
    .unwrap_or_else(|| catalog.size_of(&node.kind).width)
}

/// Effective height, with the same priority chain as [`node_width`].
pub fn node_height(node: &Node, catalog: &SizeCatalog) -> f64 {
    first_dimension([
        node.measured.as_ref().and_then(|m| m.height.as_ref()),
        node.height.as_ref(),
        node.style.as_ref().and_then(|s| s.height.as_ref()),
    ])
    .unwrap_or_else(|| catalog.size_of(&node.kind).height)
}

pub fn node_size(node: &Node, catalog: &SizeCatalog) -> Size {
    Size::new(node_width(node, catalog), node_height(node, catalog))
}
