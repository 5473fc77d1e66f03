use crate::{
    foundation::error::{GeoError, GeoResult},
    syntax::node::SyntaxNode,
};

/// Grammar service contract: statement text to syntax trees.
///
/// Blank input yields no nodes. Malformed input fails with [`GeoError::Syntax`].
pub trait SyntaxSource {
    fn parse(&self, text: &str) -> GeoResult<Vec<SyntaxNode>>;
}

/// Reads statements that are already serialized syntax trees in JSON.
///
/// A statement is either a single node object or an array of nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSource;

impl SyntaxSource for JsonSource {
    fn parse(&self, text: &str) -> GeoResult<Vec<SyntaxNode>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let parsed = if text.starts_with('[') {
            serde_json::from_str::<Vec<SyntaxNode>>(text)
        } else {
            serde_json::from_str::<SyntaxNode>(text).map(|n| vec![n])
        };
        parsed.map_err(|e| GeoError::syntax(e.line(), e.column(), e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/source.rs"]
mod tests;
