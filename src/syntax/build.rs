//! Builders for syntax trees.
//!
//! These produce the same trees the grammar service emits, which keeps fixtures and host
//! integrations independent of any concrete surface syntax.

use crate::{
    foundation::error::{GeoError, GeoResult},
    syntax::node::{ASSIGNMENT, IDENTIFIER, LiteralValue, NUMERIC, QUOTED, SyntaxNode},
};

/// Number literal.
pub fn num(value: f64) -> SyntaxNode {
    SyntaxNode::Literal {
        name: NUMERIC.to_string(),
        value: LiteralValue::Number(value),
    }
}

/// Bare identifier, i.e. a variable reference.
pub fn ident(name: impl Into<String>) -> SyntaxNode {
    SyntaxNode::Literal {
        name: IDENTIFIER.to_string(),
        value: LiteralValue::Text(name.into()),
    }
}

/// Quoted text literal.
pub fn text(value: impl Into<String>) -> SyntaxNode {
    SyntaxNode::Literal {
        name: QUOTED.to_string(),
        value: LiteralValue::Text(value.into()),
    }
}

/// Function call or operator node.
pub fn call(name: impl Into<String>, args: impl IntoIterator<Item = SyntaxNode>) -> SyntaxNode {
    SyntaxNode::Call {
        name: name.into(),
        args: args.into_iter().collect(),
    }
}

/// Binary operator node, e.g. `op("+", a, b)`.
pub fn op(symbol: &str, lhs: SyntaxNode, rhs: SyntaxNode) -> SyntaxNode {
    call(symbol, [lhs, rhs])
}

/// Unary minus, encoded by the grammar as multiplication by `-1`.
pub fn neg(value: SyntaxNode) -> SyntaxNode {
    op("*", value, num(-1.0))
}

/// `name = value`.
pub fn assign(name: impl Into<String>, value: SyntaxNode) -> SyntaxNode {
    call(ASSIGNMENT, [ident(name), value])
}

/// Builder for a whole program as one serialized tree per line.
#[derive(Clone, Debug, Default)]
pub struct ProgramBuilder {
    statements: Vec<SyntaxNode>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one statement.
    pub fn statement(mut self, node: SyntaxNode) -> Self {
        self.statements.push(node);
        self
    }

    /// Append a blank line.
    pub fn blank(mut self) -> Self {
        self.statements.push(SyntaxNode::Call {
            name: String::new(),
            args: Vec::new(),
        });
        self
    }

    /// Serialize to JSON lines, one statement per line. Blank statements become empty lines.
    pub fn build(self) -> GeoResult<Vec<String>> {
        self.statements
            .iter()
            .map(|node| {
                if node.name().is_empty() {
                    return Ok(String::new());
                }
                serde_json::to_string(node).map_err(|e| GeoError::from(anyhow::Error::new(e)))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/build.rs"]
mod tests;
