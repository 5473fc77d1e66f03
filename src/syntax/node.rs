/// One node of a parsed statement.
///
/// Composite nodes carry a function or operator name and ordered children. Leaves carry a
/// literal under one of the terminal names [`NUMERIC`], [`IDENTIFIER`] or [`QUOTED`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SyntaxNode {
    /// `{ "name": "point", "args": [...] }`
    Call { name: String, args: Vec<SyntaxNode> },
    /// `{ "name": "numeric", "value": 3 }`
    Literal { name: String, value: LiteralValue },
}

/// Literal payload of a leaf node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Number(f64),
    Text(String),
}

/// Terminal name of number literals.
pub const NUMERIC: &str = "numeric";
/// Terminal name of bare identifiers (variable references and assignment targets).
pub const IDENTIFIER: &str = "string";
/// Terminal name of quoted text literals.
pub const QUOTED: &str = "quotedstring";
/// Name of the assignment wrapper node: `args = [identifier, value]`.
pub const ASSIGNMENT: &str = "assignment";

impl SyntaxNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Call { name, .. } | Self::Literal { name, .. } => name,
        }
    }
}
