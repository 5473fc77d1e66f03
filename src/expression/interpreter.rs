use std::collections::HashMap;

use crate::{
    expression::algebra::BinaryOp,
    expression::builtins,
    expression::expr::{Constructor, Expression},
    foundation::error::{GeoError, GeoResult},
    syntax::node::{ASSIGNMENT, IDENTIFIER, LiteralValue, NUMERIC, QUOTED, SyntaxNode},
};

/// Builds an expression from the unresolved children of a node. Used for operators, literals
/// and special forms that need to see their arguments before resolution.
pub type Form = fn(&str, Vec<Expression>) -> GeoResult<Expression>;

#[derive(Clone, Copy, Debug)]
pub enum Factory {
    Form(Form),
    Call(Constructor),
}

/// Node-name to factory registry. Names are matched case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct FunctionTable {
    entries: HashMap<String, Factory>,
}

impl FunctionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table with literals, operators, assignment and every built-in constructor.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register_form(NUMERIC, numeric);
        table.register_form(IDENTIFIER, identifier);
        table.register_form(QUOTED, quoted);
        table.register_form(ASSIGNMENT, assignment);
        for op in ["+", "-", "*", "/", "^"] {
            table.register_form(op, binary);
        }
        builtins::register(&mut table);
        table
    }

    pub fn register_form(&mut self, name: &str, form: Form) {
        self.entries
            .insert(name.to_ascii_lowercase(), Factory::Form(form));
    }

    pub fn register_call(&mut self, name: &str, ctor: Constructor) {
        self.entries
            .insert(name.to_ascii_lowercase(), Factory::Call(ctor));
    }

    pub fn get(&self, name: &str) -> Option<Factory> {
        self.entries.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Post-order evaluator from syntax trees to expressions.
#[derive(Clone, Debug)]
pub struct Interpreter {
    table: FunctionTable,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(FunctionTable::standard())
    }
}

impl Interpreter {
    pub fn new(table: FunctionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FunctionTable {
        &self.table
    }

    /// Evaluate children first, then dispatch the node name. Leaves dispatch their terminal
    /// name with the literal as the only argument.
    pub fn eval_expression(&self, node: &SyntaxNode) -> GeoResult<Expression> {
        match node {
            SyntaxNode::Literal { name, value } => {
                self.dispatch(name, vec![Expression::raw(value.clone())])
            }
            SyntaxNode::Call { name, args } => {
                let children = args
                    .iter()
                    .map(|a| self.eval_expression(a))
                    .collect::<GeoResult<Vec<_>>>()?;
                self.dispatch(name, children)
            }
        }
    }

    fn dispatch(&self, name: &str, args: Vec<Expression>) -> GeoResult<Expression> {
        match self.table.get(name) {
            None => Err(GeoError::unknown_function(name)),
            Some(Factory::Form(form)) => form(name, args),
            Some(Factory::Call(ctor)) => Ok(Expression::call(name.to_ascii_lowercase(), ctor, args)),
        }
    }
}

/// Unwrap the single literal argument of a terminal node.
fn sole_literal(name: &str, args: Vec<Expression>) -> GeoResult<LiteralValue> {
    let mut it = args.into_iter();
    match (it.next().and_then(Expression::into_raw), it.next()) {
        (Some(literal), None) => Ok(literal),
        _ => Err(GeoError::expression(format!(
            "'{name}' must wrap exactly one literal"
        ))),
    }
}

fn numeric(name: &str, args: Vec<Expression>) -> GeoResult<Expression> {
    match sole_literal(name, args)? {
        LiteralValue::Number(v) => Ok(Expression::number(v)),
        LiteralValue::Text(t) => t
            .trim()
            .parse::<f64>()
            .map(Expression::number)
            .map_err(|_| GeoError::expression(format!("'{t}' is not a number."))),
    }
}

fn identifier(name: &str, args: Vec<Expression>) -> GeoResult<Expression> {
    match sole_literal(name, args)? {
        LiteralValue::Text(t) => Ok(Expression::reference(t)),
        LiteralValue::Number(v) => Err(GeoError::expression(format!(
            "'{v}' is not a variable name."
        ))),
    }
}

fn quoted(name: &str, args: Vec<Expression>) -> GeoResult<Expression> {
    match sole_literal(name, args)? {
        LiteralValue::Text(t) => Ok(Expression::text(t)),
        LiteralValue::Number(v) => Ok(Expression::text(v.to_string())),
    }
}

fn binary(name: &str, args: Vec<Expression>) -> GeoResult<Expression> {
    let Some(op) = BinaryOp::from_symbol(name) else {
        return Err(GeoError::unknown_function(name));
    };
    let mut it = args.into_iter();
    match (it.next(), it.next(), it.next()) {
        (Some(lhs), Some(rhs), None) => Ok(Expression::binary(op, lhs, rhs)),
        _ => Err(GeoError::expression(format!(
            "'{}' needs two operands.",
            op.symbol()
        ))),
    }
}

fn assignment(_name: &str, args: Vec<Expression>) -> GeoResult<Expression> {
    let mut it = args.into_iter();
    match (it.next(), it.next(), it.next()) {
        (Some(lhs), Some(rhs), None) => match lhs.referenced() {
            Some(target) => Ok(Expression::assign(target.to_string(), rhs)),
            None => Err(GeoError::expression(
                "Left side must be a name.\nUse: name = value",
            )),
        },
        _ => Err(GeoError::expression(
            "Assignment needs a name and a value.\nUse: name = value",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/interpreter.rs"]
mod tests;
