use crate::{
    change::plan::{self, ChangeRequest},
    expression::algebra::{self, BinaryOp},
    expression::args::{Arg, CallArgs},
    expression::context::{ExpressionContext, Scope},
    expression::value::Value,
    foundation::error::{GeoError, GeoResult},
    foundation::math::format_number,
    syntax::node::LiteralValue,
};

/// Builds a value from the resolved arguments of a call.
pub type Constructor = fn(CallArgs) -> GeoResult<Value>;

/// A typed expression tree produced by the interpreter.
///
/// [`Expression::resolve`] recomputes the value from the children on every call, so a resolved
/// expression can be resolved again after the bindings it reads have changed.
#[derive(Clone, Debug)]
pub struct Expression {
    kind: ExprKind,
    value: Option<Value>,
}

#[derive(Clone, Debug)]
pub(crate) enum ExprKind {
    /// Literal payload of a terminal node before its terminal factory runs.
    Raw(LiteralValue),
    Number(f64),
    Text(String),
    Reference(String),
    Assign {
        name: String,
        value: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Call {
        name: String,
        ctor: Constructor,
        args: Vec<Expression>,
    },
    Change {
        variable: String,
        target: Box<Expression>,
        duration: Option<Box<Expression>>,
    },
}

impl Expression {
    fn from_kind(kind: ExprKind) -> Self {
        Self { kind, value: None }
    }

    pub(crate) fn raw(literal: LiteralValue) -> Self {
        Self::from_kind(ExprKind::Raw(literal))
    }

    pub fn number(value: f64) -> Self {
        Self::from_kind(ExprKind::Number(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::from_kind(ExprKind::Text(value.into()))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::from_kind(ExprKind::Reference(name.into()))
    }

    pub fn assign(name: impl Into<String>, value: Expression) -> Self {
        Self::from_kind(ExprKind::Assign {
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Self::from_kind(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn call(name: impl Into<String>, ctor: Constructor, args: Vec<Expression>) -> Self {
        Self::from_kind(ExprKind::Call {
            name: name.into(),
            ctor,
            args,
        })
    }

    pub fn change(
        variable: impl Into<String>,
        target: Expression,
        duration: Option<Expression>,
    ) -> Self {
        Self::from_kind(ExprKind::Change {
            variable: variable.into(),
            target: Box::new(target),
            duration: duration.map(Box::new),
        })
    }

    /// Literal payload of a terminal argument.
    pub(crate) fn into_raw(self) -> Option<LiteralValue> {
        match self.kind {
            ExprKind::Raw(literal) => Some(literal),
            _ => None,
        }
    }

    /// Value computed by the last successful [`Expression::resolve`].
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Variable bound by this expression when it is an assignment.
    pub fn binding(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Assign { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Variable read when this expression is a bare reference.
    pub fn referenced(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// The expression an assignment binds, or `self` otherwise.
    pub fn body(&self) -> &Expression {
        match &self.kind {
            ExprKind::Assign { value, .. } => value.body(),
            _ => self,
        }
    }

    /// Name of the call when this is a constructor call.
    pub fn call_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Call { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Resolve children left to right, then compute and cache this node's value.
    pub fn resolve(&mut self, ctx: &mut ExpressionContext, scope: Scope) -> GeoResult<Value> {
        let value = match &mut self.kind {
            ExprKind::Raw(_) => {
                return Err(GeoError::expression(
                    "literal used outside a terminal node",
                ));
            }
            ExprKind::Number(v) => Value::Number(*v),
            ExprKind::Text(t) => Value::Text(t.clone()),
            ExprKind::Reference(name) => ctx.get_reference(name, scope)?,
            ExprKind::Assign { name, value } => {
                let v = value.resolve(ctx, scope)?;
                ctx.add_reference(name.clone(), v.clone());
                v
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let a = lhs.resolve(ctx, scope)?;
                let b = rhs.resolve(ctx, scope)?;
                algebra::apply(*op, &a, &b)?
            }
            ExprKind::Call { name, ctor, args } => {
                let mut resolved = Vec::with_capacity(args.len());
                for arg in args.iter_mut() {
                    let binding = arg.referenced().map(str::to_string);
                    let value = arg.resolve(ctx, scope)?;
                    resolved.push(Arg { value, binding });
                }
                ctor(CallArgs::new(name.clone(), resolved))?
            }
            ExprKind::Change {
                variable,
                target,
                duration,
            } => {
                let target = target.resolve(ctx, scope)?;
                let duration = match duration {
                    Some(d) => Some(change_duration(d.resolve(ctx, scope)?)?),
                    None => None,
                };
                let request = ChangeRequest {
                    variable: variable.as_str(),
                    target,
                    duration,
                    caller: scope.caller(),
                };
                Value::Change(Box::new(plan::change(ctx, request)?))
            }
        };
        self.value = Some(value.clone());
        Ok(value)
    }
}

/// Longest animation a single `change()` may request.
const MAX_CHANGE_SECS: f64 = 3600.0;

fn change_duration(value: Value) -> GeoResult<f64> {
    let secs = value
        .as_number()
        .ok_or_else(|| GeoError::expression("change() duration must be a number."))?;
    if !secs.is_finite() || !(0.0..=MAX_CHANGE_SECS).contains(&secs) {
        return Err(GeoError::expression(format!(
            "change() duration out of range.\nUse 0 to {} seconds.",
            format_number(MAX_CHANGE_SECS)
        )));
    }
    Ok(secs)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/expr.rs"]
mod tests;
