//! Visibility toggles, restyling and the `change` form.

use crate::{
    expression::args::CallArgs,
    expression::expr::Expression,
    expression::interpreter::FunctionTable,
    expression::args::Arg,
    expression::value::{RestyleOp, Value, VisibilityOp},
    foundation::error::{GeoError, GeoResult},
    foundation::math::format_number,
    options::style::Style,
};

pub(crate) fn register(table: &mut FunctionTable) {
    table.register_call("hide", hide);
    table.register_call("show", show);
    table.register_call("stroke", stroke);
    table.register_call("fill", fill);
    table.register_call("strokewidth", stroke_width);
    table.register_form("change", change);
}

fn toggle(args: CallArgs, visible: bool) -> GeoResult<Value> {
    let name = args.name().to_string();
    let mut it = args.into_args().into_iter();
    let (Some(arg), None) = (it.next(), it.next()) else {
        return Err(GeoError::expression(format!(
            "{name}() takes one shape.\nUse: {name}(A)"
        )));
    };
    let Some(target) = arg.binding else {
        return Err(GeoError::expression(format!(
            "{name}() needs a variable.\nAssign the shape first."
        )));
    };
    Ok(Value::Visibility(VisibilityOp { target, visible }))
}

fn hide(args: CallArgs) -> GeoResult<Value> {
    toggle(args, false)
}

fn show(args: CallArgs) -> GeoResult<Value> {
    toggle(args, true)
}

/// Variable name of the shape argument of a restyle call, and the values after it.
fn restyle_target(name: &str, args: Vec<Arg>) -> GeoResult<(String, Vec<Value>)> {
    let mut it = args.into_iter();
    let Some(first) = it.next() else {
        return Err(GeoError::expression(format!(
            "{name}() needs a shape first.\nUse: {name}(A, ...)"
        )));
    };
    let Some(target) = first.binding else {
        return Err(GeoError::expression(format!(
            "{name}() needs a variable.\nAssign the shape first."
        )));
    };
    Ok((target, it.map(|a| a.value).collect()))
}

fn color_text(name: &str, value: &Value) -> GeoResult<String> {
    match value {
        Value::Text(t) => Ok(t.clone()),
        Value::Number(n) => Ok(format_number(*n)),
        other => Err(GeoError::expression(format!(
            "{name}() needs a color.\nGot a {}.",
            other.tag()
        ))),
    }
}

fn restyled(target: String, style: Style) -> GeoResult<Value> {
    Ok(Value::Restyle(RestyleOp { target, style }))
}

/// `stroke(A, color)`
fn stroke(args: CallArgs) -> GeoResult<Value> {
    let name = args.name().to_string();
    let (target, values) = restyle_target(&name, args.into_args())?;
    let [color] = values.as_slice() else {
        return Err(GeoError::expression(format!(
            "{name}() takes a shape and a color.\nUse: {name}(A, \"red\")"
        )));
    };
    restyled(target, Style::color(color_text(&name, color)?))
}

/// `fill(A, color)` or `fill(A, color, opacity)`
fn fill(args: CallArgs) -> GeoResult<Value> {
    let name = args.name().to_string();
    let (target, values) = restyle_target(&name, args.into_args())?;
    let (color, opacity) = match values.as_slice() {
        [c] => (c, None),
        [c, o] => (c, Some(o)),
        _ => {
            return Err(GeoError::expression(format!(
                "{name}() takes a shape, a color and an optional opacity."
            )));
        }
    };
    let fill_opacity = match opacity.map(Value::as_number) {
        None => None,
        Some(Some(o)) if (0.0..=1.0).contains(&o) => Some(o),
        Some(_) => {
            return Err(GeoError::expression(format!(
                "{name}() opacity out of range.\nUse a value from 0 to 1."
            )));
        }
    };
    restyled(
        target,
        Style {
            fill: Some(color_text(&name, color)?),
            fill_opacity,
            ..Style::default()
        },
    )
}

/// `strokewidth(A, width)`
fn stroke_width(args: CallArgs) -> GeoResult<Value> {
    let name = args.name().to_string();
    let (target, values) = restyle_target(&name, args.into_args())?;
    let width = match values.as_slice() {
        [Value::Number(w)] if w.is_finite() && *w >= 0.0 => *w,
        _ => {
            return Err(GeoError::expression(format!(
                "{name}() takes a shape and a width.\nUse: {name}(A, 3)"
            )));
        }
    };
    restyled(
        target,
        Style {
            stroke_width: Some(width),
            ..Style::default()
        },
    )
}

/// `change(A, target)` or `change(A, target, seconds)`. The variable is kept as a name so the
/// change does not register itself as a reader of it.
fn change(_name: &str, args: Vec<Expression>) -> GeoResult<Expression> {
    let mut it = args.into_iter();
    let (Some(var), Some(target), duration, None) = (it.next(), it.next(), it.next(), it.next())
    else {
        return Err(GeoError::expression(
            "change() takes a variable, a target and an optional duration.\nUse: change(A, 10)",
        ));
    };
    let Some(variable) = var.referenced().map(str::to_string) else {
        return Err(GeoError::expression(
            "change() needs a variable first.\nUse: change(A, 10)",
        ));
    };
    Ok(Expression::change(variable, target, duration))
}

#[cfg(test)]
#[path = "../../../tests/unit/expression/builtins/control.rs"]
mod tests;
