//! Text annotations and inline style arguments.

use crate::{
    expression::args::{CallArgs, point_at},
    expression::interpreter::FunctionTable,
    expression::value::{LabelGeom, TableGeom, Value},
    foundation::core::{Dimension, Point},
    foundation::error::{GeoError, GeoResult},
    foundation::math::format_number,
    options::style::Style,
};

pub(crate) fn register(table: &mut FunctionTable) {
    table.register_call("label", label);
    table.register_call("table", table_call);
    table.register_call("c", color);
    table.register_call("s", stroke_width);
    table.register_call("f", font_size);
    table.register_call("fc", fill_color);
    table.register_call("so", stroke_opacity);
    table.register_call("fo", fill_opacity);
}

/// `label(P, "text")` or `label(x, y, "text")`; the text may come first.
fn label(args: CallArgs) -> GeoResult<Value> {
    let mut split = args.split()?;
    split.require_dimension(Dimension::Two)?;
    let Some(text) = split.take_text() else {
        return Err(GeoError::expression(
            "label() needs text.\nUse: label(P, \"text\")",
        ));
    };
    let c = split.coords2()?;
    if c.len() != 2 {
        return Err(split.wrong_count(c.len(), "a position: x, y"));
    }
    Ok(Value::Label(split.shape(LabelGeom {
        at: point_at(&c, 0),
        text,
    })))
}

const MAX_TABLE_CELLS: usize = 10_000;

/// `table(x, y, rows, cols, cell...)`; missing cells are left empty.
fn table_call(args: CallArgs) -> GeoResult<Value> {
    let mut split = args.split()?;
    split.require_dimension(Dimension::Two)?;
    if split.rest.len() < 4 {
        return Err(split.wrong_count(split.rest.len(), "at least 4: x, y, rows, cols"));
    }
    let cells = split.rest.split_off(4);
    let head = split.numbers()?;
    let (x, y) = (head[0], head[1]);
    let (rows, cols) = (count(head[2], "rows")?, count(head[3], "cols")?);
    let capacity = rows
        .checked_mul(cols)
        .filter(|n| *n <= MAX_TABLE_CELLS)
        .ok_or_else(|| {
            GeoError::expression(format!(
                "table() is too large.\nAt most {MAX_TABLE_CELLS} cells fit in a table."
            ))
        })?;
    split.rest = cells;
    let mut cells = split.cell_texts();
    if cells.len() > capacity {
        return Err(GeoError::expression(format!(
            "table() got {} cells.\nA {rows}x{cols} table holds {capacity}.",
            cells.len(),
        )));
    }
    cells.resize(capacity, String::new());
    Ok(Value::Table(split.shape(TableGeom {
        at: Point::new(x, y),
        rows,
        cols,
        cells,
    })))
}

fn count(v: f64, what: &str) -> GeoResult<usize> {
    if v >= 1.0 && v.fract() == 0.0 {
        return Ok(v as usize);
    }
    Err(GeoError::expression(format!(
        "table() {what} must be a whole number.\nGot {}.",
        format_number(v)
    )))
}

/// The single argument of a style call.
fn style_arg(args: CallArgs) -> GeoResult<(String, Value)> {
    let name = args.name().to_string();
    let mut values = args.into_args().into_iter();
    match (values.next(), values.next()) {
        (Some(arg), None) => Ok((name, arg.value)),
        _ => Err(GeoError::expression(format!(
            "{name}() takes one value."
        ))),
    }
}

fn style_text(args: CallArgs) -> GeoResult<String> {
    match style_arg(args)? {
        (_, Value::Text(t)) => Ok(t),
        (_, Value::Number(n)) => Ok(format_number(n)),
        (name, other) => Err(GeoError::expression(format!(
            "{name}() needs a color.\nGot a {}.",
            other.tag()
        ))),
    }
}

fn style_number(args: CallArgs) -> GeoResult<f64> {
    match style_arg(args)? {
        (_, Value::Number(n)) => Ok(n),
        (name, other) => Err(GeoError::expression(format!(
            "{name}() needs a number.\nGot a {}.",
            other.tag()
        ))),
    }
}

fn style_opacity(args: CallArgs) -> GeoResult<f64> {
    let name = args.name().to_string();
    let v = style_number(args)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(GeoError::expression(format!(
            "{name}() opacity out of range.\nUse a value from 0 to 1."
        )));
    }
    Ok(v)
}

fn color(args: CallArgs) -> GeoResult<Value> {
    Ok(Value::Style(Style::color(style_text(args)?)))
}

fn stroke_width(args: CallArgs) -> GeoResult<Value> {
    Ok(Value::Style(Style {
        stroke_width: Some(style_number(args)?),
        ..Style::default()
    }))
}

fn font_size(args: CallArgs) -> GeoResult<Value> {
    Ok(Value::Style(Style {
        font_size: Some(style_number(args)?),
        ..Style::default()
    }))
}

fn fill_color(args: CallArgs) -> GeoResult<Value> {
    Ok(Value::Style(Style {
        fill: Some(style_text(args)?),
        ..Style::default()
    }))
}

fn stroke_opacity(args: CallArgs) -> GeoResult<Value> {
    Ok(Value::Style(Style {
        stroke_opacity: Some(style_opacity(args)?),
        ..Style::default()
    }))
}

fn fill_opacity(args: CallArgs) -> GeoResult<Value> {
    Ok(Value::Style(Style {
        fill_opacity: Some(style_opacity(args)?),
        ..Style::default()
    }))
}

#[cfg(test)]
#[path = "../../../tests/unit/expression/builtins/annotate.rs"]
mod tests;
