use crate::{
    expression::args::CallArgs,
    expression::interpreter::FunctionTable,
    expression::value::{GraphGeom, Value},
    foundation::core::Rect,
    foundation::error::{GeoError, GeoResult},
};

pub(crate) fn register(table: &mut FunctionTable) {
    table.register_call("g2d", g2d);
    table.register_call("g3d", g3d);
}

/// `x, y, width, height` of a container.
fn bounds(args: CallArgs) -> GeoResult<GraphGeom> {
    let split = args.split()?;
    let n = split.numbers()?;
    let [x, y, w, h] = n.as_slice() else {
        return Err(split.wrong_count(n.len(), "4: x, y, width, height"));
    };
    if *w <= 0.0 || *h <= 0.0 {
        return Err(GeoError::expression(format!(
            "{}() size must be positive.\nCheck width and height.",
            split.name
        )));
    }
    Ok(GraphGeom {
        bounds: Rect::new(*x, *y, x + w, y + h),
    })
}

fn g2d(args: CallArgs) -> GeoResult<Value> {
    Ok(Value::Graph2d(bounds(args)?))
}

fn g3d(args: CallArgs) -> GeoResult<Value> {
    Ok(Value::Graph3d(bounds(args)?))
}
