//! 2D geometry constructors and utilities.

use crate::{
    expression::args::{CallArgs, Split, point_at},
    expression::interpreter::FunctionTable,
    expression::value::{Segment, ShiftValue, Value},
    foundation::core::{Dimension, Point, Vec2},
    foundation::error::{GeoError, GeoResult},
    foundation::math::{
        EPSILON, centroid, extend_by_length, extend_by_proportion, format_number,
        line_line_intersection, line_polygon_intersections, project_onto, reflect_across,
        rotate_about, scale_about,
    },
};

pub(crate) fn register(table: &mut FunctionTable) {
    table.register_call("point", point);
    table.register_call("line", line);
    table.register_call("vec", vector);
    table.register_call("vector", vector);
    table.register_call("polygon", polygon);
    table.register_call("st", start);
    table.register_call("ed", end);
    table.register_call("mid", mid);
    table.register_call("len", length);
    table.register_call("dist", distance);
    table.register_call("xl", extend);
    table.register_call("translate", translate);
    table.register_call("rotate", rotate);
    table.register_call("scale", scale);
    table.register_call("reflect", reflect);
    table.register_call("project", project);
    table.register_call("intersect", intersect);
    table.register_call("rev", reverse);
    table.register_call("shift", shift);
}

fn split2(args: CallArgs) -> GeoResult<Split> {
    let split = args.split()?;
    split.require_dimension(Dimension::Two)?;
    Ok(split)
}

fn point(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let c = split.coords2()?;
    if c.len() != 2 {
        return Err(split.wrong_count(c.len(), "exactly 2: x, y"));
    }
    Ok(Value::Point(split.shape(point_at(&c, 0))))
}

/// `line(x1, y1, x2, y2[, ext])`; a non-zero `ext` lengthens the line by that distance.
fn line(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let c = split.coords2()?;
    let (start, end) = match c.len() {
        4 => (point_at(&c, 0), point_at(&c, 2)),
        5 => extend_by_length(point_at(&c, 0), point_at(&c, 2), c[4]),
        n => return Err(split.wrong_count(n, "4: x1, y1, x2, y2")),
    };
    Ok(Value::Line(split.shape(Segment::new(start, end))))
}

/// `vec(x1, y1, x2, y2)`, or `vec(x, y)` from the origin.
fn vector(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let c = split.coords2()?;
    let (start, end) = match c.len() {
        2 => (Point::ORIGIN, point_at(&c, 0)),
        4 => (point_at(&c, 0), point_at(&c, 2)),
        n => return Err(split.wrong_count(n, "4: x1, y1, x2, y2")),
    };
    Ok(Value::Vector(split.shape(Segment::new(start, end))))
}

/// Closed polygon; the first vertex is repeated at the end when needed.
fn polygon(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let c = split.coords2()?;
    if c.len() % 2 != 0 {
        return Err(GeoError::expression(format!(
            "polygon() got odd count: {}.\nCoordinates must be in pairs.",
            c.len()
        )));
    }
    if c.len() < 6 {
        return Err(GeoError::expression(
            "polygon() needs more points.\nAt least 3 points required.",
        ));
    }
    let mut vertices: Vec<Point> = (0..c.len()).step_by(2).map(|i| point_at(&c, i)).collect();
    if vertices.first() != vertices.last() {
        vertices.push(vertices[0]);
    }
    Ok(Value::Polygon(split.shape(vertices)))
}

/// The single shape argument of a utility call.
fn sole_shape(split: &Split) -> GeoResult<&Value> {
    match split.rest.as_slice() {
        [arg] => Ok(arg.value.settled()),
        other => Err(split.wrong_count(other.len(), "one shape")),
    }
}

fn endpoint(args: CallArgs, at_end: bool) -> GeoResult<Value> {
    let split = args.split()?;
    let value = match sole_shape(&split)? {
        Value::Line(s) | Value::Vector(s) => {
            let p = if at_end { s.geom.end } else { s.geom.start };
            Value::Point(s.with_geom(p))
        }
        Value::Polygon(s) => {
            let p = if at_end { s.geom.last() } else { s.geom.first() };
            let Some(p) = p.copied() else {
                return Err(GeoError::expression("polygon has no vertices"));
            };
            Value::Point(s.with_geom(p))
        }
        Value::Line3d(s) | Value::Vector3d(s) => {
            let p = if at_end { s.geom.end } else { s.geom.start };
            Value::Point3d(s.with_geom(p))
        }
        other => {
            return Err(GeoError::expression(format!(
                "{}() needs a line or vector.\nGot a {}.",
                split.name,
                other.tag()
            )));
        }
    };
    Ok(value.with_attachments(split.graph.map(|g| g.name), &split.style))
}

fn start(args: CallArgs) -> GeoResult<Value> {
    endpoint(args, false)
}

fn end(args: CallArgs) -> GeoResult<Value> {
    endpoint(args, true)
}

/// Midpoint of two points, of a segment, or the centroid of a polygon.
fn mid(args: CallArgs) -> GeoResult<Value> {
    let split = args.split()?;
    let values: Vec<&Value> = split.rest.iter().map(|a| a.value.settled()).collect();
    let value = match values.as_slice() {
        [Value::Point(a), Value::Point(b)] => Value::Point(a.with_geom(a.geom.midpoint(b.geom))),
        [Value::Point3d(a), Value::Point3d(b)] => {
            Value::Point3d(a.with_geom(a.geom.midpoint(b.geom)))
        }
        [Value::Line(s) | Value::Vector(s)] => {
            Value::Point(s.with_geom(s.geom.start.midpoint(s.geom.end)))
        }
        [Value::Line3d(s) | Value::Vector3d(s)] => {
            Value::Point3d(s.with_geom(s.geom.start.midpoint(s.geom.end)))
        }
        [Value::Polygon(p)] => match centroid(&p.geom) {
            Some(c) => Value::Point(p.with_geom(c)),
            None => return Err(GeoError::expression("polygon has no vertices")),
        },
        _ => {
            return Err(GeoError::expression(
                "mid() needs two points or one shape.\nUse: mid(A, B) or mid(L)",
            ));
        }
    };
    Ok(value.with_attachments(split.graph.map(|g| g.name), &split.style))
}

fn length(args: CallArgs) -> GeoResult<Value> {
    let split = args.split()?;
    let len = match sole_shape(&split)? {
        Value::Line(s) | Value::Vector(s) => s.geom.length(),
        Value::Line3d(s) | Value::Vector3d(s) => s.geom.length(),
        Value::Polygon(p) => p.geom.windows(2).map(|w| w[0].distance(w[1])).sum(),
        other => {
            return Err(GeoError::expression(format!(
                "len() needs a line, vector or polygon.\nGot a {}.",
                other.tag()
            )));
        }
    };
    Ok(Value::Number(len))
}

fn distance(args: CallArgs) -> GeoResult<Value> {
    let split = args.split()?;
    let values: Vec<&Value> = split.rest.iter().map(|a| a.value.settled()).collect();
    match values.as_slice() {
        [Value::Point(a), Value::Point(b)] => Ok(Value::Number(a.geom.distance(b.geom))),
        [Value::Point3d(a), Value::Point3d(b)] => Ok(Value::Number(a.geom.distance(b.geom))),
        _ => Err(GeoError::expression(
            "dist() needs two points.\nUse: dist(A, B)",
        )),
    }
}

/// Proportional extension: `xl(L, p)`, `xl(L, s, e)`, `xl(A, B, p)` or `xl(A, B, s, e)`.
fn extend(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let values: Vec<&Value> = split.rest.iter().map(|a| a.value.settled()).collect();
    let (shape, start, end, props) = match values.as_slice() {
        [Value::Line(s) | Value::Vector(s), props @ ..] => {
            (s.with_geom(()), s.geom.start, s.geom.end, props)
        }
        [Value::Point(a), Value::Point(b), props @ ..] => {
            (a.with_geom(()), a.geom, b.geom, props)
        }
        _ => {
            return Err(GeoError::expression(
                "xl() needs a line or two points.\nUse: xl(L, proportion)",
            ));
        }
    };
    let props: Vec<f64> = props
        .iter()
        .map(|v| v.as_number())
        .collect::<Option<_>>()
        .ok_or_else(|| GeoError::expression("xl() proportions must be numbers."))?;
    let (s, e) = match props.as_slice() {
        [p] => extend_by_proportion(start, end, 0.0, *p),
        [sp, ep] => extend_by_proportion(start, end, *sp, *ep),
        other => return Err(split.wrong_count(other.len(), "1 or 2 proportions")),
    };
    let value = Value::Line(shape.with_geom(Segment::new(s, e)));
    Ok(value.with_attachments(split.graph.map(|g| g.name), &split.style))
}

/// Apply `f` to every vertex of a 2D shape.
fn map_points(value: &Value, f: impl Fn(Point) -> Point) -> Option<Value> {
    let mapped = match value.settled() {
        Value::Point(s) => Value::Point(s.with_geom(f(s.geom))),
        Value::Line(s) => Value::Line(s.with_geom(Segment::new(f(s.geom.start), f(s.geom.end)))),
        Value::Vector(s) => {
            Value::Vector(s.with_geom(Segment::new(f(s.geom.start), f(s.geom.end))))
        }
        Value::Polygon(s) => Value::Polygon(s.with_geom(s.geom.iter().copied().map(&f).collect())),
        Value::Label(s) => {
            let mut geom = s.geom.clone();
            geom.at = f(geom.at);
            Value::Label(s.with_geom(geom))
        }
        _ => return None,
    };
    Some(mapped)
}

/// `translate(shape, dx, dy)`: a moved copy animated from the original's position.
fn translate(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let [shape, dx, dy] = split.rest.as_slice() else {
        return Err(split.wrong_count(split.rest.len(), "3: shape, dx, dy"));
    };
    let (Some(dx), Some(dy)) = (dx.value.as_number(), dy.value.as_number()) else {
        return Err(GeoError::expression(
            "translate() offsets must be numbers.\nUse: translate(S, dx, dy)",
        ));
    };
    let offset = Vec2::new(dx, dy);
    let Some(moved) = map_points(&shape.value, |p| p + offset) else {
        return Err(GeoError::expression(format!(
            "translate() cannot move a {}.",
            shape.value.tag()
        )));
    };
    Ok(Value::Shift(ShiftValue {
        moved: Box::new(moved.with_attachments(split.graph.map(|g| g.name), &split.style)),
        source: shape.binding.clone(),
        offset,
    }))
}

/// `rotate(shape, degrees[, pivot])`. Points turn about the origin, segments about their start
/// and polygons about their centroid unless a pivot is given.
fn rotate(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let (shape, degrees, pivot) = match split.rest.as_slice() {
        [s, d] => (&s.value, &d.value, None),
        [s, d, p] => match p.value.settled() {
            Value::Point(p) => (&s.value, &d.value, Some(p.geom)),
            _ => {
                return Err(GeoError::expression(
                    "rotate() pivot must be a point.\nUse: rotate(S, deg, P)",
                ));
            }
        },
        other => return Err(split.wrong_count(other.len(), "shape, degrees[, pivot]")),
    };
    let Some(degrees) = degrees.as_number() else {
        return Err(GeoError::expression("rotate() angle must be a number."));
    };
    let pivot = match (pivot, shape.settled()) {
        (Some(p), _) => p,
        (None, Value::Line(s) | Value::Vector(s)) => s.geom.start,
        (None, Value::Polygon(p)) => centroid(&p.geom).unwrap_or(Point::ORIGIN),
        (None, _) => Point::ORIGIN,
    };
    let Some(rotated) = map_points(shape, |p| rotate_about(p, pivot, degrees)) else {
        return Err(GeoError::expression(format!(
            "rotate() cannot turn a {}.",
            shape.tag()
        )));
    };
    Ok(rotated.with_attachments(split.graph.map(|g| g.name), &split.style))
}

/// `scale(shape, k)` about the origin, or about a center given as a point or `cx, cy`.
fn scale(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let [shape, factor, center @ ..] = split.rest.as_slice() else {
        return Err(split.wrong_count(split.rest.len(), "shape, factor[, center]"));
    };
    let Some(k) = factor.value.as_number().filter(|k| k.is_finite()) else {
        return Err(GeoError::expression(
            "scale() factor must be a number.\nUse: scale(S, 2)",
        ));
    };
    let center = match center {
        [] => Point::ORIGIN,
        [c] => match c.value.settled() {
            Value::Point(p) => p.geom,
            other => {
                return Err(GeoError::expression(format!(
                    "scale() center must be a point.\nGot a {}.",
                    other.tag()
                )));
            }
        },
        [x, y] => match (x.value.as_number(), y.value.as_number()) {
            (Some(x), Some(y)) => Point::new(x, y),
            _ => {
                return Err(GeoError::expression(
                    "scale() center must be numbers.\nUse: scale(S, k, cx, cy)",
                ));
            }
        },
        other => return Err(split.wrong_count(other.len() + 2, "shape, factor[, center]")),
    };
    let Some(scaled) = map_points(&shape.value, |p| scale_about(p, center, k)) else {
        return Err(GeoError::expression(format!(
            "scale() cannot resize a {}.",
            shape.value.tag()
        )));
    };
    Ok(scaled.with_attachments(split.graph.map(|g| g.name), &split.style))
}

/// Segment of a line or vector argument, rejecting zero-length ones.
fn mirror_line(name: &str, value: &Value) -> GeoResult<Segment> {
    match value.settled() {
        Value::Line(s) | Value::Vector(s) if s.geom.length() > EPSILON => Ok(s.geom),
        Value::Line(_) | Value::Vector(_) => Err(GeoError::expression(format!(
            "{name}() line has zero length.\nUse two distinct points."
        ))),
        other => Err(GeoError::expression(format!(
            "{name}() needs a line first.\nGot a {}.",
            other.tag()
        ))),
    }
}

/// `reflect(L, shape)`: the mirror image of `shape` across the infinite line through `L`.
fn reflect(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let [line, shape] = split.rest.as_slice() else {
        return Err(split.wrong_count(split.rest.len(), "2: line, shape"));
    };
    let axis = mirror_line(&split.name, &line.value)?;
    let mirrored = map_points(&shape.value, |p| {
        reflect_across(p, axis.start, axis.end).unwrap_or(p)
    });
    let Some(mirrored) = mirrored else {
        return Err(GeoError::expression(format!(
            "reflect() cannot mirror a {}.",
            shape.value.tag()
        )));
    };
    Ok(mirrored.with_attachments(split.graph.map(|g| g.name), &split.style))
}

/// `project(L, P)`: foot of the perpendicular from `P` onto the line through `L`.
fn project(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let [line, point] = split.rest.as_slice() else {
        return Err(split.wrong_count(split.rest.len(), "2: line, point"));
    };
    let axis = mirror_line(&split.name, &line.value)?;
    let Value::Point(p) = point.value.settled() else {
        return Err(GeoError::expression(format!(
            "project() needs a point second.\nGot a {}.",
            point.value.tag()
        )));
    };
    let foot = project_onto(p.geom, axis.start, axis.end).unwrap_or(p.geom);
    Ok(Value::Point(split.shape(foot)))
}

/// `intersect(a, b[, n])`: the `n`th (1-based) crossing of two lines, or of a line and a
/// polygon. Lines are treated as infinite.
fn intersect(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let (a, b, nth) = match split.rest.as_slice() {
        [a, b] => (a, b, 1.0),
        [a, b, n] => match n.value.as_number() {
            Some(n) if n >= 1.0 && n.fract() == 0.0 => (a, b, n),
            _ => {
                return Err(GeoError::expression(
                    "intersect() index must be a whole number from 1.",
                ));
            }
        },
        other => return Err(split.wrong_count(other.len(), "2 shapes and an optional index")),
    };
    let hits = match (a.value.settled(), b.value.settled()) {
        (Value::Line(s) | Value::Vector(s), Value::Line(t) | Value::Vector(t)) => {
            line_line_intersection(s.geom.start, s.geom.end, t.geom.start, t.geom.end)
                .into_iter()
                .collect()
        }
        (Value::Line(s) | Value::Vector(s), Value::Polygon(p))
        | (Value::Polygon(p), Value::Line(s) | Value::Vector(s)) => {
            line_polygon_intersections(s.geom.start, s.geom.end, &p.geom)
        }
        (x, y) => {
            return Err(GeoError::expression(format!(
                "intersect() cannot cross a {} with a {}.\nUse lines and polygons.",
                x.tag(),
                y.tag()
            )));
        }
    };
    let Some(hit) = hits.get(nth as usize - 1).copied() else {
        return Err(GeoError::expression(format!(
            "intersect() found {} crossings.\nNo crossing number {}.",
            hits.len(),
            format_number(nth)
        )));
    };
    Ok(Value::Point(split.shape(hit)))
}

fn reverse(args: CallArgs) -> GeoResult<Value> {
    let split = args.split()?;
    let value = match sole_shape(&split)? {
        Value::Vector(s) => Value::Vector(s.with_geom(s.geom.reversed())),
        Value::Line(s) => Value::Line(s.with_geom(s.geom.reversed())),
        Value::Vector3d(s) => Value::Vector3d(s.with_geom(s.geom.reversed())),
        Value::Line3d(s) => Value::Line3d(s.with_geom(s.geom.reversed())),
        other => {
            return Err(GeoError::expression(format!(
                "rev() needs a vector.\nGot a {}.",
                other.tag()
            )));
        }
    };
    Ok(value.with_attachments(split.graph.map(|g| g.name), &split.style))
}

/// `shift(v, P)`: vector `v` relocated to start at `P`.
fn shift(args: CallArgs) -> GeoResult<Value> {
    let split = split2(args)?;
    let [v, at] = split.rest.as_slice() else {
        return Err(split.wrong_count(split.rest.len(), "2: vector, point"));
    };
    let (Value::Vector(s), Value::Point(p)) = (v.value.settled(), at.value.settled()) else {
        return Err(GeoError::expression(
            "shift() needs a vector and a point.\nUse: shift(v, P)",
        ));
    };
    let offset = p.geom - s.geom.start;
    let moved = Value::Vector(s.with_geom(Segment::new(p.geom, s.geom.end + offset)));
    Ok(Value::Shift(ShiftValue {
        moved: Box::new(moved.with_attachments(split.graph.map(|g| g.name), &split.style)),
        source: v.binding.clone(),
        offset,
    }))
}

#[cfg(test)]
#[path = "../../../tests/unit/expression/builtins/plane.rs"]
mod tests;
