//! 3D geometry constructors.

use crate::{
    expression::args::{Arg, CallArgs, Split, point3_at},
    expression::interpreter::FunctionTable,
    expression::value::{Label3Geom, Plane, Segment3, Value},
    foundation::core::{Dimension, Point3, Vec3},
    foundation::error::{GeoError, GeoResult},
};

pub(crate) fn register(table: &mut FunctionTable) {
    table.register_call("point3d", point3d);
    table.register_call("line3d", line3d);
    table.register_call("vec3d", vector3d);
    table.register_call("vector3d", vector3d);
    table.register_call("plane3d", plane3d);
    table.register_call("label3d", label3d);
    table.register_call("translate3d", translate3d);
    table.register_call("rotate3d", rotate3d);
    table.register_call("scale3d", scale3d);
}

fn split3(args: CallArgs) -> GeoResult<Split> {
    let split = args.split()?;
    split.require_dimension(Dimension::Three)?;
    Ok(split)
}

fn point3d(args: CallArgs) -> GeoResult<Value> {
    let split = split3(args)?;
    let c = split.coords3()?;
    if c.len() != 3 {
        return Err(split.wrong_count(c.len(), "exactly 3: x, y, z"));
    }
    Ok(Value::Point3d(split.shape(point3_at(&c, 0))))
}

fn line3d(args: CallArgs) -> GeoResult<Value> {
    let split = split3(args)?;
    let c = split.coords3()?;
    if c.len() != 6 {
        return Err(split.wrong_count(c.len(), "6: two 3D points"));
    }
    Ok(Value::Line3d(
        split.shape(Segment3::new(point3_at(&c, 0), point3_at(&c, 3))),
    ))
}

/// `vec3d(x1, y1, z1, x2, y2, z2)`, or `vec3d(x, y, z)` from the origin.
fn vector3d(args: CallArgs) -> GeoResult<Value> {
    let split = split3(args)?;
    let c = split.coords3()?;
    let seg = match c.len() {
        3 => Segment3::new(Point3::ORIGIN, point3_at(&c, 0)),
        6 => Segment3::new(point3_at(&c, 0), point3_at(&c, 3)),
        n => return Err(split.wrong_count(n, "6: two 3D points")),
    };
    Ok(Value::Vector3d(split.shape(seg)))
}

fn unit_normal(n: Vec3) -> GeoResult<Vec3> {
    n.normalized().ok_or_else(|| {
        GeoError::expression("Plane normal is zero.\nPoints may be collinear.")
    })
}

/// Plane from a point and a normal vector, three points, four coefficients `ax+by+cz+d=0`,
/// or two spanning vectors and a point.
fn plane3d(args: CallArgs) -> GeoResult<Value> {
    let split = split3(args)?;
    let values: Vec<&Value> = split.rest.iter().map(|a| a.value.settled()).collect();
    let plane = match values.as_slice() {
        [Value::Point3d(p), Value::Vector3d(v)] => Plane {
            center: p.geom,
            normal: unit_normal(v.geom.direction())?,
        },
        [Value::Point3d(a), Value::Point3d(b), Value::Point3d(c)] => {
            let (a, b, c) = (a.geom, b.geom, c.geom);
            let center = ((a.to_vec3() + b.to_vec3() + c.to_vec3()) * (1.0 / 3.0)).to_point3();
            Plane {
                center,
                normal: unit_normal((b - a).cross(c - a))?,
            }
        }
        [Value::Vector3d(u), Value::Vector3d(v), Value::Point3d(p)] => Plane {
            center: p.geom,
            normal: unit_normal(u.geom.direction().cross(v.geom.direction()))?,
        },
        _ => {
            let c = split.numbers()?;
            let [a, b, cc, d] = c.as_slice() else {
                return Err(split.wrong_count(
                    c.len(),
                    "point + normal, 3 points, or a, b, c, d",
                ));
            };
            let n = Vec3::new(*a, *b, *cc);
            let len2 = n.length_squared();
            if len2 <= f64::EPSILON {
                return Err(GeoError::expression(
                    "Plane normal is zero.\nCheck a, b and c.",
                ));
            }
            Plane {
                center: (n * (-d / len2)).to_point3(),
                normal: unit_normal(n)?,
            }
        }
    };
    Ok(Value::Plane3d(split.shape(plane)))
}

fn label3d(args: CallArgs) -> GeoResult<Value> {
    let mut split = split3(args)?;
    let Some(text) = split.take_text() else {
        return Err(GeoError::expression(
            "label3d() needs text.\nUse: label3d(P, \"text\")",
        ));
    };
    let c = split.coords3()?;
    if c.len() != 3 {
        return Err(split.wrong_count(c.len(), "a 3D position"));
    }
    Ok(Value::Label3d(split.shape(Label3Geom {
        at: point3_at(&c, 0),
        text,
    })))
}

/// Apply `at` to every position of a 3D shape and `dir` to plane normals.
fn map_points3(
    value: &Value,
    at: impl Fn(Point3) -> Point3,
    dir: impl Fn(Vec3) -> Vec3,
) -> Option<Value> {
    let mapped = match value.settled() {
        Value::Point3d(s) => Value::Point3d(s.with_geom(at(s.geom))),
        Value::Line3d(s) => {
            Value::Line3d(s.with_geom(Segment3::new(at(s.geom.start), at(s.geom.end))))
        }
        Value::Vector3d(s) => {
            Value::Vector3d(s.with_geom(Segment3::new(at(s.geom.start), at(s.geom.end))))
        }
        Value::Plane3d(s) => Value::Plane3d(s.with_geom(Plane {
            center: at(s.geom.center),
            normal: dir(s.geom.normal),
        })),
        Value::Label3d(s) => {
            let mut geom = s.geom.clone();
            geom.at = at(geom.at);
            Value::Label3d(s.with_geom(geom))
        }
        _ => return None,
    };
    Some(mapped)
}

/// A trailing `x, y, z` triple or a single 3D vector.
fn triple(split: &Split, rest: &[Arg], what: &str) -> GeoResult<Vec3> {
    match rest {
        [v] => match v.value.settled() {
            Value::Vector3d(s) => Ok(s.geom.direction()),
            Value::Point3d(p) => Ok(p.geom.to_vec3()),
            other => Err(GeoError::expression(format!(
                "{}() {what} cannot be a {}.",
                split.name,
                other.tag()
            ))),
        },
        [x, y, z] => match (x.value.as_number(), y.value.as_number(), z.value.as_number()) {
            (Some(x), Some(y), Some(z)) => Ok(Vec3::new(x, y, z)),
            _ => Err(GeoError::expression(format!(
                "{}() {what} must be 3 numbers.",
                split.name
            ))),
        },
        other => Err(split.wrong_count(other.len(), &format!("a {what}: x, y, z or a vector"))),
    }
}

fn unmovable(split: &Split, value: &Value) -> GeoError {
    GeoError::expression(format!(
        "{}() cannot transform a {}.\nUse a 3D shape.",
        split.name,
        value.tag()
    ))
}

/// `translate3d(shape, dx, dy, dz)` or `translate3d(shape, v)`.
fn translate3d(args: CallArgs) -> GeoResult<Value> {
    let split = split3(args)?;
    let [shape, delta @ ..] = split.rest.as_slice() else {
        return Err(split.wrong_count(0, "shape and offset"));
    };
    let d = triple(&split, delta, "offset")?;
    let moved = map_points3(&shape.value, |p| p + d, |n| n)
        .ok_or_else(|| unmovable(&split, &shape.value))?;
    Ok(moved.with_attachments(split.graph.map(|g| g.name), &split.style))
}

/// Rotate `v` by `degrees` about the unit axis `k` (Rodrigues).
fn rotate_vec(v: Vec3, k: Vec3, degrees: f64) -> Vec3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    v * cos + k.cross(v) * sin + k * (k.dot(v) * (1.0 - cos))
}

/// `rotate3d(shape, degrees, ax, ay, az)` or `rotate3d(shape, degrees, axis)`; the axis passes
/// through the origin.
fn rotate3d(args: CallArgs) -> GeoResult<Value> {
    let split = split3(args)?;
    let [shape, degrees, axis @ ..] = split.rest.as_slice() else {
        return Err(split.wrong_count(split.rest.len(), "shape, degrees, axis"));
    };
    let Some(degrees) = degrees.value.as_number() else {
        return Err(GeoError::expression("rotate3d() angle must be a number."));
    };
    let Some(k) = triple(&split, axis, "axis")?.normalized() else {
        return Err(GeoError::expression(
            "rotate3d() axis is zero.\nUse a non-zero axis.",
        ));
    };
    let turned = map_points3(
        &shape.value,
        |p| rotate_vec(p.to_vec3(), k, degrees).to_point3(),
        |n| rotate_vec(n, k, degrees),
    )
    .ok_or_else(|| unmovable(&split, &shape.value))?;
    Ok(turned.with_attachments(split.graph.map(|g| g.name), &split.style))
}

/// `scale3d(shape, k)` about the origin, or about a center given as a point or `cx, cy, cz`.
fn scale3d(args: CallArgs) -> GeoResult<Value> {
    let split = split3(args)?;
    let [shape, factor, center @ ..] = split.rest.as_slice() else {
        return Err(split.wrong_count(split.rest.len(), "shape, factor[, center]"));
    };
    let Some(k) = factor.value.as_number().filter(|k| k.is_finite()) else {
        return Err(GeoError::expression("scale3d() factor must be a number."));
    };
    let c = match center {
        [] => Point3::ORIGIN,
        rest => triple(&split, rest, "center")?.to_point3(),
    };
    let scaled = map_points3(&shape.value, |p| c + (p - c) * k, |n| n)
        .ok_or_else(|| unmovable(&split, &shape.value))?;
    Ok(scaled.with_attachments(split.graph.map(|g| g.name), &split.style))
}

#[cfg(test)]
#[path = "../../../tests/unit/expression/builtins/space.rs"]
mod tests;
