use crate::{
    expression::value::{Segment, Segment3, Value},
    foundation::core::{Point, Point3, Vec2},
    foundation::error::{GeoError, GeoResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "^" => Some(Self::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "subtract",
            Self::Mul => "multiply",
            Self::Div => "divide",
            Self::Pow => "raise",
        }
    }
}

fn divide_by_zero() -> GeoError {
    GeoError::expression("Cannot divide by zero.\nCheck your divisor.")
}

fn unsupported(op: BinaryOp, lhs: &Value, rhs: &Value) -> GeoError {
    GeoError::expression(format!(
        "Cannot {} {} and {}.\nOperand types do not match.",
        op.verb(),
        lhs.tag(),
        rhs.tag()
    ))
}

/// Apply a binary operator. Shifted operands take part with the value they stand for.
pub fn apply(op: BinaryOp, lhs: &Value, rhs: &Value) -> GeoResult<Value> {
    let (lhs, rhs) = (lhs.settled(), rhs.settled());
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => numbers(op, *a, *b).map(Value::Number),
        (Value::Point(p), Value::Number(n)) => {
            point_scalar(op, p.geom, *n, false).map(|g| Value::Point(p.with_geom(g)))
        }
        (Value::Number(n), Value::Point(p)) => {
            point_scalar(op, p.geom, *n, true).map(|g| Value::Point(p.with_geom(g)))
        }
        (Value::Point(a), Value::Point(b)) => match op {
            BinaryOp::Add => Ok(Value::Point(a.with_geom(a.geom + b.geom.to_vec2()))),
            BinaryOp::Sub => Ok(Value::Point(a.with_geom(a.geom - b.geom.to_vec2()))),
            BinaryOp::Mul => Err(GeoError::expression(
                "Cannot multiply point by point.\nUse a number instead.",
            )),
            BinaryOp::Div => Err(GeoError::expression(
                "Cannot divide point by point.\nUse a number instead.",
            )),
            BinaryOp::Pow => Err(GeoError::expression(
                "Power not supported for points.\nUse multiply instead.",
            )),
        },
        (Value::Point3d(a), Value::Point3d(b)) => match op {
            BinaryOp::Add => Ok(Value::Point3d(a.with_geom(a.geom + b.geom.to_vec3()))),
            BinaryOp::Sub => Ok(Value::Point3d(a.with_geom(a.geom + -b.geom.to_vec3()))),
            _ => Err(unsupported(op, lhs, rhs)),
        },
        (Value::Point3d(p), Value::Number(n)) => {
            point3_scalar(op, p.geom, *n).map(|g| Value::Point3d(p.with_geom(g)))
        }
        (Value::Number(n), Value::Point3d(p)) if op == BinaryOp::Mul => {
            point3_scalar(op, p.geom, *n).map(|g| Value::Point3d(p.with_geom(g)))
        }
        (Value::Vector(a), Value::Vector(b)) => {
            vectors(op, &a.geom, &b.geom, lhs, rhs).map(|g| Value::Vector(a.with_geom(g)))
        }
        (Value::Vector(v), Value::Number(n)) => {
            vector_scalar(op, &v.geom, *n, lhs, rhs).map(|g| Value::Vector(v.with_geom(g)))
        }
        (Value::Number(n), Value::Vector(v)) if op == BinaryOp::Mul => {
            vector_scalar(op, &v.geom, *n, lhs, rhs).map(|g| Value::Vector(v.with_geom(g)))
        }
        (Value::Vector3d(a), Value::Vector3d(b)) => {
            vectors3(op, &a.geom, &b.geom, lhs, rhs).map(|g| Value::Vector3d(a.with_geom(g)))
        }
        (Value::Vector3d(v), Value::Number(n)) => {
            vector3_scalar(op, &v.geom, *n, lhs, rhs).map(|g| Value::Vector3d(v.with_geom(g)))
        }
        (Value::Number(n), Value::Vector3d(v)) if op == BinaryOp::Mul => {
            vector3_scalar(op, &v.geom, *n, lhs, rhs).map(|g| Value::Vector3d(v.with_geom(g)))
        }
        _ => Err(unsupported(op, lhs, rhs)),
    }
}

fn numbers(op: BinaryOp, a: f64, b: f64) -> GeoResult<f64> {
    Ok(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(divide_by_zero());
            }
            a / b
        }
        BinaryOp::Pow => a.powf(b),
    })
}

/// Scalar broadcast over a point. `scalar_first` is set for `n op p`.
fn point_scalar(op: BinaryOp, p: Point, n: f64, scalar_first: bool) -> GeoResult<Point> {
    let each = |f: &dyn Fn(f64) -> f64| Point::new(f(p.x), f(p.y));
    match (op, scalar_first) {
        (BinaryOp::Add, _) => Ok(each(&|c| c + n)),
        (BinaryOp::Sub, false) => Ok(each(&|c| c - n)),
        (BinaryOp::Sub, true) => Ok(each(&|c| n - c)),
        (BinaryOp::Mul, _) => Ok(each(&|c| c * n)),
        (BinaryOp::Div, false) => {
            if n == 0.0 {
                return Err(divide_by_zero());
            }
            Ok(each(&|c| c / n))
        }
        (BinaryOp::Div, true) => Err(GeoError::expression(
            "Cannot divide by a point.\nDivide the point instead.",
        )),
        (BinaryOp::Pow, _) => Err(GeoError::expression(
            "Power not supported for points.\nUse multiply instead.",
        )),
    }
}

fn point3_scalar(op: BinaryOp, p: Point3, n: f64) -> GeoResult<Point3> {
    match op {
        BinaryOp::Mul => Ok((p.to_vec3() * n).to_point3()),
        BinaryOp::Div => {
            if n == 0.0 {
                return Err(divide_by_zero());
            }
            Ok((p.to_vec3() * (1.0 / n)).to_point3())
        }
        _ => Err(GeoError::expression(
            "3D points only scale by numbers.\nUse multiply or divide.",
        )),
    }
}

fn vectors(op: BinaryOp, a: &Segment, b: &Segment, lv: &Value, rv: &Value) -> GeoResult<Segment> {
    let dir: Vec2 = match op {
        BinaryOp::Add => a.direction() + b.direction(),
        BinaryOp::Sub => a.direction() - b.direction(),
        _ => return Err(unsupported(op, lv, rv)),
    };
    Ok(Segment::new(a.start, a.start + dir))
}

fn vector_scalar(
    op: BinaryOp,
    v: &Segment,
    n: f64,
    lv: &Value,
    rv: &Value,
) -> GeoResult<Segment> {
    let factor = match op {
        BinaryOp::Mul => n,
        BinaryOp::Div => {
            if n == 0.0 {
                return Err(divide_by_zero());
            }
            1.0 / n
        }
        _ => return Err(unsupported(op, lv, rv)),
    };
    if factor == -1.0 {
        return Ok(v.reversed());
    }
    Ok(Segment::new(v.start, v.start + v.direction() * factor))
}

fn vectors3(
    op: BinaryOp,
    a: &Segment3,
    b: &Segment3,
    lv: &Value,
    rv: &Value,
) -> GeoResult<Segment3> {
    let dir = match op {
        BinaryOp::Add => a.direction() + b.direction(),
        BinaryOp::Sub => a.direction() - b.direction(),
        _ => return Err(unsupported(op, lv, rv)),
    };
    Ok(Segment3::new(a.start, a.start + dir))
}

fn vector3_scalar(
    op: BinaryOp,
    v: &Segment3,
    n: f64,
    lv: &Value,
    rv: &Value,
) -> GeoResult<Segment3> {
    let factor = match op {
        BinaryOp::Mul => n,
        BinaryOp::Div => {
            if n == 0.0 {
                return Err(divide_by_zero());
            }
            1.0 / n
        }
        _ => return Err(unsupported(op, lv, rv)),
    };
    if factor == -1.0 {
        return Ok(v.reversed());
    }
    Ok(Segment3::new(v.start, v.start + v.direction() * factor))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/algebra.rs"]
mod tests;
