use super::*;

fn vector(x1: f64, y1: f64, x2: f64, y2: f64) -> Value {
    Value::vector(Point::new(x1, y1), Point::new(x2, y2))
}

#[test]
fn vector_sum_keeps_lhs_start() {
    let sum = apply(
        BinaryOp::Add,
        &vector(0.0, 0.0, 3.0, 0.0),
        &vector(0.0, 0.0, 0.0, 4.0),
    )
    .unwrap();
    assert_eq!(sum, vector(0.0, 0.0, 3.0, 4.0));
}

#[test]
fn vector_difference_uses_directions() {
    let diff = apply(
        BinaryOp::Sub,
        &vector(1.0, 1.0, 4.0, 5.0),
        &vector(7.0, 7.0, 8.0, 7.0),
    )
    .unwrap();
    assert_eq!(diff, vector(1.0, 1.0, 3.0, 5.0));
}

#[test]
fn minus_one_reverses_vector() {
    let v = vector(1.0, 2.0, 4.0, 6.0);
    let r = apply(BinaryOp::Mul, &v, &Value::Number(-1.0)).unwrap();
    assert_eq!(r, vector(4.0, 6.0, 1.0, 2.0));
    let r2 = apply(BinaryOp::Mul, &Value::Number(-1.0), &v).unwrap();
    assert_eq!(r, r2);
}

#[test]
fn scalar_scales_direction_from_start() {
    let v = vector(1.0, 1.0, 2.0, 3.0);
    assert_eq!(
        apply(BinaryOp::Mul, &v, &Value::Number(2.0)).unwrap(),
        vector(1.0, 1.0, 3.0, 5.0)
    );
    assert_eq!(
        apply(BinaryOp::Div, &v, &Value::Number(0.5)).unwrap(),
        vector(1.0, 1.0, 3.0, 5.0)
    );
}

#[test]
fn dividing_by_zero_is_rejected() {
    let v = vector(0.0, 0.0, 1.0, 1.0);
    assert!(apply(BinaryOp::Div, &v, &Value::Number(0.0)).is_err());
    assert!(apply(BinaryOp::Div, &Value::Number(1.0), &Value::Number(0.0)).is_err());
    assert!(apply(BinaryOp::Div, &Value::point(1.0, 1.0), &Value::Number(0.0)).is_err());
}

#[test]
fn scalars_broadcast_over_points() {
    let p = Value::point(3.0, 4.0);
    assert_eq!(
        apply(BinaryOp::Add, &Value::Number(1.0), &p).unwrap(),
        Value::point(4.0, 5.0)
    );
    assert_eq!(
        apply(BinaryOp::Sub, &Value::Number(10.0), &p).unwrap(),
        Value::point(7.0, 6.0)
    );
    assert_eq!(
        apply(BinaryOp::Mul, &p, &Value::Number(2.0)).unwrap(),
        Value::point(6.0, 8.0)
    );
}

#[test]
fn point_products_and_powers_are_errors() {
    let p = Value::point(1.0, 2.0);
    assert!(apply(BinaryOp::Mul, &p, &p).is_err());
    assert!(apply(BinaryOp::Div, &p, &p).is_err());
    assert!(apply(BinaryOp::Pow, &p, &Value::Number(2.0)).is_err());
    assert_eq!(
        apply(BinaryOp::Add, &p, &p).unwrap(),
        Value::point(2.0, 4.0)
    );
}

#[test]
fn cross_arity_and_dimension_are_rejected() {
    let p2 = Value::point(1.0, 2.0);
    let p3 = Value::point3d(1.0, 2.0, 3.0);
    let v2 = vector(0.0, 0.0, 1.0, 0.0);
    assert!(apply(BinaryOp::Add, &p2, &p3).is_err());
    assert!(apply(BinaryOp::Add, &v2, &p2).is_err());
    assert!(apply(BinaryOp::Add, &Value::Text("a".into()), &Value::Number(1.0)).is_err());
    assert!(apply(BinaryOp::Pow, &v2, &Value::Number(2.0)).is_err());
}

#[test]
fn numbers_follow_arithmetic() {
    assert_eq!(
        apply(BinaryOp::Pow, &Value::Number(2.0), &Value::Number(10.0)).unwrap(),
        Value::Number(1024.0)
    );
    assert_eq!(BinaryOp::from_symbol("^"), Some(BinaryOp::Pow));
    assert_eq!(BinaryOp::from_symbol("%"), None);
}
