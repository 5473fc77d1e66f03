use super::*;
use crate::expression::value::Shape;
use crate::options::style::Style;

#[test]
fn standard_registry_covers_changeable_types() {
    let reg = StrategyRegistry::standard();
    for tag in [
        TypeTag::Number,
        TypeTag::Point,
        TypeTag::Line,
        TypeTag::Vector,
        TypeTag::Point3d,
        TypeTag::Line3d,
        TypeTag::Vector3d,
    ] {
        assert!(reg.supports(tag), "{tag}");
        assert_eq!(reg.get(tag).map(|s| s.tag()), Some(tag));
    }
    assert!(!reg.supports(TypeTag::Polygon));
    assert!(!reg.supports(TypeTag::Text));
    assert!(StrategyRegistry::empty().get(TypeTag::Number).is_none());
}

#[test]
fn validate_rejects_type_mismatch() {
    let err = PointStrategy
        .validate(&Value::point(0.0, 0.0), &Value::Number(1.0))
        .unwrap_err();
    assert!(err.to_string().contains("Cannot change point into number"));
    assert!(
        NumberStrategy
            .validate(&Value::Number(1.0), &Value::Number(2.0))
            .is_ok()
    );
}

#[test]
fn validate_rejects_wrong_strategy() {
    assert!(
        LineStrategy
            .validate(&Value::point(0.0, 0.0), &Value::point(1.0, 1.0))
            .is_err()
    );
}

#[test]
fn line_round_trips_through_values() {
    let source = Value::line(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
    let values = LineStrategy.from_values(&source);
    assert_eq!(values, vec![0.0, 0.0, 3.0, 4.0]);
    assert_eq!(LineStrategy.reconstruct(&values, &source).unwrap(), source);
}

#[test]
fn reconstruct_keeps_graph_and_style() {
    let source = Value::Point(Shape {
        geom: Point::new(1.0, 1.0),
        graph: Some("G".into()),
        style: Style::color("green"),
    });
    let Value::Point(p) = PointStrategy.reconstruct(&[5.0, 6.0], &source).unwrap() else {
        panic!("expected a point");
    };
    assert_eq!(p.geom, Point::new(5.0, 6.0));
    assert_eq!(p.graph.as_deref(), Some("G"));
    assert_eq!(p.style.color.as_deref(), Some("green"));
}

#[test]
fn reconstruct_checks_length() {
    let source = Value::point3d(0.0, 0.0, 0.0);
    let err = Point3dStrategy.reconstruct(&[1.0, 2.0], &source).unwrap_err();
    assert!(err.to_string().contains("needs 3 values, got 2"));
}

#[test]
fn update_context_rebinds_the_variable() {
    let mut ctx = ExpressionContext::new();
    ctx.add_reference("V", Value::vector(Point::ORIGIN, Point::new(1.0, 0.0)));
    let source = ctx.peek("V").cloned().unwrap();
    let v = VectorStrategy
        .update_context(&mut ctx, "V", &[0.0, 0.0, 0.0, 2.0], &source)
        .unwrap();
    assert_eq!(v, Value::vector(Point::ORIGIN, Point::new(0.0, 2.0)));
    assert_eq!(ctx.peek("V"), Some(&v));
}
