use super::*;
use crate::expression::args::Arg;
use crate::expression::value::TypeTag;

fn n(v: f64) -> Arg {
    Arg::new(Value::Number(v))
}

fn t(s: &str) -> Arg {
    Arg::new(Value::Text(s.to_string()))
}

#[test]
fn label_accepts_point_or_coordinates() {
    let a = label(CallArgs::new("label", vec![Arg::new(Value::point(1.0, 2.0)), t("A")])).unwrap();
    let b = label(CallArgs::new("label", vec![t("A"), n(1.0), n(2.0)])).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.tag(), TypeTag::Label);
    assert!(label(CallArgs::new("label", vec![n(1.0), n(2.0)])).is_err());
}

#[test]
fn table_pads_missing_cells() {
    let v = table_call(CallArgs::new(
        "table",
        vec![n(0.0), n(0.0), n(2.0), n(2.0), t("a"), n(1.5)],
    ))
    .unwrap();
    let Value::Table(s) = &v else {
        panic!("expected a table");
    };
    assert_eq!((s.geom.rows, s.geom.cols), (2, 2));
    assert_eq!(s.geom.cells, vec!["a", "1.5", "", ""]);
}

#[test]
fn table_rejects_overflow_and_fractional_sizes() {
    let err = table_call(CallArgs::new(
        "table",
        vec![n(0.0), n(0.0), n(1.0), n(1.0), t("a"), t("b")],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("holds 1"));

    let err = table_call(CallArgs::new("table", vec![n(0.0), n(0.0), n(1.5), n(1.0)])).unwrap_err();
    assert!(err.to_string().contains("whole number"));
}

#[test]
fn style_calls_build_partial_styles() {
    assert_eq!(
        color(CallArgs::new("c", vec![t("green")])).unwrap(),
        Value::Style(Style::color("green"))
    );
    let Value::Style(s) = stroke_width(CallArgs::new("s", vec![n(3.0)])).unwrap() else {
        panic!("expected a style");
    };
    assert_eq!(s.stroke_width, Some(3.0));
    let Value::Style(s) = fill_opacity(CallArgs::new("fo", vec![n(0.25)])).unwrap() else {
        panic!("expected a style");
    };
    assert_eq!(s.fill_opacity, Some(0.25));
}

#[test]
fn style_calls_validate_their_argument() {
    assert!(stroke_width(CallArgs::new("s", vec![t("wide")])).is_err());
    assert!(stroke_opacity(CallArgs::new("so", vec![n(1.5)])).is_err());
    assert!(color(CallArgs::new("c", vec![])).is_err());
    assert!(font_size(CallArgs::new("f", vec![n(1.0), n(2.0)])).is_err());
}

#[test]
fn table_rejects_oversized_dimensions() {
    let err = table_call(CallArgs::new("table", vec![n(0.0), n(0.0), n(1e10), n(1e10)])).unwrap_err();
    assert!(err.to_string().contains("too large"));

    let err = table_call(CallArgs::new("table", vec![n(0.0), n(0.0), n(101.0), n(100.0)])).unwrap_err();
    assert!(err.to_string().contains("too large"));

    let ok = table_call(CallArgs::new("table", vec![n(0.0), n(0.0), n(100.0), n(100.0)])).unwrap();
    let Value::Table(s) = &ok else {
        panic!("expected a table");
    };
    assert_eq!(s.geom.cells.len(), 10_000);
}
