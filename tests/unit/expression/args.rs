use super::*;
use crate::expression::value::GraphGeom;
use crate::foundation::core::Rect;

fn graph(dim: Dimension) -> Value {
    let g = GraphGeom {
        bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
    };
    match dim {
        Dimension::Two => Value::Graph2d(g),
        Dimension::Three => Value::Graph3d(g),
    }
}

fn named(name: &str, value: Value) -> Arg {
    Arg {
        value,
        binding: Some(name.into()),
    }
}

#[test]
fn split_separates_graph_style_and_rest() {
    let args = CallArgs::new(
        "point",
        vec![
            named("G", graph(Dimension::Two)),
            Arg::new(Value::Style(Style::color("red"))),
            Arg::new(Value::Number(1.0)),
            Arg::new(Value::Style(Style {
                stroke_width: Some(2.0),
                ..Style::default()
            })),
            Arg::new(Value::Number(2.0)),
        ],
    );
    let split = args.split().unwrap();
    assert_eq!(
        split.graph,
        Some(GraphArg {
            name: "G".into(),
            dimension: Dimension::Two
        })
    );
    assert_eq!(split.style.color.as_deref(), Some("red"));
    assert_eq!(split.style.stroke_width, Some(2.0));
    assert_eq!(split.coords2().unwrap(), vec![1.0, 2.0]);
}

#[test]
fn later_style_wins() {
    let split = CallArgs::new(
        "point",
        vec![
            Arg::new(Value::Style(Style::color("red"))),
            Arg::new(Value::Style(Style::color("blue"))),
        ],
    )
    .split()
    .unwrap();
    assert_eq!(split.style.color.as_deref(), Some("blue"));
}

#[test]
fn graph_must_be_a_single_variable() {
    let err = CallArgs::new("point", vec![Arg::new(graph(Dimension::Two))])
        .split()
        .unwrap_err();
    assert!(err.to_string().contains("needs a graph variable"));

    let err = CallArgs::new(
        "point",
        vec![
            named("G", graph(Dimension::Two)),
            named("H", graph(Dimension::Two)),
        ],
    )
    .split()
    .unwrap_err();
    assert!(err.to_string().contains("two graphs"));
}

#[test]
fn coordinates_flatten_shapes() {
    let split = CallArgs::new(
        "line",
        vec![
            Arg::new(Value::point(1.0, 2.0)),
            Arg::new(Value::point(3.0, 4.0)),
        ],
    )
    .split()
    .unwrap();
    assert_eq!(split.coords2().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    assert!(split.coords3().is_err());
}

#[test]
fn take_text_removes_first_text() {
    let mut split = CallArgs::new(
        "label",
        vec![
            Arg::new(Value::Number(1.0)),
            Arg::new(Value::Text("a".into())),
            Arg::new(Value::Text("b".into())),
        ],
    )
    .split()
    .unwrap();
    assert_eq!(split.take_text().as_deref(), Some("a"));
    assert_eq!(split.rest.len(), 2);
    assert_eq!(split.cell_texts(), vec!["1", "b"]);
}

#[test]
fn numbers_reject_other_types() {
    let split = CallArgs::new("g2d", vec![Arg::new(Value::point(0.0, 0.0))])
        .split()
        .unwrap();
    let err = split.numbers().unwrap_err();
    assert!(err.to_string().contains("cannot use a point"));
}
