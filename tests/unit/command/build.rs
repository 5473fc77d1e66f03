use super::*;
use crate::expression::value::{GraphGeom, VisibilityOp};
use crate::foundation::core::Rect;

#[test]
fn values_without_presentation_build_nothing() {
    assert!(behavior_for(&Value::Number(1.0)).is_none());
    assert!(behavior_for(&Value::Text("x".into())).is_none());
    assert!(behavior_for(&Value::Style(Style::color("red"))).is_none());
}

#[test]
fn behaviours_match_the_value() {
    let kind = |v: &Value| behavior_for(v).map(|b| b.kind());
    assert_eq!(kind(&Value::point(0.0, 0.0)), Some("point"));
    let g = GraphGeom {
        bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
    };
    assert_eq!(kind(&Value::Graph3d(g)), Some("g3d"));
    let hide = Value::Visibility(VisibilityOp {
        target: "A".into(),
        visible: false,
    });
    assert_eq!(kind(&hide), Some("hide"));
    assert!(!behavior_for(&Value::Graph2d(g)).unwrap().can_play());
}

#[test]
fn command_carries_label_style_and_duration() {
    let playback = PlaybackConfig {
        creation_secs: 1.5,
        ..PlaybackConfig::default()
    };
    let expression = Expression::assign("P", Expression::number(0.0));
    let cmd = command_for(
        &expression,
        &Value::point(1.0, 1.0),
        StatementId(3),
        3,
        Style::color("red"),
        &playback,
    )
    .unwrap();
    assert_eq!(cmd.label(), Some("P"));
    assert_eq!(cmd.tag(), crate::expression::value::TypeTag::Point);
    assert_eq!(cmd.style().color.as_deref(), Some("red"));
    assert_eq!(cmd.duration_secs(), 1.5);
    assert_eq!(cmd.index(), 3);
}

#[test]
fn bare_references_present_the_bound_value() {
    let expression = Expression::reference("P");
    let cmd = command_for(
        &expression,
        &Value::point(1.0, 1.0),
        StatementId(1),
        1,
        Style::default(),
        &PlaybackConfig::default(),
    )
    .unwrap();
    assert_eq!(cmd.kind(), "point");
    assert!(cmd.label().is_none());
}
