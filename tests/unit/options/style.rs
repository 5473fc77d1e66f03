use super::*;

#[test]
fn merged_prefers_the_overlay() {
    let base = Style {
        color: Some("red".into()),
        stroke_width: Some(2.0),
        ..Style::default()
    };
    let over = Style {
        color: Some("blue".into()),
        fill_opacity: Some(0.3),
        ..Style::default()
    };
    let m = base.merged(&over);
    assert_eq!(m.color.as_deref(), Some("blue"));
    assert_eq!(m.stroke_width, Some(2.0));
    assert_eq!(m.fill_opacity, Some(0.3));
}

#[test]
fn empty_overlay_is_identity() {
    let base = Style::color("red");
    assert_eq!(base.merged(&Style::default()), base);
    assert!(Style::default().is_empty());
    assert!(!base.is_empty());
}

#[test]
fn serializes_only_set_fields() {
    let json = serde_json::to_string(&Style::color("red")).unwrap();
    assert_eq!(json, r#"{"color":"red"}"#);
}

#[test]
fn rejects_unknown_fields() {
    assert!(serde_json::from_str::<Style>(r#"{"colour":"red"}"#).is_err());
    let s: Style = serde_json::from_str(r#"{"radius":3}"#).unwrap();
    assert_eq!(s.radius, Some(3.0));
}
