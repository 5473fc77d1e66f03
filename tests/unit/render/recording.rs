use super::*;
use crate::foundation::core::Point;

fn dot(x: f64, y: f64) -> Primitive {
    Primitive::Point {
        at: Point::new(x, y),
    }
}

#[test]
fn roots_are_created_once_per_dimension() {
    let mut d = RecordingDiagram::new();
    let a = d.root(Dimension::Two).unwrap();
    let b = d.root(Dimension::Two).unwrap();
    let c = d.root(Dimension::Three).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(d.container_count(), 2);
    assert_eq!(d.container(a), Some((Dimension::Two, true)));
}

#[test]
fn shapes_start_hidden_until_shown() {
    let mut d = RecordingDiagram::new();
    let root = d.root(Dimension::Two).unwrap();
    let s = d.draw(root, &dot(1.0, 2.0), &Style::color("red")).unwrap();
    assert!(!d.shape(s).unwrap().visible);
    assert!(d.visible_shapes().is_empty());
    d.show(s).unwrap();
    assert_eq!(d.visible_shapes().len(), 1);
    d.hide(s).unwrap();
    assert!(d.visible_shapes().is_empty());
}

#[test]
fn created_containers_are_hidden() {
    let mut d = RecordingDiagram::new();
    let g = d
        .create_container(Dimension::Two, Rect::new(0.0, 0.0, 4.0, 3.0))
        .unwrap();
    assert_eq!(d.container(g), Some((Dimension::Two, false)));
    d.show(g).unwrap();
    assert_eq!(d.container(g), Some((Dimension::Two, true)));
    let DrawEvent::Container { bounds, root, .. } = &d.events()[0] else {
        panic!("expected a container event");
    };
    assert_eq!(*bounds, [0.0, 0.0, 4.0, 3.0]);
    assert!(!root);
}

#[test]
fn destroying_a_container_drops_its_shapes() {
    let mut d = RecordingDiagram::new();
    let g = d
        .create_container(Dimension::Two, Rect::new(0.0, 0.0, 1.0, 1.0))
        .unwrap();
    let s = d.draw(g, &dot(0.0, 0.0), &Style::default()).unwrap();
    d.destroy(g).unwrap();
    assert!(d.shape(s).is_none());
    assert_eq!(d.container_count(), 0);
    assert!(d.destroy(s).is_err());
}

#[test]
fn unknown_handles_fail() {
    let mut d = RecordingDiagram::new();
    assert!(d.draw(ShapeHandle(7), &dot(0.0, 0.0), &Style::default()).is_err());
    assert!(d.show(ShapeHandle(7)).is_err());
    assert!(pollster::block_on(d.play_creation(ShapeHandle(7), 1.0)).is_err());
}

#[test]
fn playback_is_logged_and_reveals() {
    let mut d = RecordingDiagram::new();
    let root = d.root(Dimension::Two).unwrap();
    let s = d.draw(root, &dot(0.0, 0.0), &Style::default()).unwrap();
    pollster::block_on(d.play_creation(s, 0.5)).unwrap();
    assert!(d.shape(s).unwrap().visible);
    pollster::block_on(d.play_move(s, Vec2::new(-1.0, 0.0), 0.5)).unwrap();
    pollster::block_on(d.next_frame());
    assert_eq!(d.frames(), 1);
    let tail: Vec<_> = d.take_events().into_iter().skip(2).collect();
    assert_eq!(
        tail,
        vec![
            DrawEvent::Creation {
                handle: s,
                duration: 0.5
            },
            DrawEvent::Move {
                handle: s,
                from: [-1.0, 0.0],
                duration: 0.5
            },
            DrawEvent::Frame,
        ]
    );
    assert!(d.events().is_empty());
}

#[test]
fn clear_resets_the_scene() {
    let mut d = RecordingDiagram::new();
    let root = d.root(Dimension::Two).unwrap();
    d.draw(root, &dot(0.0, 0.0), &Style::default()).unwrap();
    d.clear();
    assert_eq!(d.shapes().count(), 0);
    assert_eq!(d.container_count(), 0);
    assert_eq!(d.events().last(), Some(&DrawEvent::Clear));
}

#[test]
fn events_serialize_with_a_tag() {
    let json = serde_json::to_value(DrawEvent::Show {
        handle: ShapeHandle(3),
    })
    .unwrap();
    assert_eq!(json, serde_json::json!({"event": "show", "handle": 3}));
}
