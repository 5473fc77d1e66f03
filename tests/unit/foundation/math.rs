use super::*;

#[test]
fn positive_extension_lengthens_the_end() {
    let (s, e) = extend_by_length(Point::new(0.0, 0.0), Point::new(3.0, 4.0), 5.0);
    assert_eq!(s, Point::new(0.0, 0.0));
    assert!(approx_eq(e.x, 6.0));
    assert!(approx_eq(e.y, 8.0));
}

#[test]
fn negative_extension_moves_the_start_back() {
    let (s, e) = extend_by_length(Point::new(0.0, 0.0), Point::new(3.0, 4.0), -5.0);
    assert!(approx_eq(s.x, -3.0));
    assert!(approx_eq(s.y, -4.0));
    assert_eq!(e, Point::new(3.0, 4.0));
}

#[test]
fn degenerate_segment_is_not_extended() {
    let p = Point::new(1.0, 1.0);
    assert_eq!(extend_by_length(p, p, 3.0), (p, p));
}

#[test]
fn proportional_extension_scales_from_start() {
    let (s, e) = extend_by_proportion(Point::new(0.0, 0.0), Point::new(2.0, 0.0), -0.5, 1.5);
    assert_eq!(s, Point::new(-1.0, 0.0));
    assert_eq!(e, Point::new(3.0, 0.0));
}

#[test]
fn quarter_turn_about_pivot() {
    let p = rotate_about(Point::new(2.0, 1.0), Point::new(1.0, 1.0), 90.0);
    assert!(approx_eq(p.x, 1.0));
    assert!(approx_eq(p.y, 2.0));
}

#[test]
fn centroid_ignores_closing_vertex() {
    let ring = [
        Point::new(0.0, 0.0),
        Point::new(3.0, 0.0),
        Point::new(0.0, 3.0),
        Point::new(0.0, 0.0),
    ];
    assert_eq!(centroid(&ring), Some(Point::new(1.0, 1.0)));
    assert_eq!(centroid(&[]), None);
}

#[test]
fn numbers_format_compactly() {
    assert_eq!(format_number(3.0), "3");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(2.5), "2.5");
    assert_eq!(format_number(1.0 / 3.0), "0.3333");
}

#[test]
fn format_number_keeps_large_integers_exact() {
    assert_eq!(format_number(1e20), "100000000000000000000");
    assert_eq!(format_number(-1e20), "-100000000000000000000");
    assert_eq!(format_number(9_007_199_254_740_991.0), "9007199254740991");
}

#[test]
fn projection_and_reflection_use_the_infinite_line() {
    let (a, b) = (Point::new(0.0, 0.0), Point::new(2.0, 0.0));
    assert_eq!(project_onto(Point::new(5.0, 3.0), a, b), Some(Point::new(5.0, 0.0)));
    assert_eq!(reflect_across(Point::new(5.0, 3.0), a, b), Some(Point::new(5.0, -3.0)));
    assert_eq!(project_onto(Point::new(1.0, 1.0), a, a), None);

    let diag = reflect_across(Point::new(1.0, 0.0), a, Point::new(1.0, 1.0)).unwrap();
    assert!(approx_eq(diag.x, 0.0) && approx_eq(diag.y, 1.0));
}

#[test]
fn lines_meet_unless_parallel() {
    let p = line_line_intersection(
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 4.0),
        Point::new(1.0, 3.0),
    )
    .unwrap();
    assert!(approx_eq(p.x, 2.0) && approx_eq(p.y, 2.0));
    assert!(
        line_line_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        )
        .is_none()
    );
}

#[test]
fn line_crosses_a_square_twice() {
    let square = [
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
        Point::new(0.0, 0.0),
    ];
    let hits = line_polygon_intersections(Point::new(-1.0, 1.0), Point::new(0.0, 1.0), &square);
    assert_eq!(hits, vec![Point::new(2.0, 1.0), Point::new(0.0, 1.0)]);

    // Through a corner the shared vertex is reported once.
    let corner = line_polygon_intersections(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &square);
    assert_eq!(corner.len(), 2);

    let miss = line_polygon_intersections(Point::new(0.0, 5.0), Point::new(1.0, 5.0), &square);
    assert!(miss.is_empty());
}

#[test]
fn scaling_is_about_the_center() {
    let p = scale_about(Point::new(3.0, 1.0), Point::new(1.0, 1.0), 2.0);
    assert_eq!(p, Point::new(5.0, 1.0));
}
