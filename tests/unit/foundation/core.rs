use super::*;

#[test]
fn statement_ids_order_like_indices() {
    let a = StatementId::from_index(1);
    let b = StatementId::from_index(4);
    assert!(a < b);
    assert_eq!(b.index(), 4);
    assert_eq!(a.to_string(), "#1");
}

#[test]
fn cross_product_follows_right_hand_rule() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(y.cross(x), Vec3::new(0.0, 0.0, -1.0));
}

#[test]
fn zero_vector_has_no_direction() {
    assert!(Vec3::ZERO.normalized().is_none());
    let n = Vec3::new(0.0, 3.0, 4.0).normalized().unwrap();
    assert!((n.length() - 1.0).abs() < 1e-12);
}

#[test]
fn point_arithmetic_goes_through_vectors() {
    let a = Point3::new(1.0, 2.0, 3.0);
    let b = Point3::new(4.0, 6.0, 3.0);
    assert_eq!(b - a, Vec3::new(3.0, 4.0, 0.0));
    assert_eq!(a + (b - a), b);
    assert_eq!(a.distance(b), 5.0);
}
