use crate::foundation::core::{Point, Vec2};

pub(crate) const EPSILON: f64 = 1e-9;

pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Lengthen a segment by an absolute distance.
///
/// A positive `ext` moves the end away from the start, a negative one moves the start backward.
/// Degenerate segments have no direction and are returned unchanged.
pub(crate) fn extend_by_length(start: Point, end: Point, ext: f64) -> (Point, Point) {
    let d = end - start;
    let len = d.hypot();
    if len <= EPSILON || ext == 0.0 {
        return (start, end);
    }
    let unit = d / len;
    if ext > 0.0 {
        (start, end + unit * ext)
    } else {
        (start + unit * ext, end)
    }
}

/// Segment spanning `[start_prop, end_prop]` of the parametrized line through `start` and `end`.
pub(crate) fn extend_by_proportion(
    start: Point,
    end: Point,
    start_prop: f64,
    end_prop: f64,
) -> (Point, Point) {
    let d = end - start;
    (start + d * start_prop, start + d * end_prop)
}

pub(crate) fn rotate_about(p: Point, pivot: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let v = p - pivot;
    pivot + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

pub(crate) fn scale_about(p: Point, center: Point, factor: f64) -> Point {
    center + (p - center) * factor
}

fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Foot of the perpendicular from `p` onto the infinite line through `a` and `b`.
pub(crate) fn project_onto(p: Point, a: Point, b: Point) -> Option<Point> {
    let d = b - a;
    let len2 = d.hypot2();
    if len2 <= EPSILON {
        return None;
    }
    Some(a + d * ((p - a).dot(d) / len2))
}

/// Mirror image of `p` across the infinite line through `a` and `b`.
pub(crate) fn reflect_across(p: Point, a: Point, b: Point) -> Option<Point> {
    let foot = project_onto(p, a, b)?;
    Some(foot + (foot - p))
}

/// Parameters `(t, u)` where `a1 + t(a2 - a1)` meets `b1 + u(b2 - b1)`; `None` when parallel.
fn crossing(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<(f64, f64)> {
    let (da, db) = (a2 - a1, b2 - b1);
    let denom = cross(da, db);
    if denom.abs() <= EPSILON {
        return None;
    }
    let w = b1 - a1;
    Some((cross(w, db) / denom, cross(w, da) / denom))
}

/// Meeting point of two infinite lines.
pub(crate) fn line_line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let (t, _) = crossing(a1, a2, b1, b2)?;
    Some(a1 + (a2 - a1) * t)
}

/// Where the infinite line through `a1`, `a2` crosses the closed segment `s1`..`s2`.
pub(crate) fn line_segment_intersection(
    a1: Point,
    a2: Point,
    s1: Point,
    s2: Point,
) -> Option<Point> {
    let (t, u) = crossing(a1, a2, s1, s2)?;
    (-EPSILON..=1.0 + EPSILON)
        .contains(&u)
        .then(|| a1 + (a2 - a1) * t)
}

/// Crossings of an infinite line with the edges of a ring, in edge order without duplicates.
pub(crate) fn line_polygon_intersections(a1: Point, a2: Point, ring: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();
    for edge in ring.windows(2) {
        let Some(p) = line_segment_intersection(a1, a2, edge[0], edge[1]) else {
            continue;
        };
        if !out.iter().any(|q| (q.x - p.x).abs() < 1e-8 && (q.y - p.y).abs() < 1e-8) {
            out.push(p);
        }
    }
    out
}

/// Vertex average of a closed or open ring; the closing duplicate vertex is ignored.
pub(crate) fn centroid(points: &[Point]) -> Option<Point> {
    let ring = match points {
        [first, .., last] if first == last && points.len() > 1 => &points[..points.len() - 1],
        other => other,
    };
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Largest magnitude below which every integral `f64` converts to `i64` exactly.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Compact human-facing rendering of a number: integers drop the fraction, other values keep
/// at most four decimals.
pub(crate) fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let rounded = (v * 10_000.0).round() / 10_000.0;
    if rounded.fract() == 0.0 {
        if rounded.abs() < EXACT_INT_LIMIT {
            // Avoid "-0".
            return format!("{}", rounded as i64);
        }
        return format!("{rounded}");
    }
    let s = format!("{rounded:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
