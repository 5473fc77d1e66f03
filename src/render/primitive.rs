use crate::{
    expression::value::Value,
    foundation::core::{Point, Point3, Vec3},
};

/// Backend-facing description of one drawable shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Point {
        at: Point,
    },
    Segment {
        start: Point,
        end: Point,
        arrow: bool,
    },
    Polygon {
        vertices: Vec<Point>,
    },
    Text {
        at: Point,
        text: String,
    },
    Table {
        at: Point,
        rows: usize,
        cols: usize,
        cells: Vec<String>,
    },
    Point3 {
        at: Point3,
    },
    Segment3 {
        start: Point3,
        end: Point3,
        arrow: bool,
    },
    Plane {
        center: Point3,
        normal: Vec3,
    },
    Text3 {
        at: Point3,
        text: String,
    },
}

impl Primitive {
    /// Primitive for a drawable value; `None` for values that draw nothing.
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(match value.settled() {
            Value::Point(p) => Self::Point { at: p.geom },
            Value::Line(s) => Self::Segment {
                start: s.geom.start,
                end: s.geom.end,
                arrow: false,
            },
            Value::Vector(s) => Self::Segment {
                start: s.geom.start,
                end: s.geom.end,
                arrow: true,
            },
            Value::Polygon(p) => Self::Polygon {
                vertices: p.geom.clone(),
            },
            Value::Label(l) => Self::Text {
                at: l.geom.at,
                text: l.geom.text.clone(),
            },
            Value::Table(t) => Self::Table {
                at: t.geom.at,
                rows: t.geom.rows,
                cols: t.geom.cols,
                cells: t.geom.cells.clone(),
            },
            Value::Point3d(p) => Self::Point3 { at: p.geom },
            Value::Line3d(s) => Self::Segment3 {
                start: s.geom.start,
                end: s.geom.end,
                arrow: false,
            },
            Value::Vector3d(s) => Self::Segment3 {
                start: s.geom.start,
                end: s.geom.end,
                arrow: true,
            },
            Value::Plane3d(p) => Self::Plane {
                center: p.geom.center,
                normal: p.geom.normal,
            },
            Value::Label3d(l) => Self::Text3 {
                at: l.geom.at,
                text: l.geom.text.clone(),
            },
            _ => return None,
        })
    }
}
