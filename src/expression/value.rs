use std::fmt;

use smallvec::SmallVec;

use crate::{
    change::plan::ChangePlan,
    foundation::core::{Dimension, Point, Point3, Rect, Vec2, Vec3},
    foundation::math::format_number,
    options::style::Style,
};

/// Flat numeric representation of a value. Six inline slots cover every fixed-arity type.
pub type Atoms = SmallVec<[f64; 6]>;

/// Discriminant of [`Value`], used for dispatch, style lookup and strategy selection.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Number,
    Text,
    Style,
    Point,
    Line,
    Vector,
    Shift,
    Polygon,
    Label,
    Table,
    Point3d,
    Line3d,
    Vector3d,
    Plane3d,
    Label3d,
    G2d,
    G3d,
    Visibility,
    Restyle,
    Change,
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
            Self::Style => "style",
            Self::Point => "point",
            Self::Line => "line",
            Self::Vector => "vector",
            Self::Shift => "shift",
            Self::Polygon => "polygon",
            Self::Label => "label",
            Self::Table => "table",
            Self::Point3d => "point3d",
            Self::Line3d => "line3d",
            Self::Vector3d => "vector3d",
            Self::Plane3d => "plane3d",
            Self::Label3d => "label3d",
            Self::G2d => "g2d",
            Self::G3d => "g3d",
            Self::Visibility => "visibility",
            Self::Restyle => "restyle",
            Self::Change => "change",
        }
    }

    /// Fixed length of [`Value::atomic_values`] for this type, if it has one.
    pub fn arity(self) -> Option<usize> {
        match self {
            Self::Number => Some(1),
            Self::Point | Self::Label | Self::Table => Some(2),
            Self::Point3d | Self::Label3d => Some(3),
            Self::Line | Self::Vector | Self::G2d | Self::G3d => Some(4),
            Self::Line3d | Self::Vector3d | Self::Plane3d => Some(6),
            Self::Text | Self::Style | Self::Visibility | Self::Restyle => Some(0),
            Self::Shift | Self::Polygon | Self::Change => None,
        }
    }

    pub fn dimension(self) -> Option<Dimension> {
        match self {
            Self::Point
            | Self::Line
            | Self::Vector
            | Self::Shift
            | Self::Polygon
            | Self::Label
            | Self::Table
            | Self::G2d => Some(Dimension::Two),
            Self::Point3d
            | Self::Line3d
            | Self::Vector3d
            | Self::Plane3d
            | Self::Label3d
            | Self::G3d => Some(Dimension::Three),
            Self::Number
            | Self::Text
            | Self::Style
            | Self::Visibility
            | Self::Restyle
            | Self::Change => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Directed 2D segment, used by lines and vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().hypot()
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

/// Directed 3D segment, used by 3D lines and vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment3 {
    pub start: Point3,
    pub end: Point3,
}

impl Segment3 {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

/// Plane through `center` with unit `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub center: Point3,
    pub normal: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelGeom {
    pub at: Point,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label3Geom {
    pub at: Point3,
    pub text: String,
}

/// Grid of text cells anchored at its top-left corner. Cells are row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct TableGeom {
    pub at: Point,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<String>,
}

/// Placement of a graph container in its parent diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphGeom {
    pub bounds: Rect,
}

/// Geometry plus the attachments every drawable value carries through algebra and changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape<G> {
    pub geom: G,
    /// Variable name of the graph container the shape is drawn into; `None` means the root.
    pub graph: Option<String>,
    /// Inline style arguments from the constructor call.
    pub style: Style,
}

impl<G> Shape<G> {
    pub fn new(geom: G) -> Self {
        Self {
            geom,
            graph: None,
            style: Style::default(),
        }
    }

    /// A shape with new geometry and the same container and inline style.
    pub fn with_geom<H>(&self, geom: H) -> Shape<H> {
        Shape {
            geom,
            graph: self.graph.clone(),
            style: self.style.clone(),
        }
    }
}

/// A value drawn at a displaced position, animated from where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct ShiftValue {
    pub moved: Box<Value>,
    /// Variable that was moved, when the operand was a variable.
    pub source: Option<String>,
    pub offset: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityOp {
    pub target: String,
    pub visible: bool,
}

/// Style layered onto a shape drawn by an earlier statement.
#[derive(Clone, Debug, PartialEq)]
pub struct RestyleOp {
    pub target: String,
    pub style: Style,
}

/// A fully resolved expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Style(Style),
    Point(Shape<Point>),
    Line(Shape<Segment>),
    Vector(Shape<Segment>),
    Shift(ShiftValue),
    Polygon(Shape<Vec<Point>>),
    Label(Shape<LabelGeom>),
    Table(Shape<TableGeom>),
    Point3d(Shape<Point3>),
    Line3d(Shape<Segment3>),
    Vector3d(Shape<Segment3>),
    Plane3d(Shape<Plane>),
    Label3d(Shape<Label3Geom>),
    Graph2d(GraphGeom),
    Graph3d(GraphGeom),
    Visibility(VisibilityOp),
    Restyle(RestyleOp),
    Change(Box<ChangePlan>),
}

impl Value {
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point(Shape::new(Point::new(x, y)))
    }

    pub fn line(start: Point, end: Point) -> Self {
        Self::Line(Shape::new(Segment::new(start, end)))
    }

    pub fn vector(start: Point, end: Point) -> Self {
        Self::Vector(Shape::new(Segment::new(start, end)))
    }

    pub fn point3d(x: f64, y: f64, z: f64) -> Self {
        Self::Point3d(Shape::new(Point3::new(x, y, z)))
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Number(_) => TypeTag::Number,
            Self::Text(_) => TypeTag::Text,
            Self::Style(_) => TypeTag::Style,
            Self::Point(_) => TypeTag::Point,
            Self::Line(_) => TypeTag::Line,
            Self::Vector(_) => TypeTag::Vector,
            Self::Shift(_) => TypeTag::Shift,
            Self::Polygon(_) => TypeTag::Polygon,
            Self::Label(_) => TypeTag::Label,
            Self::Table(_) => TypeTag::Table,
            Self::Point3d(_) => TypeTag::Point3d,
            Self::Line3d(_) => TypeTag::Line3d,
            Self::Vector3d(_) => TypeTag::Vector3d,
            Self::Plane3d(_) => TypeTag::Plane3d,
            Self::Label3d(_) => TypeTag::Label3d,
            Self::Graph2d(_) => TypeTag::G2d,
            Self::Graph3d(_) => TypeTag::G3d,
            Self::Visibility(_) => TypeTag::Visibility,
            Self::Restyle(_) => TypeTag::Restyle,
            Self::Change(_) => TypeTag::Change,
        }
    }

    /// The value a shift stands for; every other value is returned as is.
    pub fn settled(&self) -> &Value {
        match self {
            Self::Shift(s) => s.moved.settled(),
            other => other,
        }
    }

    /// Ordered flat numbers that fully describe the value's geometry.
    pub fn atomic_values(&self) -> Atoms {
        let mut out = Atoms::new();
        match self {
            Self::Number(v) => out.push(*v),
            Self::Text(_) | Self::Style(_) | Self::Visibility(_) | Self::Restyle(_) => {}
            Self::Point(p) => out.extend([p.geom.x, p.geom.y]),
            Self::Line(s) | Self::Vector(s) => out.extend(segment_atoms(&s.geom)),
            Self::Shift(s) => return s.moved.atomic_values(),
            Self::Polygon(p) => {
                for v in &p.geom {
                    out.extend([v.x, v.y]);
                }
            }
            Self::Label(l) => out.extend([l.geom.at.x, l.geom.at.y]),
            Self::Table(t) => out.extend([t.geom.at.x, t.geom.at.y]),
            Self::Point3d(p) => out.extend([p.geom.x, p.geom.y, p.geom.z]),
            Self::Line3d(s) | Self::Vector3d(s) => out.extend(segment3_atoms(&s.geom)),
            Self::Plane3d(p) => {
                let (c, n) = (p.geom.center, p.geom.normal);
                out.extend([c.x, c.y, c.z, n.x, n.y, n.z]);
            }
            Self::Label3d(l) => out.extend([l.geom.at.x, l.geom.at.y, l.geom.at.z]),
            Self::Graph2d(g) | Self::Graph3d(g) => {
                let r = g.bounds;
                out.extend([r.x0, r.y0, r.width(), r.height()]);
            }
            Self::Change(plan) => out.extend(plan.to.iter().copied()),
        }
        out
    }

    /// Short user-facing rendering, e.g. `(3,4)` for a point.
    pub fn friendly(&self) -> String {
        match self {
            Self::Number(v) => format_number(*v),
            Self::Text(t) => t.clone(),
            Self::Point(p) => fmt_point(p.geom),
            Self::Line(s) | Self::Vector(s) => {
                format!("{}->{}", fmt_point(s.geom.start), fmt_point(s.geom.end))
            }
            Self::Shift(s) => s.moved.friendly(),
            Self::Polygon(p) => {
                let parts: Vec<String> = p.geom.iter().copied().map(fmt_point).collect();
                format!("[{}]", parts.join(", "))
            }
            Self::Label(l) => format!("\"{}\" at {}", l.geom.text, fmt_point(l.geom.at)),
            Self::Point3d(p) => fmt_point3(p.geom),
            Self::Line3d(s) | Self::Vector3d(s) => {
                format!("{}->{}", fmt_point3(s.geom.start), fmt_point3(s.geom.end))
            }
            Self::Label3d(l) => format!("\"{}\" at {}", l.geom.text, fmt_point3(l.geom.at)),
            other => other.tag().name().to_string(),
        }
    }

    /// Whether the command built from this value has a creation animation.
    pub fn can_play(&self) -> bool {
        !matches!(
            self,
            Self::Number(_) | Self::Text(_) | Self::Style(_) | Self::Graph2d(_) | Self::Graph3d(_)
        )
    }

    /// Values that become a primitive on a diagram.
    pub fn is_drawable(&self) -> bool {
        matches!(
            self.settled(),
            Self::Point(_)
                | Self::Line(_)
                | Self::Vector(_)
                | Self::Polygon(_)
                | Self::Label(_)
                | Self::Table(_)
                | Self::Point3d(_)
                | Self::Line3d(_)
                | Self::Vector3d(_)
                | Self::Plane3d(_)
                | Self::Label3d(_)
        )
    }

    /// Container variable a drawable value belongs to.
    pub fn graph(&self) -> Option<&str> {
        match self.settled() {
            Self::Point(s) => s.graph.as_deref(),
            Self::Line(s) | Self::Vector(s) => s.graph.as_deref(),
            Self::Polygon(s) => s.graph.as_deref(),
            Self::Label(s) => s.graph.as_deref(),
            Self::Table(s) => s.graph.as_deref(),
            Self::Point3d(s) => s.graph.as_deref(),
            Self::Line3d(s) | Self::Vector3d(s) => s.graph.as_deref(),
            Self::Plane3d(s) => s.graph.as_deref(),
            Self::Label3d(s) => s.graph.as_deref(),
            _ => None,
        }
    }

    /// Inline style carried by a drawable value.
    pub fn inline_style(&self) -> Option<&Style> {
        match self.settled() {
            Self::Point(s) => Some(&s.style),
            Self::Line(s) | Self::Vector(s) => Some(&s.style),
            Self::Polygon(s) => Some(&s.style),
            Self::Label(s) => Some(&s.style),
            Self::Table(s) => Some(&s.style),
            Self::Point3d(s) => Some(&s.style),
            Self::Line3d(s) | Self::Vector3d(s) => Some(&s.style),
            Self::Plane3d(s) => Some(&s.style),
            Self::Label3d(s) => Some(&s.style),
            _ => None,
        }
    }

    /// Put a drawable value into `graph` (when given) and layer `style` over its inline style.
    pub fn with_attachments(mut self, graph: Option<String>, style: &Style) -> Value {
        if let Some((slot, inline)) = self.attachments_mut() {
            if graph.is_some() {
                *slot = graph;
            }
            *inline = inline.merged(style);
        }
        self
    }

    fn attachments_mut(&mut self) -> Option<(&mut Option<String>, &mut Style)> {
        match self {
            Self::Point(s) => Some((&mut s.graph, &mut s.style)),
            Self::Line(s) | Self::Vector(s) => Some((&mut s.graph, &mut s.style)),
            Self::Polygon(s) => Some((&mut s.graph, &mut s.style)),
            Self::Label(s) => Some((&mut s.graph, &mut s.style)),
            Self::Table(s) => Some((&mut s.graph, &mut s.style)),
            Self::Point3d(s) => Some((&mut s.graph, &mut s.style)),
            Self::Line3d(s) | Self::Vector3d(s) => Some((&mut s.graph, &mut s.style)),
            Self::Plane3d(s) => Some((&mut s.graph, &mut s.style)),
            Self::Label3d(s) => Some((&mut s.graph, &mut s.style)),
            Self::Shift(s) => s.moved.attachments_mut(),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }
}

fn segment_atoms(s: &Segment) -> [f64; 4] {
    [s.start.x, s.start.y, s.end.x, s.end.y]
}

fn segment3_atoms(s: &Segment3) -> [f64; 6] {
    [
        s.start.x, s.start.y, s.start.z, s.end.x, s.end.y, s.end.z,
    ]
}

fn fmt_point(p: Point) -> String {
    format!("({},{})", format_number(p.x), format_number(p.y))
}

fn fmt_point3(p: Point3) -> String {
    format!(
        "({},{},{})",
        format_number(p.x),
        format_number(p.y),
        format_number(p.z)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/expression/value.rs"]
mod tests;
