use crate::{
    expression::value::{Shape, TypeTag, Value},
    foundation::core::{Dimension, Point, Point3},
    foundation::error::{GeoError, GeoResult},
    foundation::math::format_number,
    options::style::Style,
};

/// One resolved call argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    pub value: Value,
    /// Variable name when the argument was written as a bare reference.
    pub binding: Option<String>,
}

impl Arg {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            binding: None,
        }
    }
}

/// Resolved arguments of a constructor call.
#[derive(Clone, Debug)]
pub struct CallArgs {
    name: String,
    args: Vec<Arg>,
}

/// Container argument of a call.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphArg {
    pub name: String,
    pub dimension: Dimension,
}

/// Arguments classified by type: container, inline style, and everything else in order.
#[derive(Clone, Debug)]
pub struct Split {
    pub name: String,
    pub graph: Option<GraphArg>,
    pub style: Style,
    pub rest: Vec<Arg>,
}

impl CallArgs {
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_args(self) -> Vec<Arg> {
        self.args
    }

    /// Classify every argument by its tag. Style arguments may appear anywhere and are layered
    /// left to right; at most one container is accepted and it must be a variable.
    pub fn split(self) -> GeoResult<Split> {
        let mut graph = None;
        let mut style = Style::default();
        let mut rest = Vec::with_capacity(self.args.len());
        for arg in self.args {
            match &arg.value {
                Value::Style(s) => style = style.merged(s),
                Value::Graph2d(_) | Value::Graph3d(_) => {
                    let dimension = match arg.value.tag() {
                        TypeTag::G3d => Dimension::Three,
                        _ => Dimension::Two,
                    };
                    let Some(name) = arg.binding else {
                        return Err(GeoError::expression(format!(
                            "{}() needs a graph variable.\nAssign the graph first.",
                            self.name
                        )));
                    };
                    if graph.is_some() {
                        return Err(GeoError::expression(format!(
                            "{}() got two graphs.\nPass a single graph.",
                            self.name
                        )));
                    }
                    graph = Some(GraphArg { name, dimension });
                }
                _ => rest.push(arg),
            }
        }
        Ok(Split {
            name: self.name,
            graph,
            style,
            rest,
        })
    }
}

impl Split {
    /// Shape carrying this call's container and inline style.
    pub fn shape<G>(&self, geom: G) -> Shape<G> {
        Shape {
            geom,
            graph: self.graph.as_ref().map(|g| g.name.clone()),
            style: self.style.clone(),
        }
    }

    /// Reject a container of the wrong dimensionality.
    pub fn require_dimension(&self, dimension: Dimension) -> GeoResult<()> {
        match &self.graph {
            Some(g) if g.dimension != dimension => Err(GeoError::expression(format!(
                "'{}' is the wrong kind of graph.\n{}() needs a {} graph.",
                g.name,
                self.name,
                match dimension {
                    Dimension::Two => "g2d",
                    Dimension::Three => "g3d",
                }
            ))),
            _ => Ok(()),
        }
    }

    /// Remove and return the first text argument.
    pub fn take_text(&mut self) -> Option<String> {
        let pos = self
            .rest
            .iter()
            .position(|a| matches!(a.value, Value::Text(_)))?;
        match self.rest.remove(pos).value {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Flatten the remaining arguments into 2D coordinates.
    pub fn coords2(&self) -> GeoResult<Vec<f64>> {
        let mut out = Vec::new();
        for arg in &self.rest {
            match arg.value.settled() {
                v @ (Value::Number(_) | Value::Point(_) | Value::Line(_) | Value::Vector(_)) => {
                    out.extend(v.atomic_values())
                }
                other => return Err(self.coordinate_error(other.tag())),
            }
        }
        Ok(out)
    }

    /// Flatten the remaining arguments into 3D coordinates.
    pub fn coords3(&self) -> GeoResult<Vec<f64>> {
        let mut out = Vec::new();
        for arg in &self.rest {
            match arg.value.settled() {
                v @ (Value::Number(_)
                | Value::Point3d(_)
                | Value::Line3d(_)
                | Value::Vector3d(_)) => out.extend(v.atomic_values()),
                other => return Err(self.coordinate_error(other.tag())),
            }
        }
        Ok(out)
    }

    /// Every remaining argument must be a number.
    pub fn numbers(&self) -> GeoResult<Vec<f64>> {
        self.rest
            .iter()
            .map(|a| {
                a.value
                    .as_number()
                    .ok_or_else(|| self.coordinate_error(a.value.tag()))
            })
            .collect()
    }

    /// Remaining arguments rendered as table cell text.
    pub fn cell_texts(&self) -> Vec<String> {
        self.rest
            .iter()
            .map(|a| match &a.value {
                Value::Number(n) => format_number(*n),
                other => other.friendly(),
            })
            .collect()
    }

    pub fn wrong_count(&self, got: usize, need: &str) -> GeoError {
        GeoError::expression(format!(
            "{}() got {got} values.\nNeed {need}.",
            self.name
        ))
    }

    fn coordinate_error(&self, tag: TypeTag) -> GeoError {
        GeoError::expression(format!(
            "{}() cannot use a {tag} here.\nCheck the argument types.",
            self.name
        ))
    }
}

pub(crate) fn point_at(coords: &[f64], i: usize) -> Point {
    Point::new(coords[i], coords[i + 1])
}

pub(crate) fn point3_at(coords: &[f64], i: usize) -> Point3 {
    Point3::new(coords[i], coords[i + 1], coords[i + 2])
}

#[cfg(test)]
#[path = "../../tests/unit/expression/args.rs"]
mod tests;
