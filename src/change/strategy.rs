//! Per-type policies for animating a variable between two values.

use std::collections::BTreeMap;

use crate::{
    expression::context::ExpressionContext,
    expression::value::{Segment, Segment3, TypeTag, Value},
    foundation::core::{Point, Point3},
    foundation::error::{GeoError, GeoResult},
};

/// Stateless policy for one value type.
///
/// `from_values` and `to_values` flatten the endpoints of a change into equal-length vectors;
/// `reconstruct` builds a value of the same type back from any vector of that length, keeping
/// the container and inline style of the source.
pub trait ChangeStrategy: std::fmt::Debug + Sync {
    fn tag(&self) -> TypeTag;

    fn validate(&self, source: &Value, target: &Value) -> GeoResult<()> {
        let (s, t) = (source.settled().tag(), target.settled().tag());
        if s != self.tag() {
            return Err(GeoError::change(format!(
                "cannot change a {s} with the {} strategy",
                self.tag()
            )));
        }
        if s != t {
            return Err(GeoError::change(format!(
                "Cannot change {s} into {t}.\nThe target must also be a {s}."
            )));
        }
        Ok(())
    }

    fn from_values(&self, source: &Value) -> Vec<f64> {
        source.settled().atomic_values().to_vec()
    }

    fn to_values(&self, target: &Value) -> Vec<f64> {
        target.settled().atomic_values().to_vec()
    }

    fn reconstruct(&self, values: &[f64], source: &Value) -> GeoResult<Value>;

    /// Rebind `name` to the value rebuilt from `values`.
    fn update_context(
        &self,
        ctx: &mut ExpressionContext,
        name: &str,
        values: &[f64],
        source: &Value,
    ) -> GeoResult<Value> {
        let value = self.reconstruct(values, source)?;
        ctx.update_reference(name, value.clone());
        Ok(value)
    }
}

fn expect_len(tag: TypeTag, values: &[f64]) -> GeoResult<()> {
    match tag.arity() {
        Some(n) if n == values.len() => Ok(()),
        _ => Err(GeoError::change(format!(
            "{tag} needs {} values, got {}",
            tag.arity().unwrap_or_default(),
            values.len()
        ))),
    }
}

fn mismatch(tag: TypeTag, source: &Value) -> GeoError {
    GeoError::change(format!(
        "{tag} strategy cannot rebuild a {}",
        source.settled().tag()
    ))
}

#[derive(Debug)]
pub struct NumberStrategy;

impl ChangeStrategy for NumberStrategy {
    fn tag(&self) -> TypeTag {
        TypeTag::Number
    }

    fn reconstruct(&self, values: &[f64], _source: &Value) -> GeoResult<Value> {
        expect_len(self.tag(), values)?;
        Ok(Value::Number(values[0]))
    }
}

#[derive(Debug)]
pub struct PointStrategy;

impl ChangeStrategy for PointStrategy {
    fn tag(&self) -> TypeTag {
        TypeTag::Point
    }

    fn reconstruct(&self, values: &[f64], source: &Value) -> GeoResult<Value> {
        expect_len(self.tag(), values)?;
        let Value::Point(s) = source.settled() else {
            return Err(mismatch(self.tag(), source));
        };
        Ok(Value::Point(s.with_geom(Point::new(values[0], values[1]))))
    }
}

fn segment(values: &[f64]) -> Segment {
    Segment::new(
        Point::new(values[0], values[1]),
        Point::new(values[2], values[3]),
    )
}

fn segment3(values: &[f64]) -> Segment3 {
    Segment3::new(
        Point3::new(values[0], values[1], values[2]),
        Point3::new(values[3], values[4], values[5]),
    )
}

#[derive(Debug)]
pub struct LineStrategy;

impl ChangeStrategy for LineStrategy {
    fn tag(&self) -> TypeTag {
        TypeTag::Line
    }

    fn reconstruct(&self, values: &[f64], source: &Value) -> GeoResult<Value> {
        expect_len(self.tag(), values)?;
        let Value::Line(s) = source.settled() else {
            return Err(mismatch(self.tag(), source));
        };
        Ok(Value::Line(s.with_geom(segment(values))))
    }
}

#[derive(Debug)]
pub struct VectorStrategy;

impl ChangeStrategy for VectorStrategy {
    fn tag(&self) -> TypeTag {
        TypeTag::Vector
    }

    fn reconstruct(&self, values: &[f64], source: &Value) -> GeoResult<Value> {
        expect_len(self.tag(), values)?;
        let Value::Vector(s) = source.settled() else {
            return Err(mismatch(self.tag(), source));
        };
        Ok(Value::Vector(s.with_geom(segment(values))))
    }
}

#[derive(Debug)]
pub struct Point3dStrategy;

impl ChangeStrategy for Point3dStrategy {
    fn tag(&self) -> TypeTag {
        TypeTag::Point3d
    }

    fn reconstruct(&self, values: &[f64], source: &Value) -> GeoResult<Value> {
        expect_len(self.tag(), values)?;
        let Value::Point3d(s) = source.settled() else {
            return Err(mismatch(self.tag(), source));
        };
        Ok(Value::Point3d(
            s.with_geom(Point3::new(values[0], values[1], values[2])),
        ))
    }
}

#[derive(Debug)]
pub struct Line3dStrategy;

impl ChangeStrategy for Line3dStrategy {
    fn tag(&self) -> TypeTag {
        TypeTag::Line3d
    }

    fn reconstruct(&self, values: &[f64], source: &Value) -> GeoResult<Value> {
        expect_len(self.tag(), values)?;
        let Value::Line3d(s) = source.settled() else {
            return Err(mismatch(self.tag(), source));
        };
        Ok(Value::Line3d(s.with_geom(segment3(values))))
    }
}

#[derive(Debug)]
pub struct Vector3dStrategy;

impl ChangeStrategy for Vector3dStrategy {
    fn tag(&self) -> TypeTag {
        TypeTag::Vector3d
    }

    fn reconstruct(&self, values: &[f64], source: &Value) -> GeoResult<Value> {
        expect_len(self.tag(), values)?;
        let Value::Vector3d(s) = source.settled() else {
            return Err(mismatch(self.tag(), source));
        };
        Ok(Value::Vector3d(s.with_geom(segment3(values))))
    }
}

/// Strategies keyed by the tag of the value being changed.
#[derive(Clone, Debug, Default)]
pub struct StrategyRegistry {
    by_tag: BTreeMap<TypeTag, &'static dyn ChangeStrategy>,
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut reg = Self::empty();
        reg.register(&NumberStrategy);
        reg.register(&PointStrategy);
        reg.register(&LineStrategy);
        reg.register(&VectorStrategy);
        reg.register(&Point3dStrategy);
        reg.register(&Line3dStrategy);
        reg.register(&Vector3dStrategy);
        reg
    }

    pub fn register(&mut self, strategy: &'static dyn ChangeStrategy) {
        self.by_tag.insert(strategy.tag(), strategy);
    }

    pub fn get(&self, tag: TypeTag) -> Option<&'static dyn ChangeStrategy> {
        self.by_tag.get(&tag).copied()
    }

    pub fn supports(&self, tag: TypeTag) -> bool {
        self.by_tag.contains_key(&tag)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/change/strategy.rs"]
mod tests;
