use std::future;

use crate::{
    command::context::CommandContext,
    expression::value::Value,
    foundation::core::{Dimension, Rect},
    foundation::error::{GeoError, GeoResult},
    options::style::Style,
    render::backend::{LocalFuture, ShapeHandle},
    render::primitive::Primitive,
};

/// What a command does at each lifecycle step. The [`crate::Command`] wrapper owns the state
/// machine, the drawn shape and the registry bookkeeping.
pub trait CommandBehavior {
    fn kind(&self) -> &'static str;

    /// Whether `play` has an animation; commands without one are drawn directly.
    fn can_play(&self) -> bool {
        true
    }

    /// Build the rendered object, hidden.
    fn create(
        &mut self,
        ctx: &mut CommandContext,
        style: &Style,
    ) -> GeoResult<Option<ShapeHandle>>;

    fn animate<'a>(
        &'a mut self,
        ctx: &'a mut CommandContext,
        shape: Option<ShapeHandle>,
        duration_secs: f64,
    ) -> LocalFuture<'a, GeoResult<()>>;

    /// Leave the command in its final, visible state.
    fn finish(&mut self, ctx: &mut CommandContext, shape: Option<ShapeHandle>) -> GeoResult<()>;

    /// Undo side effects beyond the shape itself.
    fn teardown(&mut self, _ctx: &mut CommandContext) {}
}

pub(crate) fn ready<'a>(result: GeoResult<()>) -> LocalFuture<'a, GeoResult<()>> {
    Box::pin(future::ready(result))
}

pub(crate) fn require_shape(kind: &str, shape: Option<ShapeHandle>) -> GeoResult<ShapeHandle> {
    shape.ok_or_else(|| GeoError::command(format!("{kind} has no shape to play")))
}

/// Draw `value` into its container with `style`; the shape starts hidden.
pub(crate) fn draw_value(
    ctx: &mut CommandContext,
    value: &Value,
    style: &Style,
) -> GeoResult<ShapeHandle> {
    let Some(primitive) = Primitive::from_value(value) else {
        return Err(GeoError::command(format!(
            "a {} cannot be drawn",
            value.settled().tag()
        )));
    };
    let dimension = value.settled().tag().dimension().unwrap_or(Dimension::Two);
    let container = ctx.container_for(value.graph(), dimension)?;
    ctx.diagram.borrow_mut().draw(container, &primitive, style)
}

/// Any drawable geometry or annotation.
#[derive(Clone, Debug)]
pub struct ShapeCommand {
    value: Value,
}

impl ShapeCommand {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl CommandBehavior for ShapeCommand {
    fn kind(&self) -> &'static str {
        self.value.settled().tag().name()
    }

    fn create(
        &mut self,
        ctx: &mut CommandContext,
        style: &Style,
    ) -> GeoResult<Option<ShapeHandle>> {
        draw_value(ctx, &self.value, style).map(Some)
    }

    fn animate<'a>(
        &'a mut self,
        ctx: &'a mut CommandContext,
        shape: Option<ShapeHandle>,
        duration_secs: f64,
    ) -> LocalFuture<'a, GeoResult<()>> {
        match require_shape(self.kind(), shape) {
            Ok(shape) => ctx
                .diagram
                .borrow_mut()
                .play_creation(shape, duration_secs),
            Err(e) => ready(Err(e)),
        }
    }

    fn finish(&mut self, ctx: &mut CommandContext, shape: Option<ShapeHandle>) -> GeoResult<()> {
        let shape = require_shape(self.kind(), shape)?;
        let mut diagram = ctx.diagram.borrow_mut();
        diagram.render_end_state(shape)?;
        diagram.show(shape)
    }
}

/// A `g2d`/`g3d` container. Creating one has no animation.
#[derive(Clone, Debug)]
pub struct GraphCommand {
    dimension: Dimension,
    bounds: Rect,
}

impl GraphCommand {
    pub fn new(dimension: Dimension, bounds: Rect) -> Self {
        Self { dimension, bounds }
    }
}

impl CommandBehavior for GraphCommand {
    fn kind(&self) -> &'static str {
        match self.dimension {
            Dimension::Two => "g2d",
            Dimension::Three => "g3d",
        }
    }

    fn can_play(&self) -> bool {
        false
    }

    fn create(
        &mut self,
        ctx: &mut CommandContext,
        _style: &Style,
    ) -> GeoResult<Option<ShapeHandle>> {
        ctx.diagram
            .borrow_mut()
            .create_container(self.dimension, self.bounds)
            .map(Some)
    }

    fn animate<'a>(
        &'a mut self,
        _ctx: &'a mut CommandContext,
        _shape: Option<ShapeHandle>,
        _duration_secs: f64,
    ) -> LocalFuture<'a, GeoResult<()>> {
        ready(Ok(()))
    }

    fn finish(&mut self, ctx: &mut CommandContext, shape: Option<ShapeHandle>) -> GeoResult<()> {
        let shape = require_shape(self.kind(), shape)?;
        ctx.diagram.borrow_mut().show(shape)
    }
}

/// A statement that is only a variable name: presents the bound value again through the
/// behaviour of that value.
pub struct ReferenceCommand {
    name: String,
    inner: Box<dyn CommandBehavior>,
}

impl ReferenceCommand {
    pub fn new(name: impl Into<String>, inner: Box<dyn CommandBehavior>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CommandBehavior for ReferenceCommand {
    fn kind(&self) -> &'static str {
        self.inner.kind()
    }

    fn can_play(&self) -> bool {
        self.inner.can_play()
    }

    fn create(
        &mut self,
        ctx: &mut CommandContext,
        style: &Style,
    ) -> GeoResult<Option<ShapeHandle>> {
        self.inner.create(ctx, style)
    }

    fn animate<'a>(
        &'a mut self,
        ctx: &'a mut CommandContext,
        shape: Option<ShapeHandle>,
        duration_secs: f64,
    ) -> LocalFuture<'a, GeoResult<()>> {
        self.inner.animate(ctx, shape, duration_secs)
    }

    fn finish(&mut self, ctx: &mut CommandContext, shape: Option<ShapeHandle>) -> GeoResult<()> {
        self.inner.finish(ctx, shape)
    }

    fn teardown(&mut self, ctx: &mut CommandContext) {
        self.inner.teardown(ctx);
    }
}
