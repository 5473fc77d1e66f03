use crate::{
    command::behavior::{CommandBehavior, ShapeCommand, ready, require_shape},
    command::context::CommandContext,
    foundation::core::Vec2,
    foundation::error::{GeoError, GeoResult},
    options::style::Style,
    render::backend::{LocalFuture, ShapeHandle},
};

/// A vector redrawn at a new start, animated from where it was.
pub struct ShiftCommand {
    inner: ShapeCommand,
    /// Variable the moved shape came from; it must already be on the diagram.
    source: Option<String>,
    offset: Vec2,
}

impl ShiftCommand {
    pub fn new(inner: ShapeCommand, source: Option<String>, offset: Vec2) -> Self {
        Self {
            inner,
            source,
            offset,
        }
    }
}

impl CommandBehavior for ShiftCommand {
    fn kind(&self) -> &'static str {
        "shift"
    }

    fn create(
        &mut self,
        ctx: &mut CommandContext,
        style: &Style,
    ) -> GeoResult<Option<ShapeHandle>> {
        if let Some(source) = &self.source
            && !ctx.registry.contains(source)
        {
            return Err(GeoError::command(format!(
                "original shape '{source}' not found"
            )));
        }
        self.inner.create(ctx, style)
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
                .play_move(shape, -self.offset, duration_secs),
            Err(e) => ready(Err(e)),
        }
    }

    fn finish(&mut self, ctx: &mut CommandContext, shape: Option<ShapeHandle>) -> GeoResult<()> {
        self.inner.finish(ctx, shape)
    }
}
