use crate::{
    command::behavior::{CommandBehavior, ready},
    command::context::CommandContext,
    foundation::error::{GeoError, GeoResult},
    options::style::Style,
    render::backend::{LocalFuture, ShapeHandle},
};

/// `stroke(A, c)`, `fill(A, c)` and `strokewidth(A, w)` on a shape drawn earlier.
///
/// The style the shape had before is kept so clearing the command puts it back.
#[derive(Clone, Debug)]
pub struct RestyleCommand {
    target: String,
    style: Style,
    resolved: Option<ShapeHandle>,
    previous: Option<Style>,
}

impl RestyleCommand {
    pub fn new(target: impl Into<String>, style: Style) -> Self {
        Self {
            target: target.into(),
            style,
            resolved: None,
            previous: None,
        }
    }
}

impl CommandBehavior for RestyleCommand {
    fn kind(&self) -> &'static str {
        "restyle"
    }

    fn create(
        &mut self,
        ctx: &mut CommandContext,
        _style: &Style,
    ) -> GeoResult<Option<ShapeHandle>> {
        let Some(entry) = ctx.registry.get(&self.target) else {
            return Err(GeoError::command(format!(
                "shape '{}' not found",
                self.target
            )));
        };
        self.resolved = Some(entry.shape);
        Ok(None)
    }

    fn animate<'a>(
        &'a mut self,
        _ctx: &'a mut CommandContext,
        _shape: Option<ShapeHandle>,
        _duration_secs: f64,
    ) -> LocalFuture<'a, GeoResult<()>> {
        ready(Ok(()))
    }

    fn finish(&mut self, ctx: &mut CommandContext, _shape: Option<ShapeHandle>) -> GeoResult<()> {
        let Some(target) = self.resolved else {
            return Err(GeoError::command(format!("restyle({}) before init", self.target)));
        };
        if self.previous.is_some() {
            return Ok(());
        }
        let mut diagram = ctx.diagram.borrow_mut();
        let previous = diagram.style_of(target)?;
        diagram.restyle(target, &previous.merged(&self.style))?;
        self.previous = Some(previous);
        Ok(())
    }

    fn teardown(&mut self, ctx: &mut CommandContext) {
        let Some(target) = self.resolved.take() else {
            return;
        };
        let Some(previous) = self.previous.take() else {
            return;
        };
        if let Err(e) = ctx.diagram.borrow_mut().restyle(target, &previous) {
            tracing::debug!(shape = self.target.as_str(), error = %e, "style not restored");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/restyle.rs"]
mod tests;
