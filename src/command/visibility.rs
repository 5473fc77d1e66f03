use crate::{
    command::behavior::{CommandBehavior, ready},
    command::context::CommandContext,
    foundation::error::{GeoError, GeoResult},
    options::style::Style,
    render::backend::{LocalFuture, ShapeHandle},
};

/// `hide(A)` / `show(A)` on a shape drawn by an earlier statement.
#[derive(Clone, Debug)]
pub struct VisibilityCommand {
    target: String,
    visible: bool,
    resolved: Option<ShapeHandle>,
    applied: bool,
}

impl VisibilityCommand {
    pub fn new(target: impl Into<String>, visible: bool) -> Self {
        Self {
            target: target.into(),
            visible,
            resolved: None,
            applied: false,
        }
    }
}

impl CommandBehavior for VisibilityCommand {
    fn kind(&self) -> &'static str {
        if self.visible { "show" } else { "hide" }
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
            return Err(GeoError::command(format!(
                "{}({}) before init",
                self.kind(),
                self.target
            )));
        };
        let mut diagram = ctx.diagram.borrow_mut();
        if self.visible {
            diagram.show(target)?;
        } else {
            diagram.hide(target)?;
        }
        self.applied = true;
        Ok(())
    }

    fn teardown(&mut self, ctx: &mut CommandContext) {
        let Some(target) = self.resolved.take() else {
            return;
        };
        if !std::mem::take(&mut self.applied) {
            return;
        }
        let mut diagram = ctx.diagram.borrow_mut();
        let restored = if self.visible {
            diagram.hide(target)
        } else {
            diagram.show(target)
        };
        if let Err(e) = restored {
            tracing::debug!(shape = self.target.as_str(), error = %e, "visibility not restored");
        }
    }
}
