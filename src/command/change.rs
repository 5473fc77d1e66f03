use crate::{
    animation::tween::Tween,
    change::plan::ChangePlan,
    command::behavior::{CommandBehavior, draw_value},
    command::context::CommandContext,
    expression::value::Value,
    foundation::core::StatementId,
    foundation::error::GeoResult,
    options::style::Style,
    render::backend::{LocalFuture, ShapeHandle},
};

/// Animated `change(A, target)`.
///
/// Every frame rebinds the variable, recomputes its dependents and redraws them as temporary
/// shapes while the originals stay hidden. Clearing restores the originals.
#[derive(Debug)]
pub struct ChangeCommand {
    plan: ChangePlan,
    temps: Vec<ShapeHandle>,
    hidden: Vec<ShapeHandle>,
    applied: bool,
}

impl ChangeCommand {
    pub fn new(plan: ChangePlan) -> Self {
        Self {
            plan,
            temps: Vec::new(),
            hidden: Vec::new(),
            applied: false,
        }
    }

    pub fn plan(&self) -> &ChangePlan {
        &self.plan
    }

    /// The statement binding the variable, then its dependents in order.
    fn affected(&self, ctx: &CommandContext) -> Vec<StatementId> {
        ctx.expressions
            .binder_of(&self.plan.variable)
            .into_iter()
            .chain(self.plan.order.iter().copied())
            .collect()
    }

    fn hide_originals(&mut self, ctx: &mut CommandContext) -> GeoResult<()> {
        if !self.hidden.is_empty() {
            return Ok(());
        }
        for id in self.affected(ctx) {
            if let Some(shape) = ctx.shape_of(id) {
                ctx.diagram.borrow_mut().hide(shape)?;
                self.hidden.push(shape);
            }
        }
        Ok(())
    }

    fn destroy_temps(&mut self, ctx: &mut CommandContext) {
        let mut diagram = ctx.diagram.borrow_mut();
        for shape in self.temps.drain(..) {
            if let Err(e) = diagram.destroy(shape) {
                tracing::debug!(error = %e, "temporary shape already gone");
            }
        }
    }

    /// Apply one frame of values and redraw everything they touch.
    fn step(&mut self, ctx: &mut CommandContext, values: &[f64]) -> GeoResult<()> {
        let updates = self.plan.apply(&mut ctx.expressions, values)?;
        self.destroy_temps(ctx);

        let mut redraw: Vec<(StatementId, Value)> = Vec::with_capacity(updates.len() + 1);
        if let Some(binder) = ctx.expressions.binder_of(&self.plan.variable)
            && let Some(value) = ctx.expressions.peek(&self.plan.variable)
        {
            redraw.push((binder, value.clone()));
        }
        redraw.extend(updates);

        for (id, value) in redraw {
            if !value.is_drawable() || ctx.shape_of(id).is_none() {
                continue;
            }
            let style = ctx
                .expressions
                .statement(id)
                .map(|r| r.style.clone())
                .unwrap_or_default();
            let shape = draw_value(ctx, &value, &style)?;
            self.temps.push(shape);
            ctx.diagram.borrow_mut().show(shape)?;
        }
        Ok(())
    }
}

impl CommandBehavior for ChangeCommand {
    fn kind(&self) -> &'static str {
        "change"
    }

    fn create(
        &mut self,
        _ctx: &mut CommandContext,
        _style: &Style,
    ) -> GeoResult<Option<ShapeHandle>> {
        Ok(None)
    }

    fn animate<'a>(
        &'a mut self,
        ctx: &'a mut CommandContext,
        _shape: Option<ShapeHandle>,
        duration_secs: f64,
    ) -> LocalFuture<'a, GeoResult<()>> {
        Box::pin(async move {
            let tween = Tween::new(duration_secs, ctx.playback.fps, ctx.playback.ease);
            let from = self.plan.from.clone();
            let target = self.plan.to.clone();
            let last = tween.steps() - 1;
            self.hide_originals(ctx)?;
            for (i, values) in tween.frames(&from, &target).enumerate() {
                let values = if i == last { target.clone() } else { values };
                self.step(ctx, &values)?;
                let frame = ctx.diagram.borrow_mut().next_frame();
                frame.await;
            }
            self.applied = true;
            Ok(())
        })
    }

    fn finish(&mut self, ctx: &mut CommandContext, _shape: Option<ShapeHandle>) -> GeoResult<()> {
        if self.applied {
            return Ok(());
        }
        self.hide_originals(ctx)?;
        let target = self.plan.to.clone();
        self.step(ctx, &target)?;
        self.applied = true;
        Ok(())
    }

    fn teardown(&mut self, ctx: &mut CommandContext) {
        self.destroy_temps(ctx);
        let mut diagram = ctx.diagram.borrow_mut();
        for shape in self.hidden.drain(..) {
            if let Err(e) = diagram.show(shape) {
                tracing::debug!(error = %e, "original shape already gone");
            }
        }
        self.applied = false;
    }
}
