use crate::{
    change::strategy::ChangeStrategy,
    expression::context::ExpressionContext,
    expression::value::{TypeTag, Value},
    foundation::core::StatementId,
    foundation::error::{GeoError, GeoResult},
};

/// Inputs of a `change(...)` statement after its target has been resolved.
#[derive(Clone, Debug)]
pub struct ChangeRequest<'a> {
    pub variable: &'a str,
    pub target: Value,
    pub duration: Option<f64>,
    /// Statement issuing the change; never part of its own recomputation order.
    pub caller: Option<StatementId>,
}

/// A validated change of one variable, with the statements to recompute for every value it
/// passes through.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangePlan {
    pub variable: String,
    pub tag: TypeTag,
    /// Value of the variable when the change was resolved.
    pub source: Value,
    pub from: Vec<f64>,
    pub to: Vec<f64>,
    /// Transitive dependents in recomputation order, captured at resolve time.
    pub order: Vec<StatementId>,
    pub duration: Option<f64>,
}

/// Validate a change against the current bindings and capture everything needed to play it.
#[tracing::instrument(skip(ctx, request), fields(variable = request.variable))]
pub fn change(ctx: &mut ExpressionContext, request: ChangeRequest<'_>) -> GeoResult<ChangePlan> {
    let Some(source) = ctx.peek(request.variable).cloned() else {
        return Err(GeoError::unknown_variable(request.variable));
    };
    let tag = source.settled().tag();
    let strategy = strategy_for(ctx, tag)?;
    strategy.validate(&source, &request.target)?;
    let from = strategy.from_values(&source);
    let to = strategy.to_values(&request.target);
    if from.len() != to.len() {
        return Err(GeoError::change(format!(
            "{tag} change has {} start values but {} targets",
            from.len(),
            to.len()
        )));
    }
    let order: Vec<StatementId> = ctx
        .ordered_dependents(request.variable)?
        .into_iter()
        .filter(|id| Some(*id) != request.caller)
        .collect();
    tracing::debug!(dependents = order.len(), "change planned");
    Ok(ChangePlan {
        variable: request.variable.to_string(),
        tag,
        source,
        from,
        to,
        order,
        duration: request.duration,
    })
}

fn strategy_for(ctx: &ExpressionContext, tag: TypeTag) -> GeoResult<&'static dyn ChangeStrategy> {
    ctx.strategies().get(tag).ok_or_else(|| {
        GeoError::change(format!(
            "A {tag} cannot be changed.\nChange a number, point, line or vector."
        ))
    })
}

impl ChangePlan {
    /// Rebind the variable to `values` and re-resolve every dependent in order. Returns the new
    /// value of each dependent.
    pub fn apply(
        &self,
        ctx: &mut ExpressionContext,
        values: &[f64],
    ) -> GeoResult<Vec<(StatementId, Value)>> {
        let strategy = strategy_for(ctx, self.tag)?;
        strategy.update_context(ctx, &self.variable, values, &self.source)?;
        let mut out = Vec::with_capacity(self.order.len());
        for &id in &self.order {
            out.push((id, ctx.re_resolve(id)?));
        }
        Ok(out)
    }

    /// Apply the final target exactly.
    pub fn finish(&self, ctx: &mut ExpressionContext) -> GeoResult<Vec<(StatementId, Value)>> {
        self.apply(ctx, &self.to)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/change/plan.rs"]
mod tests;
