use crate::{
    command::behavior::{CommandBehavior, GraphCommand, ReferenceCommand, ShapeCommand},
    command::change::ChangeCommand,
    command::lifecycle::Command,
    command::restyle::RestyleCommand,
    command::shift::ShiftCommand,
    command::visibility::VisibilityCommand,
    config::PlaybackConfig,
    expression::expr::Expression,
    expression::value::Value,
    foundation::core::{Dimension, StatementId},
    options::style::Style,
};

/// Behaviour presenting `value`; `None` for values that draw and animate nothing.
pub fn behavior_for(value: &Value) -> Option<Box<dyn CommandBehavior>> {
    let behavior: Box<dyn CommandBehavior> = match value {
        Value::Number(_) | Value::Text(_) | Value::Style(_) => return None,
        Value::Graph2d(g) => Box::new(GraphCommand::new(Dimension::Two, g.bounds)),
        Value::Graph3d(g) => Box::new(GraphCommand::new(Dimension::Three, g.bounds)),
        Value::Shift(s) => Box::new(ShiftCommand::new(
            ShapeCommand::new((*s.moved).clone()),
            s.source.clone(),
            s.offset,
        )),
        Value::Visibility(v) => Box::new(VisibilityCommand::new(v.target.clone(), v.visible)),
        Value::Restyle(r) => Box::new(RestyleCommand::new(r.target.clone(), r.style.clone())),
        Value::Change(plan) => Box::new(ChangeCommand::new((**plan).clone())),
        drawable => Box::new(ShapeCommand::new(drawable.clone())),
    };
    Some(behavior)
}

/// Command for a resolved statement, labelled with the variable it binds.
pub fn command_for(
    expression: &Expression,
    value: &Value,
    id: StatementId,
    index: usize,
    style: Style,
    playback: &PlaybackConfig,
) -> Option<Command> {
    let mut behavior = behavior_for(value)?;
    if let Some(name) = expression.body().referenced() {
        behavior = Box::new(ReferenceCommand::new(name, behavior));
    }
    let duration = match value {
        Value::Change(plan) => plan.duration.unwrap_or(playback.change_secs),
        _ => playback.creation_secs,
    };
    Some(
        Command::new(id, index, value.settled().tag(), behavior)
            .with_label(expression.binding().map(str::to_string))
            .with_style(style)
            .with_duration(duration),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/command/build.rs"]
mod tests;
