use crate::{
    command::behavior::CommandBehavior,
    command::context::{CommandContext, RegistryEntry},
    expression::value::TypeTag,
    foundation::core::StatementId,
    foundation::error::{GeoError, GeoResult},
    options::style::Style,
    render::backend::ShapeHandle,
};

/// Lifecycle of a [`Command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandState {
    Uninit,
    Init,
    Played,
}

/// One statement's render and animate operation.
///
/// `init` runs at most once until `clear`; `play` needs a prior `init`; `direct_play` inits on
/// demand and may be repeated. Every error is tagged with the statement id.
pub struct Command {
    id: StatementId,
    index: usize,
    label: Option<String>,
    tag: TypeTag,
    style: Style,
    duration_secs: f64,
    state: CommandState,
    shape: Option<ShapeHandle>,
    behavior: Box<dyn CommandBehavior>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("kind", &self.behavior.kind())
            .field("label", &self.label)
            .field("state", &self.state)
            .field("shape", &self.shape)
            .finish()
    }
}

impl Command {
    pub fn new(
        id: StatementId,
        index: usize,
        tag: TypeTag,
        behavior: Box<dyn CommandBehavior>,
    ) -> Self {
        Self {
            id,
            index,
            label: None,
            tag,
            style: Style::default(),
            duration_secs: 0.0,
            state: CommandState::Uninit,
            shape: None,
            behavior,
        }
    }

    /// Register the drawn shape under `label` on init.
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn id(&self) -> StatementId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn kind(&self) -> &'static str {
        self.behavior.kind()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    pub fn shape(&self) -> Option<ShapeHandle> {
        self.shape
    }

    pub fn can_play(&self) -> bool {
        self.behavior.can_play()
    }

    pub fn init(&mut self, ctx: &mut CommandContext) -> GeoResult<()> {
        if self.state != CommandState::Uninit {
            return Ok(());
        }
        let shape = self
            .behavior
            .create(ctx, &self.style)
            .map_err(|e| e.at_statement(self.id))?;
        self.shape = shape;
        if let Some(shape) = shape {
            ctx.record_drawn(self.id, shape);
            if let Some(label) = &self.label {
                let entry = RegistryEntry {
                    shape,
                    owner: self.id,
                    tag: self.tag,
                };
                if let Some(prev) = ctx.registry.insert(label.clone(), entry) {
                    tracing::debug!(
                        label = label.as_str(),
                        previous = %prev.owner,
                        owner = %self.id,
                        "shape registry entry replaced"
                    );
                }
            }
        }
        self.state = CommandState::Init;
        Ok(())
    }

    /// Run the creation animation. The returned future completes when the backend settles.
    pub async fn play(&mut self, ctx: &mut CommandContext) -> GeoResult<()> {
        if self.state == CommandState::Uninit {
            return Err(GeoError::command("play before init").at_statement(self.id));
        }
        self.behavior
            .animate(ctx, self.shape, self.duration_secs)
            .await
            .map_err(|e| e.at_statement(self.id))?;
        self.behavior
            .finish(ctx, self.shape)
            .map_err(|e| e.at_statement(self.id))?;
        self.state = CommandState::Played;
        Ok(())
    }

    /// Jump straight to the final state.
    pub fn direct_play(&mut self, ctx: &mut CommandContext) -> GeoResult<()> {
        self.init(ctx)?;
        self.behavior
            .finish(ctx, self.shape)
            .map_err(|e| e.at_statement(self.id))?;
        self.state = CommandState::Played;
        Ok(())
    }

    /// Destroy the rendered object and return to `Uninit`.
    pub fn clear(&mut self, ctx: &mut CommandContext) {
        if self.state == CommandState::Uninit {
            return;
        }
        self.behavior.teardown(ctx);
        if let Some(shape) = self.shape.take() {
            if let Err(e) = ctx.diagram.borrow_mut().destroy(shape) {
                tracing::warn!(statement = %self.id, error = %e, "destroy failed");
            }
            ctx.forget_drawn(self.id);
        }
        if let Some(label) = &self.label {
            ctx.registry.remove_owned(label, self.id);
        }
        self.state = CommandState::Uninit;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/lifecycle.rs"]
mod tests;
