use crate::{
    command::build::command_for,
    command::lifecycle::Command,
    config::{EngineConfig, PlaybackConfig},
    expression::context::{ExpressionContext, Scope, StatementRecord},
    expression::interpreter::Interpreter,
    foundation::core::StatementId,
    foundation::error::{GeoError, GeoResult},
    options::registry::StyleRegistry,
    options::style::Style,
    syntax::source::SyntaxSource,
};

/// A statement that failed to compile, by position.
#[derive(Debug)]
pub struct StatementError {
    pub index: usize,
    pub error: GeoError,
}

/// Commands built from a program plus the statements that failed.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub commands: Vec<Command>,
    pub errors: Vec<StatementError>,
    /// Whether any command has an animation.
    pub can_play: bool,
}

impl BatchResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Statement text to command: parse, interpret, resolve, record, style, build.
pub struct PipelineService {
    source: Box<dyn SyntaxSource>,
    interpreter: Interpreter,
    styles: StyleRegistry,
    playback: PlaybackConfig,
}

impl std::fmt::Debug for PipelineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineService")
            .field("functions", &self.interpreter.table().len())
            .field("styles", &self.styles)
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}

impl PipelineService {
    pub fn new(source: Box<dyn SyntaxSource>) -> Self {
        Self {
            source,
            interpreter: Interpreter::default(),
            styles: StyleRegistry::default(),
            playback: PlaybackConfig::default(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: Interpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.styles = config.styles.clone();
        self.playback = config.playback;
        self
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    pub fn playback(&self) -> &PlaybackConfig {
        &self.playback
    }

    /// Compile one statement. Blank input yields `Ok(None)`, as do values that draw nothing.
    /// Errors are attributed to the statement at `index`.
    #[tracing::instrument(skip(self, ctx, overrides))]
    pub fn process_expression(
        &self,
        line: &str,
        ctx: &mut ExpressionContext,
        overrides: &Style,
        index: usize,
    ) -> GeoResult<Option<Command>> {
        self.compile_statement(line, ctx, overrides, index)
            .map_err(|e| e.at_statement(StatementId::from_index(index)))
    }

    fn compile_statement(
        &self,
        line: &str,
        ctx: &mut ExpressionContext,
        overrides: &Style,
        index: usize,
    ) -> GeoResult<Option<Command>> {
        let mut nodes = self.source.parse(line)?;
        let node = match nodes.len() {
            0 => return Ok(None),
            1 => nodes.remove(0),
            n => {
                return Err(GeoError::syntax(
                    1,
                    1,
                    format!("expected one statement per line, found {n}"),
                ));
            }
        };

        let mut expression = self.interpreter.eval_expression(&node)?;
        let id = StatementId::from_index(index);
        let value = expression.resolve(ctx, Scope::statement(id))?;

        let mut style = self
            .styles
            .resolve(value.settled().tag(), index)
            .merged(overrides);
        if let Some(inline) = value.inline_style() {
            style = style.merged(inline);
        }

        let command = command_for(&expression, &value, id, index, style.clone(), &self.playback);
        ctx.record_statement(StatementRecord {
            id,
            index,
            binding: expression.binding().map(str::to_string),
            expression,
            style,
        });
        Ok(command)
    }

    /// Compile every statement; a failing statement never blocks the others.
    #[tracing::instrument(skip_all, fields(statements = lines.len()))]
    pub fn process_command_list<S: AsRef<str>>(
        &self,
        lines: &[S],
        ctx: &mut ExpressionContext,
    ) -> BatchResult {
        let mut batch = BatchResult::default();
        let none = Style::default();
        for (index, line) in lines.iter().enumerate() {
            match self.process_expression(line.as_ref(), ctx, &none, index) {
                Ok(Some(command)) => batch.commands.push(command),
                Ok(None) => {}
                Err(error) => {
                    let error = error.into_root();
                    tracing::debug!(index, error = %error, "statement failed");
                    batch.errors.push(StatementError { index, error });
                }
            }
        }
        batch.can_play = batch.commands.iter().any(Command::can_play);
        batch
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/service.rs"]
mod tests;
