use crate::{
    command::context::CommandContext,
    execute::executor::CommandExecutor,
    expression::context::ExpressionContext,
    pipeline::service::{PipelineService, StatementError},
    render::backend::DiagramRef,
};

/// One compile of a program: its executor plus the statements that failed.
#[derive(Debug)]
pub struct Session {
    pub executor: CommandExecutor,
    pub errors: Vec<StatementError>,
    pub can_play: bool,
}

impl Session {
    /// Compile `lines` against fresh expression and command contexts.
    pub fn compile<S: AsRef<str>>(
        pipeline: &PipelineService,
        diagram: &DiagramRef,
        lines: &[S],
    ) -> Self {
        let mut expressions = ExpressionContext::new();
        let batch = pipeline.process_command_list(lines, &mut expressions);
        let context = CommandContext::new(diagram.clone(), expressions, *pipeline.playback());
        Self {
            executor: CommandExecutor::new(batch.commands, context),
            errors: batch.errors,
            can_play: batch.can_play,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
