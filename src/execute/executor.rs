use crate::{
    command::context::{CommandContext, ShapeRegistry},
    command::lifecycle::Command,
    execute::control::{PlaybackControl, PlaybackState},
    foundation::error::{GeoError, GeoResult},
};

/// Called after each command completes, with its position.
pub type CommandCallback = Box<dyn FnMut(&Command, usize)>;
/// Called when a command fails, with the failing command and its position.
pub type ErrorCallback = Box<dyn FnMut(&GeoError, &Command, usize)>;
/// Called when an animated run ends, however it ends.
pub type RunCallback = Box<dyn FnMut(&RunOutcome)>;

/// How an animated run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Completed,
    /// Paused with `at` as the next command to play.
    Paused {
        at: usize,
    },
    Stopped,
    Failed {
        index: usize,
        error: GeoError,
    },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn into_result(self) -> GeoResult<()> {
        match self {
            Self::Failed { error, .. } => Err(error),
            _ => Ok(()),
        }
    }
}

/// Runs the commands of one compile against their shared context.
///
/// Drawing is synchronous. Playback awaits each command before starting the next and honours
/// pause and stop requests between commands. Nothing is rolled back on failure.
pub struct CommandExecutor {
    commands: Vec<Command>,
    context: CommandContext,
    current_index: usize,
    target: usize,
    control: PlaybackControl,
    on_command_complete: Option<CommandCallback>,
    on_error: Option<ErrorCallback>,
    on_run_complete: Option<RunCallback>,
}

impl std::fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("commands", &self.commands)
            .field("current_index", &self.current_index)
            .field("target", &self.target)
            .field("state", &self.control.state())
            .finish_non_exhaustive()
    }
}

impl CommandExecutor {
    pub fn new(commands: Vec<Command>, context: CommandContext) -> Self {
        Self {
            commands,
            context,
            current_index: 0,
            target: 0,
            control: PlaybackControl::new(),
            on_command_complete: None,
            on_error: None,
            on_run_complete: None,
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut CommandContext {
        &mut self.context
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.context.registry
    }

    /// Position of the next command to run.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self) -> PlaybackState {
        self.control.state()
    }

    pub fn control(&self) -> PlaybackControl {
        self.control.clone()
    }

    pub fn on_command_complete(&mut self, f: impl FnMut(&Command, usize) + 'static) {
        self.on_command_complete = Some(Box::new(f));
    }

    pub fn on_error(&mut self, f: impl FnMut(&GeoError, &Command, usize) + 'static) {
        self.on_error = Some(Box::new(f));
    }

    pub fn on_run_complete(&mut self, f: impl FnMut(&RunOutcome) + 'static) {
        self.on_run_complete = Some(Box::new(f));
    }

    /// Draw commands `[0, n)` instantly. Stops at the first failure.
    #[tracing::instrument(skip(self))]
    pub fn draw_to(&mut self, n: usize) -> GeoResult<()> {
        let n = n.min(self.commands.len());
        for i in 0..n {
            let result = self.commands[i].direct_play(&mut self.context);
            if let Err(error) = result {
                self.report(&error, i);
                self.current_index = i;
                return Err(error);
            }
        }
        self.current_index = n;
        Ok(())
    }

    pub fn draw_all(&mut self) -> GeoResult<()> {
        self.draw_to(self.commands.len())
    }

    /// Animate from the current position up to, not including, `n`.
    #[tracing::instrument(skip(self))]
    pub async fn play_to(&mut self, n: usize) -> RunOutcome {
        self.target = n.min(self.commands.len());
        self.run().await
    }

    pub async fn play_all(&mut self) -> RunOutcome {
        self.current_index = 0;
        self.play_to(self.commands.len()).await
    }

    /// Draw everything before `index` instantly, then animate exactly `index`.
    #[tracing::instrument(skip(self))]
    pub async fn play_single(&mut self, index: usize) -> RunOutcome {
        if index >= self.commands.len() {
            let outcome = RunOutcome::Failed {
                index,
                error: GeoError::command(format!(
                    "no command at {index}; {} available",
                    self.commands.len()
                )),
            };
            return self.finish_run(outcome);
        }
        if let Err(error) = self.draw_to(index) {
            let failed = self.current_index;
            return self.finish_run(RunOutcome::Failed {
                index: failed,
                error,
            });
        }
        self.play_to(index + 1).await
    }

    /// Request a pause; the running playback halts after its current command.
    pub fn pause(&self) {
        self.control.pause();
    }

    /// Continue a paused playback from the current position.
    pub async fn resume(&mut self) -> RunOutcome {
        if !self.control.is_paused() {
            tracing::debug!(state = ?self.control.state(), "resume without a pause");
        }
        self.run().await
    }

    pub fn stop(&mut self) {
        self.control.stop();
        self.current_index = 0;
    }

    /// Clear every command, latest first, and rewind.
    pub fn clear_all(&mut self) {
        for cmd in self.commands.iter_mut().rev() {
            cmd.clear(&mut self.context);
        }
        self.stop();
    }

    async fn run(&mut self) -> RunOutcome {
        self.control.set(PlaybackState::Playing);
        while self.current_index < self.target {
            match self.control.state() {
                PlaybackState::Paused => {
                    let at = self.current_index;
                    return self.finish_run(RunOutcome::Paused { at });
                }
                PlaybackState::Idle => {
                    self.current_index = 0;
                    return self.finish_run(RunOutcome::Stopped);
                }
                PlaybackState::Playing => {}
            }

            let i = self.current_index;
            let cmd = &mut self.commands[i];
            let result = if cmd.can_play() {
                match cmd.init(&mut self.context) {
                    Ok(()) => cmd.play(&mut self.context).await,
                    Err(e) => Err(e),
                }
            } else {
                cmd.direct_play(&mut self.context)
            };
            if let Err(error) = result {
                self.report(&error, i);
                self.control.set(PlaybackState::Idle);
                return self.finish_run(RunOutcome::Failed { index: i, error });
            }

            self.current_index = i + 1;
            if let Some(cb) = self.on_command_complete.as_mut() {
                cb(&self.commands[i], i);
            }
        }
        self.control.set(PlaybackState::Idle);
        self.finish_run(RunOutcome::Completed)
    }

    fn finish_run(&mut self, outcome: RunOutcome) -> RunOutcome {
        tracing::debug!(?outcome, index = self.current_index, "run finished");
        if let Some(cb) = self.on_run_complete.as_mut() {
            cb(&outcome);
        }
        outcome
    }

    fn report(&mut self, error: &GeoError, index: usize) {
        let cmd = &self.commands[index];
        match self.on_error.as_mut() {
            Some(cb) => cb(error, cmd, index),
            None => tracing::error!(
                index,
                statement = %cmd.id(),
                kind = cmd.kind(),
                error = %error,
                "command failed"
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/execute/executor.rs"]
mod tests;
