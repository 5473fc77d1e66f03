use crate::{
    controller::session::Session,
    execute::executor::RunOutcome,
    foundation::error::{GeoError, GeoResult},
    pipeline::service::{PipelineService, StatementError},
    render::backend::DiagramRef,
};

/// Where a step-through currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StepState {
    /// Nothing compiled.
    Idle,
    /// `at` commands are on screen; `at == 0` before the first step.
    Stepping { at: usize },
    Paused { at: usize },
    Finished,
}

/// Steps through a program one animated command at a time.
///
/// Moving forward reuses the live session. Moving back recompiles and redraws up to the
/// earlier position, because playing a `change` rewrites the bindings it touched.
#[derive(Debug)]
pub struct StepController {
    pipeline: PipelineService,
    diagram: DiagramRef,
    lines: Vec<String>,
    session: Option<Session>,
    /// Positions reached after each step, oldest first.
    history: Vec<usize>,
}

impl StepController {
    pub fn new(pipeline: PipelineService, diagram: DiagramRef) -> Self {
        Self {
            pipeline,
            diagram,
            lines: Vec::new(),
            session: None,
            history: Vec::new(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Compile `lines` and wait before the first step. Failing statements are returned and
    /// nothing is installed.
    #[tracing::instrument(skip_all, fields(statements = lines.len()))]
    pub fn start<S: AsRef<str>>(&mut self, lines: &[S]) -> GeoResult<Vec<StatementError>> {
        let session = Session::compile(&self.pipeline, &self.diagram, lines);
        if !session.is_ok() {
            return Ok(session.errors);
        }
        self.lines = lines.iter().map(|l| l.as_ref().to_string()).collect();
        self.history.clear();
        self.install(session);
        Ok(Vec::new())
    }

    pub fn state(&self) -> StepState {
        let Some(session) = &self.session else {
            return StepState::Idle;
        };
        let at = session.executor.current_index();
        if session.executor.control().is_paused() {
            StepState::Paused { at }
        } else if at >= session.executor.len() {
            StepState::Finished
        } else {
            StepState::Stepping { at }
        }
    }

    /// Play the next animated command, drawing any non-animated ones before it. Returns the
    /// index played, or `None` at the end.
    #[tracing::instrument(skip(self))]
    pub async fn next(&mut self) -> GeoResult<Option<usize>> {
        let session = self.live()?;
        let executor = &mut session.executor;
        let from = executor.current_index();
        let Some(index) = (from..executor.len()).find(|&i| executor.commands()[i].can_play())
        else {
            let len = executor.len();
            executor.play_to(len).await.into_result()?;
            return Ok(None);
        };
        match executor.play_to(index + 1).await {
            RunOutcome::Failed { error, .. } => return Err(error),
            RunOutcome::Paused { .. } | RunOutcome::Stopped => return Ok(None),
            RunOutcome::Completed => {}
        }
        self.history.push(index + 1);
        Ok(Some(index))
    }

    /// Go back one step. Returns the index of the command now last on screen, if any.
    #[tracing::instrument(skip(self))]
    pub fn previous(&mut self) -> GeoResult<Option<usize>> {
        self.live()?;
        self.history.pop();
        let at = self.history.last().copied().unwrap_or(0);
        self.rewind_to(at)?;
        Ok(at.checked_sub(1))
    }

    /// Show everything before `index` and animate `index`.
    #[tracing::instrument(skip(self))]
    pub async fn go_to(&mut self, index: usize) -> GeoResult<()> {
        let len = self.live()?.executor.len();
        if index >= len {
            return Err(GeoError::command(format!(
                "step {index} out of range; {len} commands"
            )));
        }
        self.rewind_to(0)?;
        let executor = &mut self.live()?.executor;
        let history: Vec<usize> = (0..=index)
            .filter(|&i| executor.commands()[i].can_play())
            .map(|i| i + 1)
            .collect();
        executor.play_single(index).await.into_result()?;
        self.history = history;
        Ok(())
    }

    pub fn pause(&self) {
        if let Some(session) = &self.session {
            session.executor.pause();
        }
    }

    pub async fn resume(&mut self) -> GeoResult<RunOutcome> {
        Ok(self.live()?.executor.resume().await)
    }

    /// Leave stepping and clear the diagram.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.executor.clear_all();
        }
        self.history.clear();
    }

    /// Leave stepping with the whole program drawn.
    pub fn stop_and_draw(&mut self) -> GeoResult<()> {
        self.live()?;
        let session = Session::compile(&self.pipeline, &self.diagram, &self.lines);
        self.install(session).executor.draw_all()?;
        self.history.clear();
        Ok(())
    }

    fn live(&mut self) -> GeoResult<&mut Session> {
        self.session
            .as_mut()
            .ok_or_else(|| GeoError::command("stepping has not started"))
    }

    fn install(&mut self, session: Session) -> &mut Session {
        if let Some(mut old) = self.session.take() {
            old.executor.clear_all();
        }
        self.session.insert(session)
    }

    /// Recompile and draw the first `at` commands.
    fn rewind_to(&mut self, at: usize) -> GeoResult<()> {
        let session = Session::compile(&self.pipeline, &self.diagram, &self.lines);
        self.install(session).executor.draw_to(at)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/step.rs"]
mod tests;
