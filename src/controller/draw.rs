use crate::{
    controller::session::Session,
    execute::executor::RunOutcome,
    foundation::error::{GeoError, GeoResult},
    pipeline::service::{PipelineService, StatementError},
    render::backend::DiagramRef,
};

/// Compiles a whole program and shows it, or plays it back.
#[derive(Debug)]
pub struct DrawController {
    pipeline: PipelineService,
    diagram: DiagramRef,
    lines: Vec<String>,
    session: Option<Session>,
}

impl DrawController {
    pub fn new(pipeline: PipelineService, diagram: DiagramRef) -> Self {
        Self {
            pipeline,
            diagram,
            lines: Vec::new(),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Compile and draw `lines`. When any statement fails the errors are returned and the
    /// previous program stays on screen.
    #[tracing::instrument(skip_all, fields(statements = lines.len()))]
    pub fn compile<S: AsRef<str>>(&mut self, lines: &[S]) -> GeoResult<Vec<StatementError>> {
        let session = Session::compile(&self.pipeline, &self.diagram, lines);
        if !session.is_ok() {
            tracing::info!(errors = session.errors.len(), "compile failed; keeping previous state");
            return Ok(session.errors);
        }
        self.lines = lines.iter().map(|l| l.as_ref().to_string()).collect();
        self.install(session).executor.draw_all()?;
        Ok(Vec::new())
    }

    /// Animate the whole program from a blank diagram.
    pub async fn play_all(&mut self) -> GeoResult<RunOutcome> {
        let session = self.recompile()?;
        Ok(session.executor.play_all().await)
    }

    /// Animate statements up to and including `index`.
    pub async fn play_up_to(&mut self, index: usize) -> GeoResult<RunOutcome> {
        let session = self.recompile()?;
        Ok(session.executor.play_to(index + 1).await)
    }

    /// Draw everything before `index`, then animate only `index`.
    pub async fn play_single(&mut self, index: usize) -> GeoResult<RunOutcome> {
        let session = self.recompile()?;
        Ok(session.executor.play_single(index).await)
    }

    /// Cancel playback and show the finished program.
    pub fn stop(&mut self) -> GeoResult<()> {
        if let Some(session) = self.session.as_mut() {
            session.executor.stop();
        }
        self.recompile()?.executor.draw_all()
    }

    fn install(&mut self, session: Session) -> &mut Session {
        if let Some(mut old) = self.session.take() {
            old.executor.clear_all();
        }
        self.session.insert(session)
    }

    /// Fresh session for the current program; playback mutates its expression context.
    fn recompile(&mut self) -> GeoResult<&mut Session> {
        if self.session.is_none() {
            return Err(GeoError::command("nothing compiled"));
        }
        let session = Session::compile(&self.pipeline, &self.diagram, &self.lines);
        Ok(self.install(session))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/draw.rs"]
mod tests;
