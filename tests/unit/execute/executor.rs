use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use super::*;
use crate::config::{EngineConfig, PlaybackConfig};
use crate::controller::session::Session;
use crate::pipeline::service::PipelineService;
use crate::execute::control::PlaybackControl;
use crate::foundation::core::{Dimension, Rect, Vec2};
use crate::foundation::error::GeoResult;
use crate::options::style::Style;
use crate::render::backend::{Diagram, DiagramRef, LocalFuture, ShapeHandle};
use crate::render::primitive::Primitive;
use crate::render::recording::{DrawEvent, RecordingDiagram};
use crate::syntax::build::{ProgramBuilder, assign, call, ident, num};
use crate::syntax::node::SyntaxNode;
use crate::syntax::source::JsonSource;

fn executor(nodes: Vec<SyntaxNode>) -> (Rc<RefCell<RecordingDiagram>>, CommandExecutor) {
    let lines = nodes
        .into_iter()
        .fold(ProgramBuilder::new(), ProgramBuilder::statement)
        .build()
        .unwrap();
    let diagram = Rc::new(RefCell::new(RecordingDiagram::new()));
    let shared: DiagramRef = diagram.clone();
    let config = EngineConfig {
        playback: PlaybackConfig::instant(),
        ..EngineConfig::default()
    };
    let pipeline = PipelineService::new(Box::new(JsonSource)).with_config(&config);
    let session = Session::compile(&pipeline, &shared, &lines);
    assert!(session.is_ok(), "{:?}", session.errors);
    (diagram, session.executor)
}

fn point(name: &str, x: f64, y: f64) -> SyntaxNode {
    assign(name, call("point", [num(x), num(y)]))
}

fn three_points() -> Vec<SyntaxNode> {
    vec![point("P", 0.0, 0.0), point("Q", 1.0, 0.0), point("R", 2.0, 0.0)]
}

fn creations(diagram: &RecordingDiagram) -> usize {
    diagram
        .events()
        .iter()
        .filter(|e| matches!(e, DrawEvent::Creation { .. }))
        .count()
}

#[test]
fn draw_all_shows_everything_without_animation() {
    let (diagram, mut exec) = executor(three_points());
    exec.draw_all().unwrap();
    assert_eq!(exec.current_index(), 3);
    assert_eq!(diagram.borrow().visible_shapes().len(), 3);
    assert_eq!(creations(&diagram.borrow()), 0);
    assert_eq!(exec.registry().len(), 3);
}

#[test]
fn draw_to_stops_at_the_first_failure() {
    // `hide(A)` compiles but finds no shape named A when drawn.
    let (diagram, mut exec) = executor(vec![
        point("P", 0.0, 0.0),
        assign("A", num(5.0)),
        call("hide", [ident("A")]),
        point("Q", 1.0, 1.0),
    ]);
    let failures = Rc::new(RefCell::new(Vec::new()));
    let seen = failures.clone();
    exec.on_error(move |_, cmd, index| seen.borrow_mut().push((index, cmd.kind())));

    let err = exec.draw_all().unwrap_err();
    assert!(err.to_string().contains("shape 'A' not found"));
    assert_eq!(exec.current_index(), 1);
    assert_eq!(*failures.borrow(), vec![(1, "hide")]);
    assert_eq!(diagram.borrow().visible_shapes().len(), 1);
}

#[test]
fn play_all_animates_in_order() {
    let (diagram, mut exec) = executor(three_points());
    let order = Rc::new(RefCell::new(Vec::new()));
    let seen = order.clone();
    exec.on_command_complete(move |_, i| seen.borrow_mut().push(i));

    let outcome = pollster::block_on(exec.play_all());
    assert!(outcome.is_completed());
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
    assert_eq!(creations(&diagram.borrow()), 3);
    assert_eq!(exec.state(), PlaybackState::Idle);
}

#[test]
fn play_single_matches_play_to() {
    let (_a, mut single) = executor(three_points());
    let (_b, mut full) = executor(three_points());
    assert!(pollster::block_on(single.play_single(1)).is_completed());
    assert!(pollster::block_on(full.play_to(2)).is_completed());

    let names = |e: &CommandExecutor| e.registry().names().map(str::to_string).collect::<Vec<_>>();
    assert_eq!(names(&single), names(&full));
    assert_eq!(single.current_index(), full.current_index());
}

#[test]
fn play_single_out_of_range_fails() {
    let (_d, mut exec) = executor(three_points());
    let outcome = pollster::block_on(exec.play_single(3));
    assert!(matches!(outcome, RunOutcome::Failed { index: 3, .. }));
}

#[test]
fn pause_halts_between_commands_and_resume_continues() {
    let (diagram, mut exec) = executor(three_points());
    let control = exec.control();
    exec.on_command_complete(move |_, i| {
        if i == 0 {
            control.pause();
        }
    });

    let outcome = pollster::block_on(exec.play_all());
    assert!(matches!(outcome, RunOutcome::Paused { at: 1 }));
    assert_eq!(exec.state(), PlaybackState::Paused);
    assert_eq!(diagram.borrow().visible_shapes().len(), 1);

    let outcome = pollster::block_on(exec.resume());
    assert!(outcome.is_completed());
    assert_eq!(diagram.borrow().visible_shapes().len(), 3);
}

#[test]
fn stop_during_playback_rewinds() {
    let (_d, mut exec) = executor(three_points());
    let control = exec.control();
    exec.on_command_complete(move |_, _| control.stop());
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let seen = outcomes.clone();
    exec.on_run_complete(move |o| seen.borrow_mut().push(format!("{o:?}")));

    let outcome = pollster::block_on(exec.play_all());
    assert!(matches!(outcome, RunOutcome::Stopped));
    assert_eq!(exec.current_index(), 0);
    assert_eq!(*outcomes.borrow(), vec!["Stopped".to_string()]);
}

#[test]
fn clear_all_removes_every_shape() {
    let (diagram, mut exec) = executor(three_points());
    exec.draw_all().unwrap();
    exec.clear_all();
    assert_eq!(diagram.borrow().shapes().count(), 0);
    assert!(exec.registry().is_empty());
    assert_eq!(exec.current_index(), 0);
    assert!(
        exec.commands()
            .iter()
            .all(|c| c.state() == crate::command::lifecycle::CommandState::Uninit)
    );
}

#[test]
fn graphs_are_drawn_directly_during_playback() {
    let (diagram, mut exec) = executor(vec![
        assign("G", call("g2d", [num(0.0), num(0.0), num(10.0), num(10.0)])),
        assign("P", call("point", [ident("G"), num(1.0), num(1.0)])),
    ]);
    assert!(pollster::block_on(exec.play_all()).is_completed());
    let d = diagram.borrow();
    assert_eq!(creations(&d), 1);
    let g = exec.registry().get("G").unwrap().shape;
    assert_eq!(d.visible_shapes()[0].container, g);
}

/// Backend call as seen by [`Suspending`], in the order it happened.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Draw(ShapeHandle),
    Start(ShapeHandle),
    Settled(ShapeHandle),
    Frame,
    FrameDone,
}

type StepLog = Rc<RefCell<Vec<Step>>>;

/// Wraps a backend future so it returns `Pending` once before polling it.
struct YieldOnce<T> {
    yielded: bool,
    inner: LocalFuture<'static, T>,
    on_first_poll: Option<Box<dyn FnOnce()>>,
    on_ready: Option<Box<dyn FnOnce()>>,
}

impl<T> YieldOnce<T> {
    fn new(inner: LocalFuture<'static, T>, on_ready: impl FnOnce() + 'static) -> Self {
        Self {
            yielded: false,
            inner,
            on_first_poll: None,
            on_ready: Some(Box::new(on_ready)),
        }
    }
}

impl<T> Future for YieldOnce<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        if !self.yielded {
            self.yielded = true;
            if let Some(f) = self.on_first_poll.take() {
                f();
            }
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        let out = std::task::ready!(self.inner.as_mut().poll(cx));
        if let Some(f) = self.on_ready.take() {
            f();
        }
        Poll::Ready(out)
    }
}

/// Recording backend whose animations suspend once before settling.
struct Suspending {
    inner: RecordingDiagram,
    log: StepLog,
    /// Paused from inside the first creation animation.
    pause_in_flight: Option<PlaybackControl>,
}

impl Diagram for Suspending {
    fn root(&mut self, dimension: Dimension) -> GeoResult<ShapeHandle> {
        self.inner.root(dimension)
    }

    fn create_container(&mut self, dimension: Dimension, bounds: Rect) -> GeoResult<ShapeHandle> {
        self.inner.create_container(dimension, bounds)
    }

    fn draw(
        &mut self,
        container: ShapeHandle,
        primitive: &Primitive,
        style: &Style,
    ) -> GeoResult<ShapeHandle> {
        let handle = self.inner.draw(container, primitive, style)?;
        self.log.borrow_mut().push(Step::Draw(handle));
        Ok(handle)
    }

    fn show(&mut self, shape: ShapeHandle) -> GeoResult<()> {
        self.inner.show(shape)
    }

    fn hide(&mut self, shape: ShapeHandle) -> GeoResult<()> {
        self.inner.hide(shape)
    }

    fn destroy(&mut self, shape: ShapeHandle) -> GeoResult<()> {
        self.inner.destroy(shape)
    }

    fn style_of(&self, shape: ShapeHandle) -> GeoResult<Style> {
        self.inner.style_of(shape)
    }

    fn restyle(&mut self, shape: ShapeHandle, style: &Style) -> GeoResult<()> {
        self.inner.restyle(shape, style)
    }

    fn render_end_state(&mut self, shape: ShapeHandle) -> GeoResult<()> {
        self.inner.render_end_state(shape)
    }

    fn play_creation(
        &mut self,
        shape: ShapeHandle,
        duration_secs: f64,
    ) -> LocalFuture<'static, GeoResult<()>> {
        self.log.borrow_mut().push(Step::Start(shape));
        let settled = self.inner.play_creation(shape, duration_secs);
        let log = self.log.clone();
        let mut fut = YieldOnce::new(settled, move || {
            log.borrow_mut().push(Step::Settled(shape));
        });
        if let Some(control) = self.pause_in_flight.take() {
            fut.on_first_poll = Some(Box::new(move || control.pause()));
        }
        Box::pin(fut)
    }

    fn play_move(
        &mut self,
        shape: ShapeHandle,
        from_offset: Vec2,
        duration_secs: f64,
    ) -> LocalFuture<'static, GeoResult<()>> {
        self.inner.play_move(shape, from_offset, duration_secs)
    }

    fn next_frame(&mut self) -> LocalFuture<'static, ()> {
        self.log.borrow_mut().push(Step::Frame);
        let frame = self.inner.next_frame();
        let log = self.log.clone();
        Box::pin(YieldOnce::new(frame, move || log.borrow_mut().push(Step::FrameDone)))
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

fn suspending_executor(
    nodes: Vec<SyntaxNode>,
    playback: PlaybackConfig,
) -> (Rc<RefCell<Suspending>>, CommandExecutor) {
    let lines = nodes
        .into_iter()
        .fold(ProgramBuilder::new(), ProgramBuilder::statement)
        .build()
        .unwrap();
    let diagram = Rc::new(RefCell::new(Suspending {
        inner: RecordingDiagram::new(),
        log: StepLog::default(),
        pause_in_flight: None,
    }));
    let shared: DiagramRef = diagram.clone();
    let config = EngineConfig {
        playback,
        ..EngineConfig::default()
    };
    let pipeline = PipelineService::new(Box::new(JsonSource)).with_config(&config);
    let session = Session::compile(&pipeline, &shared, &lines);
    assert!(session.is_ok(), "{:?}", session.errors);
    (diagram, session.executor)
}

#[test]
fn next_command_waits_for_the_previous_animation() {
    let (diagram, mut exec) = suspending_executor(three_points(), PlaybackConfig::instant());
    assert!(pollster::block_on(exec.play_all()).is_completed());

    let log = diagram.borrow().log.borrow().clone();
    let drawn: Vec<ShapeHandle> = log
        .iter()
        .filter_map(|s| match s {
            Step::Draw(h) => Some(*h),
            _ => None,
        })
        .collect();
    assert_eq!(drawn.len(), 3);
    let expected: Vec<Step> = drawn
        .iter()
        .flat_map(|h| [Step::Draw(*h), Step::Start(*h), Step::Settled(*h)])
        .collect();
    assert_eq!(log, expected);
}

#[test]
fn pause_during_an_animation_lets_it_settle() {
    let (diagram, mut exec) = suspending_executor(three_points(), PlaybackConfig::instant());
    diagram.borrow_mut().pause_in_flight = Some(exec.control());

    let outcome = pollster::block_on(exec.play_all());
    assert!(matches!(outcome, RunOutcome::Paused { at: 1 }));
    {
        let d = diagram.borrow();
        let log = d.log.borrow();
        assert_eq!(log.len(), 3);
        assert!(matches!(log[2], Step::Settled(_)));
        assert_eq!(d.inner.visible_shapes().len(), 1);
    }

    assert!(pollster::block_on(exec.resume()).is_completed());
    assert_eq!(diagram.borrow().inner.visible_shapes().len(), 3);
}

#[test]
fn change_frames_settle_one_at_a_time() {
    let playback = PlaybackConfig {
        change_secs: 0.1,
        ..PlaybackConfig::instant()
    };
    let (diagram, mut exec) = suspending_executor(
        vec![
            assign("A", num(1.0)),
            assign("P", call("point", [ident("A"), num(0.0)])),
            call("change", [ident("A"), num(4.0)]),
        ],
        playback,
    );
    assert!(pollster::block_on(exec.play_all()).is_completed());

    let d = diagram.borrow();
    let frames: Vec<Step> = d
        .log
        .borrow()
        .iter()
        .copied()
        .filter(|s| matches!(s, Step::Frame | Step::FrameDone))
        .collect();
    assert_eq!(
        frames,
        [Step::Frame, Step::FrameDone].repeat(3)
    );
    assert_eq!(d.inner.frames(), 3);
}
