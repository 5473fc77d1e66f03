use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::config::{EngineConfig, PlaybackConfig};
use crate::render::recording::{DrawEvent, RecordingDiagram};
use crate::syntax::build::{ProgramBuilder, assign, call, num};
use crate::syntax::node::SyntaxNode;
use crate::syntax::source::JsonSource;

fn controller() -> (Rc<RefCell<RecordingDiagram>>, DrawController) {
    let diagram = Rc::new(RefCell::new(RecordingDiagram::new()));
    let config = EngineConfig {
        playback: PlaybackConfig::instant(),
        ..EngineConfig::default()
    };
    let pipeline = PipelineService::new(Box::new(JsonSource)).with_config(&config);
    let shared: DiagramRef = diagram.clone();
    (diagram, DrawController::new(pipeline, shared))
}

fn program(nodes: Vec<SyntaxNode>) -> Vec<String> {
    nodes
        .into_iter()
        .fold(ProgramBuilder::new(), ProgramBuilder::statement)
        .build()
        .unwrap()
}

fn points(n: usize) -> Vec<String> {
    program(
        (0..n)
            .map(|i| assign(format!("P{i}"), call("point", [num(i as f64), num(0.0)])))
            .collect(),
    )
}

fn creations(diagram: &RecordingDiagram) -> usize {
    diagram
        .events()
        .iter()
        .filter(|e| matches!(e, DrawEvent::Creation { .. }))
        .count()
}

#[test]
fn compile_draws_the_program() {
    let (diagram, mut ctl) = controller();
    let errors = ctl.compile(&points(2)).unwrap();
    assert!(errors.is_empty());
    assert_eq!(diagram.borrow().visible_shapes().len(), 2);
    assert_eq!(ctl.session().unwrap().executor.len(), 2);
}

#[test]
fn failed_compile_keeps_the_previous_drawing() {
    let (diagram, mut ctl) = controller();
    ctl.compile(&points(2)).unwrap();
    let broken = program(vec![call("bogus", [num(1.0)])]);
    let errors = ctl.compile(&broken).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].index, 0);
    assert_eq!(diagram.borrow().visible_shapes().len(), 2);
    assert_eq!(ctl.session().unwrap().executor.len(), 2);
}

#[test]
fn recompiling_replaces_the_old_shapes() {
    let (diagram, mut ctl) = controller();
    ctl.compile(&points(3)).unwrap();
    ctl.compile(&points(1)).unwrap();
    assert_eq!(diagram.borrow().shapes().count(), 1);
}

#[test]
fn play_all_animates_from_blank() {
    let (diagram, mut ctl) = controller();
    ctl.compile(&points(2)).unwrap();
    diagram.borrow_mut().take_events();
    let outcome = pollster::block_on(ctl.play_all()).unwrap();
    assert!(outcome.is_completed());
    let d = diagram.borrow();
    assert_eq!(creations(&d), 2);
    assert_eq!(d.visible_shapes().len(), 2);
}

#[test]
fn play_up_to_stops_after_the_index() {
    let (diagram, mut ctl) = controller();
    ctl.compile(&points(3)).unwrap();
    assert!(pollster::block_on(ctl.play_up_to(1)).unwrap().is_completed());
    assert_eq!(diagram.borrow().visible_shapes().len(), 2);
    assert_eq!(ctl.session().unwrap().executor.current_index(), 2);
}

#[test]
fn play_single_draws_earlier_commands_instantly() {
    let (diagram, mut ctl) = controller();
    ctl.compile(&points(3)).unwrap();
    diagram.borrow_mut().take_events();
    assert!(pollster::block_on(ctl.play_single(2)).unwrap().is_completed());
    let d = diagram.borrow();
    assert_eq!(creations(&d), 1);
    assert_eq!(d.visible_shapes().len(), 3);
}

#[test]
fn stop_shows_the_finished_program() {
    let (diagram, mut ctl) = controller();
    ctl.compile(&points(3)).unwrap();
    pollster::block_on(ctl.play_up_to(0)).unwrap();
    ctl.stop().unwrap();
    assert_eq!(diagram.borrow().visible_shapes().len(), 3);
}

#[test]
fn playback_needs_a_compiled_program() {
    let (_diagram, mut ctl) = controller();
    assert!(pollster::block_on(ctl.play_all()).is_err());
    assert!(ctl.stop().is_err());
}
