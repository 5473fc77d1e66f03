use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::command::behavior::ShapeCommand;
use crate::config::PlaybackConfig;
use crate::expression::context::ExpressionContext;
use crate::expression::value::Value;
use crate::render::recording::{DrawEvent, RecordingDiagram};

fn context() -> (Rc<RefCell<RecordingDiagram>>, CommandContext) {
    let diagram = Rc::new(RefCell::new(RecordingDiagram::new()));
    let ctx = CommandContext::new(
        diagram.clone(),
        ExpressionContext::new(),
        PlaybackConfig::instant(),
    );
    (diagram, ctx)
}

fn point_command(index: usize, label: Option<&str>) -> Command {
    Command::new(
        StatementId::from_index(index),
        index,
        TypeTag::Point,
        Box::new(ShapeCommand::new(Value::point(1.0, 2.0))),
    )
    .with_label(label.map(str::to_string))
}

fn draws(diagram: &RecordingDiagram) -> usize {
    diagram
        .events()
        .iter()
        .filter(|e| matches!(e, DrawEvent::Draw { .. }))
        .count()
}

#[test]
fn init_runs_once_and_registers_the_label() {
    let (diagram, mut ctx) = context();
    let mut cmd = point_command(0, Some("P"));
    cmd.init(&mut ctx).unwrap();
    cmd.init(&mut ctx).unwrap();
    assert_eq!(cmd.state(), CommandState::Init);
    assert_eq!(draws(&diagram.borrow()), 1);
    let shape = cmd.shape().unwrap();
    assert_eq!(ctx.registry.get("P").map(|e| e.shape), Some(shape));
    assert_eq!(ctx.shape_of(cmd.id()), Some(shape));
    assert!(!diagram.borrow().shape(shape).unwrap().visible);
}

#[test]
fn play_requires_init() {
    let (_diagram, mut ctx) = context();
    let mut cmd = point_command(2, None);
    let err = pollster::block_on(cmd.play(&mut ctx)).unwrap_err();
    assert!(matches!(err, GeoError::Statement { statement, .. } if statement == StatementId(2)));
    assert!(err.to_string().contains("play before init"));
}

#[test]
fn play_animates_then_shows() {
    let (diagram, mut ctx) = context();
    let mut cmd = point_command(0, None).with_duration(0.25);
    cmd.init(&mut ctx).unwrap();
    pollster::block_on(cmd.play(&mut ctx)).unwrap();
    assert_eq!(cmd.state(), CommandState::Played);
    let d = diagram.borrow();
    assert!(d.shape(cmd.shape().unwrap()).unwrap().visible);
    assert!(d
        .events()
        .iter()
        .any(|e| matches!(e, DrawEvent::Creation { duration, .. } if *duration == 0.25)));
}

#[test]
fn direct_play_is_idempotent() {
    let (diagram, mut ctx) = context();
    let mut cmd = point_command(0, Some("P"));
    cmd.direct_play(&mut ctx).unwrap();
    cmd.direct_play(&mut ctx).unwrap();
    assert_eq!(cmd.state(), CommandState::Played);
    assert_eq!(diagram.borrow().visible_shapes().len(), 1);
    assert_eq!(draws(&diagram.borrow()), 1);
}

#[test]
fn clear_returns_to_uninit() {
    let (diagram, mut ctx) = context();
    let mut cmd = point_command(0, Some("P"));
    cmd.direct_play(&mut ctx).unwrap();
    cmd.clear(&mut ctx);
    assert_eq!(cmd.state(), CommandState::Uninit);
    assert!(cmd.shape().is_none());
    assert!(ctx.registry.get("P").is_none());
    assert_eq!(diagram.borrow().shapes().count(), 0);
    // Clearing twice is harmless.
    cmd.clear(&mut ctx);
}

#[test]
fn clearing_a_replaced_label_keeps_the_new_owner() {
    let (_diagram, mut ctx) = context();
    let mut first = point_command(0, Some("P"));
    let mut second = point_command(1, Some("P"));
    first.init(&mut ctx).unwrap();
    second.init(&mut ctx).unwrap();
    first.clear(&mut ctx);
    assert_eq!(
        ctx.registry.get("P").map(|e| e.owner),
        Some(StatementId(1))
    );
}

#[test]
fn create_errors_carry_the_statement() {
    let (_diagram, mut ctx) = context();
    let mut cmd = Command::new(
        StatementId(5),
        5,
        TypeTag::Number,
        Box::new(ShapeCommand::new(Value::Number(1.0))),
    );
    let err = cmd.init(&mut ctx).unwrap_err();
    assert!(err.to_string().starts_with("statement #5:"));
    assert_eq!(cmd.state(), CommandState::Uninit);
}
