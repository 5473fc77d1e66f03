//! geoscript is a reactive interpreter for a small geometry language.
//!
//! Each statement is parsed by a [`SyntaxSource`], resolved into a typed [`Value`] against an
//! [`ExpressionContext`] that tracks which statements read which variables, and turned into a
//! replayable [`Command`] drawn on a [`Diagram`]:
//!
//! - [`PipelineService`] compiles a program statement by statement, isolating failures
//! - [`CommandExecutor`] draws instantly or plays animations in order, with pause and resume
//! - [`DrawController`] and [`StepController`] drive whole-program and step-through playback
//!
//! `change(A, target)` animates a variable and recomputes every statement that depends on it in
//! topological order.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod change;
pub(crate) mod command;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod execute;
pub(crate) mod expression;
pub(crate) mod options;
pub(crate) mod pipeline;
pub(crate) mod render;
/// Syntax trees and the sources that produce them.
pub mod syntax;

pub use crate::foundation::core::{Dimension, Point, Point3, Rect, StatementId, Vec2, Vec3};
pub use crate::foundation::error::{GeoError, GeoResult};

pub use crate::animation::ease::{Ease, Lerp};
pub use crate::change::plan::{ChangePlan, ChangeRequest, change};
pub use crate::change::strategy::{ChangeStrategy, StrategyRegistry};
pub use crate::command::behavior::{CommandBehavior, GraphCommand, ReferenceCommand, ShapeCommand};
pub use crate::command::build::{behavior_for, command_for};
pub use crate::command::change::ChangeCommand;
pub use crate::command::context::{CommandContext, RegistryEntry, ShapeRegistry};
pub use crate::command::lifecycle::{Command, CommandState};
pub use crate::command::restyle::RestyleCommand;
pub use crate::command::shift::ShiftCommand;
pub use crate::command::visibility::VisibilityCommand;
pub use crate::config::{EngineConfig, PlaybackConfig};
pub use crate::controller::draw::DrawController;
pub use crate::controller::session::Session;
pub use crate::controller::step::{StepController, StepState};
pub use crate::execute::control::{PlaybackControl, PlaybackState};
pub use crate::execute::executor::{CommandExecutor, RunOutcome};
pub use crate::expression::algebra::BinaryOp;
pub use crate::expression::args::{Arg, CallArgs, GraphArg, Split};
pub use crate::expression::context::{ExpressionContext, Scope, StatementRecord};
pub use crate::expression::expr::{Constructor, Expression};
pub use crate::expression::interpreter::{Factory, Form, FunctionTable, Interpreter};
pub use crate::expression::value::{
    GraphGeom, Label3Geom, LabelGeom, Plane, RestyleOp, Segment, Segment3, Shape, ShiftValue,
    TableGeom, TypeTag, Value, VisibilityOp,
};
pub use crate::options::registry::{StyleRegistry, type_default};
pub use crate::options::style::Style;
pub use crate::pipeline::service::{BatchResult, PipelineService, StatementError};
pub use crate::render::backend::{Diagram, DiagramRef, LocalFuture, ShapeHandle};
pub use crate::render::primitive::Primitive;
pub use crate::render::recording::{DrawEvent, RecordedShape, RecordingDiagram};
pub use crate::syntax::node::{LiteralValue, SyntaxNode};
pub use crate::syntax::source::{JsonSource, SyntaxSource};
