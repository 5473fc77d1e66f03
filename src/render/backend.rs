use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::{
    foundation::core::{Dimension, Rect, Vec2},
    foundation::error::GeoResult,
    options::style::Style,
    render::primitive::Primitive,
};

/// Future returned by animated backend calls. Driven on the caller's thread.
pub type LocalFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Opaque id of a container or shape owned by a [`Diagram`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ShapeHandle(pub u64);

/// Rendering backend contract.
///
/// Containers come from [`Diagram::root`] or [`Diagram::create_container`]; shapes are drawn
/// into a container with [`Diagram::draw`] and start hidden. Animated calls return futures that
/// do not borrow the diagram, so callers release the diagram before awaiting them.
pub trait Diagram {
    /// Default container of the given dimensionality, created on first use.
    fn root(&mut self, dimension: Dimension) -> GeoResult<ShapeHandle>;

    fn create_container(&mut self, dimension: Dimension, bounds: Rect) -> GeoResult<ShapeHandle>;

    fn draw(
        &mut self,
        container: ShapeHandle,
        primitive: &Primitive,
        style: &Style,
    ) -> GeoResult<ShapeHandle>;

    fn show(&mut self, shape: ShapeHandle) -> GeoResult<()>;

    fn hide(&mut self, shape: ShapeHandle) -> GeoResult<()>;

    fn destroy(&mut self, shape: ShapeHandle) -> GeoResult<()>;

    /// Style `shape` is currently presented with.
    fn style_of(&self, shape: ShapeHandle) -> GeoResult<Style>;

    /// Present `shape` with `style` from now on.
    fn restyle(&mut self, shape: ShapeHandle, style: &Style) -> GeoResult<()>;

    /// Jump any running animation of `shape` to its final state.
    fn render_end_state(&mut self, shape: ShapeHandle) -> GeoResult<()>;

    /// Animate the creation of `shape`; it is visible once the future settles.
    fn play_creation(
        &mut self,
        shape: ShapeHandle,
        duration_secs: f64,
    ) -> LocalFuture<'static, GeoResult<()>>;

    /// Animate `shape` from `from_offset` relative to its drawn position back to that position.
    fn play_move(
        &mut self,
        shape: ShapeHandle,
        from_offset: Vec2,
        duration_secs: f64,
    ) -> LocalFuture<'static, GeoResult<()>>;

    /// Resolves after the backend has presented one frame.
    fn next_frame(&mut self) -> LocalFuture<'static, ()>;

    /// Remove every container and shape.
    fn clear(&mut self);
}

impl std::fmt::Debug for dyn Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Diagram")
    }
}

/// Diagram shared by the commands of a session.
pub type DiagramRef = Rc<RefCell<dyn Diagram>>;
