use std::collections::BTreeMap;
use std::future;

use crate::{
    foundation::core::{Dimension, Rect, Vec2},
    foundation::error::{GeoError, GeoResult},
    options::style::Style,
    render::backend::{Diagram, LocalFuture, ShapeHandle},
    render::primitive::Primitive,
};

/// One call made against a [`RecordingDiagram`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DrawEvent {
    Container {
        handle: ShapeHandle,
        dimension: Dimension,
        bounds: [f64; 4],
        root: bool,
    },
    Draw {
        handle: ShapeHandle,
        container: ShapeHandle,
        primitive: Primitive,
        style: Style,
    },
    Show {
        handle: ShapeHandle,
    },
    Hide {
        handle: ShapeHandle,
    },
    Destroy {
        handle: ShapeHandle,
    },
    EndState {
        handle: ShapeHandle,
    },
    Restyle {
        handle: ShapeHandle,
        style: Style,
    },
    Creation {
        handle: ShapeHandle,
        duration: f64,
    },
    Move {
        handle: ShapeHandle,
        from: [f64; 2],
        duration: f64,
    },
    Frame,
    Clear,
}

/// A shape currently alive on a [`RecordingDiagram`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RecordedShape {
    pub handle: ShapeHandle,
    pub container: ShapeHandle,
    pub primitive: Primitive,
    pub style: Style,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct RecordedContainer {
    dimension: Dimension,
    visible: bool,
}

/// In-memory backend for tests and the CLI. Every call is appended to an event log and the
/// live scene can be queried.
#[derive(Debug, Default)]
pub struct RecordingDiagram {
    next: u64,
    roots: BTreeMap<u8, ShapeHandle>,
    containers: BTreeMap<ShapeHandle, RecordedContainer>,
    shapes: BTreeMap<ShapeHandle, RecordedShape>,
    events: Vec<DrawEvent>,
    frames: u64,
}

fn dimension_key(dimension: Dimension) -> u8 {
    match dimension {
        Dimension::Two => 2,
        Dimension::Three => 3,
    }
}

impl RecordingDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DrawEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn shape(&self, handle: ShapeHandle) -> Option<&RecordedShape> {
        self.shapes.get(&handle)
    }

    /// Live shapes in creation order.
    pub fn shapes(&self) -> impl Iterator<Item = &RecordedShape> {
        self.shapes.values()
    }

    pub fn visible_shapes(&self) -> Vec<&RecordedShape> {
        self.shapes.values().filter(|s| s.visible).collect()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Dimensionality and visibility of a live container.
    pub fn container(&self, handle: ShapeHandle) -> Option<(Dimension, bool)> {
        self.containers
            .get(&handle)
            .map(|c| (c.dimension, c.visible))
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn allocate(&mut self) -> ShapeHandle {
        self.next += 1;
        ShapeHandle(self.next)
    }

    fn shape_mut(&mut self, handle: ShapeHandle) -> GeoResult<&mut RecordedShape> {
        self.shapes
            .get_mut(&handle)
            .ok_or_else(|| GeoError::render(format!("unknown shape {}", handle.0)))
    }

    fn set_visible(&mut self, handle: ShapeHandle, visible: bool) -> GeoResult<()> {
        if let Some(c) = self.containers.get_mut(&handle) {
            c.visible = visible;
            return Ok(());
        }
        self.shape_mut(handle)?.visible = visible;
        Ok(())
    }

    fn add_container(&mut self, dimension: Dimension, bounds: Rect, root: bool) -> ShapeHandle {
        let handle = self.allocate();
        self.containers.insert(
            handle,
            RecordedContainer {
                dimension,
                visible: root,
            },
        );
        self.events.push(DrawEvent::Container {
            handle,
            dimension,
            bounds: [bounds.x0, bounds.y0, bounds.width(), bounds.height()],
            root,
        });
        handle
    }
}

impl Diagram for RecordingDiagram {
    fn root(&mut self, dimension: Dimension) -> GeoResult<ShapeHandle> {
        let key = dimension_key(dimension);
        if let Some(handle) = self.roots.get(&key) {
            return Ok(*handle);
        }
        let handle = self.add_container(dimension, Rect::ZERO, true);
        self.roots.insert(key, handle);
        Ok(handle)
    }

    fn create_container(&mut self, dimension: Dimension, bounds: Rect) -> GeoResult<ShapeHandle> {
        Ok(self.add_container(dimension, bounds, false))
    }

    fn draw(
        &mut self,
        container: ShapeHandle,
        primitive: &Primitive,
        style: &Style,
    ) -> GeoResult<ShapeHandle> {
        if !self.containers.contains_key(&container) {
            return Err(GeoError::render(format!(
                "unknown container {}",
                container.0
            )));
        }
        let handle = self.allocate();
        self.shapes.insert(
            handle,
            RecordedShape {
                handle,
                container,
                primitive: primitive.clone(),
                style: style.clone(),
                visible: false,
            },
        );
        self.events.push(DrawEvent::Draw {
            handle,
            container,
            primitive: primitive.clone(),
            style: style.clone(),
        });
        Ok(handle)
    }

    fn show(&mut self, shape: ShapeHandle) -> GeoResult<()> {
        self.set_visible(shape, true)?;
        self.events.push(DrawEvent::Show { handle: shape });
        Ok(())
    }

    fn hide(&mut self, shape: ShapeHandle) -> GeoResult<()> {
        self.set_visible(shape, false)?;
        self.events.push(DrawEvent::Hide { handle: shape });
        Ok(())
    }

    fn destroy(&mut self, shape: ShapeHandle) -> GeoResult<()> {
        if self.containers.remove(&shape).is_some() {
            self.shapes.retain(|_, s| s.container != shape);
            self.roots.retain(|_, h| *h != shape);
        } else if self.shapes.remove(&shape).is_none() {
            return Err(GeoError::render(format!("unknown shape {}", shape.0)));
        }
        self.events.push(DrawEvent::Destroy { handle: shape });
        Ok(())
    }

    fn style_of(&self, shape: ShapeHandle) -> GeoResult<Style> {
        self.shapes
            .get(&shape)
            .map(|s| s.style.clone())
            .ok_or_else(|| GeoError::render(format!("unknown shape {}", shape.0)))
    }

    fn restyle(&mut self, shape: ShapeHandle, style: &Style) -> GeoResult<()> {
        self.shape_mut(shape)?.style = style.clone();
        self.events.push(DrawEvent::Restyle {
            handle: shape,
            style: style.clone(),
        });
        Ok(())
    }

    fn render_end_state(&mut self, shape: ShapeHandle) -> GeoResult<()> {
        if !self.containers.contains_key(&shape) {
            self.shape_mut(shape)?;
        }
        self.events.push(DrawEvent::EndState { handle: shape });
        Ok(())
    }

    fn play_creation(
        &mut self,
        shape: ShapeHandle,
        duration_secs: f64,
    ) -> LocalFuture<'static, GeoResult<()>> {
        let result = self.set_visible(shape, true);
        if result.is_ok() {
            self.events.push(DrawEvent::Creation {
                handle: shape,
                duration: duration_secs,
            });
        }
        Box::pin(future::ready(result))
    }

    fn play_move(
        &mut self,
        shape: ShapeHandle,
        from_offset: Vec2,
        duration_secs: f64,
    ) -> LocalFuture<'static, GeoResult<()>> {
        let result = self.set_visible(shape, true);
        if result.is_ok() {
            self.events.push(DrawEvent::Move {
                handle: shape,
                from: [from_offset.x, from_offset.y],
                duration: duration_secs,
            });
        }
        Box::pin(future::ready(result))
    }

    fn next_frame(&mut self) -> LocalFuture<'static, ()> {
        self.frames += 1;
        self.events.push(DrawEvent::Frame);
        Box::pin(future::ready(()))
    }

    fn clear(&mut self) {
        self.roots.clear();
        self.containers.clear();
        self.shapes.clear();
        self.events.push(DrawEvent::Clear);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
