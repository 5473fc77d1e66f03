use std::collections::BTreeMap;

use crate::{
    config::PlaybackConfig,
    expression::context::ExpressionContext,
    expression::value::TypeTag,
    foundation::core::{Dimension, StatementId},
    foundation::error::{GeoError, GeoResult},
    render::backend::{DiagramRef, ShapeHandle},
};

/// A named shape on the diagram and the statement that drew it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    pub shape: ShapeHandle,
    pub owner: StatementId,
    pub tag: TypeTag,
}

/// Variable name to drawn shape.
#[derive(Clone, Debug, Default)]
pub struct ShapeRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entry` under `name`, returning the entry it replaces.
    pub fn insert(&mut self, name: impl Into<String>, entry: RegistryEntry) -> Option<RegistryEntry> {
        self.entries.insert(name.into(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove `name` only while `owner` still owns it.
    pub fn remove_owned(&mut self, name: &str, owner: StatementId) -> bool {
        match self.entries.get(name) {
            Some(e) if e.owner == owner => {
                self.entries.remove(name);
                true
            }
            _ => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State shared by every command of one compile: the diagram, named shapes, the expression
/// context the program was resolved in, and playback timing.
pub struct CommandContext {
    pub diagram: DiagramRef,
    pub registry: ShapeRegistry,
    pub expressions: ExpressionContext,
    pub playback: PlaybackConfig,
    drawn: BTreeMap<StatementId, ShapeHandle>,
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("registry", &self.registry)
            .field("playback", &self.playback)
            .field("drawn", &self.drawn)
            .finish_non_exhaustive()
    }
}

impl CommandContext {
    pub fn new(
        diagram: DiagramRef,
        expressions: ExpressionContext,
        playback: PlaybackConfig,
    ) -> Self {
        Self {
            diagram,
            registry: ShapeRegistry::new(),
            expressions,
            playback,
            drawn: BTreeMap::new(),
        }
    }

    /// Container for a shape: the named graph when given, else the diagram root.
    pub fn container_for(
        &mut self,
        graph: Option<&str>,
        dimension: Dimension,
    ) -> GeoResult<ShapeHandle> {
        let Some(name) = graph else {
            return self.diagram.borrow_mut().root(dimension);
        };
        let want = match dimension {
            Dimension::Two => TypeTag::G2d,
            Dimension::Three => TypeTag::G3d,
        };
        match self.registry.get(name) {
            Some(e) if e.tag == want => Ok(e.shape),
            Some(e) => Err(GeoError::command(format!(
                "'{name}' is a {}, not a {want}",
                e.tag
            ))),
            None => Err(GeoError::command(format!("graph '{name}' is not drawn"))),
        }
    }

    /// Shape drawn by the statement `id`, if it drew one.
    pub fn shape_of(&self, id: StatementId) -> Option<ShapeHandle> {
        self.drawn.get(&id).copied()
    }

    pub(crate) fn record_drawn(&mut self, id: StatementId, shape: ShapeHandle) {
        self.drawn.insert(id, shape);
    }

    pub(crate) fn forget_drawn(&mut self, id: StatementId) {
        self.drawn.remove(&id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/context.rs"]
mod tests;
