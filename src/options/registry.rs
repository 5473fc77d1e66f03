use std::collections::BTreeMap;

use crate::{expression::value::TypeTag, options::style::Style};

/// Fallback styling for commands.
///
/// Layers, lowest first: built-in type defaults, the palette colour picked by statement index,
/// per-type overrides, then per-statement overrides.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleRegistry {
    /// Colours cycled through by statement index. Empty keeps the type default colour.
    pub palette: Vec<String>,
    pub types: BTreeMap<TypeTag, Style>,
    /// Overrides keyed by statement index.
    pub statements: BTreeMap<usize, Style>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_type(&mut self, tag: TypeTag, style: Style) {
        self.types.insert(tag, style);
    }

    pub fn set_statement(&mut self, index: usize, style: Style) {
        self.statements.insert(index, style);
    }

    pub fn statement(&self, index: usize) -> Option<&Style> {
        self.statements.get(&index)
    }

    /// Style for a command of type `tag` built from the statement at `index`.
    pub fn resolve(&self, tag: TypeTag, index: usize) -> Style {
        let mut style = type_default(tag);
        if !self.palette.is_empty() {
            let color = &self.palette[index % self.palette.len()];
            style = style.merged(&Style::color(color.clone()));
        }
        if let Some(over) = self.types.get(&tag) {
            style = style.merged(over);
        }
        if let Some(over) = self.statements.get(&index) {
            style = style.merged(over);
        }
        style
    }
}

/// Built-in look of each drawable type.
pub fn type_default(tag: TypeTag) -> Style {
    let base = Style::default();
    match tag {
        TypeTag::Point => Style {
            color: Some("red".into()),
            radius: Some(5.0),
            ..base
        },
        TypeTag::Line => Style {
            color: Some("black".into()),
            stroke_width: Some(2.0),
            ..base
        },
        TypeTag::Vector => Style {
            color: Some("blue".into()),
            stroke_width: Some(2.0),
            ..base
        },
        TypeTag::Polygon => Style {
            color: Some("black".into()),
            stroke_width: Some(2.0),
            fill_opacity: Some(0.1),
            ..base
        },
        TypeTag::Label | TypeTag::Table => Style {
            color: Some("black".into()),
            font_size: Some(24.0),
            ..base
        },
        TypeTag::Point3d => Style {
            color: Some("#ff0000".into()),
            radius: Some(0.12),
            ..base
        },
        TypeTag::Line3d => Style {
            color: Some("black".into()),
            stroke_width: Some(0.06),
            ..base
        },
        TypeTag::Vector3d => Style {
            color: Some("blue".into()),
            stroke_width: Some(0.05),
            ..base
        },
        TypeTag::Plane3d => Style {
            color: Some("cyan".into()),
            opacity: Some(0.5),
            ..base
        },
        TypeTag::Label3d => Style {
            color: Some("black".into()),
            font_size: Some(32.0),
            ..base
        },
        _ => base,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/registry.rs"]
mod tests;
