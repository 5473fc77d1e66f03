/// Presentation attributes passed through to rendering backends.
///
/// Every field is optional so partial styles can be layered with [`Style::merged`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Style {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Layer `over` on top of `self`; fields set in `over` win.
    pub fn merged(&self, over: &Style) -> Style {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }

        Style {
            color: pick(&self.color, &over.color),
            stroke_width: pick(&self.stroke_width, &over.stroke_width),
            fill: pick(&self.fill, &over.fill),
            font_size: pick(&self.font_size, &over.font_size),
            stroke_opacity: pick(&self.stroke_opacity, &over.stroke_opacity),
            fill_opacity: pick(&self.fill_opacity, &over.fill_opacity),
            radius: pick(&self.radius, &over.radius),
            opacity: pick(&self.opacity, &over.opacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/style.rs"]
mod tests;
