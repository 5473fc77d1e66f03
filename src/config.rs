use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::ease::Ease,
    foundation::error::{GeoError, GeoResult},
    options::registry::StyleRegistry,
};

/// Timing of animated playback.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Seconds a creation animation lasts.
    pub creation_secs: f64,
    /// Seconds a `change` lasts when the statement gives no duration.
    pub change_secs: f64,
    pub fps: u32,
    pub ease: Ease,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            creation_secs: 0.8,
            change_secs: 0.8,
            fps: 30,
            ease: Ease::InOutQuad,
        }
    }
}

impl PlaybackConfig {
    /// Playback where every animation collapses to a single frame.
    pub fn instant() -> Self {
        Self {
            creation_secs: 0.0,
            change_secs: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> GeoResult<()> {
        if self.fps == 0 {
            return Err(GeoError::config("fps must be > 0"));
        }
        if !(self.creation_secs.is_finite() && self.creation_secs >= 0.0) {
            return Err(GeoError::config("creation_secs must be a finite, non-negative number"));
        }
        if !(self.change_secs.is_finite() && self.change_secs >= 0.0) {
            return Err(GeoError::config("change_secs must be a finite, non-negative number"));
        }
        Ok(())
    }
}

/// Engine settings loaded from JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub playback: PlaybackConfig,
    pub styles: StyleRegistry,
}

impl EngineConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> GeoResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| GeoError::config(format!("parse engine config JSON: {e}")))?;
        cfg.playback.validate()?;
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> GeoResult<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> GeoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GeoError::config(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
