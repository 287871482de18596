//! Tunable constants for the rendering pipeline.
//!
//! None of these values are load-bearing for correctness; they control
//! perceived smoothness and per-frame cost. They are therefore exposed as
//! configuration with documented defaults instead of hard-coded constants,
//! and may be overridden from a TOML file.

use std::path::Path;

use anyhow::{Context as _, Result as AnyResult};
use serde::Deserialize;
use starweave_core::ViewMode;

/// Tunables consumed by the renderer pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Lower bound for the camera zoom target.
    pub min_zoom: f32,
    /// Upper bound for the camera zoom target.
    pub max_zoom: f32,
    /// Fraction of the remaining zoom delta applied per frame.
    pub zoom_damping: f32,
    /// Remaining delta below which zoom snaps exactly to its target.
    pub zoom_snap_epsilon: f32,
    /// World-units margin added around the visible viewport rectangle.
    pub viewport_padding: f32,
    /// Hover re-evaluation runs on every Nth pointer-move event.
    pub hover_throttle_divisor: u32,
    /// Camera movement in screen pixels that marks the game layer dirty.
    pub dirty_pan_threshold: f32,
    /// Fractional zoom change that marks the game layer dirty.
    pub dirty_zoom_threshold: f32,
    /// A game-layer redraw is forced every Nth frame to keep animations moving.
    pub animation_tick_interval: u64,
    /// Default zoom applied when entering universe view.
    pub universe_zoom: f32,
    /// Default zoom applied when entering galaxy view.
    pub galaxy_zoom: f32,
    /// Default zoom applied when entering system view.
    pub system_zoom: f32,
    /// Default zoom applied when entering planet view.
    pub planet_zoom: f32,
    /// Hit radius in screen pixels for portal endpoints; intentionally
    /// larger than their visual size to ease pointer precision.
    pub portal_hit_radius: f32,
    /// Hit radius in screen pixels for star systems.
    pub system_hit_radius: f32,
    /// Hit radius in screen pixels for planet markers in system view.
    pub planet_hit_radius: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.2,
            max_zoom: 8.0,
            zoom_damping: 0.18,
            zoom_snap_epsilon: 1e-3,
            viewport_padding: 50.0,
            hover_throttle_divisor: 2,
            dirty_pan_threshold: 2.0,
            dirty_zoom_threshold: 0.01,
            animation_tick_interval: 8,
            universe_zoom: 0.5,
            galaxy_zoom: 1.0,
            system_zoom: 1.0,
            planet_zoom: 1.0,
            portal_hit_radius: 14.0,
            system_hit_radius: 12.0,
            planet_hit_radius: 16.0,
        }
    }
}

impl RendererConfig {
    /// Parses a configuration override from TOML contents.
    ///
    /// Unknown keys are rejected so typos in override files surface early.
    pub fn from_toml_str(contents: &str) -> AnyResult<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse renderer config toml contents")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration override from the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> AnyResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read renderer config at {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom <= 0.0 || self.max_zoom <= self.min_zoom {
            return Err(ConfigError::InvalidZoomRange {
                min_zoom: self.min_zoom,
                max_zoom: self.max_zoom,
            });
        }
        if !(0.0..=1.0).contains(&self.zoom_damping) || self.zoom_damping == 0.0 {
            return Err(ConfigError::InvalidDamping {
                zoom_damping: self.zoom_damping,
            });
        }
        if self.hover_throttle_divisor == 0 {
            return Err(ConfigError::ZeroDivisor {
                field: "hover_throttle_divisor",
            });
        }
        if self.animation_tick_interval == 0 {
            return Err(ConfigError::ZeroDivisor {
                field: "animation_tick_interval",
            });
        }
        Ok(())
    }

    /// Default zoom applied when entering the provided view mode.
    #[must_use]
    pub const fn default_zoom(&self, mode: ViewMode) -> f32 {
        match mode {
            ViewMode::Universe => self.universe_zoom,
            ViewMode::Galaxy => self.galaxy_zoom,
            ViewMode::System => self.system_zoom,
            ViewMode::Planet => self.planet_zoom,
        }
    }
}

/// Errors produced when a configuration override fails validation.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The zoom range is empty or non-positive.
    #[error("zoom range [{min_zoom}, {max_zoom}] must satisfy 0 < min < max")]
    InvalidZoomRange {
        /// Configured lower zoom bound.
        min_zoom: f32,
        /// Configured upper zoom bound.
        max_zoom: f32,
    },
    /// The zoom damping factor falls outside `(0, 1]`.
    #[error("zoom_damping {zoom_damping} must lie in (0, 1]")]
    InvalidDamping {
        /// Configured damping factor.
        zoom_damping: f32,
    },
    /// A divisor-style field was configured as zero.
    #[error("{field} must be positive")]
    ZeroDivisor {
        /// Name of the offending field.
        field: &'static str,
    },
}
