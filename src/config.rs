//! Editor configuration: grid resolutions, zoom limits, asset palette and
//! wander tuning.
//!
//! Every field has a default, so a host can pass a partial JSON document (or
//! none at all). Native hosts can also build the config from `PASTURE_*`
//! environment variables. Either path ends in [`EditorConfig::validate`].

// Negated comparisons so that NaN fails every range check.
#![allow(clippy::neg_cmp_op_on_partial_ord)]

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ARRIVE_DISTANCE, COARSE_CELL, FINE_CELL, GOTO_SPEED, HERD_SIZE, MAX_ZOOM_FACTOR, MEDIUM_CELL, MIN_ZOOM_FACTOR,
    SCALE_FULL, SPAWN_INTERVAL_MS, SPRITE_SCALE, SPRITE_SIZE, WANDER_DELAY_MS, WANDER_EDGE_MARGIN, WANDER_RADIUS,
    WANDER_SPEED, WHEEL_DEAD_ZONE,
};
use crate::piece::{AssetInfo, default_palette};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cell sizes must satisfy coarse > medium > fine > 0 with coarse and medium multiples of fine (got {coarse}/{medium}/{fine})")]
    InvalidCellSizes { coarse: f64, medium: f64, fine: f64 },
    #[error("invalid zoom config: {0}")]
    InvalidZoom(String),
    #[error("asset palette is empty")]
    EmptyPalette,
    #[error("asset `{src}` has an invalid size {w} x {h}")]
    InvalidAsset { src: String, w: f64, h: f64 },
    #[error("invalid wander config: {0}")]
    InvalidWander(String),
}

/// Cell sizes of the three occupancy grids, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub coarse: f64,
    pub medium: f64,
    pub fine: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { coarse: COARSE_CELL, medium: MEDIUM_CELL, fine: FINE_CELL }
    }
}

impl GridConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCellSizes`] unless the sizes are finite,
    /// strictly decreasing, positive, and the fine size divides the others.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { coarse, medium, fine } = *self;
        let finite = coarse.is_finite() && medium.is_finite() && fine.is_finite();
        let ordered = coarse > medium && medium > fine && fine > 0.0;
        if !(finite && ordered && (coarse / fine).fract() == 0.0 && (medium / fine).fract() == 0.0) {
            return Err(ConfigError::InvalidCellSizes { coarse, medium, fine });
        }
        Ok(())
    }
}

/// Discrete zoom parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Zoom step representing 100%.
    pub scale_full: i32,
    /// Lowest scale as a fraction of full.
    pub min_factor: f64,
    /// Highest scale as a multiple of full.
    pub max_factor: f64,
    /// Wheel deltas at or below this magnitude are ignored.
    pub wheel_dead_zone: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            scale_full: SCALE_FULL,
            min_factor: MIN_ZOOM_FACTOR,
            max_factor: MAX_ZOOM_FACTOR,
            wheel_dead_zone: WHEEL_DEAD_ZONE,
        }
    }
}

impl ZoomConfig {
    /// Smallest allowed zoom step.
    #[must_use]
    pub fn min_step(&self) -> f64 {
        f64::from(self.scale_full) * self.min_factor
    }

    /// Largest allowed zoom step.
    #[must_use]
    pub fn max_step(&self) -> f64 {
        f64::from(self.scale_full) * self.max_factor
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidZoom`] when the bounds could admit a zero
    /// scale or exclude the full step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale_full <= 0 {
            return Err(ConfigError::InvalidZoom(format!("scale_full must be positive, got {}", self.scale_full)));
        }
        if !(self.min_factor > 0.0 && self.min_factor <= 1.0) {
            return Err(ConfigError::InvalidZoom(format!("min_factor must be in (0, 1], got {}", self.min_factor)));
        }
        if !(self.max_factor >= 1.0 && self.max_factor.is_finite()) {
            return Err(ConfigError::InvalidZoom(format!("max_factor must be finite and >= 1, got {}", self.max_factor)));
        }
        if !(self.wheel_dead_zone >= 0.0) {
            return Err(ConfigError::InvalidZoom(format!("wheel_dead_zone must be >= 0, got {}", self.wheel_dead_zone)));
        }
        Ok(())
    }
}

/// Tuning for the wandering animals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    pub radius: f64,
    pub edge_margin: f64,
    pub delay_min_ms: f64,
    pub delay_max_ms: f64,
    pub wander_speed: f64,
    pub goto_speed: f64,
    pub arrive_distance: f64,
    pub spawn_interval_ms: f64,
    pub herd_size: usize,
    pub sprite_w: f64,
    pub sprite_h: f64,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            radius: WANDER_RADIUS,
            edge_margin: WANDER_EDGE_MARGIN,
            delay_min_ms: WANDER_DELAY_MS.0,
            delay_max_ms: WANDER_DELAY_MS.1,
            wander_speed: WANDER_SPEED,
            goto_speed: GOTO_SPEED,
            arrive_distance: ARRIVE_DISTANCE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            herd_size: HERD_SIZE,
            sprite_w: SPRITE_SIZE.0 * SPRITE_SCALE,
            sprite_h: SPRITE_SIZE.1 * SPRITE_SCALE,
        }
    }
}

impl WanderConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWander`] for non-positive speeds, an
    /// inverted delay range or a non-positive spawn interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.delay_min_ms >= 0.0 && self.delay_min_ms <= self.delay_max_ms) {
            return Err(ConfigError::InvalidWander(format!(
                "delay range [{}, {}] is invalid",
                self.delay_min_ms, self.delay_max_ms
            )));
        }
        if !(self.wander_speed > 0.0 && self.goto_speed > 0.0) {
            return Err(ConfigError::InvalidWander("speeds must be positive".into()));
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::InvalidWander("spawn_interval_ms must be positive".into()));
        }
        if !(self.sprite_w > 0.0 && self.sprite_h > 0.0 && self.radius >= 0.0 && self.edge_margin >= 0.0) {
            return Err(ConfigError::InvalidWander("sprite size, radius and margin must be positive".into()));
        }
        Ok(())
    }
}

/// Top-level configuration for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridConfig,
    pub zoom: ZoomConfig,
    pub palette: Vec<AssetInfo>,
    pub wander: WanderConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            zoom: ZoomConfig::default(),
            palette: default_palette(),
            wander: WanderConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed or a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        tracing::debug!(palette = config.palette.len(), "editor config loaded from JSON");
        Ok(config)
    }

    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `PASTURE_COARSE_CELL`, `PASTURE_MEDIUM_CELL`, `PASTURE_FINE_CELL`
    /// - `PASTURE_SCALE_FULL`
    /// - `PASTURE_HERD_SIZE`
    /// - `PASTURE_PALETTE`: JSON array of assets
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `PASTURE_PALETTE` is not valid JSON or the
    /// resulting config fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let grid = GridConfig {
            coarse: env_parse("PASTURE_COARSE_CELL", defaults.grid.coarse),
            medium: env_parse("PASTURE_MEDIUM_CELL", defaults.grid.medium),
            fine: env_parse("PASTURE_FINE_CELL", defaults.grid.fine),
        };
        let zoom = ZoomConfig { scale_full: env_parse("PASTURE_SCALE_FULL", defaults.zoom.scale_full), ..defaults.zoom };
        let wander = WanderConfig { herd_size: env_parse("PASTURE_HERD_SIZE", defaults.wander.herd_size), ..defaults.wander };
        let palette = match std::env::var("PASTURE_PALETTE") {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(_) => defaults.palette,
        };

        let config = Self { grid, zoom, palette, wander };
        config.validate()?;
        tracing::debug!(palette = config.palette.len(), "editor config loaded from env");
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found across all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.zoom.validate()?;
        self.wander.validate()?;
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if let Some(bad) = self
            .palette
            .iter()
            .find(|a| !(a.w.is_finite() && a.h.is_finite() && a.w > 0.0 && a.h > 0.0))
        {
            return Err(ConfigError::InvalidAsset { src: bad.src.clone(), w: bad.w, h: bad.h });
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
