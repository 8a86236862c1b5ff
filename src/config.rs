//! Viewport configuration: zoom bounds, tile asset, and input tuning.
//!
//! Hosts either pass a JSON blob ([`ViewportConfig::from_json`]) or, on native
//! builds, overlay `PINBOARD_*` environment variables on the defaults
//! ([`ViewportConfig::from_env`]). Both paths validate before returning.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    ANCHOR_MARGIN, MAX_SCALE, MIN_SCALE, PAN_INTERVAL_MS, SCALE_STEP, TILE_ASSET_PATH, TILE_WIDTH, WHEEL_NOTCH,
};
use crate::error::ViewportError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Lower zoom bound.
    pub min_scale: f64,
    /// Upper zoom bound.
    pub max_scale: f64,
    /// Scale change per zoom step.
    pub scale_step: f64,
    /// Longer side of a background tile at scale 1.0.
    pub tile_width: f64,
    /// Path of the background texture.
    pub tile_asset_path: String,
    /// Minimum milliseconds between committed pan steps.
    pub pan_interval_ms: f64,
    /// Slack between the initial top/left anchors and the viewport edge.
    pub anchor_margin: f64,
    /// Raw wheel delta of one notch.
    pub wheel_notch: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            scale_step: SCALE_STEP,
            tile_width: TILE_WIDTH,
            tile_asset_path: TILE_ASSET_PATH.to_string(),
            pan_interval_ms: PAN_INTERVAL_MS,
            anchor_margin: ANCHOR_MARGIN,
            wheel_notch: WHEEL_NOTCH,
        }
    }
}

impl ViewportConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidConfig`] if the JSON is malformed or the
    /// resulting values fail [`ViewportConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ViewportError> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| ViewportError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build a config from environment variables over the defaults.
    ///
    /// Optional:
    /// - `PINBOARD_MIN_SCALE`, `PINBOARD_MAX_SCALE`, `PINBOARD_SCALE_STEP`
    /// - `PINBOARD_TILE_WIDTH`, `PINBOARD_TILE_ASSET`
    /// - `PINBOARD_PAN_INTERVAL_MS`, `PINBOARD_ANCHOR_MARGIN`, `PINBOARD_WHEEL_NOTCH`
    ///
    /// Unparseable numbers fall back to the default for that field.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidConfig`] if the combined values fail validation.
    pub fn from_env() -> Result<Self, ViewportError> {
        let defaults = Self::default();
        let cfg = Self {
            min_scale: env_parse("PINBOARD_MIN_SCALE", defaults.min_scale),
            max_scale: env_parse("PINBOARD_MAX_SCALE", defaults.max_scale),
            scale_step: env_parse("PINBOARD_SCALE_STEP", defaults.scale_step),
            tile_width: env_parse("PINBOARD_TILE_WIDTH", defaults.tile_width),
            tile_asset_path: std::env::var("PINBOARD_TILE_ASSET").unwrap_or(defaults.tile_asset_path),
            pan_interval_ms: env_parse("PINBOARD_PAN_INTERVAL_MS", defaults.pan_interval_ms),
            anchor_margin: env_parse("PINBOARD_ANCHOR_MARGIN", defaults.anchor_margin),
            wheel_notch: env_parse("PINBOARD_WHEEL_NOTCH", defaults.wheel_notch),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that the values describe a usable viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ViewportError> {
        let positive = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("scale_step", self.scale_step),
            ("tile_width", self.tile_width),
            ("wheel_notch", self.wheel_notch),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ViewportError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        if self.min_scale > self.max_scale {
            return Err(ViewportError::InvalidConfig(format!(
                "min_scale {} exceeds max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if !self.pan_interval_ms.is_finite() || self.pan_interval_ms < 0.0 {
            return Err(ViewportError::InvalidConfig(format!(
                "pan_interval_ms must be non-negative, got {}",
                self.pan_interval_ms
            )));
        }
        if !self.anchor_margin.is_finite() || self.anchor_margin < 0.0 {
            return Err(ViewportError::InvalidConfig(format!(
                "anchor_margin must be non-negative, got {}",
                self.anchor_margin
            )));
        }
        if self.tile_asset_path.trim().is_empty() {
            return Err(ViewportError::InvalidConfig("tile_asset_path is empty".into()));
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
