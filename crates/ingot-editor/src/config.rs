//! Viewport configuration.
//!
//! Loaded from JSON (every field optional) and validated on the way in.
//! `ViewConfig::default()` is always valid.

use ingot_core::{KEY_STEP, MAX_ZOOM, MIN_ZOOM, Size, ZOOM_STEP};
use ingot_render::CanvasTheme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Zoom limits must be positive, got [{min}, {max}]")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("Zoom step must be greater than 1.0, got {0}")]
    InvalidZoomStep(f64),

    #[error("Key step must be positive, got {0}")]
    InvalidKeyStep(f64),

    #[error("Minimum viewport size must be positive, got {width}x{height}")]
    InvalidMinSize { width: f64, height: f64 },

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Factor per wheel notch or zoom key press.
    pub zoom_step: f64,
    /// Arrow-key step base at zoom 1.0.
    pub key_step: f64,
    /// Initial crosshair visibility.
    pub scope_visible: bool,
    pub min_width: f64,
    pub min_height: f64,
    pub theme: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            key_step: KEY_STEP,
            scope_visible: true,
            min_width: 400.0,
            min_height: 300.0,
            theme: "dark".to_string(),
        }
    }
}

impl ViewConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field; swaps a reversed zoom range into order.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !(min > 0.0 && max > 0.0 && min.is_finite() && max.is_finite()) {
            return Err(ConfigError::InvalidZoomRange { min, max });
        }
        if min > max {
            self.min_zoom = max;
            self.max_zoom = min;
        }
        if !(self.zoom_step > 1.0 && self.zoom_step.is_finite()) {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }
        if !(self.key_step > 0.0 && self.key_step.is_finite()) {
            return Err(ConfigError::InvalidKeyStep(self.key_step));
        }
        if !(self.min_width > 0.0 && self.min_height > 0.0) {
            return Err(ConfigError::InvalidMinSize {
                width: self.min_width,
                height: self.min_height,
            });
        }
        if CanvasTheme::by_name(&self.theme).is_none() {
            return Err(ConfigError::UnknownTheme(self.theme));
        }
        Ok(self)
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// Grow a requested host window size to at least the minimum. The view
    /// itself always maps through the size it is actually given.
    pub fn clamp_size(&self, size: Size) -> Size {
        Size::new(size.width.max(self.min_width), size.height.max(self.min_height))
    }

    /// The configured theme, falling back to dark for unknown names.
    pub fn canvas_theme(&self) -> CanvasTheme {
        CanvasTheme::by_name(&self.theme).unwrap_or_else(|| {
            log::warn!("config: unknown theme {:?}, using dark", self.theme);
            CanvasTheme::dark()
        })
    }
}
