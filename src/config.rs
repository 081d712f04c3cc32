//! Tunable configuration for the whole tracking pipeline.
//!
//! Every threshold lives here so trackers can be tuned per camera and
//! lighting without code changes. Missing TOML keys keep their defaults:
//!
//! ```toml
//! [selector]
//! jump_threshold = 0.25
//!
//! [debounce]
//! window_size = 5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::integration::StrokeConfig;
use crate::tracker::{
    ClassifierConfig, DebounceConfig, FrameSize, SelectorConfig, SmootherConfig,
};

/// Aggregate configuration of every pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub selector: SelectorConfig,
    pub smoother: SmootherConfig,
    pub classifier: ClassifierConfig,
    pub debounce: DebounceConfig,
    /// Camera frame size used for cursor scaling when frames carry none
    pub frame: FrameSize,
    pub stroke: StrokeConfig,
}

impl GestureConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GestureConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reject values that make a stage meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.selector;
        if !(s.jump_threshold > 0.0) {
            return Err(ConfigError::invalid("selector.jump_threshold", "must be positive"));
        }

        let f = &self.smoother;
        if !(f.min_cutoff > 0.0) {
            return Err(ConfigError::invalid("smoother.min_cutoff", "must be positive"));
        }
        if !(f.d_cutoff > 0.0) {
            return Err(ConfigError::invalid("smoother.d_cutoff", "must be positive"));
        }
        if !(f.beta >= 0.0) {
            return Err(ConfigError::invalid("smoother.beta", "must not be negative"));
        }

        let c = &self.classifier;
        if !(c.extension_ratio > 0.0) {
            return Err(ConfigError::invalid("classifier.extension_ratio", "must be positive"));
        }
        if !(c.depth_epsilon >= 0.0) {
            return Err(ConfigError::invalid("classifier.depth_epsilon", "must not be negative"));
        }
        if c.erase_min_fingers == 0 || c.erase_min_fingers > 5 {
            return Err(ConfigError::invalid(
                "classifier.erase_min_fingers",
                format!("must be in 1..=5, got {}", c.erase_min_fingers),
            ));
        }
        if !(c.scale_gain > 0.0 && c.scale_gain.is_finite()) {
            return Err(ConfigError::invalid("classifier.scale_gain", "must be positive"));
        }
        if !(c.scale_min.is_finite() && c.scale_max.is_finite()) {
            return Err(ConfigError::invalid("classifier.scale_min", "scale range must be finite"));
        }
        if !(c.scale_min <= c.scale_max) {
            return Err(ConfigError::invalid(
                "classifier.scale_min",
                format!("{} exceeds scale_max {}", c.scale_min, c.scale_max),
            ));
        }

        if self.debounce.window_size < 2 {
            return Err(ConfigError::invalid(
                "debounce.window_size",
                format!("must be at least 2, got {}", self.debounce.window_size),
            ));
        }

        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(ConfigError::invalid(
                "frame",
                format!("{}x{} has a zero dimension", self.frame.width, self.frame.height),
            ));
        }

        if !(self.stroke.canvas_scale > 0.0) {
            return Err(ConfigError::invalid("stroke.canvas_scale", "must be positive"));
        }

        Ok(())
    }
}
