//! Engine configuration.

use crate::color::Argb;
use crate::pointer::{MAX_POINTERS, TOUCH_TOLERANCE};
use crate::stroke::{DEFAULT_PEN_WIDTH, Pen};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default thumbnail edge in density-independent pixels.
pub const DEFAULT_THUMBNAIL_SIZE_DP: u32 = 150;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("max_pointers {0} exceeds the limit of {max}", max = MAX_POINTERS)]
    TooManyPointers(usize),
    #[error("touch_tolerance must be a positive number, got {0}")]
    InvalidTolerance(f64),
    #[error("pen_width must be a positive number, got {0}")]
    InvalidPenWidth(f64),
    #[error("display_density must be a positive number, got {0}")]
    InvalidDensity(f64),
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Tunables for an [`InkEngine`](crate::engine::InkEngine).
///
/// Missing fields take their defaults, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of pointer slots, at most [`MAX_POINTERS`]; higher pointer ids are ignored.
    pub max_pointers: usize,
    /// Move samples closer than this on both axes are dropped.
    pub touch_tolerance: f64,
    /// Initial pen color.
    pub pen_color: Argb,
    /// Initial pen width.
    pub pen_width: f64,
    /// Initial background color.
    pub background_color: Argb,
    /// Thumbnail edge in density-independent pixels.
    pub thumbnail_size_dp: u32,
    /// Physical pixels per density-independent pixel.
    pub display_density: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_pointers: MAX_POINTERS,
            touch_tolerance: TOUCH_TOLERANCE,
            pen_color: Argb::BLACK,
            pen_width: DEFAULT_PEN_WIDTH,
            background_color: Argb::WHITE,
            thumbnail_size_dp: DEFAULT_THUMBNAIL_SIZE_DP,
            display_density: 1.0,
        }
    }
}

impl EngineConfig {
    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check every field against the limits the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pointers > MAX_POINTERS {
            return Err(ConfigError::TooManyPointers(self.max_pointers));
        }
        if !is_positive(self.touch_tolerance) {
            return Err(ConfigError::InvalidTolerance(self.touch_tolerance));
        }
        if !is_positive(self.pen_width) {
            return Err(ConfigError::InvalidPenWidth(self.pen_width));
        }
        if !is_positive(self.display_density) {
            return Err(ConfigError::InvalidDensity(self.display_density));
        }
        Ok(())
    }

    /// Replace out-of-range fields with their defaults, logging each one.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.max_pointers > MAX_POINTERS {
            log::warn!("capping max_pointers {} at {MAX_POINTERS}", self.max_pointers);
            self.max_pointers = MAX_POINTERS;
        }
        if !is_positive(self.touch_tolerance) {
            log::warn!("ignoring invalid touch_tolerance {}", self.touch_tolerance);
            self.touch_tolerance = defaults.touch_tolerance;
        }
        if !is_positive(self.pen_width) {
            log::warn!("ignoring invalid pen_width {}", self.pen_width);
            self.pen_width = defaults.pen_width;
        }
        if !is_positive(self.display_density) {
            log::warn!("ignoring invalid display_density {}", self.display_density);
            self.display_density = defaults.display_density;
        }
        self
    }

    /// Initial pen.
    pub fn pen(&self) -> Pen {
        Pen::new(self.pen_color, self.pen_width)
    }

    /// Thumbnail bounds in physical pixels (square).
    pub fn thumbnail_bounds(&self) -> (u32, u32) {
        let edge = (f64::from(self.thumbnail_size_dp) * self.display_density).round().max(1.0) as u32;
        (edge, edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_pointers, 20);
        assert!((config.touch_tolerance - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.pen(), Pen::new(Argb::BLACK, 12.0));
        assert_eq!(config.thumbnail_bounds(), (150, 150));
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json(r#"{ "pen_width": 4.5, "display_density": 2.0 }"#).unwrap();
        assert!((config.pen_width - 4.5).abs() < f64::EPSILON);
        assert_eq!(config.max_pointers, 20);
        assert_eq!(config.thumbnail_bounds(), (300, 300));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig {
            background_color: Argb(0xFF10_2030),
            display_density: 1.5,
            ..EngineConfig::default()
        };
        let parsed = EngineConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(EngineConfig::from_json("{ not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_json_rejects_out_of_range_values() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "pen_width": 0.0 }"#),
            Err(ConfigError::InvalidPenWidth(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "pen_width": -3.0 }"#),
            Err(ConfigError::InvalidPenWidth(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "max_pointers": 32 }"#),
            Err(ConfigError::TooManyPointers(32))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "touch_tolerance": -1.0 }"#),
            Err(ConfigError::InvalidTolerance(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "display_density": 0.0 }"#),
            Err(ConfigError::InvalidDensity(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = EngineConfig {
            touch_tolerance: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTolerance(_))));

        let config = EngineConfig {
            pen_width: f64::INFINITY,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPenWidth(_))));
    }

    #[test]
    fn test_sanitized_falls_back_to_defaults() {
        let config = EngineConfig {
            max_pointers: usize::MAX,
            touch_tolerance: f64::NAN,
            pen_width: 0.0,
            display_density: -2.0,
            pen_color: Argb(0xFF00_FF00),
            ..EngineConfig::default()
        }
        .sanitized();

        assert_eq!(config.max_pointers, MAX_POINTERS);
        assert!((config.touch_tolerance - TOUCH_TOLERANCE).abs() < f64::EPSILON);
        assert_eq!(config.pen(), Pen::new(Argb(0xFF00_FF00), DEFAULT_PEN_WIDTH));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let config = EngineConfig {
            max_pointers: 5,
            touch_tolerance: 0.5,
            pen_width: 3.0,
            ..EngineConfig::default()
        };
        assert_eq!(config.clone().sanitized(), config);
    }
}
