//! Scene configuration loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::physics::PHYSICS_DT;
use crate::shape::{MAX_DIMENSION_MARGIN, MIN_DIMENSION};

/// Smallest world side that still leaves room for a minimum-size shape.
pub const MIN_WORLD_SIDE: f32 = MIN_DIMENSION + MAX_DIMENSION_MARGIN;

/// Error type for scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("world bounds {width}x{height} are invalid: each side must be at least 60")]
    InvalidBounds { width: f32, height: f32 },
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),
    #[error("gravity must be finite, got {0:?}")]
    InvalidGravity([f32; 2]),
    #[error("failed to parse scene config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Host-provided surface and simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Surface width in world units.
    pub width: f32,
    /// Surface height in world units.
    pub height: f32,
    /// Gravity acceleration, y pointing down.
    pub gravity: [f32; 2],
    /// Seed for shape kind and color selection.
    pub seed: u64,
    /// Seconds per simulation step.
    pub timestep: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 800.0,
            gravity: [0.0, 1000.0],
            seed: 12345,
            timestep: PHYSICS_DT,
        }
    }
}

impl SceneConfig {
    /// Default settings on a surface of the given size.
    pub fn with_bounds(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> [f32; 2] {
        [self.width, self.height]
    }

    /// Loads and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side_ok = |side: f32| side.is_finite() && side >= MIN_WORLD_SIDE;
        if !side_ok(self.width) || !side_ok(self.height) {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(ConfigError::InvalidTimestep(self.timestep));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        Ok(())
    }
}
