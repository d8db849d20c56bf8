//! Immutable tuning for a [`GridStepController`](crate::GridStepController).

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layer::LayerMask;

/// Default travel speed (world units per second).
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
/// Default tile size (world units).
pub const DEFAULT_TILE_SIZE: f32 = 1.0;
/// Default time allowed for one step before it is rolled back (seconds).
pub const DEFAULT_MOVE_TIMEOUT: f32 = 1.0;

/// Controller configuration.
///
/// Built once, validated, and never changed while the controller ticks.
/// When deserialized every missing field takes its default; call
/// [`StepConfig::validate`] on the result before handing it to a controller.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepConfig {
    /// Interpolation rate toward the target tile (units/second).
    pub move_speed: f32,
    /// Lattice spacing and step displacement (world units).
    pub tile_size: f32,
    /// Seconds before an incomplete step rolls back to its origin.
    pub move_timeout: f32,
    /// Layers the physics body should treat as blocking.
    pub obstacle_layer: LayerMask,
}

impl Default for StepConfig {
    fn default() -> Self {
        StepConfig {
            move_speed: DEFAULT_MOVE_SPEED,
            tile_size: DEFAULT_TILE_SIZE,
            move_timeout: DEFAULT_MOVE_TIMEOUT,
            obstacle_layer: LayerMask::NONE,
        }
    }
}

impl StepConfig {
    /// Construct and validate a configuration.
    ///
    /// # Arguments
    ///
    /// * `move_speed`: Travel speed in units per second. Zero is allowed and
    ///   leaves every step stalled until it times out.
    /// * `tile_size`: Step displacement in world units.
    /// * `move_timeout`: Seconds a step may take before it is rolled back.
    /// * `obstacle_layer`: Layers forwarded to the physics body.
    ///
    /// # Errors
    ///
    /// See [`StepConfig::validate`].
    pub fn new(
        move_speed: f32,
        tile_size: f32,
        move_timeout: f32,
        obstacle_layer: LayerMask,
    ) -> Result<Self, ConfigError> {
        StepConfig {
            move_speed,
            tile_size,
            move_timeout,
            obstacle_layer,
        }
        .validate()
    }

    /// Checks every field and returns the configuration unchanged if it is usable.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConfigError::InvalidMoveSpeed)` if `move_speed` is negative or not finite.
    /// Returns `Err(ConfigError::InvalidTileSize)` if `tile_size` is not positive or not finite.
    /// Returns `Err(ConfigError::InvalidMoveTimeout)` if `move_timeout` is not positive or not
    /// finite.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.move_speed.is_finite() {
            return Err(ConfigError::InvalidMoveSpeed("must be finite"));
        }
        if self.move_speed < 0.0 {
            return Err(ConfigError::InvalidMoveSpeed("must be non-negative"));
        }
        if !self.tile_size.is_finite() {
            return Err(ConfigError::InvalidTileSize("must be finite"));
        }
        if self.tile_size <= 0.0 {
            return Err(ConfigError::InvalidTileSize("must be positive"));
        }
        if !self.move_timeout.is_finite() {
            return Err(ConfigError::InvalidMoveTimeout("must be finite"));
        }
        if self.move_timeout <= 0.0 {
            return Err(ConfigError::InvalidMoveTimeout("must be positive"));
        }
        Ok(self)
    }

    /// Returns a copy with a different move speed.
    #[must_use]
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    /// Returns a copy with a different tile size.
    #[must_use]
    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Returns a copy with a different move timeout.
    #[must_use]
    pub fn with_move_timeout(mut self, move_timeout: f32) -> Self {
        self.move_timeout = move_timeout;
        self
    }

    /// Returns a copy with a different obstacle layer.
    #[must_use]
    pub fn with_obstacle_layer(mut self, obstacle_layer: LayerMask) -> Self {
        self.obstacle_layer = obstacle_layer;
        self
    }
}

impl fmt::Display for StepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StepConfig (speed: {:.2} u/s, tile: {:.2} u, timeout: {:.2} s, obstacles: {})",
            self.move_speed, self.tile_size, self.move_timeout, self.obstacle_layer
        )
    }
}
