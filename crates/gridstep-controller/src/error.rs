//! This module defines the error types used by the `gridstep-controller` crate.

#![warn(missing_docs)]

use gridstep_motion::MotionError;

/// Error type for controller configuration.
///
/// The controller itself never fails at runtime; these errors are raised
/// while a `StepConfig` is being built so that a bad configuration is
/// rejected before the first tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Error for invalid move speed.
    /// This variant is returned when the move speed is negative or not finite.
    InvalidMoveSpeed(&'static str),
    /// Error for invalid tile size.
    /// This variant is returned when the tile size is not positive or not finite.
    InvalidTileSize(&'static str),
    /// Error for invalid move timeout.
    /// This variant is returned when the move timeout is not positive or not finite.
    InvalidMoveTimeout(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidMoveSpeed(msg) => write!(f, "Invalid move speed: {}", msg),
            ConfigError::InvalidTileSize(msg) => write!(f, "Invalid tile size: {}", msg),
            ConfigError::InvalidMoveTimeout(msg) => write!(f, "Invalid move timeout: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<MotionError> for ConfigError {
    /// Lattice errors surface as tile-size errors; time-delta errors belong
    /// to the timing parameters.
    fn from(err: MotionError) -> Self {
        match err {
            MotionError::InvalidTileSize(msg) => ConfigError::InvalidTileSize(msg),
            MotionError::NegativeTimeDelta(msg) => ConfigError::InvalidMoveTimeout(msg),
        }
    }
}
