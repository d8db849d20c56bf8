#![warn(missing_docs)]

//! Error types for the motion library.
//!
//! This module defines the errors that can occur when building lattices
//! or integrating motion over a time step.

use core::fmt;

/// Errors that can occur in lattice and motion calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Error for invalid tile size.
    /// This variant is returned when a tile size is provided that is not positive and finite.
    InvalidTileSize(&'static str),
    /// Error for negative time delta.
    /// This variant is returned when a motion update gets a negative or non-finite time delta.
    NegativeTimeDelta(&'static str),
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::InvalidTileSize(msg) => write!(f, "Invalid tile size: {}", msg),
            MotionError::NegativeTimeDelta(msg) => write!(f, "Negative time delta: {}", msg),
        }
    }
}

impl core::error::Error for MotionError {}
