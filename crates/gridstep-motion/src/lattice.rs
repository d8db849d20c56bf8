//! Uniform square lattice of tiles.
//!
//! Tile centers sit at integer multiples of the tile size, so the lattice
//! point `(0, 0)` is the world origin.

use core::fmt;
use libm::roundf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Direction, MotionError, Vec2};

/// Represents a point in lattice coordinates (tile indices).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    /// The x-coordinate (column index) on the lattice.
    pub x: i32,
    /// The y-coordinate (row index) on the lattice.
    pub y: i32,
}

impl GridPoint {
    /// Creates a new `GridPoint`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring lattice point one step in `direction`.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// A square lattice with a fixed tile size in world units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    /// Tile side length (world units).
    tile_size: f32,
}

impl Lattice {
    /// Construct a new lattice.
    ///
    /// # Arguments
    ///
    /// * `tile_size`: Side length of one tile in world units.
    ///
    /// # Errors
    ///
    /// Returns `Err(MotionError::InvalidTileSize)` if `tile_size` is not positive and finite.
    pub fn new(tile_size: f32) -> Result<Self, MotionError> {
        if !tile_size.is_finite() {
            return Err(MotionError::InvalidTileSize("must be finite"));
        }
        if tile_size <= 0.0 {
            return Err(MotionError::InvalidTileSize("must be positive"));
        }
        Ok(Lattice { tile_size })
    }

    /// Returns the tile size.
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// The lattice point nearest to `position`.
    pub fn cell_of(&self, position: Vec2) -> GridPoint {
        GridPoint::new(
            roundf(position.x / self.tile_size) as i32,
            roundf(position.y / self.tile_size) as i32,
        )
    }

    /// World position of the lattice point `cell`.
    pub fn center_of(&self, cell: GridPoint) -> Vec2 {
        Vec2::new(cell.x as f32 * self.tile_size, cell.y as f32 * self.tile_size)
    }

    /// Snaps `position` onto the nearest lattice point.
    pub fn snap(&self, position: Vec2) -> Vec2 {
        self.center_of(self.cell_of(position))
    }

    /// Returns `true` if `position` lies within `tolerance` of a lattice point.
    pub fn is_aligned(&self, position: Vec2, tolerance: f32) -> bool {
        position.distance(self.snap(position)) <= tolerance
    }

    /// World position one tile away from `position` in `direction`.
    ///
    /// `position` itself is not snapped, so an off-lattice origin stays off-lattice.
    pub fn step_from(&self, position: Vec2, direction: Direction) -> Vec2 {
        position + direction.unit() * self.tile_size
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lattice (tile: {:.2})", self.tile_size)
    }
}
