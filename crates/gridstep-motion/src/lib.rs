#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for 2D tile-lattice motion."]
#![doc = ""]
#![doc = "This crate provides a small vector type, the four cardinal step directions"]
#![doc = "and lattice helpers for actors that move exactly one tile at a time."]

use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub};
use libm::sqrtf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub mod lattice;

pub use error::MotionError;
pub use lattice::{GridPoint, Lattice};

/// A 2‑D vector `(x, y)` in world units.
///
/// The world frame is y-up: positive `y` is "up" on the grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// World‑frame x component.
    pub x: f32,
    /// World‑frame y component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Construct a new vector.
    ///
    /// # Arguments
    ///
    /// * `x`: World-frame x component.
    /// * `y`: World-frame y component.
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// Returns `true` when both components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Euclidean length of the vector.
    pub fn length(&self) -> f32 {
        sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Euclidean distance between `self` and `other`.
    pub fn distance(&self, other: Vec2) -> f32 {
        (other - *self).length()
    }

    /// Moves from `self` toward `target` by at most `max_delta` world units.
    ///
    /// The result never overshoots: when the remaining distance is smaller than
    /// `max_delta` the target itself is returned. A non-positive `max_delta`
    /// leaves the point where it is.
    ///
    /// # Arguments
    ///
    /// * `target`: The point to move toward.
    /// * `max_delta`: The largest distance that may be covered by this call.
    ///
    /// # Returns
    ///
    /// The new point, lying on the segment between `self` and `target`.
    pub fn move_towards(self, target: Vec2, max_delta: f32) -> Vec2 {
        let delta = target - self;
        let dist = delta.length();
        if dist == 0.0 {
            return target;
        }
        if max_delta.is_nan() || max_delta <= 0.0 {
            return self;
        }
        if dist <= max_delta {
            return target;
        }
        self + delta * (max_delta / dist)
    }
}

/// Advances `position` toward `target` at `speed` units per second over `dt` seconds.
///
/// This is [`Vec2::move_towards`] with the step length derived from a speed
/// and a time step. The result never overshoots `target`.
///
/// # Arguments
///
/// * `position`: The current position.
/// * `target`: The position being approached.
/// * `speed`: Travel speed in world units per second.
/// * `dt`: The time delta in seconds.
///
/// # Errors
///
/// Returns `Err(MotionError::NegativeTimeDelta)` if `dt` is negative or not finite.
pub fn advance_towards(
    position: Vec2,
    target: Vec2,
    speed: f32,
    dt: f32,
) -> Result<Vec2, MotionError> {
    if !dt.is_finite() {
        return Err(MotionError::NegativeTimeDelta("must be finite"));
    }
    if dt < 0.0 {
        return Err(MotionError::NegativeTimeDelta("must be non-negative"));
    }
    Ok(position.move_towards(target, speed * dt))
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.2}, y: {:.2})", self.x, self.y)
    }
}

/// One of the four cardinal step directions.
///
/// `Up` points along `+y` and `Right` along `+x`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `+y`
    Up,
    /// `-y`
    Down,
    /// `-x`
    Left,
    /// `+x`
    Right,
}

impl Direction {
    /// All four directions, in `Up, Down, Left, Right` order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Resolves a raw two-axis input into a single cardinal direction.
    ///
    /// Horizontal input strictly dominates: if `x` is non-zero the vertical
    /// axis is ignored, whatever its magnitude. Only the sign of the surviving
    /// axis matters. Non-finite axis values count as zero.
    ///
    /// # Arguments
    ///
    /// * `x`: Horizontal axis value, nominally in `[-1, 1]`.
    /// * `y`: Vertical axis value, nominally in `[-1, 1]`.
    ///
    /// # Returns
    ///
    /// `None` when neither axis is pressed.
    pub fn from_axes(x: f32, y: f32) -> Option<Direction> {
        let x = if x.is_finite() { x } else { 0.0 };
        let y = if y.is_finite() { y } else { 0.0 };

        if x > 0.0 {
            Some(Direction::Right)
        } else if x < 0.0 {
            Some(Direction::Left)
        } else if y > 0.0 {
            Some(Direction::Up)
        } else if y < 0.0 {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// The unit vector pointing in this direction.
    pub const fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Integer lattice offset `(dx, dy)` of one step in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(0.5, -1.0);
        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));

        let mut c = a;
        c += b;
        assert_eq!(c, Vec2::new(1.5, 1.0));
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < EPSILON);
        assert!((b.length() - 5.0).abs() < EPSILON);
        assert!(Vec2::ZERO.is_zero());
        assert!(!b.is_zero());
    }

    #[test]
    fn test_move_towards_partial() {
        let start = Vec2::new(0.0, 0.0);
        let target = Vec2::new(1.0, 0.0);
        let next = start.move_towards(target, 0.25);
        assert!((next.x - 0.25).abs() < EPSILON);
        assert_eq!(next.y, 0.0);
    }

    #[test]
    fn test_move_towards_never_overshoots() {
        let start = Vec2::new(0.9, 0.0);
        let target = Vec2::new(1.0, 0.0);
        // Step larger than the remaining distance lands exactly on the target.
        assert_eq!(start.move_towards(target, 0.5), target);
        assert_eq!(target.move_towards(target, 0.5), target);
    }

    #[test]
    fn test_move_towards_zero_or_negative_delta() {
        let start = Vec2::new(2.0, 2.0);
        let target = Vec2::new(2.0, 3.0);
        assert_eq!(start.move_towards(target, 0.0), start);
        assert_eq!(start.move_towards(target, -1.0), start);
        assert_eq!(start.move_towards(target, f32::NAN), start);
    }

    #[test]
    fn test_advance_towards() {
        let start = Vec2::new(0.0, 0.0);
        let target = Vec2::new(0.0, 1.0);
        let next = advance_towards(start, target, 5.0, 0.02).unwrap();
        assert!((next.y - 0.1).abs() < EPSILON);
        assert_eq!(advance_towards(start, target, 100.0, 0.02).unwrap(), target);
        assert_eq!(advance_towards(start, target, 0.0, 0.02).unwrap(), start);
    }

    #[test]
    fn test_advance_towards_invalid_dt() {
        let start = Vec2::ZERO;
        let target = Vec2::new(1.0, 0.0);
        assert!(matches!(
            advance_towards(start, target, 5.0, -0.1),
            Err(MotionError::NegativeTimeDelta("must be non-negative"))
        ));
        assert!(matches!(
            advance_towards(start, target, 5.0, f32::NAN),
            Err(MotionError::NegativeTimeDelta("must be finite"))
        ));
    }

    #[test]
    fn test_direction_horizontal_dominates() {
        assert_eq!(Direction::from_axes(1.0, 1.0), Some(Direction::Right));
        assert_eq!(Direction::from_axes(-1.0, -1.0), Some(Direction::Left));
        assert_eq!(Direction::from_axes(0.2, -1.0), Some(Direction::Right));
        assert_eq!(Direction::from_axes(0.0, 1.0), Some(Direction::Up));
        assert_eq!(Direction::from_axes(0.0, -0.5), Some(Direction::Down));
        assert_eq!(Direction::from_axes(0.0, 0.0), None);
    }

    #[test]
    fn test_direction_non_finite_axes_are_ignored() {
        assert_eq!(Direction::from_axes(f32::NAN, 1.0), Some(Direction::Up));
        assert_eq!(Direction::from_axes(f32::INFINITY, 0.0), None);
        assert_eq!(Direction::from_axes(f32::NAN, f32::NAN), None);
    }

    #[test]
    fn test_direction_unit_vectors() {
        for dir in Direction::ALL {
            let unit = dir.unit();
            assert!((unit.length() - 1.0).abs() < EPSILON);
            let (dx, dy) = dir.offset();
            assert_eq!(unit, Vec2::new(dx as f32, dy as f32));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Vec2::new(1.0, -0.5)), "(x: 1.00, y: -0.50)");
        assert_eq!(format!("{}", Direction::Left), "left");
    }
}
