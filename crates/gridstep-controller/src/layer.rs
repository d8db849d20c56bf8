//! Collision layer selection handed through to the physics body.

use core::fmt;
use core::ops::BitOr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 32-bit set of collision layers.
///
/// The controller never inspects this value; it forwards it with every
/// `PhysicsBody::move_to` so the body can decide what blocks it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers.
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask with only layer `index` set.
    ///
    /// Indices past 31 yield an empty mask.
    pub const fn layer(index: u8) -> Self {
        match 1u32.checked_shl(index as u32) {
            Some(bits) => LayerMask(bits),
            None => LayerMask::NONE,
        }
    }

    /// Returns a copy with layer `index` added.
    #[must_use]
    pub const fn with(self, index: u8) -> Self {
        LayerMask(self.0 | LayerMask::layer(index).0)
    }

    /// Returns `true` if layer `index` is set.
    pub const fn contains(self, index: u8) -> bool {
        let bit = LayerMask::layer(index).0;
        bit != 0 && (self.0 & bit) != 0
    }

    /// Returns `true` if any layer is shared with `other`.
    pub const fn intersects(self, other: LayerMask) -> bool {
        (self.0 & other.0) != 0
    }

    /// Returns `true` if no layer is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
