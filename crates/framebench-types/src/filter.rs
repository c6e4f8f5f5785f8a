//! Collision filter bits.
//!
//! A body belongs to exactly one collision category (a single bit) and
//! carries a mask of the categories it is allowed to touch. Two bodies are
//! collision candidates only if each one's mask includes the other's
//! category.

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// A set of collision categories, one bit per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionBits(pub u16);

impl CollisionBits {
    /// No categories.
    pub const NONE: Self = Self(0);
    /// Category assigned to shapes that do not set one (bit 0).
    pub const DEFAULT: Self = Self(0x0001);
    /// Every category.
    pub const ALL: Self = Self(0xFFFF);

    /// Category for bit position `bit`.
    ///
    /// # Panics
    ///
    /// Panics if `bit` is not in `0..16`.
    pub const fn bit(bit: u32) -> Self {
        assert!(bit < 16, "collision category bit out of range 0..16");
        Self(1 << bit)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns true if any bit is shared with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if exactly one bit is set.
    pub const fn is_single(self) -> bool {
        self.0.count_ones() == 1
    }
}

impl BitOr for CollisionBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for CollisionBits {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Category/mask pair attached to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionFilter {
    /// The category this shape belongs to.
    pub category: CollisionBits,
    /// Categories this shape may collide with.
    pub mask: CollisionBits,
}

impl CollisionFilter {
    /// Creates a filter from a category and a mask.
    pub const fn new(category: CollisionBits, mask: CollisionBits) -> Self {
        Self { category, mask }
    }

    /// Returns true if the two filters accept each other.
    #[inline]
    pub const fn should_collide(&self, other: &Self) -> bool {
        self.mask.intersects(other.category) && other.mask.intersects(self.category)
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::new(CollisionBits::DEFAULT, CollisionBits::ALL)
    }
}
