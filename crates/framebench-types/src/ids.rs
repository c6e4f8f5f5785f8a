//! Strongly-typed identifiers for constructed engine objects.
//!
//! Newtype wrappers prevent accidental mixing of body handles with joint
//! handles or variant indices. Handles are only meaningful inside the world
//! that issued them and never outlive a single trial.

use serde::{Deserialize, Serialize};

/// Handle of a body inside one simulation world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Handle of a joint inside one simulation world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointId(pub u32);

/// Index of a benchmark variant in `[0, variant_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantIndex(pub u32);

impl BodyId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl JointId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl VariantIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates all variant indices below `count`, saturating at
    /// `u32::MAX` variants.
    pub fn all(count: usize) -> impl Iterator<Item = VariantIndex> {
        let end = u32::try_from(count).unwrap_or(u32::MAX);
        (0..end).map(VariantIndex)
    }
}

impl From<u32> for BodyId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for JointId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for VariantIndex {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl std::fmt::Display for VariantIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
