//! Vertical level index newtype.

use std::fmt;

/// Vertical level index on the z-level grid.
///
/// Level 0 is the deepest level of the domain, level `nz - 1` the surface
/// level. A column's bottom index is the deepest wet level of that column.
///
/// # Example
///
/// ```
/// use zcore_ocean::types::LevelIndex;
///
/// let level = LevelIndex::new(5);
/// assert_eq!(level.get(), 5);
/// assert_eq!(level.to_string(), "L5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct LevelIndex(usize);

impl LevelIndex {
    /// Deepest level of the domain.
    pub const BOTTOM: Self = Self(0);

    /// Create a new level index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Level directly above, towards the surface.
    #[inline]
    pub fn above(self) -> Self {
        Self(self.0 + 1)
    }

    /// Level directly below, saturating at the domain bottom.
    #[inline]
    pub fn below(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Iterate raw level numbers from this level up to (excluding) `nz`.
    #[inline]
    pub fn up_to(self, nz: usize) -> std::ops::Range<usize> {
        self.0..nz.max(self.0)
    }
}

impl fmt::Display for LevelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl From<usize> for LevelIndex {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<LevelIndex> for usize {
    #[inline]
    fn from(idx: LevelIndex) -> usize {
        idx.0
    }
}
