//! Bottom topography as a per-column deepest wet level.

use std::ops::Range;

use super::GridError;
use crate::types::LevelIndex;

/// Deepest wet level of every horizontal column.
///
/// `None` marks a land column. A column with bottom index `kb` is ocean for
/// all levels `k >= kb` and land below.
#[derive(Clone, Debug, PartialEq)]
pub struct Topography {
    nx: usize,
    ny: usize,
    nz: usize,
    bottom: Vec<Option<LevelIndex>>,
}

impl Topography {
    /// Build from a bottom index per column, ordered `i * ny + j`.
    pub fn new(
        nx: usize,
        ny: usize,
        nz: usize,
        bottom: Vec<Option<LevelIndex>>,
    ) -> Result<Self, GridError> {
        if bottom.len() != nx * ny {
            return Err(GridError::dimension_mismatch(
                "bottom index",
                nx * ny,
                bottom.len(),
            ));
        }
        for (n, kb) in bottom.iter().enumerate() {
            if let Some(kb) = kb.filter(|kb| kb.get() >= nz) {
                return Err(GridError::BottomIndexOutOfRange {
                    i: n / ny,
                    j: n % ny,
                    level: kb.get(),
                    nz,
                });
            }
        }
        Ok(Self { nx, ny, nz, bottom })
    }

    /// Every column wet down to level 0.
    pub fn flat(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            bottom: vec![Some(LevelIndex::BOTTOM); nx * ny],
        }
    }

    #[inline]
    pub fn bottom_index(&self, i: usize, j: usize) -> Option<LevelIndex> {
        self.bottom[i * self.ny + j]
    }

    #[inline]
    pub fn is_land_column(&self, i: usize, j: usize) -> bool {
        self.bottom_index(i, j).is_none()
    }

    /// True if level `k` of column `(i, j)` is ocean.
    #[inline]
    pub fn is_wet(&self, i: usize, j: usize, k: usize) -> bool {
        self.bottom_index(i, j).is_some_and(|kb| k >= kb.get())
    }

    /// Wet levels of a column, empty for land.
    #[inline]
    pub fn wet_levels(&self, i: usize, j: usize) -> Range<usize> {
        match self.bottom_index(i, j) {
            Some(kb) => kb.up_to(self.nz),
            None => 0..0,
        }
    }

    /// Bottom indices in storage order.
    pub fn as_slice(&self) -> &[Option<LevelIndex>] {
        &self.bottom
    }

    /// Number of columns holding at least one wet level.
    pub fn n_wet_columns(&self) -> usize {
        self.bottom.iter().filter(|kb| kb.is_some()).count()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wet_levels() {
        let bottom = vec![None, Some(LevelIndex::new(2)), Some(LevelIndex::BOTTOM), None];
        let topo = Topography::new(2, 2, 4, bottom).unwrap();

        assert!(topo.is_land_column(0, 0));
        assert_eq!(topo.wet_levels(0, 0), 0..0);
        assert_eq!(topo.wet_levels(0, 1), 2..4);
        assert!(!topo.is_wet(0, 1, 1));
        assert!(topo.is_wet(0, 1, 2));
        assert_eq!(topo.n_wet_columns(), 2);
    }

    #[test]
    fn test_rejects_bottom_below_grid() {
        let err = Topography::new(1, 1, 3, vec![Some(LevelIndex::new(3))]).unwrap_err();
        assert_eq!(
            err,
            GridError::BottomIndexOutOfRange {
                i: 0,
                j: 0,
                level: 3,
                nz: 3
            }
        );
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Topography::new(2, 2, 3, vec![None; 3]).is_err());
    }
}
