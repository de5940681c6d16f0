//! Fixed z-level layer geometry.

use crate::grid::GridError;

/// Layer geometry of a z-level vertical grid.
///
/// All arrays are contiguous `Vec<f64>` of length `n_levels`, ordered from
/// the deepest level (index 0) to the surface level.
#[derive(Clone, Debug, PartialEq)]
pub struct ZLevels {
    /// Tracer cell thickness `dzt` (m).
    dzt: Vec<f64>,
    /// W-cell thickness `dzw` (m).
    dzw: Vec<f64>,
    /// Depth of tracer cell centres (m, negative below the surface).
    zt: Vec<f64>,
    /// Depth of the upper interface of each tracer cell (m).
    zw: Vec<f64>,
}

impl ZLevels {
    /// Build the level geometry from tracer cell thicknesses.
    ///
    /// # Arguments
    ///
    /// * `dzt` - Layer thicknesses from the deepest layer to the surface layer
    ///
    /// # Errors
    ///
    /// Fewer than two levels, or a non-positive thickness.
    pub fn new(dzt: Vec<f64>) -> Result<Self, GridError> {
        let nz = dzt.len();
        if nz < 2 {
            return Err(GridError::TooFewLevels(nz));
        }
        if let Some((level, &value)) = dzt
            .iter()
            .enumerate()
            .find(|&(_, &dz)| !(dz > 0.0 && dz.is_finite()))
        {
            return Err(GridError::NonPositiveThickness { level, value });
        }

        let total: f64 = dzt.iter().sum();
        let mut zw = Vec::with_capacity(nz);
        let mut acc = 0.0;
        for &dz in &dzt {
            acc += dz;
            zw.push(acc - total);
        }
        let zt: Vec<f64> = zw.iter().zip(&dzt).map(|(w, dz)| w - 0.5 * dz).collect();

        let mut dzw: Vec<f64> = zt.windows(2).map(|pair| pair[1] - pair[0]).collect();
        dzw.push(0.5 * dzt[nz - 1]);

        Ok(Self { dzt, dzw, zt, zw })
    }

    /// Equally spaced levels.
    pub fn uniform(n_levels: usize, dz: f64) -> Result<Self, GridError> {
        Self::new(vec![dz; n_levels])
    }

    /// Number of vertical levels.
    #[inline]
    pub fn n_levels(&self) -> usize {
        self.dzt.len()
    }

    /// Tracer cell thicknesses.
    #[inline]
    pub fn dzt(&self) -> &[f64] {
        &self.dzt
    }

    /// W-cell thicknesses.
    #[inline]
    pub fn dzw(&self) -> &[f64] {
        &self.dzw
    }

    /// Tracer cell centre depths.
    #[inline]
    pub fn zt(&self) -> &[f64] {
        &self.zt
    }

    /// Upper interface depths.
    #[inline]
    pub fn zw(&self) -> &[f64] {
        &self.zw
    }

    /// Depth of the full water column (m, positive).
    pub fn total_depth(&self) -> f64 {
        self.dzt.iter().sum()
    }

    /// Effective W-cell height used for column integrals.
    ///
    /// Interior W-cells count with their full `dzw`; the surface W-cell counts
    /// with half of it, which is the closure used by both the IDEMIX
    /// parameter integral and the implicit energy solve.
    #[inline]
    pub fn w_weight(&self, k: usize) -> f64 {
        let nz = self.n_levels();
        if k + 1 == nz {
            0.5 * self.dzw[k]
        } else {
            self.dzw[k]
        }
    }
}
