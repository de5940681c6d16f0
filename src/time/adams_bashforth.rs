//! Quasi-second-order Adams-Bashforth step.
//!
//! ```text
//! x(n+1) += dt * ((1.5 + eps) * dx(n) - (0.5 + eps) * dx(n-1))
//! ```

use crate::grid::{Field3D, Grid};

/// AB2 with stabilisation `eps`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdamsBashforth2 {
    pub eps: f64,
}

impl AdamsBashforth2 {
    pub fn new(eps: f64) -> Self {
        Self { eps }
    }

    /// Weights of the current and previous tendency.
    #[inline]
    pub fn coefficients(&self) -> (f64, f64) {
        (1.5 + self.eps, -(0.5 + self.eps))
    }

    /// Increment for one point.
    #[inline]
    pub fn increment(&self, dt: f64, current: f64, previous: f64) -> f64 {
        let (wc, wp) = self.coefficients();
        dt * (wc * current + wp * previous)
    }

    /// Add the step to `target` on the interior columns of `grid`.
    pub fn apply(&self, grid: &Grid, dt: f64, current: &Field3D, previous: &Field3D, target: &mut Field3D) {
        let nz = grid.nz();
        for i in grid.interior_x() {
            for j in grid.interior_y() {
                let cur = current.column(i, j);
                let prev = previous.column(i, j);
                let out = target.column_mut(i, j);
                for k in 0..nz {
                    out[k] += self.increment(dt, cur[k], prev[k]);
                }
            }
        }
    }

    /// Same as [`apply`](Self::apply) but multiplied by a 0/1 mask.
    pub fn apply_masked(
        &self,
        grid: &Grid,
        dt: f64,
        current: &Field3D,
        previous: &Field3D,
        mask: &Field3D,
        target: &mut Field3D,
    ) {
        let nz = grid.nz();
        for i in grid.interior_x() {
            for j in grid.interior_y() {
                let cur = current.column(i, j);
                let prev = previous.column(i, j);
                let m = mask.column(i, j);
                let out = target.column_mut(i, j);
                for k in 0..nz {
                    out[k] += m[k] * self.increment(dt, cur[k], prev[k]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::vertical::ZLevels;

    #[test]
    fn test_equal_tendencies_add_dt_times_tendency() {
        let ab = AdamsBashforth2::new(0.1);
        let inc = ab.increment(2.0, 3.0, 3.0);
        assert!((inc - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_leaves_halo() {
        let grid = GridBuilder::cartesian(2, 2, 1.0, 1.0, ZLevels::uniform(2, 1.0).unwrap())
            .build()
            .unwrap();
        let current = Field3D::filled(6, 6, 2, 1.0);
        let previous = Field3D::filled(6, 6, 2, 1.0);
        let mut target = grid.zeros_3d();

        AdamsBashforth2::new(0.1).apply(&grid, 0.5, &current, &previous, &mut target);

        assert!((target[(2, 3, 1)] - 0.5).abs() < 1e-12);
        assert_eq!(target[(0, 3, 1)], 0.0);
        assert_eq!(target[(3, 5, 0)], 0.0);
    }
}
