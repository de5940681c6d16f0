//! Column-wise implicit solve over the grid.
//!
//! Each water column is solved from its bottom index to the surface. The
//! bottom-most wet row uses the separate edge diagonal and right-hand side
//! and has no sub-diagonal coupling. Land levels and land columns keep their
//! previous values in the target field.

use std::ops::Range;

use crate::grid::{Field3D, Grid, Topography};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Coefficients of a vertical tridiagonal system on every column.
///
/// Row `k` couples level `k - 1` through `a`, level `k` through `b` and
/// level `k + 1` through `c`. `b_edge`/`d_edge` replace `b`/`d` on the
/// bottom-most wet row of each column.
#[derive(Clone, Debug)]
pub struct ImplicitSystem {
    pub a: Field3D,
    pub b: Field3D,
    pub c: Field3D,
    pub d: Field3D,
    pub b_edge: Field3D,
    pub d_edge: Field3D,
    columns_x: Range<usize>,
    columns_y: Range<usize>,
}

impl ImplicitSystem {
    /// System covering the interior columns of `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        let zeros = grid.zeros_3d();
        Self {
            a: zeros.clone(),
            b: zeros.clone(),
            c: zeros.clone(),
            d: zeros.clone(),
            b_edge: zeros.clone(),
            d_edge: zeros,
            columns_x: grid.interior_x(),
            columns_y: grid.interior_y(),
        }
    }

    /// Columns the solve runs over.
    pub fn columns(&self) -> (Range<usize>, Range<usize>) {
        (self.columns_x.clone(), self.columns_y.clone())
    }

    #[inline]
    fn covers(&self, i: usize, j: usize) -> bool {
        self.columns_x.contains(&i) && self.columns_y.contains(&j)
    }

    /// Solve one column into `out`, starting at level `kb`.
    ///
    /// `out` holds the full column; levels below `kb` are not touched.
    pub fn solve_column(&self, i: usize, j: usize, kb: usize, scratch: &mut [f64], out: &mut [f64]) {
        let nz = out.len();
        let n = nz.saturating_sub(kb);
        let a = self.a.column(i, j);
        let b = self.b.column(i, j);
        let c = self.c.column(i, j);
        let d = self.d.column(i, j);
        let b_edge = self.b_edge[(i, j, kb.min(nz - 1))];
        let d_edge = self.d_edge[(i, j, kb.min(nz - 1))];

        super::thomas_with(
            n,
            |r| if r == 0 { 0.0 } else { a[kb + r] },
            |r| if r == 0 { b_edge } else { b[kb + r] },
            |r| c[kb + r],
            |r| if r == 0 { d_edge } else { d[kb + r] },
            scratch,
            &mut out[kb..],
        );
    }
}

/// Solve every wet column of `system` into `target`.
///
/// Columns without water are skipped silently.
pub fn solve_implicit(topography: &Topography, system: &ImplicitSystem, target: &mut Field3D) {
    let nz = target.nz();
    let ny = target.ny();

    #[cfg(feature = "parallel")]
    {
        target
            .as_mut_slice()
            .par_chunks_mut(nz)
            .enumerate()
            .for_each_init(
                || vec![0.0; nz],
                |scratch, (n, column)| {
                    let (i, j) = (n / ny, n % ny);
                    if !system.covers(i, j) {
                        return;
                    }
                    if let Some(kb) = topography.bottom_index(i, j) {
                        system.solve_column(i, j, kb.get(), scratch, column);
                    }
                },
            );
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut scratch = vec![0.0; nz];
        for (n, column) in target.as_mut_slice().chunks_mut(nz).enumerate() {
            let (i, j) = (n / ny, n % ny);
            if !system.covers(i, j) {
                continue;
            }
            if let Some(kb) = topography.bottom_index(i, j) {
                system.solve_column(i, j, kb.get(), &mut scratch, column);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::types::LevelIndex;
    use crate::vertical::ZLevels;

    const TOL: f64 = 1e-12;

    fn grid() -> Grid {
        GridBuilder::cartesian(2, 1, 1.0, 1.0, ZLevels::uniform(4, 1.0).unwrap())
            .with_bottom(|i, _| match i {
                2 => Some(LevelIndex::new(1)),
                _ => None,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_land_untouched_and_edge_row_used() {
        let grid = grid();
        let mut system = ImplicitSystem::for_grid(&grid);
        system.b.fill(1.0);
        system.d.fill(2.0);
        system.b_edge.fill(2.0);
        system.d_edge.fill(8.0);

        let mut target = Field3D::filled(6, 5, 4, -1.0);
        solve_implicit(&grid.topography, &system, &mut target);

        // Wet column (2, 2): levels 1..4, edge row at level 1
        assert_eq!(target[(2, 2, 0)], -1.0);
        assert!((target[(2, 2, 1)] - 4.0).abs() < TOL);
        assert!((target[(2, 2, 2)] - 2.0).abs() < TOL);
        assert!((target[(2, 2, 3)] - 2.0).abs() < TOL);

        // Land column and halo untouched
        assert_eq!(target.column(3, 2), &[-1.0; 4]);
        assert_eq!(target.column(0, 0), &[-1.0; 4]);
    }

    #[test]
    fn test_edge_row_ignores_sub_diagonal() {
        let grid = grid();
        let mut system = ImplicitSystem::for_grid(&grid);
        system.a.fill(100.0);
        system.b.fill(1.0);
        system.b_edge.fill(1.0);
        system.d_edge.fill(3.0);

        let mut target = grid.zeros_3d();
        solve_implicit(&grid.topography, &system, &mut target);

        // Edge row: x = 3; rows above: x[k] = -100 * x[k-1]
        assert!((target[(2, 2, 1)] - 3.0).abs() < TOL);
        assert!((target[(2, 2, 2)] + 300.0).abs() < TOL);
        assert!((target[(2, 2, 3)] - 30000.0).abs() < 1e-8);
    }
}
