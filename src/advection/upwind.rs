//! First-order upwind fluxes.

use super::{Fluxes, WGridVelocity, pair_mask};
use crate::grid::{Field3D, Grid};

/// Upwind face value times velocity.
///
/// Equivalent to `vel * var_upstream` on open faces; on closed faces
/// (`mask = 0`) it reduces to the centred average, which is multiplied by a
/// zero transport anyway.
#[inline]
fn upwind(vel: f64, left: f64, right: f64, mask: f64) -> f64 {
    let rj = (right - left) * mask;
    vel * (right + left) * 0.5 - vel.abs() * rj * 0.5
}

/// Upwind fluxes of a W-point scalar.
pub fn upwind_flux_wgrid(grid: &Grid, vel: &WGridVelocity, var: &Field3D, fluxes: &mut Fluxes) {
    let (nx, ny, nz) = grid.shape();
    let mask_w = &grid.masks.w;
    fluxes.clear();

    for i in 1..nx - 2 {
        for j in grid.interior_y() {
            for k in 0..nz {
                let mask = pair_mask(mask_w, (i + 1, j, k), (i, j, k));
                fluxes.east[(i, j, k)] =
                    upwind(vel.u[(i, j, k)], var[(i, j, k)], var[(i + 1, j, k)], mask);
            }
        }
    }

    for i in grid.interior_x() {
        for j in 1..ny - 2 {
            for k in 0..nz {
                let mask = pair_mask(mask_w, (i, j + 1, k), (i, j, k));
                fluxes.north[(i, j, k)] = upwind(
                    grid.cosu[j] * vel.v[(i, j, k)],
                    var[(i, j, k)],
                    var[(i, j + 1, k)],
                    mask,
                );
            }
        }
    }

    for i in grid.interior_x() {
        for j in grid.interior_y() {
            for k in 0..nz - 1 {
                let mask = pair_mask(mask_w, (i, j, k + 1), (i, j, k));
                fluxes.top[(i, j, k)] =
                    upwind(vel.w[(i, j, k)], var[(i, j, k)], var[(i, j, k + 1)], mask);
            }
        }
    }
}
