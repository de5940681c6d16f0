//! Vertical velocity from continuity.
//!
//! `w(z) - w(z0) = -∫ (∂u/∂x + ∂v/∂y) dz`, evaluated on the new velocities.

use crate::config::ContinuityDirection;
use crate::grid::Grid;
use crate::state::MomentumState;
use crate::time::{TimeIndices, TimeLevel};

/// Diagnose `w[taup1]` from `u[taup1]` and `v[taup1]`.
///
/// Integrating from the bottom leaves any residual divergence in the
/// surface value, which makes it visible; integrating from the surface pins
/// `w = 0` at the top interface instead.
pub fn vertical_velocity(
    grid: &Grid,
    direction: ContinuityDirection,
    time: &TimeIndices,
    momentum: &mut MomentumState,
) {
    let _span = tracing::debug_span!("vertical_velocity", ?direction).entered();

    let (nx, ny, nz) = grid.shape();
    let dzt = grid.dzt();
    let mask_w = &grid.masks.w;
    let u = momentum.u.get(time, TimeLevel::Next);
    let v = momentum.v.get(time, TimeLevel::Next);
    let w = momentum.w.get_mut(time, TimeLevel::Next);
    let mut fxa = vec![0.0; nz];

    for i in 1..nx {
        for j in 1..ny {
            let dx = grid.cost[j] * grid.dxt[i];
            let dy = grid.cost[j] * grid.dyt[j];
            for k in 0..nz {
                fxa[k] = -mask_w[(i, j, k)]
                    * dzt[k]
                    * ((u[(i, j, k)] - u[(i - 1, j, k)]) / dx
                        + (grid.cosu[j] * v[(i, j, k)] - grid.cosu[j - 1] * v[(i, j - 1, k)]) / dy);
            }
            let column = w.column_mut(i, j);
            match direction {
                ContinuityDirection::FromBottom => {
                    let mut acc = 0.0;
                    for k in 0..nz {
                        acc += fxa[k];
                        column[k] = acc;
                    }
                }
                ContinuityDirection::FromSurface => {
                    column[nz - 1] = 0.0;
                    for k in (1..nz).rev() {
                        column[k - 1] = column[k] - fxa[k];
                    }
                    // no residual below the seafloor
                    for k in 0..nz {
                        column[k] *= mask_w[(i, j, k)];
                    }
                }
            }
        }
    }
}
