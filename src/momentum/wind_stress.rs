//! Surface wind stress.

use crate::config::Settings;
use crate::grid::Grid;
use crate::state::MomentumState;
use crate::time::{TimeIndices, TimeLevel};

/// Add `tau / (rho_0 dzt)` to the surface level of `du[tau]`/`dv[tau]`.
///
/// With `legacy_compatibility` the stress is taken as already kinematic and
/// not divided by `rho_0`.
pub fn tend_wind_stress(grid: &Grid, settings: &Settings, time: &TimeIndices, momentum: &mut MomentumState) {
    let _span = tracing::debug_span!("tend_wind_stress").entered();

    let top = grid.nz() - 1;
    let scale = if settings.legacy_compatibility {
        1.0 / grid.dzt()[top]
    } else {
        1.0 / grid.dzt()[top] / settings.rho_0
    };
    let mask_u = &grid.masks.u;
    let mask_v = &grid.masks.v;
    let (du, dv) = (
        momentum.du.get_mut(time, TimeLevel::Current),
        momentum.dv.get_mut(time, TimeLevel::Current),
    );

    for i in grid.interior_x() {
        for j in grid.interior_y() {
            du[(i, j, top)] += mask_u[(i, j, top)] * momentum.surface_taux[(i, j)] * scale;
            dv[(i, j, top)] += mask_v[(i, j, top)] * momentum.surface_tauy[(i, j)] * scale;
        }
    }
}
