//! Volume-integrated internal-wave energy.

use crate::grid::{Field3D, Grid};
use crate::state::OceanState;
use crate::time::TimeLevel;

/// Vertical integral of a W-point field over the wet part of column `(i, j)`.
///
/// Each level is weighted with its interface spacing, the surface level with
/// half of it. Land columns integrate to zero.
pub fn column_energy(grid: &Grid, field: &Field3D, i: usize, j: usize) -> f64 {
    let column = field.column(i, j);
    grid.topography
        .wet_levels(i, j)
        .map(|k| grid.vertical.w_weight(k) * column[k])
        .sum()
}

/// Area-weighted sum of [`column_energy`] over the interior.
pub fn total_energy(grid: &Grid, field: &Field3D) -> f64 {
    let mut total = 0.0;
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            total += grid.area_t[(i, j)] * column_energy(grid, field, i, j);
        }
    }
    total
}

/// Domain-integrated IDEMIX budget terms for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdemixDiagnostics {
    /// Energy before the step (m^5/s^2).
    pub energy_before: f64,
    /// Energy after the step.
    pub energy_after: f64,
    /// Dissipation rate integrated over the domain (m^5/s^3).
    pub dissipation: f64,
    /// Boundary fluxes through the bottom and surface (m^5/s^3).
    pub boundary_flux: f64,
}

impl IdemixDiagnostics {
    /// Budget of the step that wrote the next time level of `state`.
    pub fn from_state(grid: &Grid, state: &OceanState) -> Self {
        let idemix = &state.idemix;
        let mut boundary_flux = 0.0;
        for i in grid.interior_x() {
            for j in grid.interior_y() {
                if grid.topography.is_land_column(i, j) {
                    continue;
                }
                boundary_flux += grid.area_t[(i, j)]
                    * (idemix.forc_iw_bottom[(i, j)] + idemix.forc_iw_surface[(i, j)]);
            }
        }
        Self {
            energy_before: total_energy(grid, idemix.e_iw.get(&state.time, TimeLevel::Current)),
            energy_after: total_energy(grid, idemix.e_iw.get(&state.time, TimeLevel::Next)),
            dissipation: total_energy(grid, &idemix.iw_diss),
            boundary_flux,
        }
    }

    pub fn energy_change(&self) -> f64 {
        self.energy_after - self.energy_before
    }

    /// Change not accounted for by boundary fluxes and dissipation over `dt`.
    pub fn residual(&self, dt: f64) -> f64 {
        self.energy_change() - dt * (self.boundary_flux - self.dissipation)
    }
}
