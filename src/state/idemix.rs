//! Internal-wave energy fields.

use crate::grid::{Field2D, Field3D, Grid};
use crate::time::TimeRing;

/// IDEMIX prognostic energy, its parameters and boundary forcing.
#[derive(Clone, Debug)]
pub struct IdemixState {
    /// Internal-wave energy on W points (m^2/s^2).
    pub e_iw: TimeRing<Field3D>,
    /// Advective tendency of `e_iw`.
    pub de_iw: TimeRing<Field3D>,
    /// Vertical group velocity (m/s).
    pub c0: Field3D,
    /// Horizontal group velocity (m/s).
    pub v0: Field3D,
    /// Dissipation coefficient (1/m).
    pub alpha_c: Field3D,
    /// Dissipation of wave energy during the last step (m^2/s^3).
    pub iw_diss: Field3D,
    /// Energy flux into the bottom cell (m^3/s^3).
    pub forc_iw_bottom: Field2D,
    /// Energy flux into the surface cell (m^3/s^3).
    pub forc_iw_surface: Field2D,
}

impl IdemixState {
    pub fn new(grid: &Grid) -> Self {
        let zeros = grid.zeros_3d();
        Self {
            e_iw: TimeRing::filled(zeros.clone()),
            de_iw: TimeRing::filled(zeros.clone()),
            c0: zeros.clone(),
            v0: zeros.clone(),
            alpha_c: zeros.clone(),
            iw_diss: zeros,
            forc_iw_bottom: grid.zeros_2d(),
            forc_iw_surface: grid.zeros_2d(),
        }
    }
}
