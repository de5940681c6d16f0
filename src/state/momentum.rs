//! Velocity fields and their tendencies.

use crate::grid::{Field2D, Field3D, Grid};
use crate::time::TimeRing;

/// Horizontal and vertical velocity with tendency history.
#[derive(Clone, Debug)]
pub struct MomentumState {
    /// Zonal velocity on U points (m/s).
    pub u: TimeRing<Field3D>,
    /// Meridional velocity on V points (m/s).
    pub v: TimeRing<Field3D>,
    /// Vertical velocity on W points (m/s).
    pub w: TimeRing<Field3D>,
    pub du: TimeRing<Field3D>,
    pub dv: TimeRing<Field3D>,
    /// Coriolis part of the last `du` (diagnostic).
    pub du_cor: Field3D,
    pub dv_cor: Field3D,
    /// Advective part of the last `du` (diagnostic).
    pub du_adv: Field3D,
    pub dv_adv: Field3D,
    /// Surface stress (N/m^2, or kinematic in legacy mode).
    pub surface_taux: Field2D,
    pub surface_tauy: Field2D,
}

impl MomentumState {
    pub fn new(grid: &Grid) -> Self {
        let zeros = grid.zeros_3d();
        Self {
            u: TimeRing::filled(zeros.clone()),
            v: TimeRing::filled(zeros.clone()),
            w: TimeRing::filled(zeros.clone()),
            du: TimeRing::filled(zeros.clone()),
            dv: TimeRing::filled(zeros.clone()),
            du_cor: zeros.clone(),
            dv_cor: zeros.clone(),
            du_adv: zeros.clone(),
            dv_adv: zeros,
            surface_taux: grid.zeros_2d(),
            surface_tauy: grid.zeros_2d(),
        }
    }
}
