//! Energy sinks of other closures that feed internal waves.

use crate::grid::{Field3D, Grid};

/// Dissipation fields on W points (m^2/s^3), written by other closures.
#[derive(Clone, Debug)]
pub struct DissipationSources {
    /// Horizontal friction dissipation.
    pub k_diss_h: Field3D,
    /// Skew-diffusion (GM) energy release.
    pub p_diss_skew: Field3D,
    /// Horizontal mixing of density.
    pub p_diss_hmix: Field3D,
    /// Isopycnal mixing of density.
    pub p_diss_iso: Field3D,
    /// TEM-formulated GM friction.
    pub k_diss_gm: Field3D,
    /// Bottom friction dissipation.
    pub k_diss_bot: Field3D,
    /// EKE dissipation routed to internal waves.
    pub eke_diss_iw: Field3D,
}

impl DissipationSources {
    pub fn new(grid: &Grid) -> Self {
        let zeros = grid.zeros_3d();
        Self {
            k_diss_h: zeros.clone(),
            p_diss_skew: zeros.clone(),
            p_diss_hmix: zeros.clone(),
            p_diss_iso: zeros.clone(),
            k_diss_gm: zeros.clone(),
            k_diss_bot: zeros.clone(),
            eke_diss_iw: zeros,
        }
    }
}
