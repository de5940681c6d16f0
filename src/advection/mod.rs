//! Flux primitives for scalars living on W points.
//!
//! Fluxes are evaluated on cell faces: `east[i]` between columns `i` and
//! `i + 1`, `north[j]` between rows `j` and `j + 1` (already multiplied by
//! `cosu`), and `top[k]` between W levels `k` and `k + 1`. Faces outside the
//! evaluated ranges are left at zero, so the divergence of a cleared
//! [`Fluxes`] vanishes on land and at the domain edges.

mod superbee;
mod upwind;
mod wgrid;

pub use crate::config::AdvectionScheme;
pub use superbee::{superbee_flux_wgrid, superbee_limiter};
pub use upwind::upwind_flux_wgrid;
pub use wgrid::{WGridVelocity, velocity_on_wgrid};

use crate::grid::{Field3D, Grid};

/// Face fluxes in the three directions.
#[derive(Clone, Debug)]
pub struct Fluxes {
    pub east: Field3D,
    pub north: Field3D,
    pub top: Field3D,
}

impl Fluxes {
    pub fn new(grid: &Grid) -> Self {
        let zeros = grid.zeros_3d();
        Self {
            east: zeros.clone(),
            north: zeros.clone(),
            top: zeros,
        }
    }

    /// Reset all faces to zero.
    pub fn clear(&mut self) {
        self.east.fill(0.0);
        self.north.fill(0.0);
        self.top.fill(0.0);
    }
}

/// Fluxes of `var` under `scheme`; [`AdvectionScheme::None`] clears them.
pub fn advection_fluxes(
    scheme: AdvectionScheme,
    grid: &Grid,
    vel: &WGridVelocity,
    var: &Field3D,
    dt: f64,
    fluxes: &mut Fluxes,
) {
    match scheme {
        AdvectionScheme::None => fluxes.clear(),
        AdvectionScheme::Upwind => upwind_flux_wgrid(grid, vel, var, fluxes),
        AdvectionScheme::Superbee => superbee_flux_wgrid(grid, vel, var, dt, fluxes),
    }
}

/// Transport mask between W points `a` and `b`.
#[inline]
pub(crate) fn pair_mask(mask_w: &Field3D, a: (usize, usize, usize), b: (usize, usize, usize)) -> f64 {
    mask_w[a] * mask_w[b]
}
