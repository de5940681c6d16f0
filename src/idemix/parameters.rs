//! Wave parameters derived from stratification and rotation.
//!
//! The vertical and horizontal group velocities and the dissipation
//! coefficient follow from the local ratio `N / |f|` and a column
//! representative gravity-wave speed `cstar`.

use std::f64::consts::PI;

use crate::config::Settings;
use crate::grid::{Field3D, Grid};
use crate::state::IdemixState;

/// Floor on `|f|` in `N / |f|`.
const CORIOLIS_EPS: f64 = 1e-22;
/// Floor on the representative wave speed (m/s).
const CSTAR_MIN: f64 = 1e-2;
/// Floor on the dissipation coefficient before masking.
const ALPHA_C_MIN: f64 = 1e-4;

/// Vertical group velocity shape function.
///
/// Clamped to `x >= 3`; decays like `x^(-2/3)` for large `x`.
#[inline]
pub fn gofx2(x: f64) -> f64 {
    let x = x.max(3.0);
    let c = 1.0 - (2.0 / PI) * (1.0 / x).asin();
    2.0 / PI / c * 0.9 * x.powf(-2.0 / 3.0) * (1.0 - (-x / 4.3).exp())
}

/// Horizontal group velocity shape function.
///
/// Clamped just above 1; tends to `2/π` for large `x`.
#[inline]
pub fn hofx1(x: f64) -> f64 {
    let x = x.max(1.0 + f64::EPSILON);
    (2.0 / PI) / (1.0 - (2.0 / PI) * (1.0 / x).asin()) * (x - 1.0) / (x + 1.0)
}

/// Recompute `c0`, `v0` and `alpha_c` from the current `N²`.
///
/// Negative `N²` is treated as neutral stratification. Nothing else in
/// `idemix` is touched.
pub fn set_idemix_parameters(grid: &Grid, settings: &Settings, nsqr: &Field3D, idemix: &mut IdemixState) {
    let _span = tracing::debug_span!("idemix_parameters").entered();

    let (nx, ny, nz) = grid.shape();
    let levels = &grid.vertical;
    let mask_w = &grid.masks.w;

    for i in 0..nx {
        for j in 0..ny {
            let n2 = nsqr.column(i, j);
            let mask = mask_w.column(i, j);
            let f = grid.coriolis_t[(i, j)].abs();

            let b_n0: f64 = (0..nz)
                .map(|k| n2[k].max(0.0).sqrt() * levels.w_weight(k) * mask[k])
                .sum();
            let cstar = CSTAR_MIN.max(b_n0 / (PI * settings.jstar));

            let c0 = idemix.c0.column_mut(i, j);
            let v0 = idemix.v0.column_mut(i, j);
            let alpha_c = idemix.alpha_c.column_mut(i, j);
            for k in 0..nz {
                let fxa = n2[k].max(0.0).sqrt() / (CORIOLIS_EPS + f);
                c0[k] = (settings.gamma * cstar * gofx2(fxa) * mask[k]).max(0.0);
                v0[k] = (settings.gamma * cstar * hofx1(fxa) * mask[k]).max(0.0);
                let alpha = settings.mu0 * fxa.max(1.0).acosh() * f / (cstar * cstar);
                alpha_c[k] = ALPHA_C_MIN.max(alpha) * mask[k];
            }
        }
    }
}
