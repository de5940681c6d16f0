//! 0/1 land-sea masks on the staggered points.

use super::field::Field3D;
use super::topography::Topography;

/// Masks at tracer, U, V and W points.
///
/// Stored as `f64` so that stencils can multiply by them directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Masks {
    pub t: Field3D,
    pub u: Field3D,
    pub v: Field3D,
    pub w: Field3D,
}

impl Masks {
    /// Derive all masks from the bottom index.
    ///
    /// A U point is wet when both neighbouring tracer cells are wet, a V point
    /// likewise in y, and a W point when the tracer cells above and below are
    /// wet. The last index along each staggering direction keeps the tracer
    /// mask.
    pub fn from_topography(topo: &Topography) -> Self {
        let (nx, ny, nz) = topo.shape();
        let t = Field3D::from_fn(nx, ny, nz, |i, j, k| {
            if topo.is_wet(i, j, k) { 1.0 } else { 0.0 }
        });

        let u = Field3D::from_fn(nx, ny, nz, |i, j, k| {
            if i + 1 < nx {
                t[(i, j, k)] * t[(i + 1, j, k)]
            } else {
                t[(i, j, k)]
            }
        });
        let v = Field3D::from_fn(nx, ny, nz, |i, j, k| {
            if j + 1 < ny {
                t[(i, j, k)] * t[(i, j + 1, k)]
            } else {
                t[(i, j, k)]
            }
        });
        let w = Field3D::from_fn(nx, ny, nz, |i, j, k| {
            if k + 1 < nz {
                t[(i, j, k)] * t[(i, j, k + 1)]
            } else {
                t[(i, j, k)]
            }
        });

        Self { t, u, v, w }
    }
}
