//! Velocities interpolated onto W points.

use crate::grid::{Field3D, Grid};

/// `u`, `v` and `w` at the vertical position of W points.
#[derive(Clone, Debug)]
pub struct WGridVelocity {
    pub u: Field3D,
    pub v: Field3D,
    pub w: Field3D,
}

impl WGridVelocity {
    pub fn new(grid: &Grid) -> Self {
        let zeros = grid.zeros_3d();
        Self {
            u: zeros.clone(),
            v: zeros.clone(),
            w: zeros,
        }
    }
}

/// Interpolate `u`/`v` onto W levels and rebuild `w` from continuity.
///
/// Horizontal velocities are averaged with thickness weights to the upper
/// interface of each cell. Where a W-face touches topography the transport
/// is handed to the level above so that no flux enters the ground. The
/// vertical component is integrated upwards from zero below level 0.
pub fn velocity_on_wgrid(grid: &Grid, u: &Field3D, v: &Field3D, out: &mut WGridVelocity) {
    let (nx, ny, nz) = grid.shape();
    let dzt = grid.dzt();
    let dzw = grid.dzw();
    let mask_u = &grid.masks.u;
    let mask_v = &grid.masks.v;
    let mask_w = &grid.masks.w;

    for (src, mask, dst) in [(u, mask_u, &mut out.u), (v, mask_v, &mut out.v)] {
        for i in 0..nx {
            for j in 0..ny {
                let s = src.column(i, j);
                let m = mask.column(i, j);
                let d = dst.column_mut(i, j);
                for k in 0..nz - 1 {
                    d[k] = (s[k + 1] * m[k + 1] * 0.5 * dzt[k + 1] + s[k] * m[k] * 0.5 * dzt[k])
                        / dzw[k];
                }
                d[nz - 1] = s[nz - 1] * m[nz - 1] * 0.5 * dzt[nz - 1] / dzw[nz - 1];
                d[0] += s[0] * m[0] * 0.5 * dzt[0] / dzw[0];
            }
        }
    }

    // Shift transport off faces that touch topography
    for k in 0..nz - 1 {
        for i in 0..nx - 1 {
            for j in 0..ny {
                let mask = mask_w[(i, j, k)] * mask_w[(i + 1, j, k)];
                out.u[(i, j, k + 1)] += out.u[(i, j, k)] * dzw[k] / dzw[k + 1] * (1.0 - mask);
                out.u[(i, j, k)] *= mask;
            }
        }
        for i in 0..nx {
            for j in 0..ny - 1 {
                let mask = mask_w[(i, j, k)] * mask_w[(i, j + 1, k)];
                out.v[(i, j, k + 1)] += out.v[(i, j, k)] * dzw[k] / dzw[k + 1] * (1.0 - mask);
                out.v[(i, j, k)] *= mask;
            }
        }
    }

    out.w.fill(0.0);
    for i in 1..nx {
        for j in 1..ny {
            let mut acc = 0.0;
            for k in 0..nz {
                acc -= dzw[k]
                    * ((out.u[(i, j, k)] - out.u[(i - 1, j, k)]) / (grid.cost[j] * grid.dxt[i])
                        + (grid.cosu[j] * out.v[(i, j, k)] - grid.cosu[j - 1] * out.v[(i, j - 1, k)])
                            / (grid.cost[j] * grid.dyt[j]));
                out.w[(i, j, k)] = acc;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::vertical::ZLevels;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_uniform_flow_on_flat_bottom() {
        let grid = GridBuilder::cartesian(4, 4, 1e3, 1e3, ZLevels::uniform(3, 10.0).unwrap())
            .fully_periodic()
            .build()
            .unwrap();
        let u = Field3D::filled(8, 8, 3, 0.2);
        let v = grid.zeros_3d();
        let mut out = WGridVelocity::new(&grid);
        velocity_on_wgrid(&grid, &u, &v, &mut out);

        // Interior face between two wet levels carries the full velocity
        assert!((out.u[(3, 3, 1)] - 0.2).abs() < TOL);
        // Bottom W level also collects the lower half of the bottom cell
        assert!((out.u[(3, 3, 0)] - 0.3).abs() < TOL);
        // Surface W cell is half a tracer cell thick
        assert!((out.u[(3, 3, 2)] - 0.2).abs() < TOL);
        // Uniform flow is divergence free
        for k in 0..3 {
            assert!(out.w[(4, 4, k)].abs() < TOL);
        }
    }
}
