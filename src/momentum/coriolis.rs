//! Coriolis and spherical metric tendencies.
//!
//! Velocities are averaged from the four surrounding points of the other
//! component, weighted by the cell widths, which conserves energy on the
//! C-grid. On spherical grids (`coord_degree`) the metric terms
//! `u v tan(φ) / a` and `-u² tan(φ) / a` are added.

use crate::grid::{Field3D, Grid};
use crate::state::MomentumState;
use crate::time::{TimeIndices, TimeLevel};

/// Overwrite `du[tau]` and `dv[tau]` on the interior with the Coriolis
/// tendency, keeping a copy in `du_cor`/`dv_cor`.
pub fn tend_coriolis(grid: &Grid, coord_degree: bool, time: &TimeIndices, momentum: &mut MomentumState) {
    let _span = tracing::debug_span!("tend_coriolis", coord_degree).entered();

    let nz = grid.nz();
    let f = &grid.coriolis_t;
    let (dxt, dxu, dyt, dyu) = (&grid.dxt, &grid.dxu, &grid.dyt, &grid.dyu);
    let (cost, cosu, tantr) = (&grid.cost, &grid.cosu, &grid.tantr);
    let mask_u = &grid.masks.u;
    let mask_v = &grid.masks.v;
    let u = momentum.u.get(time, TimeLevel::Current);
    let v = momentum.v.get(time, TimeLevel::Current);
    let du_cor = &mut momentum.du_cor;
    let dv_cor = &mut momentum.dv_cor;

    du_cor.fill(0.0);
    dv_cor.fill(0.0);

    for i in grid.interior_x() {
        for j in grid.interior_y() {
            let wu0 = dxt[i] / dxu[i];
            let wu1 = dxt[i + 1] / dxu[i];
            let wv0 = dyt[j] * cost[j] / (dyu[j] * cosu[j]);
            let wv1 = dyt[j + 1] * cost[j + 1] / (dyu[j] * cosu[j]);
            for k in 0..nz {
                let v_west = v[(i, j, k)] + v[(i, j - 1, k)];
                let v_east = v[(i + 1, j, k)] + v[(i + 1, j - 1, k)];
                du_cor[(i, j, k)] = mask_u[(i, j, k)]
                    * (f[(i, j)] * v_west * wu0 + f[(i + 1, j)] * v_east * wu1)
                    * 0.25;

                let u_south = u[(i - 1, j, k)] + u[(i, j, k)];
                let u_north = u[(i - 1, j + 1, k)] + u[(i, j + 1, k)];
                dv_cor[(i, j, k)] = -mask_v[(i, j, k)]
                    * (f[(i, j)] * u_south * wv0 + f[(i, j + 1)] * u_north * wv1)
                    * 0.25;
            }
        }
    }

    if coord_degree {
        for i in grid.interior_x() {
            for j in grid.interior_y() {
                let wu0 = dxt[i] / dxu[i];
                let wu1 = dxt[i + 1] / dxu[i];
                let wv0 = dyt[j] * cost[j] / (dyu[j] * cosu[j]);
                let wv1 = dyt[j + 1] * cost[j + 1] / (dyu[j] * cosu[j]);
                for k in 0..nz {
                    let west = (u[(i, j, k)] + u[(i - 1, j, k)])
                        * (v[(i, j, k)] + v[(i, j - 1, k)])
                        * wu0;
                    let east = (u[(i + 1, j, k)] + u[(i, j, k)])
                        * (v[(i + 1, j, k)] + v[(i + 1, j - 1, k)])
                        * wu1;
                    du_cor[(i, j, k)] += mask_u[(i, j, k)] * 0.125 * tantr[j] * (west + east);

                    let south = u[(i, j, k)] + u[(i - 1, j, k)];
                    let north = u[(i, j + 1, k)] + u[(i - 1, j + 1, k)];
                    dv_cor[(i, j, k)] -= mask_v[(i, j, k)]
                        * 0.125
                        * (tantr[j] * south * south * wv0 + tantr[j + 1] * north * north * wv1);
                }
            }
        }
    }

    copy_interior(grid, &momentum.du_cor, momentum.du.get_mut(time, TimeLevel::Current));
    copy_interior(grid, &momentum.dv_cor, momentum.dv.get_mut(time, TimeLevel::Current));
}

fn copy_interior(grid: &Grid, src: &Field3D, dst: &mut Field3D) {
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            dst.column_mut(i, j).copy_from_slice(src.column(i, j));
        }
    }
}
