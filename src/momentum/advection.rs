//! Second-order, energy-conserving momentum advection.
//!
//! Volume transports through the faces of the tracer cells are averaged onto
//! the faces of the U and V cells and multiplied by centred velocities.

use crate::grid::{Field3D, Grid};
use crate::state::MomentumState;
use crate::time::{TimeIndices, TimeLevel};

/// Transports and face fluxes reused across calls.
#[derive(Clone, Debug)]
pub struct MomentumAdvectionWorkspace {
    utr: Field3D,
    vtr: Field3D,
    wtr: Field3D,
    flux_east: Field3D,
    flux_north: Field3D,
    flux_top: Field3D,
}

impl MomentumAdvectionWorkspace {
    pub fn new(grid: &Grid) -> Self {
        let zeros = grid.zeros_3d();
        Self {
            utr: zeros.clone(),
            vtr: zeros.clone(),
            wtr: zeros.clone(),
            flux_east: zeros.clone(),
            flux_north: zeros.clone(),
            flux_top: zeros,
        }
    }

    fn clear_fluxes(&mut self) {
        self.flux_east.fill(0.0);
        self.flux_north.fill(0.0);
        self.flux_top.fill(0.0);
    }
}

/// Add the advective tendency to `du[tau]`/`dv[tau]` and store it in
/// `du_adv`/`dv_adv`.
pub fn momentum_advection(
    grid: &Grid,
    time: &TimeIndices,
    momentum: &mut MomentumState,
    work: &mut MomentumAdvectionWorkspace,
) {
    let _span = tracing::debug_span!("momentum_advection").entered();

    let (nx, ny, nz) = grid.shape();
    let dzt = grid.dzt();
    let u = momentum.u.get(time, TimeLevel::Current);
    let v = momentum.v.get(time, TimeLevel::Current);
    let w = momentum.w.get(time, TimeLevel::Current);
    let mask_u = &grid.masks.u;
    let mask_v = &grid.masks.v;
    let mask_w = &grid.masks.w;

    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                work.utr[(i, j, k)] = u[(i, j, k)] * mask_u[(i, j, k)] * grid.dyt[j] * dzt[k];
                work.vtr[(i, j, k)] =
                    dzt[k] * grid.cosu[j] * grid.dxt[i] * v[(i, j, k)] * mask_v[(i, j, k)];
                work.wtr[(i, j, k)] = w[(i, j, k)] * mask_w[(i, j, k)] * grid.area_t[(i, j)];
            }
        }
    }

    // Zonal momentum
    work.clear_fluxes();
    for i in 1..nx - 2 {
        for j in grid.interior_y() {
            for k in 0..nz {
                work.flux_east[(i, j, k)] = 0.25
                    * (u[(i, j, k)] + u[(i + 1, j, k)])
                    * (work.utr[(i + 1, j, k)] + work.utr[(i, j, k)]);
            }
        }
    }
    for i in grid.interior_x() {
        for j in 1..ny - 2 {
            for k in 0..nz {
                work.flux_north[(i, j, k)] = 0.25
                    * (u[(i, j, k)] + u[(i, j + 1, k)])
                    * (work.vtr[(i + 1, j, k)] + work.vtr[(i, j, k)]);
            }
        }
    }
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            for k in 0..nz - 1 {
                work.flux_top[(i, j, k)] = 0.25
                    * (u[(i, j, k + 1)] + u[(i, j, k)])
                    * (work.wtr[(i, j, k)] + work.wtr[(i + 1, j, k)]);
            }
        }
    }
    divergence(grid, work, mask_u, &grid.area_u, &mut momentum.du_adv);

    // Meridional momentum
    work.clear_fluxes();
    for i in 1..nx - 2 {
        for j in grid.interior_y() {
            for k in 0..nz {
                work.flux_east[(i, j, k)] = 0.25
                    * (v[(i, j, k)] + v[(i + 1, j, k)])
                    * (work.utr[(i, j + 1, k)] + work.utr[(i, j, k)]);
            }
        }
    }
    for i in grid.interior_x() {
        for j in 1..ny - 2 {
            for k in 0..nz {
                work.flux_north[(i, j, k)] = 0.25
                    * (v[(i, j, k)] + v[(i, j + 1, k)])
                    * (work.vtr[(i, j + 1, k)] + work.vtr[(i, j, k)]);
            }
        }
    }
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            for k in 0..nz - 1 {
                work.flux_top[(i, j, k)] = 0.25
                    * (v[(i, j, k + 1)] + v[(i, j, k)])
                    * (work.wtr[(i, j, k)] + work.wtr[(i, j + 1, k)]);
            }
        }
    }
    // V cells share the U-cell area normalization
    divergence(grid, work, mask_v, &grid.area_u, &mut momentum.dv_adv);

    let du = momentum.du.get_mut(time, TimeLevel::Current);
    for (d, adv) in du.as_mut_slice().iter_mut().zip(momentum.du_adv.as_slice()) {
        *d += adv;
    }
    let dv = momentum.dv.get_mut(time, TimeLevel::Current);
    for (d, adv) in dv.as_mut_slice().iter_mut().zip(momentum.dv_adv.as_slice()) {
        *d += adv;
    }
}

/// Masked flux divergence per unit volume into `out` (zero off the interior).
fn divergence(
    grid: &Grid,
    work: &MomentumAdvectionWorkspace,
    mask: &Field3D,
    area: &crate::grid::Field2D,
    out: &mut Field3D,
) {
    let nz = grid.nz();
    let dzt = grid.dzt();
    out.fill(0.0);
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            for k in 0..nz {
                let volume = dzt[k] * area[(i, j)];
                let horizontal = work.flux_east[(i, j, k)] - work.flux_east[(i - 1, j, k)]
                    + work.flux_north[(i, j, k)]
                    - work.flux_north[(i, j - 1, k)];
                let below = if k > 0 { work.flux_top[(i, j, k - 1)] } else { 0.0 };
                let vertical = work.flux_top[(i, j, k)] - below;
                out[(i, j, k)] = -mask[(i, j, k)] * (horizontal + vertical) / volume;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::vertical::ZLevels;

    #[test]
    fn test_uniform_flow_has_no_advective_tendency() {
        let grid = GridBuilder::cartesian(4, 4, 2e3, 2e3, ZLevels::uniform(3, 10.0).unwrap())
            .fully_periodic()
            .build()
            .unwrap();
        let time = TimeIndices::new();
        let mut momentum = MomentumState::new(&grid);
        momentum.u.get_mut(&time, TimeLevel::Current).fill(0.4);
        momentum.v.get_mut(&time, TimeLevel::Current).fill(0.1);
        let mut work = MomentumAdvectionWorkspace::new(&grid);

        momentum_advection(&grid, &time, &mut momentum, &mut work);

        assert!(momentum.du_adv.max_abs() < 1e-15);
        assert!(momentum.dv_adv.max_abs() < 1e-15);
    }

    #[test]
    fn test_meridional_tendency_uses_u_cell_area() {
        // Stretched rows make area_u and area_v differ
        let grid = GridBuilder::cartesian(4, 4, 2e3, 2e3, ZLevels::uniform(2, 10.0).unwrap())
            .with_y_spacing(vec![1e3, 2e3, 4e3, 3e3])
            .fully_periodic()
            .build()
            .unwrap();
        let (i, j) = (3, 3);
        assert!((grid.area_u[(i, j)] - grid.area_v[(i, j)]).abs() > 1.0);

        let time = TimeIndices::new();
        let mut momentum = MomentumState::new(&grid);
        *momentum.v.get_mut(&time, TimeLevel::Current) =
            Field3D::from_fn(8, 8, 2, |i, j, _| 0.1 * ((i + 2 * j) % 5) as f64);
        momentum.u.get_mut(&time, TimeLevel::Current).fill(0.2);
        let mut work = MomentumAdvectionWorkspace::new(&grid);

        momentum_advection(&grid, &time, &mut momentum, &mut work);

        // Recompute the meridional flux divergence at one cell by hand
        let u = momentum.u.get(&time, TimeLevel::Current);
        let v = momentum.v.get(&time, TimeLevel::Current);
        let dzt = grid.dzt();
        let k = 1;
        let utr = |i: usize, j: usize| u[(i, j, k)] * grid.dyt[j] * dzt[k];
        let vtr = |i: usize, j: usize| dzt[k] * grid.cosu[j] * grid.dxt[i] * v[(i, j, k)];
        let east = |i: usize| 0.25 * (v[(i, j, k)] + v[(i + 1, j, k)]) * (utr(i, j + 1) + utr(i, j));
        let north = |j: usize| 0.25 * (v[(i, j, k)] + v[(i, j + 1, k)]) * (vtr(i, j + 1) + vtr(i, j));
        let horizontal = east(i) - east(i - 1) + north(j) - north(j - 1);
        let expected = -horizontal / (dzt[k] * grid.area_u[(i, j)]);

        assert!(expected != 0.0);
        assert!((momentum.dv_adv[(i, j, k)] - expected).abs() <= 1e-10 * expected.abs());
    }

    #[test]
    fn test_accumulates_into_current_tendency() {
        let grid = GridBuilder::cartesian(3, 3, 1e3, 1e3, ZLevels::uniform(2, 10.0).unwrap())
            .fully_periodic()
            .build()
            .unwrap();
        let time = TimeIndices::new();
        let mut momentum = MomentumState::new(&grid);
        let u = momentum.u.get_mut(&time, TimeLevel::Current);
        *u = Field3D::from_fn(7, 7, 2, |i, _, _| 0.1 * i as f64);
        momentum.du.get_mut(&time, TimeLevel::Current).fill(1.0);
        let mut work = MomentumAdvectionWorkspace::new(&grid);

        momentum_advection(&grid, &time, &mut momentum, &mut work);

        let du = momentum.du.get(&time, TimeLevel::Current);
        let expected = 1.0 + momentum.du_adv[(3, 3, 1)];
        assert!((du[(3, 3, 1)] - expected).abs() < 1e-15);
        assert!(momentum.du_adv[(3, 3, 1)] != 0.0);
    }
}
