//! Time integration of the internal-wave energy.
//!
//! One call advances `E_iw` from the current to the next time level:
//!
//! 1. forcing assembly
//! 2. implicit vertical propagation and dissipation
//! 3. dissipation diagnostic
//! 4. optional horizontal diffusion
//! 5. optional advection with Adams-Bashforth stepping

use crate::advection::{AdvectionScheme, Fluxes, WGridVelocity, advection_fluxes, velocity_on_wgrid};
use crate::config::{IdemixConfig, Settings};
use crate::grid::{Field3D, Grid, HALO};
use crate::solver::{ImplicitSystem, solve_implicit};
use crate::state::{IdemixState, OceanState};
use crate::time::{AdamsBashforth2, TimeIndices, TimeLevel};

use super::forcing::assemble_forcing;

/// Scratch storage reused across calls.
#[derive(Clone, Debug)]
pub struct IdemixWorkspace {
    pub forc: Field3D,
    pub max_e: Field3D,
    pub system: ImplicitSystem,
    pub fluxes: Fluxes,
    pub velocity: WGridVelocity,
    delta: Vec<f64>,
}

impl IdemixWorkspace {
    pub fn new(grid: &Grid) -> Self {
        Self {
            forc: grid.zeros_3d(),
            max_e: grid.zeros_3d(),
            system: ImplicitSystem::for_grid(grid),
            fluxes: Fluxes::new(grid),
            velocity: WGridVelocity::new(grid),
            delta: vec![0.0; grid.nz()],
        }
    }
}

/// Advance `E_iw` by one tracer time step.
///
/// Writes `E_iw[taup1]`, `dE_iw[tau]` (when advecting) and `iw_diss`.
pub fn integrate_idemix(
    grid: &Grid,
    settings: &Settings,
    config: &IdemixConfig,
    work: &mut IdemixWorkspace,
    state: &mut OceanState,
) {
    let _span = tracing::debug_span!("integrate_idemix", advection = ?config.advection).entered();

    let OceanState {
        time,
        momentum,
        idemix,
        dissipation,
        ..
    } = state;
    let dt = settings.dt_tracer;

    assemble_forcing(grid, config, dissipation, &mut work.forc);

    let e_tau = idemix.e_iw.get(time, TimeLevel::Current);
    for (m, e) in work.max_e.as_mut_slice().iter_mut().zip(e_tau.as_slice()) {
        *m = e.max(0.0);
    }

    assemble_system(grid, settings, idemix, work, time);
    solve_implicit(
        &grid.topography,
        &work.system,
        idemix.e_iw.get_mut(time, TimeLevel::Next),
    );

    {
        let e_next = idemix.e_iw.get(time, TimeLevel::Next).as_slice();
        let alpha = idemix.alpha_c.as_slice();
        let max_e = work.max_e.as_slice();
        for (n, diss) in idemix.iw_diss.as_mut_slice().iter_mut().enumerate() {
            *diss = alpha[n] * max_e[n] * e_next[n];
        }
    }

    if config.hor_diffusion {
        horizontal_diffusion(grid, settings, idemix, &mut work.fluxes, time);
    }

    if config.advection != AdvectionScheme::None {
        velocity_on_wgrid(
            grid,
            momentum.u.get(time, TimeLevel::Current),
            momentum.v.get(time, TimeLevel::Current),
            &mut work.velocity,
        );
        advection_fluxes(
            config.advection,
            grid,
            &work.velocity,
            idemix.e_iw.get(time, TimeLevel::Current),
            dt,
            &mut work.fluxes,
        );
        advective_tendency(grid, &work.fluxes, idemix.de_iw.get_mut(time, TimeLevel::Current));

        let (de_prev, de_cur, _) = idemix.de_iw.split_all(time);
        AdamsBashforth2::new(settings.ab_eps).apply(
            grid,
            dt,
            de_cur,
            de_prev,
            idemix.e_iw.get_mut(time, TimeLevel::Next),
        );
    }
}

/// Fill the tridiagonal coefficients for every interior column.
fn assemble_system(
    grid: &Grid,
    settings: &Settings,
    idemix: &IdemixState,
    work: &mut IdemixWorkspace,
    time: &TimeIndices,
) {
    let nz = grid.nz();
    let dt = settings.dt_tracer;
    let dzt = grid.dzt();
    let dzw = grid.dzw();
    let top = nz - 1;
    let half_top = 0.5 * dzw[top];
    let e_tau = idemix.e_iw.get(time, TimeLevel::Current);
    let delta = &mut work.delta;
    let system = &mut work.system;

    for i in grid.interior_x() {
        for j in grid.interior_y() {
            let c0 = idemix.c0.column(i, j);
            let alpha = idemix.alpha_c.column(i, j);
            let max_e = work.max_e.column(i, j);
            let forc = work.forc.column(i, j);
            let e = e_tau.column(i, j);

            for k in 0..top {
                delta[k] = dt * settings.tau_v / dzt[k + 1] * 0.5 * (c0[k] + c0[k + 1]);
            }
            delta[top] = 0.0;

            let a = system.a.column_mut(i, j);
            a[0] = 0.0;
            for k in 1..top {
                a[k] = -delta[k - 1] * c0[k - 1] / dzw[k];
            }
            a[top] = -delta[top - 1] / half_top * c0[top - 1];

            let b = system.b.column_mut(i, j);
            b[0] = 0.0;
            for k in 1..top {
                b[k] = 1.0 + (delta[k] + delta[k - 1]) * c0[k] / dzw[k] + dt * alpha[k] * max_e[k];
            }
            b[top] = 1.0 + delta[top - 1] / half_top * c0[top] + dt * alpha[top] * max_e[top];

            let b_edge = system.b_edge.column_mut(i, j);
            for k in 0..nz {
                b_edge[k] = 1.0 + delta[k] / dzw[k] * c0[k] + dt * alpha[k] * max_e[k];
            }

            let c = system.c.column_mut(i, j);
            for k in 0..top {
                c[k] = -delta[k] / dzw[k] * c0[k + 1];
            }
            c[top] = 0.0;

            let forc_bottom = idemix.forc_iw_bottom[(i, j)];
            let d = system.d.column_mut(i, j);
            for k in 0..nz {
                d[k] = e[k] + dt * forc[k];
            }
            let d_edge = system.d_edge.column_mut(i, j);
            for k in 0..nz {
                d_edge[k] = e[k] + dt * forc[k] + dt * forc_bottom / dzw[k];
            }
            // Surface flux enters after the edge row is formed
            system.d.column_mut(i, j)[top] += dt * idemix.forc_iw_surface[(i, j)] / half_top;
        }
    }
}

/// Horizontal down-gradient flux of `v0 * E_iw`, added to `E_iw[taup1]`.
fn horizontal_diffusion(
    grid: &Grid,
    settings: &Settings,
    idemix: &mut IdemixState,
    fluxes: &mut Fluxes,
    time: &TimeIndices,
) {
    let (nx, ny, nz) = grid.shape();
    let dt = settings.dt_tracer;
    let tau_h = settings.tau_h;
    let v0 = &idemix.v0;
    let mask_u = &grid.masks.u;
    let mask_v = &grid.masks.v;
    let mask_w = &grid.masks.w;
    let (e_tau, e_next) = idemix
        .e_iw
        .split_levels(time, TimeLevel::Current, TimeLevel::Next);

    fluxes.clear();
    for i in 0..nx - 1 {
        for j in 0..ny {
            for k in 0..nz {
                fluxes.east[(i, j, k)] = tau_h
                    * 0.5
                    * (v0[(i + 1, j, k)] + v0[(i, j, k)])
                    * (v0[(i + 1, j, k)] * e_tau[(i + 1, j, k)] - v0[(i, j, k)] * e_tau[(i, j, k)])
                    / (grid.cost[j] * grid.dxu[i])
                    * mask_u[(i, j, k)];
            }
        }
    }
    if settings.legacy_compatibility && nx > 2 * HALO {
        for j in 0..ny {
            fluxes.east.column_mut(nx - 5, j).fill(0.0);
        }
    }

    for i in 0..nx {
        for j in 0..ny - 1 {
            for k in 0..nz {
                fluxes.north[(i, j, k)] = tau_h
                    * 0.5
                    * (v0[(i, j + 1, k)] + v0[(i, j, k)])
                    * (v0[(i, j + 1, k)] * e_tau[(i, j + 1, k)] - v0[(i, j, k)] * e_tau[(i, j, k)])
                    / grid.dyu[j]
                    * mask_v[(i, j, k)]
                    * grid.cosu[j];
            }
        }
    }

    for i in grid.interior_x() {
        for j in grid.interior_y() {
            let dx = grid.cost[j] * grid.dxt[i];
            let dy = grid.cost[j] * grid.dyt[j];
            for k in 0..nz {
                e_next[(i, j, k)] += dt
                    * mask_w[(i, j, k)]
                    * ((fluxes.east[(i, j, k)] - fluxes.east[(i - 1, j, k)]) / dx
                        + (fluxes.north[(i, j, k)] - fluxes.north[(i, j - 1, k)]) / dy);
            }
        }
    }
}

/// Flux divergence of the advective fluxes into `de` on interior columns.
fn advective_tendency(grid: &Grid, fluxes: &Fluxes, de: &mut Field3D) {
    let nz = grid.nz();
    let top = nz - 1;
    let dzw = grid.dzw();
    let mask_w = &grid.masks.w;

    for i in grid.interior_x() {
        for j in grid.interior_y() {
            let dx = grid.cost[j] * grid.dxt[i];
            let dy = grid.cost[j] * grid.dyt[j];
            let ft = fluxes.top.column(i, j);
            for k in 0..nz {
                let horizontal = mask_w[(i, j, k)]
                    * (-(fluxes.east[(i, j, k)] - fluxes.east[(i - 1, j, k)]) / dx
                        - (fluxes.north[(i, j, k)] - fluxes.north[(i, j - 1, k)]) / dy);
                let vertical = if k == 0 {
                    -ft[0] / dzw[0]
                } else if k < top {
                    -(ft[k] - ft[k - 1]) / dzw[k]
                } else {
                    -(ft[top] - ft[top - 1]) / (0.5 * dzw[top])
                };
                de[(i, j, k)] = horizontal + vertical;
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

    fn single_column() -> Grid {
        GridBuilder::cartesian(1, 1, 1e4, 1e4, ZLevels::uniform(5, 100.0).unwrap())
            .with_f_plane(1e-4)
            .build()
            .unwrap()
    }

    fn settings() -> Settings {
        Settings::default().with_time_steps(3600.0, 3600.0)
    }

    #[test]
    fn test_zero_state_stays_zero() {
        let grid = single_column();
        let mut state = OceanState::new(&grid);
        state.idemix.c0.fill(0.1);
        state.idemix.alpha_c.fill(1e-3);
        let config = IdemixConfig::default();
        let mut work = IdemixWorkspace::new(&grid);

        integrate_idemix(&grid, &settings(), &config, &mut work, &mut state);

        let next = state.idemix.e_iw.get(&state.time, TimeLevel::Next);
        assert!(next.max_abs() < TOL);
    }

    #[test]
    fn test_uniform_state_without_dissipation_unchanged() {
        let grid = single_column();
        let mut state = OceanState::new(&grid);
        state.idemix.c0.fill(0.5);
        state.idemix.e_iw.get_mut(&state.time, TimeLevel::Current).fill(2.0);
        let config = IdemixConfig::default();
        let mut work = IdemixWorkspace::new(&grid);

        integrate_idemix(&grid, &settings(), &config, &mut work, &mut state);

        let next = state.idemix.e_iw.get(&state.time, TimeLevel::Next);
        for k in 0..5 {
            assert!((next[(2, 2, k)] - 2.0).abs() < 1e-10, "level {k}: {}", next[(2, 2, k)]);
        }
    }

    #[test]
    fn test_dissipation_diagnostic() {
        let grid = single_column();
        let mut state = OceanState::new(&grid);
        state.idemix.c0.fill(0.1);
        state.idemix.alpha_c.fill(1e-4);
        state.idemix.e_iw.get_mut(&state.time, TimeLevel::Current).fill(1e-3);
        let mut work = IdemixWorkspace::new(&grid);

        integrate_idemix(&grid, &settings(), &IdemixConfig::default(), &mut work, &mut state);

        let next = state.idemix.e_iw.get(&state.time, TimeLevel::Next)[(2, 2, 3)];
        let expected = 1e-4 * 1e-3 * next;
        assert!((state.idemix.iw_diss[(2, 2, 3)] - expected).abs() < 1e-20);
        assert!(next < 1e-3);
    }

    #[test]
    fn test_advection_of_uniform_energy_at_rest_is_zero() {
        let grid = single_column();
        let mut state = OceanState::new(&grid);
        state.idemix.e_iw.get_mut(&state.time, TimeLevel::Current).fill(1.0);
        state.idemix.e_iw.get_mut(&state.time, TimeLevel::Next).fill(1.0);
        let config = IdemixConfig::default().with_advection(AdvectionScheme::Upwind);
        let mut work = IdemixWorkspace::new(&grid);

        integrate_idemix(&grid, &settings(), &config, &mut work, &mut state);

        let de = state.idemix.de_iw.get(&state.time, TimeLevel::Current);
        assert!(de.max_abs() < TOL);
    }

    /// East diffusion tendency of a linear `E_iw` profile in x at uniform
    /// `v0`; the east fluxes are left in `fluxes`.
    fn linear_profile_diffusion(legacy: bool) -> (Grid, Fluxes, Field3D) {
        let grid = GridBuilder::cartesian(6, 3, 1e4, 1e4, ZLevels::uniform(2, 100.0).unwrap())
            .fully_periodic()
            .build()
            .unwrap();
        let settings = settings().with_legacy_compatibility(legacy);
        let mut state = OceanState::new(&grid);
        let time = state.time;
        state.idemix.v0.fill(0.1);
        *state.idemix.e_iw.get_mut(&time, TimeLevel::Current) =
            Field3D::from_fn(10, 7, 2, |i, _, _| 1e-3 * i as f64);
        let mut fluxes = Fluxes::new(&grid);

        horizontal_diffusion(&grid, &settings, &mut state.idemix, &mut fluxes, &time);

        let e_next = state.idemix.e_iw.get(&time, TimeLevel::Next).clone();
        (grid, fluxes, e_next)
    }

    #[test]
    fn test_east_flux_zeroing_by_mode() {
        let (grid, default_fluxes, default_next) = linear_profile_diffusion(false);
        let (_, legacy_fluxes, legacy_next) = linear_profile_diffusion(true);
        let nx = grid.nx_total();
        let (j, k) = (HALO + 1, 1);

        // Only the last column is closed by default
        assert_eq!(default_fluxes.east[(nx - 1, j, k)], 0.0);
        assert!(default_fluxes.east[(nx - 5, j, k)] > 0.0);
        assert_eq!(legacy_fluxes.east[(nx - 5, j, k)], 0.0);
        assert_eq!(legacy_fluxes.east[(nx - 4, j, k)], default_fluxes.east[(nx - 4, j, k)]);

        // Uniform flux has no divergence; the closed face lowers the cell
        // west of it and raises the cell east of it
        for i in grid.interior_x() {
            assert!(default_next[(i, j, k)].abs() < TOL);
        }
        assert!(legacy_next[(nx - 5, j, k)] < 0.0);
        assert!(legacy_next[(nx - 4, j, k)] > 0.0);
        for i in grid.interior_x().filter(|&i| i != nx - 5 && i != nx - 4) {
            assert!(legacy_next[(i, j, k)].abs() < TOL);
        }
    }
}
