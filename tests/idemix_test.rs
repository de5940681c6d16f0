//! Integration tests for the IDEMIX energy integration.
//!
//! These tests verify:
//! - Column energy budget (boundary fluxes in, dissipation out)
//! - Non-negativity under dissipation alone
//! - Fixed points of the implicit solve
//! - Land and single-cell columns
//! - Advection conserves energy and carries it downstream
//! - Advected runs stay finite

use approx::assert_abs_diff_eq;
use zcore_ocean::config::{AdvectionScheme, IdemixConfig, Settings};
use zcore_ocean::diagnostics::{IdemixDiagnostics, column_energy, total_energy};
use zcore_ocean::grid::{Field3D, Grid, GridBuilder, HALO, PeriodicHalo};
use zcore_ocean::idemix::Idemix;
use zcore_ocean::state::OceanState;
use zcore_ocean::time::TimeLevel;
use zcore_ocean::types::LevelIndex;
use zcore_ocean::vertical::ZLevels;

const DT: f64 = 3600.0;
const NSQR: f64 = 1e-5;

fn settings() -> Settings {
    Settings::default().with_time_steps(DT, DT)
}

fn single_column_grid() -> Grid {
    let levels = ZLevels::new(vec![400.0, 250.0, 150.0, 100.0, 50.0]).unwrap();
    GridBuilder::cartesian(1, 1, 10e3, 10e3, levels)
        .with_f_plane(1e-4)
        .build()
        .unwrap()
}

/// Wet everywhere except column `i = HALO + 1`, which is land, and column
/// `i = HALO + 2`, which only has the surface level.
fn ragged_grid() -> Grid {
    let levels = ZLevels::uniform(6, 50.0).unwrap();
    GridBuilder::cartesian(4, 2, 10e3, 10e3, levels)
        .with_f_plane(1e-4)
        .with_bottom(|i, _| match i - HALO {
            1 => None,
            2 => Some(LevelIndex::new(5)),
            3 => Some(LevelIndex::new(2)),
            _ => Some(LevelIndex::BOTTOM),
        })
        .build()
        .unwrap()
}

fn stratified_state(grid: &Grid) -> OceanState {
    let mut state = OceanState::new(grid);
    let time = state.time;
    state.nsqr.get_mut(&time, TimeLevel::Current).fill(NSQR);
    let e = state.idemix.e_iw.get_mut(&time, TimeLevel::Current);
    let nz = grid.nz();
    for i in 0..grid.nx_total() {
        for j in 0..grid.ny_total() {
            for k in 0..nz {
                e[(i, j, k)] = 1e-3 * (1.0 + 0.3 * k as f64);
            }
        }
    }
    state
}

/// Σ w·E_new - Σ w·E_old = dt·(F_bottom + F_surface) - dt·Σ w·iw_diss.
#[test]
fn test_column_energy_budget() {
    let grid = single_column_grid();
    let mut idemix = Idemix::new(&grid, settings(), IdemixConfig::default()).unwrap();
    let mut state = stratified_state(&grid);
    let (i, j) = (HALO, HALO);
    state.idemix.forc_iw_bottom[(i, j)] = 1e-6;
    state.idemix.forc_iw_surface[(i, j)] = 2e-6;

    idemix.set_parameters(&grid, &mut state);
    idemix.integrate(&grid, &mut state);

    let time = state.time;
    let before = column_energy(&grid, state.idemix.e_iw.get(&time, TimeLevel::Current), i, j);
    let after = column_energy(&grid, state.idemix.e_iw.get(&time, TimeLevel::Next), i, j);
    let diss = column_energy(&grid, &state.idemix.iw_diss, i, j);

    assert!(diss > 0.0);
    assert_abs_diff_eq!(after - before, DT * 3e-6 - DT * diss, epsilon = 1e-13);

    let budget = IdemixDiagnostics::from_state(&grid, &state);
    assert!(budget.residual(DT).abs() < 1e-10 * budget.energy_before);
    assert!(idemix.last_forcing().max_abs() == 0.0);
}

#[test]
fn test_energy_stays_non_negative_under_dissipation() {
    let grid = ragged_grid();
    let mut idemix = Idemix::new(&grid, settings(), IdemixConfig::default()).unwrap();
    let mut state = stratified_state(&grid);

    for _ in 0..20 {
        let time = state.time;
        let nsqr = state.nsqr.get(&time, TimeLevel::Current).clone();
        *state.nsqr.get_mut(&time, TimeLevel::Next) = nsqr;

        idemix.set_parameters(&grid, &mut state);
        idemix.integrate(&grid, &mut state);

        let e = state.idemix.e_iw.get(&time, TimeLevel::Next);
        assert!(e.is_finite());
        for i in grid.interior_x() {
            for j in grid.interior_y() {
                for k in grid.topography.wet_levels(i, j) {
                    assert!(e[(i, j, k)] >= 0.0, "E_iw < 0 at ({i}, {j}, {k})");
                }
            }
        }
        state.advance_time();
    }
}

/// Uniform energy with uniform `c0` and no dissipation is a fixed point,
/// also with horizontal diffusion at uniform `v0`.
#[test]
fn test_uniform_state_is_fixed_point() {
    let grid = ragged_grid();
    let config = IdemixConfig::default().with_hor_diffusion(true);
    let mut idemix = Idemix::new(&grid, settings(), config).unwrap();
    let mut state = OceanState::new(&grid);
    let time = state.time;
    state.idemix.e_iw.get_mut(&time, TimeLevel::Current).fill(1e-3);
    state.idemix.c0.fill(0.02);
    state.idemix.v0.fill(0.05);
    state.idemix.alpha_c.fill(0.0);

    idemix.integrate(&grid, &mut state);

    let e = state.idemix.e_iw.get(&time, TimeLevel::Next);
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            for k in grid.topography.wet_levels(i, j) {
                assert_abs_diff_eq!(e[(i, j, k)], 1e-3, epsilon = 1e-15);
            }
        }
    }
    assert_eq!(state.idemix.iw_diss.max_abs(), 0.0);
}

#[test]
fn test_zero_state_stays_zero() {
    let grid = ragged_grid();
    let mut idemix = Idemix::new(&grid, settings(), IdemixConfig::default()).unwrap();
    let mut state = OceanState::new(&grid);
    let time = state.time;
    state.nsqr.get_mut(&time, TimeLevel::Current).fill(NSQR);

    idemix.set_parameters(&grid, &mut state);
    idemix.integrate(&grid, &mut state);

    assert_eq!(state.idemix.e_iw.get(&time, TimeLevel::Next).max_abs(), 0.0);
}

#[test]
fn test_land_column_is_untouched() {
    let grid = ragged_grid();
    let config = IdemixConfig::default()
        .with_hor_diffusion(true)
        .with_advection(AdvectionScheme::Upwind);
    let mut idemix = Idemix::new(&grid, settings(), config).unwrap();
    let mut state = stratified_state(&grid);
    let time = state.time;
    state.idemix.e_iw.get_mut(&time, TimeLevel::Next).fill(7.0);

    idemix.set_parameters(&grid, &mut state);
    idemix.integrate(&grid, &mut state);

    let e = state.idemix.e_iw.get(&time, TimeLevel::Next);
    let land = HALO + 1;
    for j in grid.interior_y() {
        assert!(grid.topography.is_land_column(land, j));
        assert!(e.column(land, j).iter().all(|&x| x == 7.0));
    }
}

#[test]
fn test_single_cell_column_stays_finite() {
    let grid = ragged_grid();
    let mut idemix = Idemix::new(&grid, settings(), IdemixConfig::default()).unwrap();
    let mut state = stratified_state(&grid);
    let (i, j) = (HALO + 2, HALO);
    state.idemix.forc_iw_surface[(i, j)] = 1e-6;
    state.idemix.forc_iw_bottom[(i, j)] = 1e-6;

    idemix.set_parameters(&grid, &mut state);
    idemix.integrate(&grid, &mut state);

    let time = state.time;
    let e = state.idemix.e_iw.get(&time, TimeLevel::Next);
    let top = grid.nz() - 1;
    assert!(e[(i, j, top)].is_finite());
    assert!(e[(i, j, top)] > 0.0);
}

#[test]
fn test_upwind_at_rest_matches_no_advection() {
    let grid = ragged_grid();
    let run = |scheme| {
        let config = IdemixConfig::default().with_advection(scheme);
        let mut idemix = Idemix::new(&grid, settings(), config).unwrap();
        let mut state = stratified_state(&grid);
        idemix.set_parameters(&grid, &mut state);
        idemix.integrate(&grid, &mut state);
        let time = state.time;
        state.idemix.e_iw.get(&time, TimeLevel::Next).clone()
    };
    let plain = run(AdvectionScheme::None);
    let upwind = run(AdvectionScheme::Upwind);
    let superbee = run(AdvectionScheme::Superbee);
    assert_eq!(plain, upwind);
    assert_eq!(plain, superbee);
}

fn periodic_grid() -> Grid {
    let levels = ZLevels::uniform(4, 50.0).unwrap();
    GridBuilder::cartesian(6, 5, 5e3, 5e3, levels)
        .with_f_plane(1e-4)
        .fully_periodic()
        .build()
        .unwrap()
}

/// Eastward flow (sheared in y, so `w = 0`) over a stratified state with an
/// energy anomaly in column `i0` on every row.
fn advected_state(grid: &Grid, i0: usize) -> OceanState {
    let mut state = stratified_state(grid);
    let time = state.time;
    let e = state.idemix.e_iw.get_mut(&time, TimeLevel::Current);
    for j in 0..grid.ny_total() {
        e.column_mut(i0, j).iter_mut().for_each(|x| *x += 1e-3);
    }
    grid.exchange(e);
    for slot in 0..3 {
        let u = state.momentum.u.slot_mut(slot);
        for i in 0..grid.nx_total() {
            for j in 0..grid.ny_total() {
                let phase = 2.0 * std::f64::consts::PI * (j as f64 - HALO as f64) / grid.ny as f64;
                u.column_mut(i, j).fill(0.1 * (1.0 + 0.5 * phase.sin()));
            }
        }
        state.nsqr.slot_mut(slot).fill(NSQR);
    }
    state
}

#[test]
fn test_advective_tendency_conserves_energy() {
    let grid = periodic_grid();
    for scheme in [AdvectionScheme::Upwind, AdvectionScheme::Superbee] {
        let config = IdemixConfig::default().with_advection(scheme);
        let mut idemix = Idemix::new(&grid, settings(), config).unwrap();
        let mut state = advected_state(&grid, HALO + 2);

        idemix.set_parameters(&grid, &mut state);
        idemix.integrate(&grid, &mut state);

        let time = state.time;
        let de = state.idemix.de_iw.get(&time, TimeLevel::Current);
        let magnitude = Field3D::from_fn(grid.nx_total(), grid.ny_total(), grid.nz(), |i, j, k| {
            de[(i, j, k)].abs()
        });
        let net = total_energy(&grid, de);
        let scale = total_energy(&grid, &magnitude);
        assert!(scale > 0.0, "{scheme:?} produced no tendency");
        assert!(net.abs() < 1e-12 * scale, "{scheme:?}: net {net} of {scale}");
    }
}

#[test]
fn test_upwind_step_moves_anomaly_downstream() {
    let grid = periodic_grid();
    let i0 = HALO + 2;
    let run = |scheme| {
        let config = IdemixConfig::default().with_advection(scheme);
        let mut idemix = Idemix::new(&grid, settings(), config).unwrap();
        let mut state = advected_state(&grid, i0);
        idemix.set_parameters(&grid, &mut state);
        idemix.integrate(&grid, &mut state);
        let time = state.time;
        state.idemix.e_iw.get(&time, TimeLevel::Next).clone()
    };
    let still = run(AdvectionScheme::None);
    let moved = run(AdvectionScheme::Upwind);

    for j in grid.interior_y() {
        for k in 0..grid.nz() {
            let delta = |i: usize| moved[(i, j, k)] - still[(i, j, k)];
            assert!(delta(i0) < 0.0, "anomaly not drained at ({j}, {k})");
            assert!(delta(i0 + 1) > 0.0, "nothing arrived downstream at ({j}, {k})");
            assert_abs_diff_eq!(delta(i0 + 1), -delta(i0), epsilon = 1e-9 * delta(i0).abs());
            assert!(delta(i0 - 1).abs() < 1e-9 * delta(i0).abs());
        }
    }
}

#[test]
fn test_advected_runs_stay_finite() {
    let levels = ZLevels::uniform(4, 50.0).unwrap();
    let grid = GridBuilder::cartesian(6, 5, 5e3, 5e3, levels)
        .with_f_plane(1e-4)
        .fully_periodic()
        .build()
        .unwrap();

    for scheme in [AdvectionScheme::Upwind, AdvectionScheme::Superbee] {
        let config = IdemixConfig::default()
            .with_advection(scheme)
            .with_hor_diffusion(true);
        let mut idemix = Idemix::new(&grid, settings(), config).unwrap();
        let mut state = stratified_state(&grid);
        for slot in 0..3 {
            let u = state.momentum.u.slot_mut(slot);
            for i in 0..grid.nx_total() {
                for j in 0..grid.ny_total() {
                    let phase = 2.0 * std::f64::consts::PI * (j as f64) / 5.0;
                    u.column_mut(i, j).fill(0.1 * phase.sin());
                }
            }
            u.wrap_periodic(true, true);
            state.momentum.v.slot_mut(slot).fill(0.05);
            state.nsqr.slot_mut(slot).fill(NSQR);
        }

        for _ in 0..10 {
            idemix.set_parameters(&grid, &mut state);
            idemix.integrate(&grid, &mut state);
            let time = state.time;
            let e = state.idemix.e_iw.get_mut(&time, TimeLevel::Next);
            assert!(e.is_finite(), "{scheme:?} produced non-finite energy");
            grid.exchange(e);
            state.advance_time();
        }
    }
}
