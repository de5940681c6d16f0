//! External-mode (pressure) stage seam.
//!
//! A full model solves a barotropic streamfunction here and corrects the
//! new velocities. [`ExplicitVelocityUpdate`] only performs the explicit
//! Adams-Bashforth velocity update, which is enough for rigid-lid tests
//! without pressure gradients.

use crate::config::Settings;
use crate::grid::Grid;
use crate::state::OceanState;
use crate::time::AdamsBashforth2;

/// Produces `u[taup1]` and `v[taup1]` from the accumulated tendencies.
pub trait PressureSolver: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn solve(&mut self, grid: &Grid, settings: &Settings, state: &mut OceanState);
}

/// `u(n+1) = u(n) + dt * AB2(du)`, masked, with periodic halo exchange.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExplicitVelocityUpdate;

impl PressureSolver for ExplicitVelocityUpdate {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn solve(&mut self, grid: &Grid, settings: &Settings, state: &mut OceanState) {
        let ab = AdamsBashforth2::new(settings.ab_eps);
        let time = state.time;
        let momentum = &mut state.momentum;

        for (vel, tend, mask) in [
            (&mut momentum.u, &mut momentum.du, &grid.masks.u),
            (&mut momentum.v, &mut momentum.dv, &grid.masks.v),
        ] {
            let (_, cur, next) = vel.split_all(&time);
            next.copy_from(cur);
            let (prev_tend, cur_tend, _) = tend.split_all(&time);
            ab.apply_masked(grid, settings.dt_mom, cur_tend, prev_tend, mask, next);
            grid.exchange(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::time::TimeLevel;
    use crate::vertical::ZLevels;

    #[test]
    fn test_constant_tendency_moves_velocity() {
        let grid = GridBuilder::cartesian(3, 3, 1e3, 1e3, ZLevels::uniform(2, 10.0).unwrap())
            .fully_periodic()
            .build()
            .unwrap();
        let settings = Settings::default().with_time_steps(100.0, 100.0);
        let mut state = OceanState::new(&grid);
        let time = state.time;
        state.momentum.u.get_mut(&time, TimeLevel::Current).fill(1.0);
        state.momentum.du.get_mut(&time, TimeLevel::Current).fill(1e-4);
        state.momentum.du.get_mut(&time, TimeLevel::Previous).fill(1e-4);

        ExplicitVelocityUpdate.solve(&grid, &settings, &mut state);

        let u = state.momentum.u.get(&time, TimeLevel::Next);
        assert!((u[(3, 3, 1)] - 1.01).abs() < 1e-12);
        // Halo refreshed from the interior
        assert!((u[(0, 3, 1)] - 1.01).abs() < 1e-12);
        let v = state.momentum.v.get(&time, TimeLevel::Next);
        assert_eq!(v.max_abs(), 0.0);
    }
}
