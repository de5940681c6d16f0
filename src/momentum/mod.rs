//! Momentum tendencies and the momentum step.
//!
//! Order within a step:
//!
//! 1. Coriolis and metric terms (overwrite `du[tau]`, `dv[tau]`)
//! 2. wind stress (adds to the surface level)
//! 3. momentum advection (adds everywhere)
//! 4. friction, timed as `"friction"`
//! 5. pressure / external mode, timed as `"pressure"`
//!
//! The vertical velocity for the new time level is diagnosed separately by
//! [`MomentumSolver::vertical_velocity`] once `u[taup1]` and `v[taup1]`
//! exist.

pub mod advection;
pub mod coriolis;
pub mod friction;
pub mod pressure;
pub mod vertical_velocity;
pub mod wind_stress;

pub use advection::{MomentumAdvectionWorkspace, momentum_advection};
pub use coriolis::tend_coriolis;
pub use friction::{Friction, LinearBottomFriction, NoFriction};
pub use pressure::{ExplicitVelocityUpdate, PressureSolver};
pub use vertical_velocity::vertical_velocity;
pub use wind_stress::tend_wind_stress;

use crate::config::{MomentumConfig, Settings};
use crate::error::ModelError;
use crate::grid::Grid;
use crate::state::OceanState;
use crate::time::StageTimers;

/// Momentum stages with their friction and pressure collaborators.
pub struct MomentumSolver {
    settings: Settings,
    config: MomentumConfig,
    friction: Box<dyn Friction>,
    pressure: Box<dyn PressureSolver>,
    advection: MomentumAdvectionWorkspace,
    timers: StageTimers,
}

impl MomentumSolver {
    /// Solver with no friction and the explicit velocity update.
    pub fn new(grid: &Grid, settings: Settings, config: MomentumConfig) -> Result<Self, ModelError> {
        settings.validate()?;
        Ok(Self {
            settings,
            config,
            friction: Box::new(NoFriction),
            pressure: Box::new(ExplicitVelocityUpdate),
            advection: MomentumAdvectionWorkspace::new(grid),
            timers: StageTimers::new(),
        })
    }

    pub fn with_friction(mut self, friction: Box<dyn Friction>) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_pressure(mut self, pressure: Box<dyn PressureSolver>) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn config(&self) -> &MomentumConfig {
        &self.config
    }

    pub fn timers(&self) -> &StageTimers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut StageTimers {
        &mut self.timers
    }

    /// Accumulate the momentum tendencies and hand over to friction and
    /// the pressure solve.
    pub fn momentum_step(&mut self, grid: &Grid, state: &mut OceanState) {
        let _span = tracing::debug_span!(
            "momentum",
            friction = self.friction.name(),
            pressure = self.pressure.name()
        )
        .entered();

        let time = state.time;
        tend_coriolis(grid, self.config.coord_degree, &time, &mut state.momentum);
        tend_wind_stress(grid, &self.settings, &time, &mut state.momentum);
        momentum_advection(grid, &time, &mut state.momentum, &mut self.advection);

        let settings = &self.settings;
        let friction = &self.friction;
        self.timers
            .measure("friction", || friction.apply(grid, settings, state));
        let pressure = &mut self.pressure;
        self.timers
            .measure("pressure", || pressure.solve(grid, settings, state));
    }

    /// Diagnose `w[taup1]` from the new horizontal velocities.
    pub fn vertical_velocity(&self, grid: &Grid, state: &mut OceanState) {
        let time = state.time;
        vertical_velocity(grid, self.config.continuity, &time, &mut state.momentum);
    }
}

impl std::fmt::Debug for MomentumSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MomentumSolver")
            .field("config", &self.config)
            .field("friction", &self.friction.name())
            .field("pressure", &self.pressure.name())
            .finish()
    }
}
