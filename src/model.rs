//! One-grid ocean core: momentum and IDEMIX stages in model order.

use crate::config::{IdemixConfig, MomentumConfig, Settings};
use crate::error::Result;
use crate::grid::Grid;
use crate::idemix::Idemix;
use crate::momentum::{Friction, MomentumSolver, PressureSolver};
use crate::state::OceanState;
use crate::time::StageTimers;

/// Grid plus the configured momentum and IDEMIX stages.
///
/// A call to [`step`](Self::step) reads the current time level of the state
/// and writes the next one. Rotating the time levels is left to the caller
/// ([`OceanState::advance_time`]), so that other components can still see
/// both levels in between.
#[derive(Debug)]
pub struct OceanCore {
    grid: Grid,
    momentum: MomentumSolver,
    idemix: Idemix,
    timers: StageTimers,
}

impl OceanCore {
    pub fn new(
        grid: Grid,
        settings: Settings,
        idemix_config: IdemixConfig,
        momentum_config: MomentumConfig,
    ) -> Result<Self> {
        let momentum = MomentumSolver::new(&grid, settings.clone(), momentum_config)?;
        let idemix = Idemix::new(&grid, settings, idemix_config)?;
        Ok(Self {
            grid,
            momentum,
            idemix,
            timers: StageTimers::new(),
        })
    }

    pub fn with_friction(mut self, friction: Box<dyn Friction>) -> Self {
        self.momentum = self.momentum.with_friction(friction);
        self
    }

    pub fn with_pressure(mut self, pressure: Box<dyn PressureSolver>) -> Self {
        self.momentum = self.momentum.with_pressure(pressure);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn momentum(&self) -> &MomentumSolver {
        &self.momentum
    }

    pub fn idemix(&self) -> &Idemix {
        &self.idemix
    }

    /// Stage timers of this core ("momentum", "vertical_velocity",
    /// "idemix"); friction and pressure are timed by the momentum solver.
    pub fn timers(&self) -> &StageTimers {
        &self.timers
    }

    /// Fresh zero state on this core's grid.
    pub fn new_state(&self) -> OceanState {
        OceanState::new(&self.grid)
    }

    /// Advance `state` by one step into its next time level.
    pub fn step(&mut self, state: &mut OceanState) -> Result<()> {
        state.check_shape(&self.grid)?;
        let grid = &self.grid;
        let momentum = &mut self.momentum;
        let idemix = &mut self.idemix;

        self.timers
            .measure("momentum", || momentum.momentum_step(grid, state));
        self.timers
            .measure("vertical_velocity", || momentum.vertical_velocity(grid, state));
        self.timers.measure("idemix", || {
            idemix.set_parameters(grid, state);
            idemix.integrate(grid, state);
        });
        Ok(())
    }
}
