//! IDEMIX internal-wave energy closure.
//!
//! The energy `E_iw` of the internal gravity wave field lives on W points.
//! It propagates vertically with group velocity `c0`, spreads horizontally
//! with `v0`, is dissipated at a rate `alpha_c * E_iw²`, and is fed by
//! dissipation from the mesoscale closures and by boundary fluxes.
//!
//! # Example
//!
//! ```
//! use zcore_ocean::config::{IdemixConfig, Settings};
//! use zcore_ocean::grid::GridBuilder;
//! use zcore_ocean::idemix::Idemix;
//! use zcore_ocean::state::OceanState;
//! use zcore_ocean::time::TimeLevel;
//! use zcore_ocean::vertical::ZLevels;
//!
//! let grid = GridBuilder::cartesian(3, 3, 10e3, 10e3, ZLevels::uniform(6, 50.0).unwrap())
//!     .with_f_plane(1e-4)
//!     .build()
//!     .unwrap();
//! let settings = Settings::default().with_time_steps(3600.0, 3600.0);
//! let mut idemix = Idemix::new(&grid, settings, IdemixConfig::default()).unwrap();
//! let mut state = OceanState::new(&grid);
//! state.nsqr.get_mut(&state.time, TimeLevel::Current).fill(1e-5);
//!
//! idemix.set_parameters(&grid, &mut state);
//! idemix.integrate(&grid, &mut state);
//! ```

pub mod forcing;
pub mod integrate;
pub mod parameters;

pub use forcing::{assemble_forcing, column_integral};
pub use integrate::{IdemixWorkspace, integrate_idemix};
pub use parameters::{gofx2, hofx1, set_idemix_parameters};

use crate::config::{IdemixConfig, Settings};
use crate::error::ModelError;
use crate::grid::Grid;
use crate::state::OceanState;
use crate::time::TimeLevel;

/// IDEMIX stages bound to one grid.
#[derive(Clone, Debug)]
pub struct Idemix {
    settings: Settings,
    config: IdemixConfig,
    work: IdemixWorkspace,
}

impl Idemix {
    /// Validate settings and allocate scratch storage.
    pub fn new(grid: &Grid, settings: Settings, config: IdemixConfig) -> Result<Self, ModelError> {
        settings.validate()?;
        Ok(Self {
            settings,
            config,
            work: IdemixWorkspace::new(grid),
        })
    }

    pub fn config(&self) -> &IdemixConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Update `c0`, `v0` and `alpha_c` from the current `N²`.
    pub fn set_parameters(&self, grid: &Grid, state: &mut OceanState) {
        let nsqr = state.nsqr.get(&state.time, TimeLevel::Current);
        set_idemix_parameters(grid, &self.settings, nsqr, &mut state.idemix);
    }

    /// Advance `E_iw` into the next time level.
    pub fn integrate(&mut self, grid: &Grid, state: &mut OceanState) {
        integrate_idemix(grid, &self.settings, &self.config, &mut self.work, state);
    }

    /// Forcing assembled during the last call to [`integrate`](Self::integrate).
    pub fn last_forcing(&self) -> &crate::grid::Field3D {
        &self.work.forc
    }
}
