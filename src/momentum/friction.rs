//! Friction stage seam.
//!
//! Full vertical and lateral friction closures live outside this crate. The
//! stage only needs something that updates the momentum tendencies or the
//! new velocities; two small implementations are provided.

use crate::config::Settings;
use crate::grid::Grid;
use crate::state::OceanState;
use crate::time::TimeLevel;

/// Momentum friction applied between advection and the pressure solve.
pub trait Friction: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Modify the state in place.
    fn apply(&self, grid: &Grid, settings: &Settings, state: &mut OceanState);
}

/// Frictionless flow.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFriction;

impl Friction for NoFriction {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply(&self, _grid: &Grid, _settings: &Settings, _state: &mut OceanState) {}
}

/// Linear drag `-r_bot * u` on the deepest wet velocity level.
#[derive(Clone, Copy, Debug)]
pub struct LinearBottomFriction {
    /// Drag coefficient (1/s).
    pub r_bot: f64,
}

impl LinearBottomFriction {
    pub fn new(r_bot: f64) -> Self {
        Self { r_bot }
    }
}

impl Friction for LinearBottomFriction {
    fn name(&self) -> &'static str {
        "linear_bottom"
    }

    fn apply(&self, grid: &Grid, _settings: &Settings, state: &mut OceanState) {
        let time = state.time;
        let momentum = &mut state.momentum;
        let pairs = [
            (&grid.masks.u, momentum.u.get(&time, TimeLevel::Current), momentum.du.get_mut(&time, TimeLevel::Current)),
            (&grid.masks.v, momentum.v.get(&time, TimeLevel::Current), momentum.dv.get_mut(&time, TimeLevel::Current)),
        ];
        for (mask, vel, tend) in pairs {
            for i in grid.interior_x() {
                for j in grid.interior_y() {
                    let m = mask.column(i, j);
                    // Deepest level where the face is open
                    if let Some(kb) = m.iter().position(|&x| x > 0.0) {
                        tend[(i, j, kb)] -= self.r_bot * vel[(i, j, kb)];
                    }
                }
            }
        }
    }
}
