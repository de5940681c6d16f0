//! Prognostic and diagnostic model state.
//!
//! Every evolving field carries three time levels ([`TimeRing`]); the shared
//! [`TimeIndices`] in [`OceanState`] say which slot is previous, current and
//! next. Fields are allocated once for a grid and mutated in place.

mod dissipation;
mod idemix;
mod momentum;

pub use dissipation::DissipationSources;
pub use idemix::IdemixState;
pub use momentum::MomentumState;

use crate::error::ModelError;
use crate::grid::{Field3D, Grid};
use crate::time::{TimeIndices, TimeRing};

/// Complete state advanced by one model step.
#[derive(Clone, Debug)]
pub struct OceanState {
    pub time: TimeIndices,
    pub momentum: MomentumState,
    pub idemix: IdemixState,
    /// Squared buoyancy frequency on W points (1/s^2).
    pub nsqr: TimeRing<Field3D>,
    pub dissipation: DissipationSources,
}

impl OceanState {
    /// Zero state on `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            time: TimeIndices::new(),
            momentum: MomentumState::new(grid),
            idemix: IdemixState::new(grid),
            nsqr: TimeRing::filled(grid.zeros_3d()),
            dissipation: DissipationSources::new(grid),
        }
    }

    /// Check that the prognostic fields match `grid`.
    pub fn check_shape(&self, grid: &Grid) -> Result<(), ModelError> {
        let expected = grid.shape();
        let fields = [
            ("u", self.momentum.u.slot(0)),
            ("v", self.momentum.v.slot(0)),
            ("w", self.momentum.w.slot(0)),
            ("E_iw", self.idemix.e_iw.slot(0)),
            ("Nsqr", self.nsqr.slot(0)),
            ("K_diss_h", &self.dissipation.k_diss_h),
        ];
        for (what, field) in fields {
            if field.shape() != expected {
                return Err(ModelError::ShapeMismatch {
                    what,
                    expected,
                    actual: field.shape(),
                });
            }
        }
        Ok(())
    }

    /// Rotate the time levels after a completed step.
    pub fn advance_time(&mut self) {
        self.time.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::vertical::ZLevels;

    #[test]
    fn test_new_state_matches_grid() {
        let grid = GridBuilder::cartesian(3, 2, 1.0, 1.0, ZLevels::uniform(3, 1.0).unwrap())
            .build()
            .unwrap();
        let mut state = OceanState::new(&grid);
        assert!(state.check_shape(&grid).is_ok());

        state.nsqr = TimeRing::filled(Field3D::zeros(1, 1, 1));
        assert!(matches!(
            state.check_shape(&grid),
            Err(ModelError::ShapeMismatch { what: "Nsqr", .. })
        ));
    }
}
