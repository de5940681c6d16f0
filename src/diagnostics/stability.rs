//! Stability monitoring for the momentum and IDEMIX fields.
//!
//! Scans the newest time level for non-finite values, runaway velocities
//! and negative or runaway internal-wave energy.
//!
//! # Example
//!
//! ```ignore
//! use zcore_ocean::diagnostics::{StabilityMonitor, StabilityThresholds};
//!
//! let mut monitor = StabilityMonitor::new(StabilityThresholds::default());
//!
//! // after each step:
//! let status = monitor.check(&grid, &state, TimeLevel::Next);
//! if monitor.should_stop() {
//!     break;
//! }
//! ```

use std::fmt;

use crate::grid::{Field3D, Grid};
use crate::state::OceanState;
use crate::time::TimeLevel;

/// Thresholds for stability monitoring.
#[derive(Debug, Clone, Copy)]
pub struct StabilityThresholds {
    /// Maximum horizontal or vertical speed (m/s).
    pub max_velocity: f64,
    /// Maximum internal-wave energy (m^2/s^2).
    pub max_energy: f64,
    /// Most negative internal-wave energy tolerated before warning.
    pub min_energy: f64,
    /// Maximum consecutive warnings before recommending stop.
    pub max_consecutive_warnings: usize,
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            max_velocity: 10.0,
            max_energy: 1.0,
            min_energy: -1e-12,
            max_consecutive_warnings: 10,
        }
    }
}

impl StabilityThresholds {
    /// Only catches catastrophic blow-up.
    pub fn relaxed() -> Self {
        Self {
            max_velocity: 1000.0,
            max_energy: 1e3,
            min_energy: -1e-3,
            max_consecutive_warnings: 100,
        }
    }

    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn with_max_energy(mut self, max_energy: f64) -> Self {
        self.max_energy = max_energy;
        self
    }

    pub fn with_min_energy(mut self, min_energy: f64) -> Self {
        self.min_energy = min_energy;
        self
    }
}

/// Types of stability warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum StabilityWarning {
    /// NaN or Inf in a prognostic field.
    NonFiniteValue {
        field: &'static str,
        i: usize,
        j: usize,
        k: usize,
    },
    VelocityExceedsMax {
        field: &'static str,
        value: f64,
        threshold: f64,
    },
    EnergyExceedsMax { value: f64, threshold: f64 },
    EnergyBelowMin { value: f64, threshold: f64 },
    SolutionBlowUp,
}

impl fmt::Display for StabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteValue { field, i, j, k } => {
                write!(f, "non-finite {} at ({}, {}, {})", field, i, j, k)
            }
            Self::VelocityExceedsMax {
                field,
                value,
                threshold,
            } => write!(
                f,
                "|{}| exceeds max: {:.3e} m/s > {:.3e} m/s",
                field, value, threshold
            ),
            Self::EnergyExceedsMax { value, threshold } => write!(
                f,
                "E_iw exceeds max: {:.3e} > {:.3e} m^2/s^2",
                value, threshold
            ),
            Self::EnergyBelowMin { value, threshold } => write!(
                f,
                "E_iw below min: {:.3e} < {:.3e} m^2/s^2",
                value, threshold
            ),
            Self::SolutionBlowUp => write!(f, "solution blow-up detected"),
        }
    }
}

/// Result of one stability check.
#[derive(Debug, Clone)]
pub struct StabilityStatus {
    pub max_velocity: f64,
    /// Energy range (min, max) over wet W points.
    pub energy_range: (f64, f64),
    pub is_stable: bool,
    pub warnings: Vec<StabilityWarning>,
}

impl StabilityStatus {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Blow-up or non-finite values were detected.
    pub fn has_critical_warnings(&self) -> bool {
        self.warnings.iter().any(|w| {
            matches!(
                w,
                StabilityWarning::SolutionBlowUp | StabilityWarning::NonFiniteValue { .. }
            )
        })
    }
}

/// Tracks stability across steps.
#[derive(Debug, Clone)]
pub struct StabilityMonitor {
    thresholds: StabilityThresholds,
    consecutive_warnings: usize,
    total_checks: usize,
    total_warnings: usize,
    last_status: Option<StabilityStatus>,
}

impl StabilityMonitor {
    pub fn new(thresholds: StabilityThresholds) -> Self {
        Self {
            thresholds,
            consecutive_warnings: 0,
            total_checks: 0,
            total_warnings: 0,
            last_status: None,
        }
    }

    pub fn thresholds(&self) -> &StabilityThresholds {
        &self.thresholds
    }

    pub fn consecutive_warnings(&self) -> usize {
        self.consecutive_warnings
    }

    pub fn total_checks(&self) -> usize {
        self.total_checks
    }

    pub fn total_warnings(&self) -> usize {
        self.total_warnings
    }

    pub fn last_status(&self) -> Option<&StabilityStatus> {
        self.last_status.as_ref()
    }

    /// Check one time level of `state`.
    pub fn check(&mut self, grid: &Grid, state: &OceanState, level: TimeLevel) -> StabilityStatus {
        self.total_checks += 1;
        let time = &state.time;
        let mut warnings = Vec::new();
        let mut found_blow_up = false;

        let velocities = [
            ("u", state.momentum.u.get(time, level), &grid.masks.u),
            ("v", state.momentum.v.get(time, level), &grid.masks.v),
            ("w", state.momentum.w.get(time, level), &grid.masks.w),
        ];
        let mut max_velocity = 0.0_f64;
        for (name, field, mask) in velocities {
            match scan(grid, field, mask) {
                Scan::NonFinite { i, j, k } => {
                    warnings.push(StabilityWarning::NonFiniteValue { field: name, i, j, k });
                    found_blow_up = true;
                }
                Scan::Range { max_abs, .. } => {
                    max_velocity = max_velocity.max(max_abs);
                    if max_abs > self.thresholds.max_velocity {
                        warnings.push(StabilityWarning::VelocityExceedsMax {
                            field: name,
                            value: max_abs,
                            threshold: self.thresholds.max_velocity,
                        });
                    }
                }
            }
        }

        let mut energy_range = (0.0, 0.0);
        match scan(grid, state.idemix.e_iw.get(time, level), &grid.masks.w) {
            Scan::NonFinite { i, j, k } => {
                warnings.push(StabilityWarning::NonFiniteValue {
                    field: "E_iw",
                    i,
                    j,
                    k,
                });
                found_blow_up = true;
            }
            Scan::Range { min, max, .. } => {
                energy_range = (min, max);
                if max > self.thresholds.max_energy {
                    warnings.push(StabilityWarning::EnergyExceedsMax {
                        value: max,
                        threshold: self.thresholds.max_energy,
                    });
                }
                if min < self.thresholds.min_energy {
                    warnings.push(StabilityWarning::EnergyBelowMin {
                        value: min,
                        threshold: self.thresholds.min_energy,
                    });
                }
            }
        }

        if found_blow_up || max_velocity > 1e6 {
            warnings.push(StabilityWarning::SolutionBlowUp);
        }

        let is_stable = warnings.is_empty();
        if is_stable {
            self.consecutive_warnings = 0;
        } else {
            self.consecutive_warnings += 1;
            self.total_warnings += warnings.len();
            for warning in &warnings {
                tracing::warn!(check = self.total_checks, "{}", warning);
            }
        }

        let status = StabilityStatus {
            max_velocity,
            energy_range,
            is_stable,
            warnings,
        };
        self.last_status = Some(status.clone());
        status
    }

    /// Warning history says the run should be stopped.
    pub fn should_stop(&self) -> bool {
        if self.consecutive_warnings >= self.thresholds.max_consecutive_warnings {
            return true;
        }
        self.last_status
            .as_ref()
            .is_some_and(StabilityStatus::has_critical_warnings)
    }
}

enum Scan {
    NonFinite { i: usize, j: usize, k: usize },
    Range { min: f64, max: f64, max_abs: f64 },
}

/// Min, max and largest magnitude of `field` over the wet interior.
fn scan(grid: &Grid, field: &Field3D, mask: &Field3D) -> Scan {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            for k in 0..grid.nz() {
                if mask[(i, j, k)] == 0.0 {
                    continue;
                }
                let value = field[(i, j, k)];
                if !value.is_finite() {
                    return Scan::NonFinite { i, j, k };
                }
                min = min.min(value);
                max = max.max(value);
            }
        }
    }
    if min > max {
        // no wet points
        min = 0.0;
        max = 0.0;
    }
    Scan::Range {
        min,
        max,
        max_abs: min.abs().max(max.abs()),
    }
}
