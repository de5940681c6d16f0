//! Run-time diagnostics: energy budgets and stability checks.

mod energy;
mod stability;

pub use energy::{IdemixDiagnostics, column_energy, total_energy};
pub use stability::{StabilityMonitor, StabilityStatus, StabilityThresholds, StabilityWarning};
