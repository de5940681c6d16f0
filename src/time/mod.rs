//! Time levels and explicit time stepping.
//!
//! - [`ring`]: three named time levels per prognostic field
//! - [`adams_bashforth`]: quasi-second-order Adams-Bashforth update
//! - [`timers`]: scoped stage timing

mod adams_bashforth;
mod ring;
mod timers;

pub use adams_bashforth::AdamsBashforth2;
pub use ring::{TimeIndices, TimeLevel, TimeRing};
pub use timers::{StageTimers, TimerSummary};
