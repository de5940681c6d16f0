//! Vertical implicit solvers.
//!
//! - [`tridiagonal`]: Thomas algorithm on a single system
//! - [`implicit`]: per-column solves over a grid, honouring bottom topography

pub mod implicit;
pub mod tridiagonal;

pub use implicit::{ImplicitSystem, solve_implicit};
pub use tridiagonal::{thomas_solve, thomas_with};
