//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::grid::GridError;

/// Errors surfaced when assembling a model.
///
/// Stage kernels never fail; only construction and configuration do.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A state field does not match the grid.
    #[error("field {what} has shape {actual:?}, grid expects {expected:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
}

/// Result alias for model construction.
pub type Result<T> = std::result::Result<T, ModelError>;
