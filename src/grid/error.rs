//! Grid construction errors.

use thiserror::Error;

/// Errors raised while assembling a [`Grid`](super::Grid).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// The vertical grid needs a bottom and a surface level.
    #[error("at least two vertical levels are required, got {0}")]
    TooFewLevels(usize),

    /// A layer thickness is zero, negative or not finite.
    #[error("layer {level} has invalid thickness {value}")]
    NonPositiveThickness { level: usize, value: f64 },

    /// A horizontal spacing is zero, negative or not finite.
    #[error("{axis} spacing at index {index} is invalid: {value}")]
    NonPositiveSpacing {
        axis: &'static str,
        index: usize,
        value: f64,
    },

    /// No interior cells in one direction.
    #[error("empty horizontal domain: nx = {nx}, ny = {ny}")]
    EmptyDomain { nx: usize, ny: usize },

    /// An input array does not match the grid dimensions.
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A bottom index points outside the vertical grid.
    #[error("bottom index {level} at column ({i}, {j}) exceeds {nz} levels")]
    BottomIndexOutOfRange {
        i: usize,
        j: usize,
        level: usize,
        nz: usize,
    },
}

impl GridError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }
}
