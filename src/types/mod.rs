//! Strongly-typed index types.
//!
//! Vertical levels are counted from the deepest level (index 0) up to the
//! surface level (index `nz - 1`). Wrapping level numbers in [`LevelIndex`]
//! keeps them from being mixed up with horizontal grid indices in the
//! topography and solver APIs.
//!
//! # Example
//!
//! ```
//! use zcore_ocean::types::LevelIndex;
//!
//! let bottom = LevelIndex::new(3);
//! let wet: Vec<usize> = bottom.up_to(6).collect();
//! assert_eq!(wet, vec![3, 4, 5]);
//! ```

mod indices;

pub use indices::LevelIndex;
