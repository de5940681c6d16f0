//! Vertical z-level coordinate.
//!
//! The water column is split into fixed-thickness layers. Level 0 is the
//! deepest layer and level `nz - 1` touches the sea surface. Tracer
//! quantities live at layer centres (T-points, depth `zt`), vertical
//! velocity and the internal-wave energy live on the upper interface of each
//! layer (W-points, depth `zw`).
//!
//! Two spacing arrays are derived from the layer thicknesses:
//!
//! - `dzt[k]`: thickness of tracer cell `k`
//! - `dzw[k]`: spacing between tracer centres `k` and `k + 1`; the surface
//!   W-cell only spans the upper half of the top tracer cell, so
//!   `dzw[nz - 1] = 0.5 * dzt[nz - 1]`
//!
//! # Example
//!
//! ```
//! use zcore_ocean::vertical::ZLevels;
//!
//! let levels = ZLevels::new(vec![400.0, 300.0, 200.0, 100.0]).unwrap();
//! assert_eq!(levels.n_levels(), 4);
//! assert!((levels.total_depth() - 1000.0).abs() < 1e-12);
//! assert!((levels.zw()[3] - 0.0).abs() < 1e-12);
//! assert!((levels.dzw()[3] - 50.0).abs() < 1e-12);
//! ```

mod zlevels;

pub use zlevels::ZLevels;
