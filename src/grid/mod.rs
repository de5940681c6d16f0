//! Staggered Arakawa C-grid with z-levels and bottom topography.
//!
//! Horizontal arrays cover the interior plus a halo of [`HALO`] cells on each
//! side. With `nx` interior cells the total extent is `nx + 2 * HALO`, and
//! interior indices run over `HALO..nx + HALO`.
//!
//! Point locations:
//!
//! | quantity | x      | y      | z      |
//! |----------|--------|--------|--------|
//! | tracer   | `xt`   | `yt`   | `zt`   |
//! | u        | `xu`   | `yt`   | `zt`   |
//! | v        | `xt`   | `yu`   | `zt`   |
//! | w, E_iw  | `xt`   | `yt`   | `zw`   |
//!
//! # Example
//!
//! ```
//! use zcore_ocean::grid::GridBuilder;
//! use zcore_ocean::vertical::ZLevels;
//!
//! let levels = ZLevels::uniform(4, 50.0).unwrap();
//! let grid = GridBuilder::cartesian(6, 5, 10e3, 10e3, levels)
//!     .with_f_plane(1e-4)
//!     .periodic_x()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(grid.shape(), (10, 9, 4));
//! assert_eq!(grid.interior_x(), 2..8);
//! ```

mod builder;
mod error;
mod field;
mod halo;
mod mask;
mod topography;

pub use builder::{CoriolisProfile, GridBuilder};
pub use error::GridError;
pub use field::{Field2D, Field3D, HALO};
pub use halo::{PeriodicHalo, periodic_source};
pub use mask::Masks;
pub use topography::Topography;

use std::ops::Range;

use crate::types::LevelIndex;
use crate::vertical::ZLevels;

/// Earth radius (m).
pub const EARTH_RADIUS: f64 = 6370e3;

/// Earth rotation rate (1/s).
pub const OMEGA: f64 = std::f64::consts::PI / 43082.0;

/// Metres per degree along a great circle.
pub const DEG_TO_M: f64 = EARTH_RADIUS / 180.0 * std::f64::consts::PI;

/// Static geometry shared by every stage.
///
/// Metric arrays have the total horizontal length (`nx_total` along x,
/// `ny_total` along y). On a Cartesian grid `cost = cosu = 1` and
/// `tantr = 0`.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Interior cells along x.
    pub nx: usize,
    /// Interior cells along y.
    pub ny: usize,

    pub xt: Vec<f64>,
    pub xu: Vec<f64>,
    pub yt: Vec<f64>,
    pub yu: Vec<f64>,

    /// Tracer cell width (m).
    pub dxt: Vec<f64>,
    /// Distance between tracer points, centred on U points (m).
    pub dxu: Vec<f64>,
    pub dyt: Vec<f64>,
    pub dyu: Vec<f64>,

    /// Cosine of latitude at tracer rows.
    pub cost: Vec<f64>,
    /// Cosine of latitude at V rows.
    pub cosu: Vec<f64>,
    /// `tan(latitude) / radius` at tracer rows.
    pub tantr: Vec<f64>,

    pub area_t: Field2D,
    pub area_u: Field2D,
    pub area_v: Field2D,

    /// Coriolis parameter at tracer points (1/s).
    pub coriolis_t: Field2D,

    pub vertical: ZLevels,
    pub topography: Topography,
    pub masks: Masks,

    pub cyclic_x: bool,
    pub cyclic_y: bool,
}

impl Grid {
    /// Total points along x including the halo.
    #[inline]
    pub fn nx_total(&self) -> usize {
        self.nx + 2 * HALO
    }

    /// Total points along y including the halo.
    #[inline]
    pub fn ny_total(&self) -> usize {
        self.ny + 2 * HALO
    }

    /// Number of vertical levels.
    #[inline]
    pub fn nz(&self) -> usize {
        self.vertical.n_levels()
    }

    /// `(nx_total, ny_total, nz)`, the shape of every 3-D field.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx_total(), self.ny_total(), self.nz())
    }

    /// Interior x indices.
    #[inline]
    pub fn interior_x(&self) -> Range<usize> {
        HALO..self.nx + HALO
    }

    /// Interior y indices.
    #[inline]
    pub fn interior_y(&self) -> Range<usize> {
        HALO..self.ny + HALO
    }

    #[inline]
    pub fn dzt(&self) -> &[f64] {
        self.vertical.dzt()
    }

    #[inline]
    pub fn dzw(&self) -> &[f64] {
        self.vertical.dzw()
    }

    #[inline]
    pub fn bottom_index(&self, i: usize, j: usize) -> Option<LevelIndex> {
        self.topography.bottom_index(i, j)
    }

    /// Zero 3-D field on this grid.
    pub fn zeros_3d(&self) -> Field3D {
        let (nx, ny, nz) = self.shape();
        Field3D::zeros(nx, ny, nz)
    }

    /// Zero horizontal field on this grid.
    pub fn zeros_2d(&self) -> Field2D {
        Field2D::zeros(self.nx_total(), self.ny_total())
    }

    /// Wrap the halo of a field according to the grid periodicity.
    pub fn exchange<F: PeriodicHalo>(&self, field: &mut F) {
        field.wrap_periodic(self.cyclic_x, self.cyclic_y);
    }
}
