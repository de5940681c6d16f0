//! Fluent construction of [`Grid`].

use super::field::{Field2D, HALO};
use super::halo::periodic_source;
use super::mask::Masks;
use super::topography::Topography;
use super::{DEG_TO_M, EARTH_RADIUS, Grid, GridError, OMEGA};
use crate::types::LevelIndex;
use crate::vertical::ZLevels;

/// How the Coriolis parameter is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoriolisProfile {
    /// `2Ω sin(lat)` on spherical grids, zero on Cartesian grids.
    Default,
    /// Constant `f0`.
    FPlane(f64),
    /// `f0 + beta * y` with `y` the distance from the southern interior edge.
    BetaPlane { f0: f64, beta: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Coordinates {
    Cartesian,
    Spherical,
}

type BottomFn = Box<dyn Fn(usize, usize) -> Option<LevelIndex>>;

/// Builder for [`Grid`].
///
/// Horizontal spacings are given for the interior cells only; halo cells
/// copy the nearest interior spacing, or the wrapped one on periodic axes.
/// On spherical grids spacings and origins are in degrees.
pub struct GridBuilder {
    nx: usize,
    ny: usize,
    levels: ZLevels,
    dxt: Vec<f64>,
    dyt: Vec<f64>,
    x_origin: f64,
    y_origin: f64,
    coordinates: Coordinates,
    coriolis: CoriolisProfile,
    bottom: Option<BottomFn>,
    cyclic_x: bool,
    cyclic_y: bool,
}

impl GridBuilder {
    /// Cartesian grid with uniform spacing in metres.
    pub fn cartesian(nx: usize, ny: usize, dx: f64, dy: f64, levels: ZLevels) -> Self {
        Self {
            nx,
            ny,
            levels,
            dxt: vec![dx; nx],
            dyt: vec![dy; ny],
            x_origin: 0.0,
            y_origin: 0.0,
            coordinates: Coordinates::Cartesian,
            coriolis: CoriolisProfile::Default,
            bottom: None,
            cyclic_x: false,
            cyclic_y: false,
        }
    }

    /// Spherical grid with uniform spacing in degrees.
    ///
    /// `lon0`/`lat0` locate the south-west corner of the interior.
    pub fn spherical(
        nx: usize,
        ny: usize,
        dlon: f64,
        dlat: f64,
        lon0: f64,
        lat0: f64,
        levels: ZLevels,
    ) -> Self {
        Self {
            x_origin: lon0,
            y_origin: lat0,
            coordinates: Coordinates::Spherical,
            ..Self::cartesian(nx, ny, dlon, dlat, levels)
        }
    }

    /// Non-uniform interior spacing along x.
    pub fn with_x_spacing(mut self, dxt: Vec<f64>) -> Self {
        self.dxt = dxt;
        self
    }

    /// Non-uniform interior spacing along y.
    pub fn with_y_spacing(mut self, dyt: Vec<f64>) -> Self {
        self.dyt = dyt;
        self
    }

    pub fn with_f_plane(mut self, f0: f64) -> Self {
        self.coriolis = CoriolisProfile::FPlane(f0);
        self
    }

    pub fn with_beta_plane(mut self, f0: f64, beta: f64) -> Self {
        self.coriolis = CoriolisProfile::BetaPlane { f0, beta };
        self
    }

    /// Bottom index per interior column, called with total indices.
    ///
    /// Columns not covered (the halo on closed axes) are land. Without a
    /// bottom function every interior column is wet down to level 0.
    pub fn with_bottom<F>(mut self, bottom: F) -> Self
    where
        F: Fn(usize, usize) -> Option<LevelIndex> + 'static,
    {
        self.bottom = Some(Box::new(bottom));
        self
    }

    pub fn periodic_x(mut self) -> Self {
        self.cyclic_x = true;
        self
    }

    pub fn periodic_y(mut self) -> Self {
        self.cyclic_y = true;
        self
    }

    pub fn fully_periodic(self) -> Self {
        self.periodic_x().periodic_y()
    }

    /// Assemble metrics, topography and masks.
    pub fn build(self) -> Result<Grid, GridError> {
        let (nx, ny) = (self.nx, self.ny);
        if nx == 0 || ny == 0 {
            return Err(GridError::EmptyDomain { nx, ny });
        }
        check_spacing("x", &self.dxt, nx)?;
        check_spacing("y", &self.dyt, ny)?;

        let nx_total = nx + 2 * HALO;
        let ny_total = ny + 2 * HALO;
        let nz = self.levels.n_levels();

        let dxt_raw = extend_with_halo(&self.dxt, self.cyclic_x);
        let dyt_raw = extend_with_halo(&self.dyt, self.cyclic_y);
        let (xt, xu) = positions(&dxt_raw, self.x_origin);
        let (yt, yu) = positions(&dyt_raw, self.y_origin);

        let (dxt, dyt, cost, cosu, tantr) = match self.coordinates {
            Coordinates::Cartesian => (
                dxt_raw,
                dyt_raw,
                vec![1.0; ny_total],
                vec![1.0; ny_total],
                vec![0.0; ny_total],
            ),
            Coordinates::Spherical => (
                dxt_raw.iter().map(|d| d * DEG_TO_M).collect(),
                dyt_raw.iter().map(|d| d * DEG_TO_M).collect(),
                yt.iter().map(|lat| lat.to_radians().cos()).collect(),
                yu.iter().map(|lat| lat.to_radians().cos()).collect(),
                yt.iter()
                    .map(|lat| lat.to_radians().tan() / EARTH_RADIUS)
                    .collect(),
            ),
        };
        let dxu = centre_spacing(&dxt);
        let dyu = centre_spacing(&dyt);

        let area_t = Field2D::from_fn(nx_total, ny_total, |i, j| cost[j] * dxt[i] * dyt[j]);
        let area_u = Field2D::from_fn(nx_total, ny_total, |i, j| cost[j] * dxu[i] * dyt[j]);
        let area_v = Field2D::from_fn(nx_total, ny_total, |i, j| cosu[j] * dxt[i] * dyu[j]);

        // Distance from the southern interior edge, for beta planes
        let y_south = yt[HALO] - 0.5 * dyt[HALO];
        let coriolis_t = Field2D::from_fn(nx_total, ny_total, |_, j| match self.coriolis {
            CoriolisProfile::Default => match self.coordinates {
                Coordinates::Spherical => 2.0 * OMEGA * yt[j].to_radians().sin(),
                Coordinates::Cartesian => 0.0,
            },
            CoriolisProfile::FPlane(f0) => f0,
            CoriolisProfile::BetaPlane { f0, beta } => {
                let y = match self.coordinates {
                    Coordinates::Spherical => (yt[j] - self.y_origin) * DEG_TO_M,
                    Coordinates::Cartesian => yt[j] - y_south,
                };
                f0 + beta * y
            }
        });

        let mut bottom = Vec::with_capacity(nx_total * ny_total);
        for i in 0..nx_total {
            for j in 0..ny_total {
                bottom.push(self.bottom_at(i, j, nx_total, ny_total));
            }
        }
        let topography = Topography::new(nx_total, ny_total, nz, bottom)?;
        let masks = Masks::from_topography(&topography);

        tracing::debug!(
            nx,
            ny,
            nz,
            wet_columns = topography.n_wet_columns(),
            "grid assembled"
        );

        Ok(Grid {
            nx,
            ny,
            xt,
            xu,
            yt,
            yu,
            dxt,
            dxu,
            dyt,
            dyu,
            cost,
            cosu,
            tantr,
            area_t,
            area_u,
            area_v,
            coriolis_t,
            vertical: self.levels,
            topography,
            masks,
            cyclic_x: self.cyclic_x,
            cyclic_y: self.cyclic_y,
        })
    }

    fn bottom_at(&self, i: usize, j: usize, nx_total: usize, ny_total: usize) -> Option<LevelIndex> {
        let interior = |n: usize, total: usize| (HALO..total - HALO).contains(&n);
        let si = if interior(i, nx_total) {
            i
        } else if self.cyclic_x {
            periodic_source(nx_total, i)
        } else {
            return None;
        };
        let sj = if interior(j, ny_total) {
            j
        } else if self.cyclic_y {
            periodic_source(ny_total, j)
        } else {
            return None;
        };
        match &self.bottom {
            Some(f) => f(si, sj),
            None => Some(LevelIndex::BOTTOM),
        }
    }
}

fn check_spacing(axis: &'static str, spacing: &[f64], n: usize) -> Result<(), GridError> {
    if spacing.len() != n {
        return Err(GridError::dimension_mismatch(axis, n, spacing.len()));
    }
    if let Some((index, &value)) = spacing
        .iter()
        .enumerate()
        .find(|&(_, &d)| !(d > 0.0 && d.is_finite()))
    {
        return Err(GridError::NonPositiveSpacing { axis, index, value });
    }
    Ok(())
}

/// Pad interior spacing with `HALO` cells on each side.
fn extend_with_halo(interior: &[f64], cyclic: bool) -> Vec<f64> {
    let n = interior.len();
    let total = n + 2 * HALO;
    (0..total)
        .map(|i| {
            if (HALO..n + HALO).contains(&i) {
                interior[i - HALO]
            } else if cyclic {
                interior[periodic_source(total, i) - HALO]
            } else if i < HALO {
                interior[0]
            } else {
                interior[n - 1]
            }
        })
        .collect()
}

/// Cell centres and east/north faces from widths and the interior origin.
fn positions(widths: &[f64], origin: f64) -> (Vec<f64>, Vec<f64>) {
    let total = widths.len();
    let mut centre = vec![0.0; total];
    centre[HALO] = origin + 0.5 * widths[HALO];
    for i in HALO + 1..total {
        centre[i] = centre[i - 1] + 0.5 * (widths[i - 1] + widths[i]);
    }
    for i in (0..HALO).rev() {
        centre[i] = centre[i + 1] - 0.5 * (widths[i] + widths[i + 1]);
    }
    let face = centre.iter().zip(widths).map(|(c, w)| c + 0.5 * w).collect();
    (centre, face)
}

/// Distance between neighbouring centres; the last entry repeats.
fn centre_spacing(widths: &[f64]) -> Vec<f64> {
    let mut spacing: Vec<f64> = widths.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
    let last = spacing.last().copied().unwrap_or(widths[0]);
    spacing.push(last);
    spacing
}
