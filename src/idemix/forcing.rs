//! Interior forcing of the internal-wave field.

use crate::config::{EkeInjection, ForcingSource, IdemixConfig};
use crate::grid::{Field3D, Grid};
use crate::state::DissipationSources;

/// W-weighted, masked vertical integral of one column.
///
/// The surface W cell counts with half its thickness.
pub fn column_integral(grid: &Grid, field: &Field3D, i: usize, j: usize) -> f64 {
    let levels = &grid.vertical;
    let values = field.column(i, j);
    let mask = grid.masks.w.column(i, j);
    (0..grid.nz())
        .map(|k| levels.w_weight(k) * values[k] * mask[k])
        .sum()
}

/// Assemble the energy input from other closures into `forc`.
///
/// `forc` is fully overwritten.
pub fn assemble_forcing(
    grid: &Grid,
    config: &IdemixConfig,
    sources: &DissipationSources,
    forc: &mut Field3D,
) {
    match config.forcing {
        ForcingSource::EddyKineticEnergy { injection } => {
            forc.copy_from(&sources.eke_diss_iw);
            match injection {
                EkeInjection::InPlace => {}
                EkeInjection::Bottom => redistribute(grid, forc, 1.0, false),
                EkeInjection::SurfaceAndBottom { bottom_fraction } => {
                    redistribute(grid, forc, bottom_fraction, true)
                }
            }
        }
        ForcingSource::Diagnosed {
            cabbeling,
            tem_friction,
        } => {
            let out = forc.as_mut_slice();
            let k_diss_h = sources.k_diss_h.as_slice();
            let p_diss_skew = sources.p_diss_skew.as_slice();
            for (n, f) in out.iter_mut().enumerate() {
                *f = k_diss_h[n] - p_diss_skew[n];
            }
            if cabbeling {
                let hmix = sources.p_diss_hmix.as_slice();
                let iso = sources.p_diss_iso.as_slice();
                for (n, f) in out.iter_mut().enumerate() {
                    *f -= hmix[n] + iso[n];
                }
            }
            if tem_friction {
                for (f, gm) in out.iter_mut().zip(sources.k_diss_gm.as_slice()) {
                    *f += gm;
                }
            }
        }
    }

    if config.bottom_friction {
        for (f, bot) in forc.as_mut_slice().iter_mut().zip(sources.k_diss_bot.as_slice()) {
            *f += bot;
        }
    }
}

/// Move the column integral of `forc` to the bottom cell, optionally
/// splitting off a share for the surface cell.
///
/// The surface share is assigned, so in a column whose only wet level is
/// the surface level it replaces the bottom share.
fn redistribute(grid: &Grid, forc: &mut Field3D, bottom_fraction: f64, with_surface: bool) {
    let nz = grid.nz();
    let dzw = grid.dzw();

    let mut integrals = Vec::with_capacity(grid.nx * grid.ny);
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            integrals.push(column_integral(grid, forc, i, j));
        }
    }
    forc.fill(0.0);

    let mut n = 0;
    for i in grid.interior_x() {
        for j in grid.interior_y() {
            let total = integrals[n];
            n += 1;
            let Some(kb) = grid.bottom_index(i, j) else {
                continue;
            };
            let kb = kb.get();
            let column = forc.column_mut(i, j);
            column[kb] = bottom_fraction * total / dzw[kb];
            if with_surface {
                column[nz - 1] = (1.0 - bottom_fraction) * total / (0.5 * dzw[nz - 1]);
            }
        }
    }
}
