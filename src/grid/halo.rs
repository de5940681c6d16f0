//! Periodic halo exchange for single-domain runs.

use super::field::{Field2D, Field3D, HALO};

/// Fill halo cells from the opposite side of the interior.
pub trait PeriodicHalo {
    /// Wrap the halo in x and/or y.
    fn wrap_periodic(&mut self, cyclic_x: bool, cyclic_y: bool);
}

#[inline]
fn source_index(n_total: usize, index: usize) -> usize {
    let n_interior = n_total - 2 * HALO;
    HALO + (index + n_interior - HALO % n_interior) % n_interior
}

impl PeriodicHalo for Field3D {
    fn wrap_periodic(&mut self, cyclic_x: bool, cyclic_y: bool) {
        let (nx, ny, nz) = self.shape();
        if cyclic_x && nx > 2 * HALO {
            for i in (0..HALO).chain(nx - HALO..nx) {
                let src = source_index(nx, i);
                for j in 0..ny {
                    for k in 0..nz {
                        self[(i, j, k)] = self[(src, j, k)];
                    }
                }
            }
        }
        if cyclic_y && ny > 2 * HALO {
            for i in 0..nx {
                for j in (0..HALO).chain(ny - HALO..ny) {
                    let src = source_index(ny, j);
                    for k in 0..nz {
                        self[(i, j, k)] = self[(i, src, k)];
                    }
                }
            }
        }
    }
}

impl PeriodicHalo for Field2D {
    fn wrap_periodic(&mut self, cyclic_x: bool, cyclic_y: bool) {
        let (nx, ny) = (self.nx(), self.ny());
        if cyclic_x && nx > 2 * HALO {
            for i in (0..HALO).chain(nx - HALO..nx) {
                let src = source_index(nx, i);
                for j in 0..ny {
                    self[(i, j)] = self[(src, j)];
                }
            }
        }
        if cyclic_y && ny > 2 * HALO {
            for i in 0..nx {
                for j in (0..HALO).chain(ny - HALO..ny) {
                    let src = source_index(ny, j);
                    self[(i, j)] = self[(i, src)];
                }
            }
        }
    }
}

/// Interior index that a (possibly halo) index maps to under periodicity.
#[inline]
pub fn periodic_source(n_total: usize, index: usize) -> usize {
    source_index(n_total, index)
}
