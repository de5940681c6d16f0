//! Dense storage for staggered grid fields.
//!
//! Fields cover the full horizontal extent including the halo. Three
//! dimensional fields keep each water column contiguous, so the vertical
//! solver and column integrals work on plain slices.

use std::ops::{Index, IndexMut};

/// Number of halo cells on every horizontal side.
pub const HALO: usize = 2;

/// Horizontal field, indexed `(i, j)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D {
    nx: usize,
    ny: usize,
    data: Vec<f64>,
}

impl Field2D {
    /// Zero-initialised field of `nx × ny` points.
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self::filled(nx, ny, 0.0)
    }

    /// Field with every point set to `value`.
    pub fn filled(nx: usize, ny: usize, value: f64) -> Self {
        Self {
            nx,
            ny,
            data: vec![value; nx * ny],
        }
    }

    /// Field evaluated point by point.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(nx: usize, ny: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            for j in 0..ny {
                data.push(f(i, j));
            }
        }
        Self { nx, ny, data }
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}

impl Index<(usize, usize)> for Field2D {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.ny + j]
    }
}

impl IndexMut<(usize, usize)> for Field2D {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.ny + j]
    }
}

/// Three dimensional field, indexed `(i, j, k)` with `k = 0` at the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Field3D {
    nx: usize,
    ny: usize,
    nz: usize,
    data: Vec<f64>,
}

impl Field3D {
    /// Zero-initialised field.
    pub fn zeros(nx: usize, ny: usize, nz: usize) -> Self {
        Self::filled(nx, ny, nz, 0.0)
    }

    /// Field with every point set to `value`.
    pub fn filled(nx: usize, ny: usize, nz: usize, value: f64) -> Self {
        Self {
            nx,
            ny,
            nz,
            data: vec![value; nx * ny * nz],
        }
    }

    /// Field evaluated point by point.
    pub fn from_fn<F: FnMut(usize, usize, usize) -> f64>(
        nx: usize,
        ny: usize,
        nz: usize,
        mut f: F,
    ) -> Self {
        let mut data = Vec::with_capacity(nx * ny * nz);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    data.push(f(i, j, k));
                }
            }
        }
        Self { nx, ny, nz, data }
    }

    /// Zero field with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self::zeros(self.nx, self.ny, self.nz)
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// `(nx, ny, nz)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Flat offset of point `(i, j, k)`.
    #[inline]
    pub fn offset(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.ny + j) * self.nz + k
    }

    /// Water column at `(i, j)`, bottom first.
    #[inline]
    pub fn column(&self, i: usize, j: usize) -> &[f64] {
        let start = self.offset(i, j, 0);
        &self.data[start..start + self.nz]
    }

    #[inline]
    pub fn column_mut(&mut self, i: usize, j: usize) -> &mut [f64] {
        let start = self.offset(i, j, 0);
        &mut self.data[start..start + self.nz]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Overwrite with the values of a field of the same shape.
    pub fn copy_from(&mut self, other: &Field3D) {
        debug_assert_eq!(self.shape(), other.shape());
        self.data.copy_from_slice(&other.data);
    }

    /// True when no entry is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Largest absolute value, 0 for an empty field.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

impl Index<(usize, usize, usize)> for Field3D {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &f64 {
        &self.data[(i * self.ny + j) * self.nz + k]
    }
}

impl IndexMut<(usize, usize, usize)> for Field3D {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut f64 {
        &mut self.data[(i * self.ny + j) * self.nz + k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_contiguous() {
        let field = Field3D::from_fn(3, 2, 4, |i, j, k| (100 * i + 10 * j + k) as f64);
        assert_eq!(field.column(2, 1), &[210.0, 211.0, 212.0, 213.0]);
        assert_eq!(field[(1, 0, 3)], 103.0);
    }

    #[test]
    fn test_column_mut_writes_through() {
        let mut field = Field3D::zeros(2, 2, 3);
        field.column_mut(1, 1)[2] = 5.0;
        assert_eq!(field[(1, 1, 2)], 5.0);
        assert_eq!(field.max_abs(), 5.0);
    }

    #[test]
    fn test_field2d_layout() {
        let mut field = Field2D::from_fn(3, 4, |i, j| (i * 4 + j) as f64);
        assert_eq!(field[(2, 3)], 11.0);
        field[(0, 1)] = -1.0;
        assert_eq!(field.as_slice()[1], -1.0);
    }

    #[test]
    fn test_is_finite_detects_nan() {
        let mut field = Field3D::filled(2, 2, 2, 1.0);
        assert!(field.is_finite());
        field[(0, 1, 1)] = f64::NAN;
        assert!(!field.is_finite());
    }
}
