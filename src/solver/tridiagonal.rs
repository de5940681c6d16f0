//! Thomas algorithm for tridiagonal systems.
//!
//! Row `r` of the system reads
//!
//! ```text
//! a[r] * x[r-1] + b[r] * x[r] + c[r] * x[r+1] = d[r]
//! ```
//!
//! with `a[0]` and `c[n-1]` ignored. No pivoting is performed; the callers
//! assemble diagonally dominant systems.

/// Solve a tridiagonal system whose coefficients are produced by closures.
///
/// Coefficient closures take the row number. `scratch` and `x` need at least
/// `n` entries; only the first `n` are touched.
#[inline]
pub fn thomas_with<A, B, C, D>(
    n: usize,
    a: A,
    b: B,
    c: C,
    d: D,
    scratch: &mut [f64],
    x: &mut [f64],
) where
    A: Fn(usize) -> f64,
    B: Fn(usize) -> f64,
    C: Fn(usize) -> f64,
    D: Fn(usize) -> f64,
{
    if n == 0 {
        return;
    }
    let cp = &mut scratch[..n];
    let x = &mut x[..n];

    cp[0] = c(0) / b(0);
    x[0] = d(0) / b(0);
    for r in 1..n {
        let ar = a(r);
        let m = b(r) - ar * cp[r - 1];
        cp[r] = c(r) / m;
        x[r] = (d(r) - ar * x[r - 1]) / m;
    }
    for r in (0..n - 1).rev() {
        x[r] -= cp[r] * x[r + 1];
    }
}

/// Solve a tridiagonal system given as slices.
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64], scratch: &mut [f64], x: &mut [f64]) {
    let n = b.len();
    debug_assert!(a.len() >= n && c.len() >= n && d.len() >= n);
    thomas_with(n, |r| a[r], |r| b[r], |r| c[r], |r| d[r], scratch, x);
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_identity() {
        let mut x = [0.0; 3];
        let mut scratch = [0.0; 3];
        thomas_solve(
            &[0.0; 3],
            &[1.0; 3],
            &[0.0; 3],
            &[1.0, 2.0, 3.0],
            &mut scratch,
            &mut x,
        );
        assert_eq!(x, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_matches_known_solution() {
        // Discrete Laplacian with solution x = [1, 2, 3, 4]
        let a = [0.0, -1.0, -1.0, -1.0];
        let b = [2.0, 2.0, 2.0, 2.0];
        let c = [-1.0, -1.0, -1.0, 0.0];
        let d = [0.0, 0.0, 0.0, 5.0];
        let mut x = [0.0; 4];
        let mut scratch = [0.0; 4];
        thomas_solve(&a, &b, &c, &d, &mut scratch, &mut x);

        for (r, expected) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
            assert!((x[r] - expected).abs() < TOL, "row {r}: {}", x[r]);
        }
    }

    #[test]
    fn test_residual_small_for_dominant_system() {
        let n = 20;
        let a: Vec<f64> = (0..n).map(|r| -0.3 - 0.01 * r as f64).collect();
        let c: Vec<f64> = (0..n).map(|r| -0.2 + 0.005 * r as f64).collect();
        let b: Vec<f64> = (0..n).map(|r| 1.5 + 0.1 * r as f64).collect();
        let d: Vec<f64> = (0..n).map(|r| (r as f64).sin()).collect();
        let mut x = vec![0.0; n];
        let mut scratch = vec![0.0; n];
        thomas_solve(&a, &b, &c, &d, &mut scratch, &mut x);

        for r in 0..n {
            let mut lhs = b[r] * x[r];
            if r > 0 {
                lhs += a[r] * x[r - 1];
            }
            if r + 1 < n {
                lhs += c[r] * x[r + 1];
            }
            assert!((lhs - d[r]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_row() {
        let mut x = [0.0];
        let mut scratch = [0.0];
        thomas_with(1, |_| 9.0, |_| 4.0, |_| 7.0, |_| 2.0, &mut scratch, &mut x);
        assert!((x[0] - 0.5).abs() < TOL);
    }
}
