//! Small dense linear algebra
//!
//! Design matrices here are narrow (a handful of group indicators plus two
//! numeric features), so a cyclic Jacobi sweep over the Gram matrix is both
//! accurate and cheap. No LAPACK dependency.

use ndarray::{Array1, Array2};

const MAX_SWEEPS: usize = 100;

/// Relative eigenvalue cutoff below which a direction is treated as null
const RANK_TOLERANCE: f64 = 1e-10;

/// Eigen-decomposition of a symmetric matrix (cyclic Jacobi).
///
/// Returns `(eigenvalues, eigenvectors)` with eigenvectors stored as columns.
/// Eigenvalues are not sorted.
pub fn symmetric_eigen(matrix: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols());

    let mut a = matrix.clone();
    let mut v = Array2::<f64>::eye(n);
    let scale: f64 = a.iter().map(|x| x * x).sum::<f64>().max(f64::MIN_POSITIVE);

    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[[p, q]] * a[[p, q]];
            }
        }
        if off <= scale * f64::EPSILON * f64::EPSILON {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}

/// Minimum-norm solution of `gram * x = rhs` for a symmetric positive
/// semi-definite `gram` (Moore-Penrose pseudo-inverse).
///
/// Directions whose eigenvalue falls below `RANK_TOLERANCE * max_eigenvalue`
/// contribute nothing, which is what makes collinear or constant columns safe.
pub fn pinv_solve(gram: &Array2<f64>, rhs: &Array1<f64>) -> Array1<f64> {
    let (values, vectors) = symmetric_eigen(gram);
    let largest = values.iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
    let cutoff = largest * RANK_TOLERANCE;

    let projected = vectors.t().dot(rhs);
    let mut scaled = Array1::<f64>::zeros(values.len());
    for (i, &lambda) in values.iter().enumerate() {
        if lambda > cutoff && lambda > 0.0 {
            scaled[i] = projected[i] / lambda;
        }
    }
    vectors.dot(&scaled)
}
