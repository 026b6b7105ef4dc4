use proximity_core::{ProximityError, Result};
use tracing::debug;

use super::matrix::{identity, invert, Matrix};

/// Check that `vectors` is a non-empty set of equal, non-zero length vectors
/// and return their common dimension.
pub(crate) fn common_dimension(vectors: &[Vec<f64>]) -> Result<usize> {
    let Some(first) = vectors.first() else {
        return Err(ProximityError::InvalidInput(
            "cannot compute covariance of empty data".to_string(),
        ));
    };

    let dim = first.len();
    if dim == 0 {
        return Err(ProximityError::InvalidInput(
            "cannot compute covariance of zero-length vectors".to_string(),
        ));
    }
    if vectors.iter().any(|v| v.len() != dim) {
        return Err(ProximityError::InvalidInput(
            "all vectors must have the same length".to_string(),
        ));
    }
    Ok(dim)
}

/// Unbiased sample covariance of `vectors` with `regularization` added to the
/// diagonal.
///
/// A single vector carries no variance information, so it yields the
/// identity (plus regularization) instead of a zero matrix.
pub fn covariance_matrix(vectors: &[Vec<f64>], regularization: f64) -> Result<Matrix> {
    let dim = common_dimension(vectors)?;
    let n = vectors.len();

    let mut cov = if n < 2 {
        identity(dim)
    } else {
        let mut means = vec![0.0; dim];
        for v in vectors {
            for (mean, &x) in means.iter_mut().zip(v) {
                *mean += x;
            }
        }
        for mean in means.iter_mut() {
            *mean /= n as f64;
        }

        let mut cov = vec![vec![0.0; dim]; dim];
        for v in vectors {
            let centered: Vec<f64> = v.iter().zip(&means).map(|(x, m)| x - m).collect();
            for (i, row) in cov.iter_mut().enumerate() {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell += centered[i] * centered[j];
                }
            }
        }

        let denom = (n - 1) as f64;
        for cell in cov.iter_mut().flatten() {
            *cell /= denom;
        }
        cov
    };

    for (i, row) in cov.iter_mut().enumerate() {
        row[i] += regularization;
    }

    debug!(samples = n, dim, "covariance estimated");
    Ok(cov)
}

/// Inverse of the regularized sample covariance of `vectors`.
pub fn inverse_covariance(vectors: &[Vec<f64>], regularization: f64) -> Result<Matrix> {
    let cov = covariance_matrix(vectors, regularization)?;
    invert(&cov)
}
