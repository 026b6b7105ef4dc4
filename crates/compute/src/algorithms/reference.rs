//! Calibrated inverse covariance for the FSRS-6 parameter space.
//!
//! Sample estimates from a handful of presets are far too noisy for a
//! 21-dimensional space, so presets with exactly [`FSRS6_DIM`] weights are
//! compared with a fixed precision matrix instead. Rows 0..4 cover the
//! log-transformed initial stabilities (adjacent stabilities correlate);
//! the remaining parameters are treated as independent.

use proximity_core::{ProximityError, Result};

use super::covariance::{common_dimension, inverse_covariance};
use super::matrix::Matrix;

/// Number of weights in an FSRS-6 preset.
pub const FSRS6_DIM: usize = 21;

/// Nearest-neighbour distance below which two presets should share one
/// configuration.
pub const SHARE_THRESHOLD: f64 = 3.8;

#[rustfmt::skip]
pub const FSRS6_INV_COVARIANCE: [[f64; FSRS6_DIM]; FSRS6_DIM] = [
    [2.172614, -1.520830, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [-1.520830, 3.237195, -1.520830, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, -1.520830, 3.237195, -1.520830, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, -1.520830, 2.172614, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.694444, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 16.000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.234568, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 625.000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.938272, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 69.444444, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 8.163265, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.938272, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1111.111111, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.938272, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 44.444444, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.777778, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 25.000000, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 156.250000, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 156.250000, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 69.444444],
];

/// Owned copy of [`FSRS6_INV_COVARIANCE`].
pub fn reference_inverse_covariance() -> Matrix {
    FSRS6_INV_COVARIANCE.iter().map(|row| row.to_vec()).collect()
}

/// Inverse covariance for comparing `vectors`.
///
/// Uses the calibrated FSRS-6 matrix when the vectors have [`FSRS6_DIM`]
/// entries and falls back to a regularized sample estimate otherwise.
pub fn inverse_covariance_for_vectors(vectors: &[Vec<f64>], regularization: f64) -> Result<Matrix> {
    let dim = common_dimension(vectors)?;
    if dim == FSRS6_DIM {
        return Ok(reference_inverse_covariance());
    }
    inverse_covariance(vectors, regularization)
}

/// Like [`inverse_covariance_for_vectors`] but refuses anything outside the
/// FSRS-6 space instead of estimating from the sample.
pub fn fsrs6_inverse_covariance(vectors: &[Vec<f64>]) -> Result<Matrix> {
    let dim = common_dimension(vectors)?;
    if dim != FSRS6_DIM {
        return Err(ProximityError::InvalidParams(format!(
            "expected {FSRS6_DIM} FSRS-6 parameters, got {dim}"
        )));
    }
    Ok(reference_inverse_covariance())
}
