use proximity_core::{ProximityError, Result};

use super::matrix::mat_vec;

/// Prepare a weight vector for distance computation.
///
/// The first `log_leading` entries (initial stabilities, which span several
/// orders of magnitude) are replaced by their natural log; the rest pass
/// through unchanged.
pub fn transform_params(weights: &[f64], log_leading: usize) -> Result<Vec<f64>> {
    let mut out = weights.to_vec();
    for (i, value) in out.iter_mut().take(log_leading).enumerate() {
        if *value <= 0.0 {
            return Err(ProximityError::InvalidInput(format!(
                "log transform requires strictly positive leading parameters \
                 (parameter {i} is {value})"
            )));
        }
        *value = value.ln();
    }
    Ok(out)
}

/// Mahalanobis distance between `left` and `right` under `inv_covariance`.
///
/// Computes `sqrt(dᵀ · M · d)` with `d = left - right`. Negative round-off
/// in the quadratic form is clamped to zero; a non-finite form is an error.
pub fn mahalanobis_distance(left: &[f64], right: &[f64], inv_covariance: &[Vec<f64>]) -> Result<f64> {
    if left.len() != right.len() {
        return Err(ProximityError::InvalidInput(format!(
            "input vectors must have the same length ({} vs {})",
            left.len(),
            right.len()
        )));
    }

    let dim = left.len();
    if inv_covariance.len() != dim || inv_covariance.iter().any(|row| row.len() != dim) {
        return Err(ProximityError::InvalidInput(format!(
            "inverse covariance shape does not match vector size {dim}"
        )));
    }

    let delta: Vec<f64> = left.iter().zip(right).map(|(a, b)| a - b).collect();
    let weighted = mat_vec(inv_covariance, &delta);
    let squared: f64 = delta.iter().zip(&weighted).map(|(d, w)| d * w).sum();
    if !squared.is_finite() {
        return Err(ProximityError::InvalidInput(format!(
            "quadratic form is not finite ({squared})"
        )));
    }
    Ok(if squared < 0.0 { 0.0 } else { squared.sqrt() })
}
