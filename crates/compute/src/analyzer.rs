use proximity_core::config::AnalysisConfig;
use proximity_core::{DistanceResult, Profile, ProfileStatus, Result};
use tracing::debug;

use crate::algorithms::distance::{mahalanobis_distance, transform_params};
use crate::algorithms::reference::{fsrs6_inverse_covariance, FSRS6_DIM};
use crate::decision::recommend_shared_preset;

/// Whether `weights` lives in the calibrated FSRS-6 parameter space.
pub fn is_fsrs6_valid_params(weights: &[f64]) -> bool {
    weights.len() == FSRS6_DIM
}

/// Find the nearest FSRS-6 neighbour of every profile.
///
/// Equivalent to [`analyze_profiles_with_config`] with default settings.
pub fn analyze_profiles(profiles: &[Profile]) -> Result<Vec<DistanceResult>> {
    analyze_profiles_with_config(profiles, &AnalysisConfig::default())
}

/// Find the nearest FSRS-6 neighbour of every profile.
///
/// Profiles outside the FSRS-6 space come back flagged with
/// [`ProfileStatus::NotCanonicalParams`] and no neighbour. A lone FSRS-6
/// profile has nothing to compare against and comes back unmatched without a
/// status. Results are ordered by profile name, case-insensitively.
///
/// On equal distances the earlier profile in input order wins.
pub fn analyze_profiles_with_config(
    profiles: &[Profile],
    config: &AnalysisConfig,
) -> Result<Vec<DistanceResult>> {
    if profiles.is_empty() {
        return Ok(Vec::new());
    }

    let (valid, invalid): (Vec<&Profile>, Vec<&Profile>) = profiles
        .iter()
        .partition(|p| is_fsrs6_valid_params(&p.weights));

    let mut results: Vec<DistanceResult> = invalid
        .into_iter()
        .map(|p| DistanceResult::unmatched(p.clone(), Some(ProfileStatus::NotCanonicalParams)))
        .collect();

    debug!(
        valid = valid.len(),
        invalid = results.len(),
        "partitioned profiles"
    );

    if valid.len() == 1 {
        results.push(DistanceResult::unmatched(valid[0].clone(), None));
    } else if valid.len() >= 2 {
        let vectors = valid
            .iter()
            .map(|p| transform_params(&p.weights, config.log_leading))
            .collect::<Result<Vec<_>>>()?;
        let inv_cov = fsrs6_inverse_covariance(&vectors)?;

        for (idx, profile) in valid.iter().enumerate() {
            let mut nearest: Option<(usize, f64)> = None;

            for (other_idx, other) in vectors.iter().enumerate() {
                if other_idx == idx {
                    continue;
                }
                let dist = mahalanobis_distance(&vectors[idx], other, &inv_cov)?;
                if nearest.map_or(true, |(_, best)| dist < best) {
                    nearest = Some((other_idx, dist));
                }
            }

            let nearest_distance = nearest.map(|(_, d)| d);
            results.push(DistanceResult {
                profile: (*profile).clone(),
                nearest_name: nearest.map(|(i, _)| valid[i].name.clone()),
                nearest_distance,
                should_share: recommend_shared_preset(
                    profile.parameter_count(),
                    nearest_distance,
                ),
                status: None,
            });
        }
    }

    results.sort_by_key(|r| r.profile.sort_key());
    Ok(results)
}

/// All-pairs distance matrix over profiles sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseDistances {
    /// Profiles in matrix order (case-insensitive by name).
    pub profiles: Vec<Profile>,
    /// `distances[i][j]` is `None` when the two profiles are not comparable.
    pub distances: Vec<Vec<Option<f64>>>,
}

impl PairwiseDistances {
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.distances.get(row)?.get(col).copied().flatten()
    }

    /// Matrix row for the profile with the given name, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Pairwise distances with default settings.
pub fn pairwise_distance_matrix(profiles: &[Profile]) -> Result<PairwiseDistances> {
    pairwise_distance_matrix_with_config(profiles, &AnalysisConfig::default())
}

/// Build the full pairwise distance matrix.
///
/// Only FSRS-6 profiles are compared with each other; every cell involving
/// another dimension stays `None`. The diagonal is `0.0` for FSRS-6 profiles
/// and `None` for the rest.
pub fn pairwise_distance_matrix_with_config(
    profiles: &[Profile],
    config: &AnalysisConfig,
) -> Result<PairwiseDistances> {
    let mut sorted = profiles.to_vec();
    sorted.sort_by_key(|p| p.sort_key());

    let n = sorted.len();
    let mut distances = vec![vec![None; n]; n];

    let group: Vec<usize> = (0..n)
        .filter(|&i| is_fsrs6_valid_params(&sorted[i].weights))
        .collect();
    for &i in &group {
        distances[i][i] = Some(0.0);
    }

    if group.len() >= 2 {
        let vectors = group
            .iter()
            .map(|&i| transform_params(&sorted[i].weights, config.log_leading))
            .collect::<Result<Vec<_>>>()?;
        let inv_cov = fsrs6_inverse_covariance(&vectors)?;

        for (left_offset, &left) in group.iter().enumerate() {
            for (right_offset, &right) in group.iter().enumerate().skip(left_offset + 1) {
                let dist =
                    mahalanobis_distance(&vectors[left_offset], &vectors[right_offset], &inv_cov)?;
                distances[left][right] = Some(dist);
                distances[right][left] = Some(dist);
            }
        }
    }

    debug!(profiles = n, comparable = group.len(), "pairwise matrix built");
    Ok(PairwiseDistances {
        profiles: sorted,
        distances,
    })
}
