use std::fmt;

use serde::{Deserialize, Serialize};

/// A named set of FSRS weights taken from one preset configuration.
///
/// The weight count is the grouping key for every distance operation:
/// only profiles of equal length are ever compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub weights: Vec<f64>,
}

impl Profile {
    pub fn new(id: i64, name: impl Into<String>, weights: Vec<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            weights,
        }
    }

    /// Number of parameters in this profile.
    pub fn parameter_count(&self) -> usize {
        self.weights.len()
    }

    /// Case-insensitive key used to order profiles for display.
    pub fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Whether two presets are close enough to share one configuration.
///
/// `NotApplicable` is distinct from `No`: it means no comparison could be
/// made (no neighbour, or parameters outside the calibrated space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareRecommendation {
    Yes,
    No,
    NotApplicable,
}

impl ShareRecommendation {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ShareRecommendation::Yes => Some(true),
            ShareRecommendation::No => Some(false),
            ShareRecommendation::NotApplicable => None,
        }
    }

    /// Table label: Yes / No / "-".
    pub fn label(self) -> &'static str {
        match self {
            ShareRecommendation::Yes => "Yes",
            ShareRecommendation::No => "No",
            ShareRecommendation::NotApplicable => "-",
        }
    }
}

impl From<Option<bool>> for ShareRecommendation {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => ShareRecommendation::Yes,
            Some(false) => ShareRecommendation::No,
            None => ShareRecommendation::NotApplicable,
        }
    }
}

/// Reason a profile was excluded from distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileStatus {
    /// Parameter count is not the canonical FSRS-6 dimension.
    NotCanonicalParams,
}

impl ProfileStatus {
    pub fn message(self) -> &'static str {
        match self {
            ProfileStatus::NotCanonicalParams => "Not FSRS6 valid params",
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of the nearest-neighbour analysis for one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub profile: Profile,
    /// Name of the closest other profile, if any was comparable.
    pub nearest_name: Option<String>,
    /// Mahalanobis distance to `nearest_name` (always >= 0).
    pub nearest_distance: Option<f64>,
    pub should_share: ShareRecommendation,
    pub status: Option<ProfileStatus>,
}

impl DistanceResult {
    /// A result with nothing to compare against.
    pub fn unmatched(profile: Profile, status: Option<ProfileStatus>) -> Self {
        Self {
            profile,
            nearest_name: None,
            nearest_distance: None,
            should_share: ShareRecommendation::NotApplicable,
            status,
        }
    }
}
