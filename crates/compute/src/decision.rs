use proximity_core::ShareRecommendation;

use crate::algorithms::reference::{FSRS6_DIM, SHARE_THRESHOLD};

/// Decide whether a preset should share its configuration with its nearest
/// neighbour.
///
/// Only FSRS-6 presets with a known neighbour get a Yes/No answer; the
/// threshold comparison is strict, so a distance equal to
/// [`SHARE_THRESHOLD`] means No.
pub fn recommend_shared_preset(
    parameter_count: usize,
    nearest_distance: Option<f64>,
) -> ShareRecommendation {
    let Some(distance) = nearest_distance else {
        return ShareRecommendation::NotApplicable;
    };
    if parameter_count != FSRS6_DIM {
        return ShareRecommendation::NotApplicable;
    }
    if distance < SHARE_THRESHOLD {
        ShareRecommendation::Yes
    } else {
        ShareRecommendation::No
    }
}
