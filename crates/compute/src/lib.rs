pub mod algorithms;
pub mod analyzer;
pub mod deck;
pub mod decision;
pub mod extract;
pub mod optimize;

pub use algorithms::matrix::Matrix;
pub use algorithms::reference::{FSRS6_DIM, SHARE_THRESHOLD};
pub use analyzer::{
    analyze_profiles, analyze_profiles_with_config, is_fsrs6_valid_params,
    pairwise_distance_matrix, pairwise_distance_matrix_with_config, PairwiseDistances,
};
pub use decision::recommend_shared_preset;
pub use extract::{extract_fsrs_weights, AttributeRecord, ConfigRecord};
pub use optimize::{optimize_decks, OptimizeOptions, OptimizedParams, ParameterOptimizer};
