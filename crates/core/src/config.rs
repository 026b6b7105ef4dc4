use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_f64(profile: &str, key: &str, default: f64) -> f64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Default diagonal regularization added to sample covariance estimates.
pub const DEFAULT_REGULARIZATION: f64 = 1e-6;

/// Default number of leading weights that are log-transformed.
pub const DEFAULT_LOG_LEADING: usize = 4;

/// Default threshold used when listing similar presets.
pub const DEFAULT_SIMILAR_THRESHOLD: f64 = 3.8;

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PROXIMITY_PROFILE`. When set (e.g. `WORK`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PROXIMITY_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        Self {
            analysis: AnalysisConfig::from_env_profiled(&p),
            profile: p,
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  analysis:    regularization={}, log_leading={}, similar_threshold={}",
            self.analysis.regularization,
            self.analysis.log_leading,
            self.analysis.similar_threshold
        );
    }
}

// ── Analysis ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Added to every covariance diagonal entry before inversion.
    pub regularization: f64,
    /// Leading weights that go through the natural-log transform.
    pub log_leading: usize,
    /// Upper bound (exclusive) for the "similar presets" listing.
    pub similar_threshold: f64,
}

impl AnalysisConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            regularization: profiled_env_f64(p, "PROXIMITY_REGULARIZATION", DEFAULT_REGULARIZATION),
            log_leading: profiled_env_usize(p, "PROXIMITY_LOG_LEADING", DEFAULT_LOG_LEADING),
            similar_threshold: profiled_env_f64(
                p,
                "PROXIMITY_SIMILAR_THRESHOLD",
                DEFAULT_SIMILAR_THRESHOLD,
            ),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            regularization: DEFAULT_REGULARIZATION,
            log_leading: DEFAULT_LOG_LEADING,
            similar_threshold: DEFAULT_SIMILAR_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.profile_label(), "default");
        assert_eq!(config.analysis.regularization, DEFAULT_REGULARIZATION);
        assert_eq!(config.analysis.log_leading, 4);
        assert_eq!(config.analysis.similar_threshold, 3.8);
    }

    #[test]
    fn profiled_key_takes_precedence() {
        // Unique profile prefix keeps this test independent of the others.
        env::set_var("CFGTESTA_PROXIMITY_LOG_LEADING", "2");
        env::set_var("CFGTESTA_PROXIMITY_SIMILAR_THRESHOLD", "not-a-number");

        let config = Config::for_profile("cfgtesta");

        assert_eq!(config.profile, "CFGTESTA");
        assert_eq!(config.analysis.log_leading, 2);
        // Unparseable values fall back to the default.
        assert_eq!(config.analysis.similar_threshold, DEFAULT_SIMILAR_THRESHOLD);

        env::remove_var("CFGTESTA_PROXIMITY_LOG_LEADING");
        env::remove_var("CFGTESTA_PROXIMITY_SIMILAR_THRESHOLD");
    }

    #[test]
    fn empty_value_is_ignored() {
        env::set_var("CFGTESTB_PROXIMITY_REGULARIZATION", "");
        let config = Config::for_profile("cfgtestb");
        assert_eq!(config.analysis.regularization, DEFAULT_REGULARIZATION);
        env::remove_var("CFGTESTB_PROXIMITY_REGULARIZATION");
    }
}
