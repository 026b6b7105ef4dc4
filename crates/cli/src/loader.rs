use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use proximity_compute::extract::{extract_fsrs_weights, preset_identity, FieldValue};
use proximity_core::Profile;
use serde_json::Value;
use tracing::{debug, warn};

/// Read preset configs from a JSON file and turn them into profiles.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read presets: {}", path.display()))?;
    let raw: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse presets: {}", path.display()))?;
    Ok(profiles_from_json(&raw))
}

/// Normalize every preset in `raw` and keep those with usable weights.
///
/// `raw` is either an array of configs or an object keyed by preset id.
/// Presets without a resolvable id are dropped; a later config with the
/// same id replaces an earlier one. Output is ordered by id.
pub fn profiles_from_json(raw: &Value) -> Vec<Profile> {
    let entries: Vec<(Option<&str>, &Value)> = match raw {
        Value::Array(configs) => configs.iter().map(|c| (None, c)).collect(),
        Value::Object(map) => map.iter().map(|(k, c)| (Some(k.as_str()), c)).collect(),
        _ => {
            warn!("presets file is neither an array nor an object");
            return Vec::new();
        }
    };

    let mut presets: BTreeMap<i64, (String, &Value)> = BTreeMap::new();
    for (key, config) in entries {
        match preset_identity(config, key.map(FieldValue::Text)) {
            Some((id, name)) => {
                presets.insert(id, (name, config));
            }
            None => debug!(?key, "skipping preset without id"),
        }
    }

    presets
        .into_iter()
        .filter_map(|(id, (name, config))| match extract_fsrs_weights(config) {
            Some(weights) => Some(Profile::new(id, name, weights)),
            None => {
                warn!(id, name = %name, "no usable FSRS parameters, skipping preset");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_of_configs() {
        let raw = json!([
            {"id": 2, "name": "Second", "fsrsWeights": [1, 2, 3]},
            {"id": 1, "name": "First", "fsrsParams6": vec![0.5; 21]},
            {"id": 3, "name": "Plain"},
        ]);

        let profiles = profiles_from_json(&raw);

        let ids: Vec<_> = profiles.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(profiles[0].name, "First");
        assert_eq!(profiles[1].weights, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn object_keyed_by_id() {
        let raw = json!({
            "10": {"fsrsWeights": [1, 2]},
            "abc": {"fsrsWeights": [3, 4]},
            "11": {"id": "12", "name": "Explicit", "fsrsWeights": [5, 6]},
        });

        let profiles = profiles_from_json(&raw);

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].id, 10);
        assert_eq!(profiles[0].name, "Preset 10");
        assert_eq!(profiles[1].id, 12);
        assert_eq!(profiles[1].name, "Explicit");
    }

    #[test]
    fn later_duplicate_replaces_earlier() {
        let raw = json!([
            {"id": 1, "name": "Old", "fsrsWeights": [1]},
            {"id": 1, "name": "New", "fsrsWeights": [2]},
        ]);
        let profiles = profiles_from_json(&raw);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "New");
    }

    #[test]
    fn scalar_file_yields_nothing() {
        assert!(profiles_from_json(&json!(42)).is_empty());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets.json");
        std::fs::write(&path, r#"[{"id": 1, "name": "A", "fsrsWeights": [0.1]}]"#).unwrap();

        let profiles = load_profiles(&path).unwrap();
        assert_eq!(profiles, vec![Profile::new(1, "A", vec![0.1])]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_profiles(&path).is_err());
        assert!(load_profiles(&dir.path().join("missing.json")).is_err());
    }
}
