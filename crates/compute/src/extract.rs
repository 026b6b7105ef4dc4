//! Reading FSRS weights out of preset configurations.
//!
//! Preset configs come in several shapes depending on where they were read
//! from: JSON-like mappings, or attribute-style objects assembled by the
//! host. Both are accessed through [`ConfigRecord`], and the extraction logic
//! only ever sees [`FieldValue`] views.

use std::collections::BTreeMap;

use proximity_core::Profile;
use serde_json::Value;

/// Top-level keys that may hold FSRS weights, most preferred first.
pub const FSRS_WEIGHT_KEYS: &[&str] = &[
    "fsrsParams6",
    "fsrs_params6",
    "fsrsParams5",
    "fsrs_params5",
    "fsrsParams",
    "fsrs_params",
    "fsrsWeights",
    "fsrs_weights",
];

/// Nested record holding weights under [`FSRS_NESTED_KEYS`].
pub const FSRS_NESTED_RECORD: &str = "fsrs";

pub const FSRS_NESTED_KEYS: &[&str] = &["weights", "params", "parameters"];

/// Borrowed view of one field of a [`ConfigRecord`].
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    Integer(i64),
    Number(f64),
    Text(&'a str),
    Bool(bool),
    Sequence(&'a dyn FieldSequence),
    Record(&'a dyn ConfigRecord),
    Null,
}

impl<'a> FieldValue<'a> {
    /// Finite `f64` value of a number or numeric text. Integers beyond 2^53
    /// round to the nearest representable float. NaN, infinities, booleans,
    /// null and nested values yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match *self {
            FieldValue::Integer(i) => i as f64,
            FieldValue::Number(n) => n,
            FieldValue::Text(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Integer id: integers or digit-only text.
    pub fn as_id(&self) -> Option<i64> {
        match *self {
            FieldValue::Integer(i) => Some(i),
            FieldValue::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse().ok()
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Ordered collection of field values.
pub trait FieldSequence {
    fn len(&self) -> usize;
    fn item(&self, index: usize) -> Option<FieldValue<'_>>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A configuration record whose fields can be looked up by name.
pub trait ConfigRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// First non-null field among `names`.
    fn field_any(&self, names: &[&str]) -> Option<FieldValue<'_>> {
        names
            .iter()
            .filter_map(|name| self.field(name))
            .find(|value| !matches!(value, FieldValue::Null))
    }
}

/// Convert every element of `seq` to `f64`.
///
/// One non-numeric element rejects the whole sequence, as does an empty one.
pub fn to_float_vec(seq: &dyn FieldSequence) -> Option<Vec<f64>> {
    let converted = (0..seq.len())
        .map(|i| seq.item(i).and_then(|v| v.as_f64()))
        .collect::<Option<Vec<f64>>>()?;
    if converted.is_empty() {
        None
    } else {
        Some(converted)
    }
}

fn candidate_sequences<'a, R: ConfigRecord + ?Sized>(record: &'a R) -> Vec<&'a dyn FieldSequence> {
    let mut candidates = Vec::new();

    for name in FSRS_WEIGHT_KEYS {
        if let Some(FieldValue::Sequence(seq)) = record.field(name) {
            candidates.push(seq);
        }
    }

    if let Some(FieldValue::Record(fsrs)) = record.field(FSRS_NESTED_RECORD) {
        for name in FSRS_NESTED_KEYS {
            if let Some(FieldValue::Sequence(seq)) = fsrs.field(name) {
                candidates.push(seq);
            }
        }
    }

    candidates
}

/// Extract FSRS weights from a preset config.
///
/// Known keys are tried in [`FSRS_WEIGHT_KEYS`] order, then the nested
/// `fsrs` record. The first non-empty, fully numeric sequence wins. A bare
/// `weights` key at the top level is never used.
pub fn extract_fsrs_weights<R: ConfigRecord + ?Sized>(record: &R) -> Option<Vec<f64>> {
    candidate_sequences(record)
        .into_iter()
        .find_map(to_float_vec)
}

/// Resolve a preset's id and display name.
///
/// The id comes from the record's `id` field, falling back to
/// `fallback_id` (e.g. the key the record was stored under). Records with
/// no usable id yield `None`.
pub fn preset_identity<R: ConfigRecord + ?Sized>(
    record: &R,
    fallback_id: Option<FieldValue<'_>>,
) -> Option<(i64, String)> {
    let id = record
        .field("id")
        .and_then(|v| v.as_id())
        .or_else(|| fallback_id.and_then(|v| v.as_id()))?;

    let name = record
        .field("name")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Preset {id}"));

    Some((id, name))
}

/// Build a [`Profile`] from a preset config, or `None` if it carries no
/// usable FSRS weights.
pub fn profile_from_record<R: ConfigRecord + ?Sized>(
    id: i64,
    name: &str,
    record: &R,
) -> Option<Profile> {
    extract_fsrs_weights(record).map(|weights| Profile::new(id, name, weights))
}

// ── Mapping-backed records ────────────────────────────────────

impl FieldSequence for Vec<Value> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<FieldValue<'_>> {
        self.get(index).map(json_field)
    }
}

fn json_field(value: &Value) -> FieldValue<'_> {
    match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
        },
        Value::String(s) => FieldValue::Text(s),
        Value::Array(items) => FieldValue::Sequence(items),
        Value::Object(_) => FieldValue::Record(value),
    }
}

impl ConfigRecord for Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self {
            Value::Object(map) => map.get(name).map(json_field),
            _ => None,
        }
    }
}

impl ConfigRecord for serde_json::Map<String, Value> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(json_field)
    }
}

// ── Attribute-backed records ──────────────────────────────────

/// Owned attribute value for [`AttributeRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Integer(i64),
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<Attribute>),
    Record(AttributeRecord),
    Null,
}

impl From<i64> for Attribute {
    fn from(value: i64) -> Self {
        Attribute::Integer(value)
    }
}

impl From<f64> for Attribute {
    fn from(value: f64) -> Self {
        Attribute::Number(value)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Text(value.to_string())
    }
}

impl From<bool> for Attribute {
    fn from(value: bool) -> Self {
        Attribute::Bool(value)
    }
}

impl<T: Into<Attribute>> From<Vec<T>> for Attribute {
    fn from(values: Vec<T>) -> Self {
        Attribute::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<AttributeRecord> for Attribute {
    fn from(value: AttributeRecord) -> Self {
        Attribute::Record(value)
    }
}

impl Attribute {
    fn view(&self) -> FieldValue<'_> {
        match self {
            Attribute::Integer(i) => FieldValue::Integer(*i),
            Attribute::Number(n) => FieldValue::Number(*n),
            Attribute::Text(s) => FieldValue::Text(s),
            Attribute::Bool(b) => FieldValue::Bool(*b),
            Attribute::List(items) => FieldValue::Sequence(items),
            Attribute::Record(r) => FieldValue::Record(r),
            Attribute::Null => FieldValue::Null,
        }
    }
}

impl FieldSequence for Vec<Attribute> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<FieldValue<'_>> {
        self.get(index).map(Attribute::view)
    }
}

/// Object-style config: a set of named attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRecord {
    attributes: BTreeMap<String, Attribute>,
}

impl AttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Attribute>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Attribute>) {
        self.attributes.insert(name.into(), value.into());
    }
}

impl ConfigRecord for AttributeRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.attributes.get(name).map(Attribute::view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_key() {
        let config = json!({"fsrsWeights": [1, 2, 3]});
        assert_eq!(extract_fsrs_weights(&config), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn prefers_params6_over_legacy_keys() {
        let config = json!({
            "fsrsWeights": vec![1; 17],
            "fsrsParams5": vec![2; 19],
            "fsrsParams6": vec![3; 21],
        });
        assert_eq!(extract_fsrs_weights(&config), Some(vec![3.0; 21]));
    }

    #[test]
    fn falls_back_when_params6_empty() {
        let config = json!({"fsrsParams6": [], "fsrsParams5": vec![2; 19]});
        assert_eq!(extract_fsrs_weights(&config), Some(vec![2.0; 19]));
    }

    #[test]
    fn object_attribute() {
        let config = AttributeRecord::new().with("fsrs_weights", vec![0.11, 0.22, 0.33]);
        assert_eq!(extract_fsrs_weights(&config), Some(vec![0.11, 0.22, 0.33]));
    }

    #[test]
    fn nested_key() {
        let config = json!({"fsrs": {"weights": [0.1, 0.2, 0.3]}});
        assert_eq!(extract_fsrs_weights(&config), Some(vec![0.1, 0.2, 0.3]));
    }

    #[test]
    fn nested_attribute_record() {
        let fsrs = AttributeRecord::new().with("params", vec![1.5, 2.5]);
        let config = AttributeRecord::new().with("fsrs", fsrs);
        assert_eq!(extract_fsrs_weights(&config), Some(vec![1.5, 2.5]));
    }

    #[test]
    fn rejects_sequence_with_non_numeric_entry() {
        let config = json!({"fsrsWeights": [1, "x", 3]});
        assert_eq!(extract_fsrs_weights(&config), None);
    }

    #[test]
    fn invalid_candidate_falls_through_to_next() {
        let config = json!({"fsrsParams6": [1, null], "fsrsWeights": [4, 5]});
        assert_eq!(extract_fsrs_weights(&config), Some(vec![4.0, 5.0]));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let config = json!({"fsrsWeights": ["1.5", " 2 ", 3]});
        assert_eq!(extract_fsrs_weights(&config), Some(vec![1.5, 2.0, 3.0]));
    }

    #[test]
    fn non_finite_text_rejects_sequence() {
        let mut weights: Vec<serde_json::Value> = vec![json!(1.0); 21];
        weights[10] = json!("NaN");
        assert_eq!(extract_fsrs_weights(&json!({"fsrsParams6": weights})), None);

        for text in ["inf", "-inf", "infinity"] {
            let config = json!({"fsrsWeights": [1.0, text]});
            assert_eq!(extract_fsrs_weights(&config), None, "{text}");
        }
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert_eq!(FieldValue::Number(f64::NAN).as_f64(), None);
        assert_eq!(FieldValue::Number(f64::INFINITY).as_f64(), None);
        assert_eq!(FieldValue::Integer(i64::MAX).as_f64(), Some(i64::MAX as f64));

        let config = AttributeRecord::new().with("fsrsWeights", vec![1.0, f64::NAN]);
        assert_eq!(extract_fsrs_weights(&config), None);
    }

    #[test]
    fn booleans_are_rejected() {
        let config = AttributeRecord::new().with("fsrsWeights", vec![true, false]);
        assert_eq!(extract_fsrs_weights(&config), None);
    }

    #[test]
    fn strings_are_not_sequences() {
        let config = json!({"fsrsWeights": "1,2,3"});
        assert_eq!(extract_fsrs_weights(&config), None);
    }

    #[test]
    fn does_not_use_generic_weights_field() {
        let config = json!({"weights": [9, 9, 9], "fsrsWeights": [1, 2, 3]});
        assert_eq!(extract_fsrs_weights(&config), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn ignores_generic_weights_without_fsrs_key() {
        let config = json!({"weights": [9, 9, 9]});
        assert_eq!(extract_fsrs_weights(&config), None);
    }

    #[test]
    fn empty_and_non_object_records() {
        assert_eq!(extract_fsrs_weights(&json!({})), None);
        assert_eq!(extract_fsrs_weights(&json!(null)), None);
        assert_eq!(extract_fsrs_weights(&json!([1, 2, 3])), None);
    }

    #[test]
    fn identity_from_record() {
        let config = json!({"id": 12, "name": "Languages"});
        assert_eq!(
            preset_identity(&config, None),
            Some((12, "Languages".to_string()))
        );
    }

    #[test]
    fn identity_falls_back_to_key_and_default_name() {
        let config = json!({"name": ""});
        assert_eq!(
            preset_identity(&config, Some(FieldValue::Text("7"))),
            Some((7, "Preset 7".to_string()))
        );
    }

    #[test]
    fn identity_requires_integer_id() {
        assert_eq!(preset_identity(&json!({"id": "abc"}), None), None);
        assert_eq!(preset_identity(&json!({"id": 1.5}), None), None);
        assert_eq!(preset_identity(&json!({}), Some(FieldValue::Text("x1"))), None);
    }

    #[test]
    fn field_any_skips_nulls() {
        let config = json!({"conf": null, "config_id": 3});
        assert_eq!(
            config.field_any(&["conf", "config_id"]).and_then(|v| v.as_id()),
            Some(3)
        );
    }

    #[test]
    fn profile_from_record_uses_extracted_weights() {
        let config = json!({"fsrsParams6": vec![0.5; 21]});
        let profile = profile_from_record(4, "Default", &config).unwrap();
        assert_eq!(profile.id, 4);
        assert_eq!(profile.name, "Default");
        assert_eq!(profile.parameter_count(), 21);
        assert!(profile_from_record(4, "Default", &json!({})).is_none());
    }
}
