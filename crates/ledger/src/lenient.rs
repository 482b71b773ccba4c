//! Lenient numeric deserializers for form-produced exports.
//!
//! Amounts, weights and rates may arrive as numbers, numeric strings, `null`
//! or garbage. Numbers pass through, numeric strings are parsed, everything
//! else becomes `NaN`, which the reconciliation core treats as "not a number"
//! (inactive amount, zero weight, identity rate). `serde_json` writes `NaN`
//! back as `null`.
//!
//! A bad value degrades its own field only; it never fails the import.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn coerce(value: Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Deserialize a single number leniently.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(coerce)
}

/// Fraction digits: a number or numeric string, truncated. Anything else,
/// negative values included, is 0.
pub fn decimals<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer).map(coerce)?;
    Ok(if value.is_finite() && value > 0.0 { value.trunc() as u32 } else { 0 })
}

/// A list where `null` means empty.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a `key -> number` map leniently (values only).
pub fn number_map<'de, D, K>(deserializer: D) -> Result<BTreeMap<K, f64>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord,
{
    let raw = BTreeMap::<K, Value>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, coerce(v))).collect())
}

/// Like [`number_map`], but `null` yields `None`.
pub fn optional_number_map<'de, D, K>(deserializer: D) -> Result<Option<BTreeMap<K, f64>>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord,
{
    let raw = Option::<BTreeMap<K, Value>>::deserialize(deserializer)?;
    Ok(raw.map(|m| m.into_iter().map(|(k, v)| (k, coerce(v))).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "number")]
        value: f64,
    }

    fn probe(json: &str) -> f64 {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[derive(Debug, Deserialize)]
    struct Settings {
        #[serde(default, deserialize_with = "decimals")]
        decimals: u32,
        #[serde(default, deserialize_with = "list")]
        tags: Vec<String>,
    }

    fn settings(json: &str) -> Settings {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_and_numeric_strings_pass() {
        assert_eq!(probe(r#"{"value": 12.5}"#), 12.5);
        assert_eq!(probe(r#"{"value": " 4000 "}"#), 4000.0);
    }

    #[test]
    fn garbage_becomes_nan() {
        assert!(probe(r#"{"value": null}"#).is_nan());
        assert!(probe(r#"{"value": "abc"}"#).is_nan());
        assert!(probe(r#"{"value": ""}"#).is_nan());
        assert!(probe(r#"{"value": [1]}"#).is_nan());
    }

    #[test]
    fn decimals_accept_strings_and_clamp_garbage() {
        assert_eq!(settings(r#"{"decimals": 2}"#).decimals, 2);
        assert_eq!(settings(r#"{"decimals": "2"}"#).decimals, 2);
        assert_eq!(settings(r#"{"decimals": 2.9}"#).decimals, 2);
        assert_eq!(settings(r#"{"decimals": -1}"#).decimals, 0);
        assert_eq!(settings(r#"{"decimals": null}"#).decimals, 0);
        assert_eq!(settings(r#"{"decimals": "two"}"#).decimals, 0);
        assert_eq!(settings("{}").decimals, 0);
    }

    #[test]
    fn null_list_is_empty() {
        assert!(settings(r#"{"tags": null}"#).tags.is_empty());
        assert_eq!(settings(r#"{"tags": ["a"]}"#).tags, vec!["a".to_string()]);
    }
}
