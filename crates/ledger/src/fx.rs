use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use splitledger_core::CurrencyCode;

use crate::lenient;

/// Exchange table: currency code -> units of base currency per 1 unit.
///
/// Rates are stored as supplied, including zero, negative or non-numeric
/// ones; deciding what an unusable rate means is the converter's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FxTable(BTreeMap<CurrencyCode, f64>);

impl FxTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw rate for `code`, if any entry exists.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn set(&mut self, code: CurrencyCode, rate: f64) {
        self.0.insert(code, rate);
    }

    pub fn remove(&mut self, code: &str) -> Option<f64> {
        self.0.remove(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for FxTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::number_map(deserializer).map(Self)
    }
}

impl FromIterator<(CurrencyCode, f64)> for FxTable {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(&str, f64); N]> for FxTable {
    fn from(pairs: [(&str, f64); N]) -> Self {
        pairs
            .into_iter()
            .map(|(code, rate)| (CurrencyCode::from(code), rate))
            .collect()
    }
}
