//! Currency codes.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{error::DomainError, value_object::ValueObject};

/// ISO-like currency code (e.g. `USD`, `COP`).
///
/// Codes are compared verbatim. [`CurrencyCode::parse`] normalizes user input
/// (trimmed, upper-cased); deserialization keeps whatever the export holds so
/// that fx lookups match the producing layer exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Wrap a code as-is.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Normalize and validate user input.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let code = input.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(DomainError::validation("currency code is empty"));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::validation(format!(
                "currency code {code:?} must be alphanumeric"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for CurrencyCode {}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for CurrencyCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
