//! Money entries: shared expenses and direct debts.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use splitledger_core::{CurrencyCode, DebtId, Entity, ExpenseId, PersonId};

use crate::lenient;

/// Capability shared by everything that moves money between people.
pub trait MoneyEntry {
    /// Nominal amount in [`MoneyEntry::currency`].
    fn amount(&self) -> f64;

    fn currency(&self) -> &CurrencyCode;

    /// Every person the entry references.
    fn parties(&self) -> Vec<&PersonId>;

    /// Only finite, strictly positive amounts take part in balances.
    fn is_active(&self) -> bool {
        let amount = self.amount();
        amount.is_finite() && amount > 0.0
    }

    fn involves(&self, person: &PersonId) -> bool {
        self.parties().into_iter().any(|p| p == person)
    }
}

/// How an expense is divided among its participants.
///
/// Only `"weights"` (or `"weighted"`) selects a weighted split; any other
/// value, `null` included, reads as equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SplitMode {
    #[default]
    #[serde(rename = "equal")]
    Equal,
    /// Proportional to per-participant weights.
    #[serde(rename = "weights")]
    Weighted,
}

impl<'de> Deserialize<'de> for SplitMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) if s == "weights" || s == "weighted" => Self::Weighted,
            _ => Self::Equal,
        })
    }
}

/// A shared expense fronted by one payer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    pub currency: CurrencyCode,
    #[serde(rename = "payerId")]
    pub payer: PersonId,
    #[serde(default, deserialize_with = "lenient::list")]
    pub participants: Vec<PersonId>,
    #[serde(default)]
    pub split_mode: SplitMode,
    /// Per-participant weights. Kept even in equal mode so switching modes in
    /// a form does not lose them.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_number_map"
    )]
    pub weights: Option<BTreeMap<PersonId, f64>>,
}

impl Expense {
    /// Equal-split expense in `currency`.
    pub fn equal(
        id: impl Into<ExpenseId>,
        amount: f64,
        currency: CurrencyCode,
        payer: impl Into<PersonId>,
        participants: impl IntoIterator<Item = PersonId>,
    ) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            amount,
            currency,
            payer: payer.into(),
            participants: participants.into_iter().collect(),
            split_mode: SplitMode::Equal,
            weights: None,
        }
    }

    /// Weighted expense; participants are the weight keys.
    pub fn weighted(
        id: impl Into<ExpenseId>,
        amount: f64,
        currency: CurrencyCode,
        payer: impl Into<PersonId>,
        weights: impl IntoIterator<Item = (PersonId, f64)>,
    ) -> Self {
        let weights: Vec<(PersonId, f64)> = weights.into_iter().collect();
        Self {
            id: id.into(),
            label: String::new(),
            amount,
            currency,
            payer: payer.into(),
            participants: weights.iter().map(|(p, _)| p.clone()).collect(),
            split_mode: SplitMode::Weighted,
            weights: Some(weights.into_iter().collect()),
        }
    }

    /// Weight of one participant; missing or non-numeric weights count as 0.
    pub fn weight_of(&self, person: &PersonId) -> f64 {
        self.weights
            .as_ref()
            .and_then(|w| w.get(person))
            .copied()
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(0.0)
    }
}

impl MoneyEntry for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    fn parties(&self) -> Vec<&PersonId> {
        std::iter::once(&self.payer)
            .chain(self.participants.iter())
            .collect()
    }

    fn is_active(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0 && !self.participants.is_empty()
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A standing obligation: `debtor` owes `creditor` `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectDebt {
    pub id: DebtId,
    #[serde(rename = "fromId")]
    pub debtor: PersonId,
    #[serde(rename = "toId")]
    pub creditor: PersonId,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    pub currency: CurrencyCode,
}

impl DirectDebt {
    pub fn new(
        id: impl Into<DebtId>,
        debtor: impl Into<PersonId>,
        creditor: impl Into<PersonId>,
        amount: f64,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            id: id.into(),
            debtor: debtor.into(),
            creditor: creditor.into(),
            amount,
            currency,
        }
    }
}

impl MoneyEntry for DirectDebt {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    fn parties(&self) -> Vec<&PersonId> {
        vec![&self.debtor, &self.creditor]
    }
}

impl Entity for DirectDebt {
    type Id = DebtId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
