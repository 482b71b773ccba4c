use serde::{Deserialize, Serialize};
use tracing::debug;

use splitledger_core::{CurrencyCode, Entity, LedgerId, PersonId};

use crate::{DirectDebt, Expense, FxTable, LedgerError, MoneyEntry, Person};

/// Immutable ledger snapshot.
///
/// A ledger exclusively owns its people, expenses and direct debts. Every
/// maintenance operation below returns a fresh snapshot; the caller owns the
/// read-modify-write cycle and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub id: LedgerId,
    #[serde(default)]
    pub name: String,
    pub base_currency: CurrencyCode,
    /// Display/settlement rounding granularity (fraction digits).
    #[serde(default, deserialize_with = "crate::lenient::decimals")]
    pub decimals: u32,
    #[serde(default)]
    pub fx: FxTable,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub direct_debts: Vec<DirectDebt>,
}

impl Ledger {
    /// Empty ledger with a fresh id. The base currency is listed in the fx
    /// table with an unconfigured (identity) rate.
    pub fn new(name: impl Into<String>, base_currency: CurrencyCode, decimals: u32) -> Self {
        Self::with_id(LedgerId::generate(), name, base_currency, decimals)
    }

    pub fn with_id(
        id: impl Into<LedgerId>,
        name: impl Into<String>,
        base_currency: CurrencyCode,
        decimals: u32,
    ) -> Self {
        let mut fx = FxTable::new();
        fx.set(base_currency.clone(), 0.0);
        Self {
            id: id.into(),
            name: name.into(),
            base_currency,
            decimals,
            fx,
            people: Vec::new(),
            expenses: Vec::new(),
            direct_debts: Vec::new(),
        }
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }

    pub fn person_name(&self, id: &PersonId) -> Option<&str> {
        self.person(id).map(|p| p.name.as_str())
    }

    /// Adds a person; ids must be unique within the ledger.
    pub fn with_person(mut self, person: Person) -> Result<Self, LedgerError> {
        if self.person(&person.id).is_some() {
            return Err(LedgerError::DuplicatePerson(person.id));
        }
        self.people.push(person);
        Ok(self)
    }

    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    pub fn with_debt(mut self, debt: DirectDebt) -> Self {
        self.direct_debts.push(debt);
        self
    }

    /// Removes a person and everything that can no longer stand without them:
    /// expenses they paid and direct debts on either side are dropped, and
    /// they leave every remaining expense's participants and weights.
    pub fn without_person(&self, id: &PersonId) -> Self {
        let mut next = self.clone();
        next.people.retain(|p| &p.id != id);

        let before = next.expenses.len();
        next.expenses.retain(|e| &e.payer != id);
        for expense in &mut next.expenses {
            expense.participants.retain(|p| p != id);
            if let Some(weights) = expense.weights.as_mut() {
                weights.remove(id);
            }
        }
        let dropped_expenses = before - next.expenses.len();

        let before = next.direct_debts.len();
        next.direct_debts.retain(|d| !d.involves(id));
        let dropped_debts = before - next.direct_debts.len();

        debug!(
            ledger = %self.id,
            person = %id,
            dropped_expenses,
            dropped_debts,
            "person removed"
        );
        next
    }

    /// Sets (or adds) the rate for `code`. A rate of 0 means "not configured".
    pub fn with_rate(&self, code: CurrencyCode, rate: f64) -> Self {
        let mut next = self.clone();
        next.fx.set(code, rate);
        next
    }

    /// Drops `code` from the fx table. The base currency cannot be removed.
    pub fn without_currency(&self, code: &CurrencyCode) -> Result<Self, LedgerError> {
        if code == &self.base_currency {
            return Err(LedgerError::BaseCurrencyRemoval(code.clone()));
        }
        let mut next = self.clone();
        next.fx.remove(code.as_str());
        Ok(next)
    }

    /// Deep copy under a new id, named `"<name> (copy)"`.
    pub fn duplicated(&self, id: impl Into<LedgerId>) -> Self {
        let mut copy = self.clone();
        copy.id = id.into();
        copy.name = format!("{} (copy)", self.name);
        copy
    }
}

impl Entity for Ledger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
