//! Balance aggregation: folds expenses and direct debts into one signed
//! balance per person, in base currency.
//!
//! Positive balances are owed money (net creditors), negative balances owe
//! money (net debtors). Malformed entries are skipped, never rejected.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use splitledger_core::PersonId;
use splitledger_ledger::{DirectDebt, Expense, FxTable, MoneyEntry, Person, SplitMode};

use crate::{ReconcileConfig, fx::to_base, settlement::Transfer};

/// Net balance per person, in base currency.
///
/// Iteration follows the ledger's people order, which is also the settlement
/// tie-break order. Ids referenced by entries but missing from the people
/// list are appended in first-reference order so their money stays visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetBalances {
    entries: Vec<(PersonId, f64)>,
    index: HashMap<PersonId, usize>,
}

impl NetBalances {
    /// Every id starts at zero.
    pub fn zeroed<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = PersonId>,
    {
        let mut balances = Self::default();
        for id in ids {
            balances.slot(&id);
        }
        balances
    }

    fn slot(&mut self, id: &PersonId) -> &mut f64 {
        let idx = match self.index.get(id) {
            Some(&idx) => idx,
            None => {
                self.entries.push((id.clone(), 0.0));
                self.index.insert(id.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    /// Adds `delta` to `id`'s balance, registering the id if unseen.
    pub fn adjust(&mut self, id: &PersonId, delta: f64) {
        *self.slot(id) += delta;
    }

    pub fn get(&self, id: &PersonId) -> Option<f64> {
        self.index.get(id).map(|&idx| self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, f64)> {
        self.entries.iter().map(|(id, v)| (id, *v))
    }

    /// Sum of all balances; zero (within tolerance) for a conserved ledger.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Balances after the given payments were made: each payment raises the
    /// paying debtor's balance and lowers the receiving creditor's.
    pub fn settle(&self, transfers: &[Transfer]) -> Self {
        let mut next = self.clone();
        for t in transfers {
            next.adjust(&t.debtor, t.amount);
            next.adjust(&t.creditor, -t.amount);
        }
        next
    }
}

impl FromIterator<(PersonId, f64)> for NetBalances {
    fn from_iter<T: IntoIterator<Item = (PersonId, f64)>>(iter: T) -> Self {
        let mut balances = Self::default();
        for (id, v) in iter {
            balances.adjust(&id, v);
        }
        balances
    }
}

impl Serialize for NetBalances {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, v) in &self.entries {
            map.serialize_entry(id, v)?;
        }
        map.end()
    }
}

/// How much floating-point drift was folded into the anchor person.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ConservationCorrection {
    /// Sum of balances before correction.
    pub residual: f64,
    /// Person who absorbed the residual; `None` when no correction was needed
    /// or the ledger has no people to anchor on.
    pub applied_to: Option<PersonId>,
    /// Total base-currency volume of the active entries.
    pub volume: f64,
    /// The residual is too large to be rounding noise.
    pub significant: bool,
}

impl ConservationCorrection {
    pub fn applied(&self) -> bool {
        self.applied_to.is_some()
    }
}

/// Output of [`compute_net_balances`].
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub balances: NetBalances,
    pub correction: ConservationCorrection,
}

/// Each participant's share of `expense`, in the expense's own currency.
///
/// Equal split divides by the participant count. Weighted split is
/// proportional to [`Expense::weight_of`]; with a zero weight total every
/// share is zero and the payer carries the whole amount. A weighted expense
/// without a weight table splits equally.
pub fn expense_shares(expense: &Expense) -> Vec<(&PersonId, f64)> {
    let participants = &expense.participants;
    if participants.is_empty() {
        return Vec::new();
    }

    match (expense.split_mode, expense.weights.is_some()) {
        (SplitMode::Weighted, true) => {
            let total: f64 = participants.iter().map(|p| expense.weight_of(p)).sum();
            participants
                .iter()
                .map(|p| {
                    let share = if total > 0.0 {
                        expense.amount * (expense.weight_of(p) / total)
                    } else {
                        0.0
                    };
                    (p, share)
                })
                .collect()
        }
        _ => {
            let share = expense.amount / participants.len() as f64;
            participants.iter().map(|p| (p, share)).collect()
        }
    }
}

/// Folds every entry into one balance per person.
///
/// Every person in `people` appears, at zero if untouched. Entries are
/// independent, so their order does not matter beyond rounding. Afterwards a
/// residual above `config.conservation_tolerance` is subtracted from the first
/// person so the balances sum to zero; the report says how much moved.
pub fn compute_net_balances(
    people: &[Person],
    expenses: &[Expense],
    debts: &[DirectDebt],
    fx: &FxTable,
    config: &ReconcileConfig,
) -> BalanceReport {
    let mut balances = NetBalances::zeroed(people.iter().map(|p| p.id.clone()));
    let mut volume = 0.0;
    let mut skipped_expenses = 0usize;
    let mut skipped_debts = 0usize;

    for expense in expenses {
        if !expense.is_active() {
            skipped_expenses += 1;
            continue;
        }
        let currency = expense.currency.as_str();
        let amount = to_base(expense.amount, currency, fx);
        balances.adjust(&expense.payer, amount);
        for (participant, share) in expense_shares(expense) {
            balances.adjust(participant, -to_base(share, currency, fx));
        }
        volume += amount;
    }

    for debt in debts {
        if !debt.is_active() {
            skipped_debts += 1;
            continue;
        }
        let amount = to_base(debt.amount, debt.currency.as_str(), fx);
        balances.adjust(&debt.debtor, -amount);
        balances.adjust(&debt.creditor, amount);
        volume += amount;
    }

    debug!(
        people = people.len(),
        expenses = expenses.len() - skipped_expenses,
        skipped_expenses,
        debts = debts.len() - skipped_debts,
        skipped_debts,
        "balances aggregated"
    );

    let correction = correct_drift(&mut balances, people, volume, config);
    BalanceReport {
        balances,
        correction,
    }
}

fn correct_drift(
    balances: &mut NetBalances,
    people: &[Person],
    volume: f64,
    config: &ReconcileConfig,
) -> ConservationCorrection {
    let residual = balances.total();
    let magnitude = residual.abs();
    let out_of_tolerance = magnitude > config.conservation_tolerance;

    let applied_to = match people.first() {
        Some(anchor) if out_of_tolerance => {
            balances.adjust(&anchor.id, -residual);
            Some(anchor.id.clone())
        }
        _ => None,
    };

    let significant = out_of_tolerance && magnitude > config.drift_warning_ratio * volume;
    if significant {
        warn!(
            residual,
            volume,
            anchor = applied_to.as_ref().map(PersonId::as_str),
            "balances did not sum to zero; residual moved onto anchor person"
        );
    } else if applied_to.is_some() {
        debug!(residual, "rounding drift corrected");
    }

    ConservationCorrection {
        residual,
        applied_to,
        volume,
        significant,
    }
}
