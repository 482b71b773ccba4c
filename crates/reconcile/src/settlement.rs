//! Settlement planning: turns a balance vector into point-to-point payments.
//!
//! Greedy debt simplification: repeatedly match the largest creditor with the
//! largest debtor and move the smaller of the two amounts. Every round zeroes
//! at least one of them, so `k` unsettled people need at most `k - 1`
//! transfers. Not a global optimum for every input, but always a valid
//! zero-sum settlement.

use serde::Serialize;
use thiserror::Error;
use tracing::{error, trace};

use splitledger_core::PersonId;

use crate::{NetBalances, ReconcileConfig};

/// Fraction digits beyond which the settlement epsilon stops shrinking.
const MAX_DECIMALS: u32 = 12;

/// One payment: `debtor` pays `creditor` `amount` base units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    #[serde(rename = "fromId")]
    pub debtor: PersonId,
    #[serde(rename = "toId")]
    pub creditor: PersonId,
    pub amount: f64,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettlementError {
    /// The greedy loop failed to converge. Unreachable for balances that sum
    /// to zero; reaching it means the input was corrupt (e.g. non-finite).
    #[error("settlement did not converge after {rounds} rounds ({unsettled} balances still open)")]
    RoundBudgetExhausted { rounds: usize, unsettled: usize },
}

/// Smallest amount worth paying at `decimals` fraction digits (`10^-decimals`).
pub fn settlement_epsilon(decimals: u32) -> f64 {
    1.0 / 10f64.powi(decimals.min(MAX_DECIMALS) as i32)
}

fn snap(value: f64, epsilon: f64) -> f64 {
    if value.abs() < epsilon { 0.0 } else { value }
}

/// First index whose balance beats every earlier one.
fn extreme_index(working: &[(PersonId, f64)], beats: impl Fn(f64, f64) -> bool) -> usize {
    working
        .iter()
        .enumerate()
        .fold(0, |best, (i, (_, v))| if beats(*v, working[best].1) { i } else { best })
}

/// [`simplify_with`] under the default round budget.
pub fn simplify(balances: &NetBalances, decimals: u32) -> Result<Vec<Transfer>, SettlementError> {
    simplify_with(balances, decimals, &ReconcileConfig::default())
}

/// Plans the transfers that settle `balances` at `decimals` precision.
///
/// Amounts below `10^-decimals` count as settled. Ties between equal
/// balances go to whoever comes first in `balances`. Transfers are returned
/// in the order they were planned.
pub fn simplify_with(
    balances: &NetBalances,
    decimals: u32,
    config: &ReconcileConfig,
) -> Result<Vec<Transfer>, SettlementError> {
    let epsilon = settlement_epsilon(decimals);
    let mut working: Vec<(PersonId, f64)> = balances.iter().map(|(id, v)| (id.clone(), v)).collect();
    let mut transfers = Vec::new();
    if working.is_empty() {
        return Ok(transfers);
    }

    let budget = config.round_budget(working.len());
    for _ in 0..budget {
        let ci = extreme_index(&working, |a, b| a > b);
        let di = extreme_index(&working, |a, b| a < b);
        let credit = working[ci].1;
        let debt = working[di].1;

        if credit <= epsilon && debt >= -epsilon {
            return Ok(transfers);
        }
        let amount = credit.min(-debt);
        if amount <= epsilon {
            return Ok(transfers);
        }

        let transfer = Transfer {
            debtor: working[di].0.clone(),
            creditor: working[ci].0.clone(),
            amount: snap(amount, epsilon),
        };
        trace!(from = %transfer.debtor, to = %transfer.creditor, amount, "transfer planned");
        transfers.push(transfer);

        working[ci].1 = snap(credit - amount, epsilon);
        working[di].1 = snap(debt + amount, epsilon);
    }

    let unsettled = working
        .iter()
        .filter(|(_, v)| v.is_nan() || v.abs() > epsilon)
        .count();
    error!(rounds = budget, unsettled, "settlement round budget exhausted");
    Err(SettlementError::RoundBudgetExhausted {
        rounds: budget,
        unsettled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pid(s: &str) -> PersonId {
        PersonId::from(s)
    }

    fn balances(pairs: &[(&str, f64)]) -> NetBalances {
        pairs.iter().map(|(id, v)| (pid(id), *v)).collect()
    }

    fn pairs(transfers: &[Transfer]) -> Vec<(&str, &str, f64)> {
        transfers
            .iter()
            .map(|t| (t.debtor.as_str(), t.creditor.as_str(), t.amount))
            .collect()
    }

    #[test]
    fn epsilon_follows_decimals() {
        assert_eq!(settlement_epsilon(0), 1.0);
        assert_eq!(settlement_epsilon(2), 0.01);
        assert_eq!(settlement_epsilon(40), settlement_epsilon(MAX_DECIMALS));
    }

    #[test]
    fn one_creditor_two_debtors() {
        let b = balances(&[("p1", 20.0), ("p2", -10.0), ("p3", -10.0)]);
        let transfers = simplify(&b, 2).unwrap();
        assert_eq!(pairs(&transfers), vec![("p2", "p1", 10.0), ("p3", "p1", 10.0)]);
    }

    #[test]
    fn largest_debtor_pays_largest_creditor_first() {
        let b = balances(&[("a", 10.0), ("b", 50.0), ("c", -45.0), ("d", -15.0)]);
        let transfers = simplify(&b, 2).unwrap();
        assert_eq!(
            pairs(&transfers),
            vec![("c", "b", 45.0), ("d", "a", 10.0), ("d", "b", 5.0)]
        );
    }

    #[test]
    fn settled_ledger_needs_nothing() {
        assert!(simplify(&balances(&[("a", 0.0), ("b", 0.0)]), 2).unwrap().is_empty());
        assert!(simplify(&NetBalances::default(), 2).unwrap().is_empty());
        // Below one display unit at zero decimals.
        let b = balances(&[("a", 0.4), ("b", -0.4)]);
        assert!(simplify(&b, 0).unwrap().is_empty());
        assert_eq!(simplify(&b, 2).unwrap().len(), 1);
    }

    #[test]
    fn non_finite_input_reports_instead_of_looping() {
        let b = balances(&[("a", f64::INFINITY), ("b", f64::NEG_INFINITY)]);
        let err = simplify(&b, 2).unwrap_err();
        assert!(matches!(err, SettlementError::RoundBudgetExhausted { rounds: 24, .. }));
    }

    /// Whole base units, so every intermediate stays exact in `f64`.
    fn zero_sum_balances() -> impl Strategy<Value = NetBalances> {
        prop::collection::vec(-1_000_000i64..1_000_000i64, 1..24).prop_map(|units| {
            let total: i64 = units.iter().sum();
            units
                .iter()
                .copied()
                .chain(std::iter::once(-total))
                .enumerate()
                .map(|(i, u)| (PersonId::new(format!("p{i}")), u as f64))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: applying every transfer leaves each balance within epsilon of zero.
        #[test]
        fn transfers_settle_everyone(b in zero_sum_balances()) {
            let transfers = simplify(&b, 0).unwrap();
            let after = b.settle(&transfers);
            for (id, v) in after.iter() {
                prop_assert!(v.abs() <= settlement_epsilon(0), "{id}: {v}");
            }
            prop_assert!(transfers.iter().all(|t| t.amount > 0.0 && t.debtor != t.creditor));
        }

        /// Property: at most one transfer fewer than the people with open balances.
        #[test]
        fn transfer_count_is_bounded(b in zero_sum_balances()) {
            let open = b.iter().filter(|(_, v)| v.abs() > settlement_epsilon(0)).count();
            let transfers = simplify(&b, 0).unwrap();
            prop_assert!(transfers.len() <= open.saturating_sub(1));
        }
    }
}
