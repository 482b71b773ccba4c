//! One-shot reconciliation of a ledger snapshot.

use serde::Serialize;
use tracing::{info, instrument};

use splitledger_ledger::Ledger;

use crate::{
    ConservationCorrection, NetBalances, ReconcileConfig, SettlementError, Transfer,
    compute_net_balances, settlement::simplify_with,
};

/// Everything the presentation layer needs for one ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    pub balances: NetBalances,
    pub correction: ConservationCorrection,
    pub transfers: Vec<Transfer>,
}

impl Reconciliation {
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}

/// Net balances and the settling transfers for `ledger`.
///
/// Recomputed from scratch on every call; callers may memoize on an
/// unchanged snapshot.
#[instrument(skip_all, fields(ledger = %ledger.id))]
pub fn reconcile(ledger: &Ledger, config: &ReconcileConfig) -> Result<Reconciliation, SettlementError> {
    let report = compute_net_balances(
        &ledger.people,
        &ledger.expenses,
        &ledger.direct_debts,
        &ledger.fx,
        config,
    );
    let transfers = simplify_with(&report.balances, ledger.decimals, config)?;
    info!(
        people = report.balances.len(),
        transfers = transfers.len(),
        corrected = report.correction.applied(),
        "ledger reconciled"
    );
    Ok(Reconciliation {
        balances: report.balances,
        correction: report.correction,
        transfers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitledger_core::{CurrencyCode, PersonId};
    use splitledger_ledger::{Expense, Person};

    #[test]
    fn three_way_dinner() {
        let ids = ["p1", "p2", "p3"].map(PersonId::from);
        let ledger = ids
            .iter()
            .try_fold(Ledger::with_id("l1", "Dinner", CurrencyCode::from("USD"), 2), |l, id| {
                l.with_person(Person::with_id(id.clone(), id.to_string()))
            })
            .unwrap()
            .with_expense(Expense::equal("e1", 30.0, CurrencyCode::from("USD"), "p1", ids.clone()));

        let rec = reconcile(&ledger, &ReconcileConfig::default()).unwrap();
        assert_eq!(rec.balances.get(&ids[0]), Some(20.0));
        assert_eq!(rec.balances.get(&ids[1]), Some(-10.0));
        assert_eq!(rec.balances.get(&ids[2]), Some(-10.0));
        assert_eq!(rec.transfers.len(), 2);
        assert!(!rec.is_settled());
        assert!(!rec.correction.applied());
    }
}
