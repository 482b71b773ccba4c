use thiserror::Error;

use splitledger_core::{CurrencyCode, LedgerId, PersonId};

/// Failures of ledger maintenance and import/export.
///
/// The reconciliation core never produces these; they only guard the
/// snapshot transformations an external layer asks for.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("cannot remove base currency {0}")]
    BaseCurrencyRemoval(CurrencyCode),

    #[error("person {0} already exists in this ledger")]
    DuplicatePerson(PersonId),

    #[error("ledger {0} not found")]
    UnknownLedger(LedgerId),

    #[error("cannot delete the only ledger")]
    LastLedger,

    #[error("invalid export: no ledgers found")]
    EmptyBook,

    #[error("invalid export: {0}")]
    Json(#[from] serde_json::Error),
}
