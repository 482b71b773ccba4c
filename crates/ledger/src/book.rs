//! The exported ledger collection (a JSON array of ledgers).

use serde::{Deserialize, Serialize};

use splitledger_core::LedgerId;

use crate::{Ledger, LedgerError};

/// Every ledger a user keeps, in display order.
///
/// A book is never empty once loaded: imports with no ledgers are rejected and
/// the last remaining ledger cannot be removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerBook(Vec<Ledger>);

impl LedgerBook {
    pub fn new(first: Ledger) -> Self {
        Self(vec![first])
    }

    /// Parses an export. Rejects malformed JSON and empty arrays.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        let ledgers: Vec<Ledger> = serde_json::from_str(json)?;
        if ledgers.is_empty() {
            return Err(LedgerError::EmptyBook);
        }
        Ok(Self(ledgers))
    }

    pub fn to_json_pretty(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    pub fn ledgers(&self) -> &[Ledger] {
        &self.0
    }

    /// The ledger opened by default.
    pub fn first(&self) -> Option<&Ledger> {
        self.0.first()
    }

    pub fn get(&self, id: &LedgerId) -> Result<&Ledger, LedgerError> {
        self.0
            .iter()
            .find(|l| &l.id == id)
            .ok_or_else(|| LedgerError::UnknownLedger(id.clone()))
    }

    pub fn push(&mut self, ledger: Ledger) {
        self.0.push(ledger);
    }

    /// Replaces the ledger sharing `ledger.id`.
    pub fn replace(&mut self, ledger: Ledger) -> Result<(), LedgerError> {
        let slot = self
            .0
            .iter_mut()
            .find(|l| l.id == ledger.id)
            .ok_or_else(|| LedgerError::UnknownLedger(ledger.id.clone()))?;
        *slot = ledger;
        Ok(())
    }

    /// Removes a ledger and returns the id of the one that takes its place in
    /// the display order (the next one, or the new last).
    pub fn remove(&mut self, id: &LedgerId) -> Result<LedgerId, LedgerError> {
        let idx = self
            .0
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| LedgerError::UnknownLedger(id.clone()))?;
        if self.0.len() <= 1 {
            return Err(LedgerError::LastLedger);
        }
        self.0.remove(idx);
        let fallback = idx.min(self.0.len() - 1);
        Ok(self.0[fallback].id.clone())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
