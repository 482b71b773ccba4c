//! Reconciliation engine: currency normalization, net balances, settlement.
//!
//! Pure domain logic only: every entry point is a deterministic function of
//! an immutable ledger snapshot. No IO, no caching, no shared state.
//!
//! ```text
//! Ledger ──► balances::compute_net_balances (fx::to_base) ──► NetBalances
//!        ──► settlement::simplify ──► Vec<Transfer>
//! ```

pub mod balances;
pub mod config;
pub mod fx;
pub mod reconciliation;
pub mod settlement;

pub use balances::{
    BalanceReport, ConservationCorrection, NetBalances, compute_net_balances, expense_shares,
};
pub use config::ReconcileConfig;
pub use fx::to_base;
pub use reconciliation::{Reconciliation, reconcile};
pub use settlement::{SettlementError, Transfer, settlement_epsilon, simplify, simplify_with};
