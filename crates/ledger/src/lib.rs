//! Ledger snapshot model (people, expenses, direct debts, fx table).
//!
//! Pure data plus pure snapshot transformations: no IO beyond JSON
//! (de)serialization of the export format, no shared state.

pub mod book;
pub mod entry;
pub mod error;
pub mod fx;
pub mod ledger;
pub mod lenient;
pub mod person;

pub use book::LedgerBook;
pub use entry::{DirectDebt, Expense, MoneyEntry, SplitMode};
pub use error::LedgerError;
pub use fx::FxTable;
pub use ledger::Ledger;
pub use person::Person;
