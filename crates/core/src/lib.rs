//! `splitledger-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod currency;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use currency::CurrencyCode;
pub use entity::Entity;
pub use error::DomainError;
pub use id::{DebtId, ExpenseId, LedgerId, PersonId};
pub use value_object::ValueObject;
