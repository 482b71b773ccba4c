//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and never change once built: a
/// `CurrencyCode("USD")` is interchangeable with any other `"USD"`, while a
/// `Person` with id `p1` stays `p1` whatever its display name becomes.
///
/// Ledger snapshots are made of entities holding value objects; the
/// reconciliation core only ever reads them.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
