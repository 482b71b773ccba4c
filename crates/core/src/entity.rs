//! Entity trait: identity + continuity across snapshots.

/// Entity marker + minimal interface.
///
/// People, expenses, direct debts and ledgers keep their identifier across
/// every snapshot the external layer hands in.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
