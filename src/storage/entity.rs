//! Entity contracts for the store
//!
//! Anything with a stable, copyable identity can live in a [`Table`](super::Table).

use std::fmt;
use std::hash::Hash;

/// Identity type of an entity
pub trait EntityKey: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    /// First key handed out by a store that assigns keys itself
    fn first() -> Self;

    /// The key following this one, or `None` once the key space is exhausted
    fn successor(self) -> Option<Self>;
}

/// A storable record with a stable identity
pub trait Entity: Clone + fmt::Debug {
    type Id: EntityKey;

    /// Name used in errors and log events
    const ENTITY_TYPE: &'static str;

    /// Identity of this record. Must not change once the record is stored.
    fn id(&self) -> Self::Id;
}

/// Entities whose identity is assigned by the store rather than the caller
pub trait StoreAssignedId: Entity {
    fn assign_id(&mut self, id: Self::Id);
}
