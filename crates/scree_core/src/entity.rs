//! # Entity Identifiers
//!
//! An entity is an opaque id that indexes into per-entity component
//! storage. Ids are allocated monotonically and never reused, even after
//! destruction: a handle held past its entity's death can only ever miss,
//! never silently alias a newer entity.

/// Opaque entity identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Entity(u64);

impl Entity {
    /// Wraps a raw id. Only the world allocates these.
    #[inline]
    #[must_use]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}
