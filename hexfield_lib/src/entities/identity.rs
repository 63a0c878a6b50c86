//! Unique identities for placed entities.

use core::fmt::Display;
use serde::{Deserialize, Serialize};

/// The unique identity of an entity.
///
/// Identities are handed out by an [`IdentityAllocator`] and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The raw value of this identity.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh [`EntityId`]s in increasing order.
///
/// This is owned by whichever context creates entities, rather than living in global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAllocator {
    /// The value that will be handed out next.
    next: u64,
}

impl IdentityAllocator {
    /// Creates an allocator whose first identity is `#0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new identity, distinct from every identity previously returned by this allocator.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// The identity that the next call to [`IdentityAllocator::allocate`] will return.
    #[must_use]
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }

    /// Advances this allocator past every identity that `other` has handed out.
    pub fn merge(&mut self, other: &IdentityAllocator) {
        self.next = self.next.max(other.next);
    }

    /// Ensures that `id` will never be handed out by this allocator.
    ///
    /// Used when restoring entities whose identities were allocated elsewhere.
    pub fn reserve(&mut self, id: EntityId) {
        self.next = self.next.max(id.0 + 1);
    }
}

/// The player or faction that controls an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(pub u32);

impl Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Types with an [`EntityId`].
///
/// Layers use this to maintain their reverse index in constant time.
pub trait Identified {
    /// The identity of this object.
    fn id(&self) -> EntityId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_are_never_reused() {
        let mut allocator = IdentityAllocator::new();
        let first = allocator.allocate();
        let second = allocator.allocate();

        assert_ne!(first, second);
        assert!(second > first);
        assert_eq!(allocator.peek().value(), 2);
    }

    #[test]
    fn reserving_skips_past_restored_identities() {
        let mut allocator = IdentityAllocator::new();
        let restored = IdentityAllocator::new().allocate();
        allocator.reserve(restored);
        allocator.reserve(EntityId(7));
        allocator.reserve(EntityId(3));

        assert_eq!(allocator.allocate(), EntityId(8));
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(12).to_string(), "#12");
        assert_eq!(Owner(2).to_string(), "player 2");
    }
}
