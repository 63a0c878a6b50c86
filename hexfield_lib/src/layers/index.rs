//! Reverse lookups from items to the coordinates that hold them.

use hashbrown::HashMap;

use crate::entities::{EntityId, Identified};
use crate::geometry::HexPos;

/// Finds the coordinate that an item is stored at.
///
/// A [`Layer`](super::Layer) keeps one of these alongside its coordinate map,
/// updating it on every insertion and removal.
pub trait ReverseIndex<T>: Default {
    /// Records that `item` now lives at `coord`.
    fn record(&mut self, coord: HexPos, item: &T);

    /// Records that `item` is no longer stored anywhere.
    fn forget(&mut self, item: &T);

    /// Returns the coordinate holding `item`, if any.
    ///
    /// `items` is the layer's forward map, for indexes that do not keep their own state.
    fn locate(&self, item: &T, items: &HashMap<HexPos, T>) -> Option<HexPos>;
}

/// A constant-time index keyed by [`EntityId`].
///
/// This is the default for layers of entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityIndex {
    /// Where each entity is stored.
    positions: HashMap<EntityId, HexPos>,
}

impl IdentityIndex {
    /// Returns the coordinate holding the entity with identity `id`.
    #[must_use]
    pub fn position_of(&self, id: EntityId) -> Option<HexPos> {
        self.positions.get(&id).copied()
    }
}

impl<T: Identified> ReverseIndex<T> for IdentityIndex {
    fn record(&mut self, coord: HexPos, item: &T) {
        self.positions.insert(item.id(), coord);
    }

    fn forget(&mut self, item: &T) {
        self.positions.remove(&item.id());
    }

    fn locate(&self, item: &T, _items: &HashMap<HexPos, T>) -> Option<HexPos> {
        self.position_of(item.id())
    }
}

/// An index that searches the whole layer for an equal item.
///
/// Lookups are O(n) in the number of stored items.
/// Use this only for plain values that have no identity of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearScan;

impl<T: PartialEq> ReverseIndex<T> for LinearScan {
    fn record(&mut self, _coord: HexPos, _item: &T) {}

    fn forget(&mut self, _item: &T) {}

    fn locate(&self, item: &T, items: &HashMap<HexPos, T>) -> Option<HexPos> {
        items
            .iter()
            .find_map(|(coord, stored)| (stored == item).then_some(*coord))
    }
}
