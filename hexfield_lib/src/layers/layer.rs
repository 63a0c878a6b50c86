//! A coordinate-keyed container that keeps each item at exactly one coordinate.

use core::fmt::Debug;
use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::entities::{EntityId, Identified};
use crate::geometry::HexPos;

use super::events::{LayerEvent, Observers, Subscription};
use super::index::{IdentityIndex, ReverseIndex};
use super::CoordinateSource;

/// A bijection between occupied coordinates and the items stored there.
///
/// Each coordinate holds at most one item, and each item occupies at most one coordinate.
/// The layer can only be changed through its own operations,
/// which notify any subscribed observers before and after each change.
///
/// Observers are called synchronously, and cannot access the layer that is notifying them.
pub struct Layer<T, I = IdentityIndex> {
    /// The forward map from coordinates to items.
    items: HashMap<HexPos, T>,
    /// The reverse map from items to coordinates.
    index: I,
    /// Everything that wants to hear about changes.
    observers: Observers<T>,
}

impl<T, I: Default> Default for Layer<T, I> {
    fn default() -> Self {
        Layer {
            items: HashMap::default(),
            index: I::default(),
            observers: Observers::default(),
        }
    }
}

impl<T, I: ReverseIndex<T>> Layer<T, I> {
    /// Creates an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `item` at `coord`.
    ///
    /// Returns `false` without changing anything if `coord` is already occupied,
    /// or if `item` is already stored somewhere in this layer.
    pub fn try_add(&mut self, coord: HexPos, item: T) -> bool {
        if self.items.contains_key(&coord) {
            debug!("Could not add to {coord}: the coordinate is occupied");
            return false;
        }

        if let Some(existing) = self.index.locate(&item, &self.items) {
            debug!("Could not add to {coord}: the item is already stored at {existing}");
            return false;
        }

        self.observers.notify(LayerEvent::Adding, coord, &item);
        self.index.record(coord, &item);
        let item = self.items.entry(coord).insert(item).into_mut();
        self.observers.notify(LayerEvent::Added, coord, item);

        true
    }

    /// Removes the item stored at `coord`, returning `false` if there was none.
    pub fn try_remove(&mut self, coord: HexPos) -> bool {
        self.take(coord).is_some()
    }

    /// Removes and returns the item stored at `coord`.
    ///
    /// This fires the same notifications as [`Layer::try_remove`].
    pub fn take(&mut self, coord: HexPos) -> Option<T> {
        let Some(item) = self.items.get(&coord) else {
            debug!("Could not remove from {coord}: the coordinate is empty");
            return None;
        };

        self.observers.notify(LayerEvent::Removing, coord, item);
        let item = self.items.remove(&coord)?;
        self.index.forget(&item);
        self.observers.notify(LayerEvent::Removed, coord, &item);

        Some(item)
    }

    /// Removes every item, notifying observers of each removal.
    pub fn clear(&mut self) {
        let snapshot: Vec<HexPos> = self.items.keys().copied().collect();
        for coord in snapshot {
            self.try_remove(coord);
        }
    }

    /// Returns the item stored at `coord`.
    #[must_use]
    pub fn get(&self, coord: HexPos) -> Option<&T> {
        self.items.get(&coord)
    }

    /// Is there an item stored at `coord`?
    #[must_use]
    pub fn contains(&self, coord: HexPos) -> bool {
        self.items.contains_key(&coord)
    }

    /// Is `item` stored anywhere in this layer?
    #[must_use]
    pub fn contains_item(&self, item: &T) -> bool {
        self.get_coordinates(item).is_some()
    }

    /// Returns the coordinate that `item` is stored at.
    #[must_use]
    pub fn get_coordinates(&self, item: &T) -> Option<HexPos> {
        self.index.locate(item, &self.items)
    }

    /// The number of occupied coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is this layer empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over every coordinate and the item stored there, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (HexPos, &T)> {
        self.items.iter().map(|(coord, item)| (*coord, item))
    }

    /// Iterates over every occupied coordinate, in arbitrary order.
    pub fn coordinates(&self) -> impl Iterator<Item = HexPos> + '_ {
        self.items.keys().copied()
    }

    /// Calls `observer` with the coordinate and item whenever `event` occurs.
    pub fn subscribe(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos, &T) + 'static,
    ) -> Subscription {
        self.observers.subscribe(event, Box::new(observer))
    }

    /// Calls `observer` with the coordinate whenever `event` occurs.
    ///
    /// Coordinate observers run after all item observers of the same event.
    pub fn subscribe_coordinates(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos) + 'static,
    ) -> Subscription {
        self.observers
            .subscribe_coordinates(event, Box::new(observer))
    }

    /// Removes a previously registered observer, returning `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.observers.unsubscribe(subscription)
    }
}

impl<T: Identified, I> Layer<T, I> {
    /// Mutates the item stored at `coord` in place, without notifying observers.
    ///
    /// Observers never see these changes, so this is only for state they do not display.
    /// Anything visible is replaced through [`Layer::take`] and [`Layer::try_add`] instead.
    ///
    /// If `f` changes the identity of the item, the change is rolled back
    /// so that the reverse index stays accurate.
    pub(crate) fn update<R>(&mut self, coord: HexPos, f: impl FnOnce(&mut T) -> R) -> Option<R>
    where
        T: Clone,
    {
        let item = self.items.get_mut(&coord)?;
        let before = item.clone();
        let result = f(item);

        if item.id() != before.id() {
            warn!(
                "Update of the item at {coord} changed its identity from {} to {}, rolling it back",
                before.id(),
                item.id()
            );
            *item = before;
        }

        Some(result)
    }
}

impl<T> Layer<T, IdentityIndex> {
    /// Returns the coordinate of the entity with identity `id`.
    #[must_use]
    pub fn position_of(&self, id: EntityId) -> Option<HexPos> {
        self.index.position_of(id)
    }

    /// Returns the entity with identity `id`, and where it is stored.
    #[must_use]
    pub fn get_by_id(&self, id: EntityId) -> Option<(HexPos, &T)> {
        let coord = self.position_of(id)?;
        self.items.get(&coord).map(|item| (coord, item))
    }
}

impl<T, I: ReverseIndex<T>> CoordinateSource for Layer<T, I> {
    fn contains(&self, coord: HexPos) -> bool {
        Layer::contains(self, coord)
    }

    fn occupied(&self) -> Vec<HexPos> {
        self.coordinates().collect()
    }

    fn subscribe_coordinates(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos) + 'static,
    ) -> Subscription {
        Layer::subscribe_coordinates(self, event, observer)
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        Layer::unsubscribe(self, subscription)
    }
}

impl<T: Debug, I> Debug for Layer<T, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("items", &self.items)
            .field("observers", &self.observers)
            .finish()
    }
}
