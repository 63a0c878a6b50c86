//! Change notifications for layers.
//!
//! Observers are plain closures, registered for a single [`LayerEvent`]
//! and removed again through the [`Subscription`] handle returned on registration.

use core::fmt::Debug;

use crate::enum_iter::IterableEnum;
use crate::geometry::HexPos;
use hexfield_macros::IterableEnum;

/// The points in a layer's add and remove operations at which observers are notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IterableEnum)]
pub enum LayerEvent {
    /// An item is about to be inserted. The layer does not contain it yet.
    Adding,
    /// An item has been inserted.
    Added,
    /// An item is about to be removed. The layer still contains it.
    Removing,
    /// An item has been removed.
    Removed,
}

/// A handle to a registered observer, used to unsubscribe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Observes both the coordinate and the item involved in a change.
pub type ItemObserver<T> = Box<dyn FnMut(HexPos, &T)>;

/// Observes only the coordinate involved in a change.
pub type CoordinateObserver = Box<dyn FnMut(HexPos)>;

/// The observers registered on a single layer.
pub(crate) struct Observers<T> {
    /// The value of the next [`Subscription`] handed out.
    next: u64,
    /// Observers that receive the item, in registration order.
    item: Vec<(Subscription, LayerEvent, ItemObserver<T>)>,
    /// Observers that only receive the coordinate, in registration order.
    coordinate: Vec<(Subscription, LayerEvent, CoordinateObserver)>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Observers {
            next: 0,
            item: Vec::new(),
            coordinate: Vec::new(),
        }
    }
}

impl<T> Observers<T> {
    /// Hands out a fresh subscription handle.
    fn next_subscription(&mut self) -> Subscription {
        let subscription = Subscription(self.next);
        self.next += 1;
        subscription
    }

    pub(crate) fn subscribe(
        &mut self,
        event: LayerEvent,
        observer: ItemObserver<T>,
    ) -> Subscription {
        let subscription = self.next_subscription();
        self.item.push((subscription, event, observer));
        subscription
    }

    pub(crate) fn subscribe_coordinates(
        &mut self,
        event: LayerEvent,
        observer: CoordinateObserver,
    ) -> Subscription {
        let subscription = self.next_subscription();
        self.coordinate.push((subscription, event, observer));
        subscription
    }

    /// Removes the observer registered under `subscription`, returning `true` if there was one.
    pub(crate) fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let n_before = self.item.len() + self.coordinate.len();
        self.item.retain(|(existing, ..)| *existing != subscription);
        self.coordinate.retain(|(existing, ..)| *existing != subscription);
        self.item.len() + self.coordinate.len() < n_before
    }

    /// Notifies every observer of `event`.
    ///
    /// Item observers are called before coordinate observers.
    pub(crate) fn notify(&mut self, event: LayerEvent, coord: HexPos, item: &T) {
        for (_, _, observer) in self.item.iter_mut().filter(|(_, e, _)| *e == event) {
            observer(coord, item);
        }

        for (_, _, observer) in self.coordinate.iter_mut().filter(|(_, e, _)| *e == event) {
            observer(coord);
        }
    }

    /// The number of observers registered for `event`.
    pub(crate) fn count(&self, event: LayerEvent) -> usize {
        self.item.iter().filter(|(_, e, _)| *e == event).count()
            + self.coordinate.iter().filter(|(_, e, _)| *e == event).count()
    }
}

impl<T> Debug for Observers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for event in LayerEvent::variants() {
            map.entry(&event, &self.count(event));
        }
        map.finish()
    }
}
