//! Layers whose items can only exist where another layer has items.

use core::cell::{Ref, RefCell};
use core::fmt::Debug;
use hashbrown::HashSet;
use std::rc::Rc;
use tracing::debug;

use crate::entities::{EntityId, Identified};
use crate::geometry::HexPos;

use super::events::{LayerEvent, Subscription};
use super::index::{IdentityIndex, ReverseIndex};
use super::{CoordinateSource, Layer};

/// The state shared between a [`ConstrainedLayer`] and the observers it registers on its base.
struct Constrained<T, I> {
    /// The coordinates currently occupied in the base.
    allowed: HashSet<HexPos>,
    /// The constrained items themselves.
    layer: Layer<T, I>,
}

/// A [`Layer`] that only accepts items at coordinates occupied in a base layer.
///
/// When a coordinate is removed from the base, the item stored at that coordinate here
/// is removed too, through this layer's own removal path so its observers are notified.
///
/// The base is not borrowed: the constrained layer mirrors the base's occupied coordinates
/// through observers registered at construction. Those observers only hold a weak reference,
/// so dropping the constrained layer leaves them inert. Call [`ConstrainedLayer::detach`]
/// to remove them from the base entirely.
///
/// # Panics
///
/// Removing a coordinate from the base while a [`Ref`] returned by this layer is alive panics,
/// as does accessing this layer from one of its own observers.
pub struct ConstrainedLayer<T, I = IdentityIndex> {
    /// Shared with the observers registered on the base.
    shared: Rc<RefCell<Constrained<T, I>>>,
    /// The observers registered on the base, if still attached.
    base_subscriptions: Option<[Subscription; 2]>,
}

impl<T: 'static, I: ReverseIndex<T> + 'static> ConstrainedLayer<T, I> {
    /// Creates an empty layer constrained to the coordinates occupied in `base`.
    pub fn new(base: &mut impl CoordinateSource) -> Self {
        let shared = Rc::new(RefCell::new(Constrained {
            allowed: base.occupied().into_iter().collect(),
            layer: Layer::new(),
        }));

        let weak = Rc::downgrade(&shared);
        let added = base.subscribe_coordinates(LayerEvent::Added, move |coord| {
            if let Some(shared) = weak.upgrade() {
                shared.borrow_mut().allowed.insert(coord);
            }
        });

        let weak = Rc::downgrade(&shared);
        let removing = base.subscribe_coordinates(LayerEvent::Removing, move |coord| {
            if let Some(shared) = weak.upgrade() {
                let mut state = shared.borrow_mut();
                state.allowed.remove(&coord);
                if state.layer.contains(coord) {
                    debug!("Removing the item at {coord} because its base was removed");
                    state.layer.try_remove(coord);
                }
            }
        });

        ConstrainedLayer {
            shared,
            base_subscriptions: Some([added, removing]),
        }
    }
}

impl<T, I: ReverseIndex<T>> ConstrainedLayer<T, I> {
    /// Stores `item` at `coord`.
    ///
    /// Returns `false` without changing anything if the base does not contain `coord`,
    /// or if [`Layer::try_add`] would fail.
    pub fn try_add(&mut self, coord: HexPos, item: T) -> bool {
        let mut state = self.shared.borrow_mut();
        if !state.allowed.contains(&coord) {
            debug!("Could not add to {coord}: the base layer does not contain it");
            return false;
        }

        state.layer.try_add(coord, item)
    }

    /// Removes the item stored at `coord`, returning `false` if there was none.
    pub fn try_remove(&mut self, coord: HexPos) -> bool {
        self.shared.borrow_mut().layer.try_remove(coord)
    }

    /// Removes and returns the item stored at `coord`.
    pub fn take(&mut self, coord: HexPos) -> Option<T> {
        self.shared.borrow_mut().layer.take(coord)
    }

    /// Removes every item, notifying observers of each removal.
    pub fn clear(&mut self) {
        self.shared.borrow_mut().layer.clear();
    }

    /// Returns the item stored at `coord`.
    #[must_use]
    pub fn get(&self, coord: HexPos) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.shared.borrow(), |state| state.layer.get(coord)).ok()
    }

    /// Is there an item stored at `coord`?
    #[must_use]
    pub fn contains(&self, coord: HexPos) -> bool {
        self.shared.borrow().layer.contains(coord)
    }

    /// Is `item` stored anywhere in this layer?
    #[must_use]
    pub fn contains_item(&self, item: &T) -> bool {
        self.shared.borrow().layer.contains_item(item)
    }

    /// Returns the coordinate that `item` is stored at.
    #[must_use]
    pub fn get_coordinates(&self, item: &T) -> Option<HexPos> {
        self.shared.borrow().layer.get_coordinates(item)
    }

    /// Could an item be added at `coord`, as far as the base is concerned?
    #[must_use]
    pub fn allows(&self, coord: HexPos) -> bool {
        self.shared.borrow().allowed.contains(&coord)
    }

    /// The number of occupied coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.borrow().layer.len()
    }

    /// Is this layer empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.borrow().layer.is_empty()
    }

    /// Every occupied coordinate, in arbitrary order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<HexPos> {
        self.shared.borrow().layer.coordinates().collect()
    }

    /// Read access to the underlying layer, for iteration.
    #[must_use]
    pub fn layer(&self) -> Ref<'_, Layer<T, I>> {
        Ref::map(self.shared.borrow(), |state| &state.layer)
    }

    /// Calls `observer` with the coordinate and item whenever `event` occurs in this layer.
    ///
    /// Removals cascaded from the base are reported like any other removal.
    pub fn subscribe(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos, &T) + 'static,
    ) -> Subscription {
        self.shared.borrow_mut().layer.subscribe(event, observer)
    }

    /// Calls `observer` with the coordinate whenever `event` occurs in this layer.
    pub fn subscribe_coordinates(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos) + 'static,
    ) -> Subscription {
        self.shared
            .borrow_mut()
            .layer
            .subscribe_coordinates(event, observer)
    }

    /// Removes a previously registered observer, returning `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.shared.borrow_mut().layer.unsubscribe(subscription)
    }

    /// Is this layer still tracking its base?
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.base_subscriptions.is_some()
    }

    /// Stops tracking `base`, which must be the layer this was constructed over.
    ///
    /// Existing items are kept, but no further items can be added.
    /// Returns `false` if this layer was already detached.
    pub fn detach(&mut self, base: &mut impl CoordinateSource) -> bool {
        let Some(subscriptions) = self.base_subscriptions.take() else {
            return false;
        };

        for subscription in subscriptions {
            base.unsubscribe(subscription);
        }
        self.shared.borrow_mut().allowed.clear();

        true
    }
}

impl<T: Identified, I> ConstrainedLayer<T, I> {
    /// Mutates the item stored at `coord` in place, without notifying observers.
    ///
    /// See [`Layer::update`].
    pub(crate) fn update<R>(&mut self, coord: HexPos, f: impl FnOnce(&mut T) -> R) -> Option<R>
    where
        T: Clone,
    {
        self.shared.borrow_mut().layer.update(coord, f)
    }
}

impl<T> ConstrainedLayer<T, IdentityIndex> {
    /// Returns the coordinate of the entity with identity `id`.
    #[must_use]
    pub fn position_of(&self, id: EntityId) -> Option<HexPos> {
        self.shared.borrow().layer.position_of(id)
    }

    /// Returns the entity with identity `id`.
    #[must_use]
    pub fn get_by_id(&self, id: EntityId) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.shared.borrow(), |state| {
            state.layer.get_by_id(id).map(|(_, item)| item)
        })
        .ok()
    }
}

impl<T, I: ReverseIndex<T>> CoordinateSource for ConstrainedLayer<T, I> {
    fn contains(&self, coord: HexPos) -> bool {
        ConstrainedLayer::contains(self, coord)
    }

    fn occupied(&self) -> Vec<HexPos> {
        self.coordinates()
    }

    fn subscribe_coordinates(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos) + 'static,
    ) -> Subscription {
        ConstrainedLayer::subscribe_coordinates(self, event, observer)
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        ConstrainedLayer::unsubscribe(self, subscription)
    }
}

impl<T: Debug, I> Debug for ConstrainedLayer<T, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.borrow();
        f.debug_struct("ConstrainedLayer")
            .field("allowed", &state.allowed)
            .field("layer", &state.layer)
            .field("attached", &self.base_subscriptions.is_some())
            .finish()
    }
}
