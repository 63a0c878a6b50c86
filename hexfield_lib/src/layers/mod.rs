//! Coordinate-keyed containers, and the notifications they send when they change.

use crate::geometry::HexPos;

mod events;
pub use events::{CoordinateObserver, ItemObserver, LayerEvent, Subscription};

mod index;
pub use index::{IdentityIndex, LinearScan, ReverseIndex};

mod layer;
pub use layer::Layer;

mod constrained;
pub use constrained::ConstrainedLayer;

/// Something whose occupied coordinates can be tracked by a [`ConstrainedLayer`].
pub trait CoordinateSource {
    /// Is `coord` occupied?
    fn contains(&self, coord: HexPos) -> bool;

    /// Every occupied coordinate, in arbitrary order.
    fn occupied(&self) -> Vec<HexPos>;

    /// Calls `observer` with the coordinate whenever `event` occurs.
    fn subscribe_coordinates(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos) + 'static,
    ) -> Subscription;

    /// Removes a previously registered observer.
    fn unsubscribe(&mut self, subscription: Subscription) -> bool;
}
