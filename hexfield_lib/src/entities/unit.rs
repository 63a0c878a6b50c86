//! Mobile entities, and the water they spend to move.

use core::fmt::Display;
use derive_more::{Add, AddAssign, Sub, SubAssign};
use serde::{Deserialize, Serialize};

use crate::manifest::{Id, UnitClass, UnitData};

use super::{EntityId, Identified, Owner};

/// A quantity of water, used to modify a [`WaterPool`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Water(pub f32);

impl Display for Water {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// The water budget of a unit.
///
/// Moving spends water; once it runs out the unit can only stay where it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterPool {
    /// The current amount of stored water.
    current: Water,
    /// The maximum water that can be stored.
    max: Water,
}

impl WaterPool {
    /// Creates a pool holding `current` water, clamped to `[0, max]`.
    #[must_use]
    pub fn new(current: Water, max: Water) -> Self {
        let max = Water(max.0.max(0.));
        WaterPool {
            current: Water(current.0.clamp(0., max.0)),
            max,
        }
    }

    /// Creates a pool that is completely full.
    #[must_use]
    pub fn full(max: f32) -> Self {
        WaterPool::new(Water(max), Water(max))
    }

    /// The amount of water currently stored.
    #[must_use]
    pub fn current(&self) -> Water {
        self.current
    }

    /// The maximum amount of water that can be stored.
    #[must_use]
    pub fn max(&self) -> Water {
        self.max
    }

    /// Has this unit run dry?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current <= Water(0.)
    }

    /// Removes `amount` from the pool.
    ///
    /// Returns `false` and leaves the pool untouched if there isn't enough,
    /// or if `amount` is negative or NaN.
    pub fn spend(&mut self, amount: Water) -> bool {
        if amount > self.current || amount.0 < 0. || amount.0.is_nan() {
            return false;
        }

        self.current = Water((self.current - amount).0.max(0.));
        true
    }

    /// Fills the pool to its maximum.
    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

impl Display for WaterPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// Something that can move across the terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unique identity of this unit
    id: EntityId,
    /// Who controls this unit, if anyone
    pub owner: Option<Owner>,
    /// The unit's template
    class: Id<UnitClass>,
    /// The remaining health of this unit
    pub health: u32,
    /// The unit's movement budget
    pub water: WaterPool,
    /// How fast the unit moves, in tiles per turn
    pub speed: f32,
}

impl Unit {
    /// Creates a fresh unit from its class definition, with full health and water.
    #[must_use]
    pub fn from_data(id: EntityId, class: Id<UnitClass>, data: &UnitData) -> Self {
        Unit {
            id,
            owner: None,
            class,
            health: data.max_health,
            water: WaterPool::full(data.water_capacity),
            speed: data.speed,
        }
    }

    /// The class that this unit was created from.
    #[must_use]
    pub fn class(&self) -> Id<UnitClass> {
        self.class
    }
}

impl Identified for Unit {
    fn id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_requires_enough_water() {
        let mut pool = WaterPool::full(3.);

        assert!(pool.spend(Water(2.)));
        assert_eq!(pool.current(), Water(1.));
        assert!(!pool.spend(Water(1.5)));
        assert_eq!(pool.current(), Water(1.));
        assert!(!pool.spend(Water(f32::NAN)));

        pool.refill();
        assert_eq!(pool.to_string(), "3.0/3.0");
    }

    #[test]
    fn negative_spending_is_rejected() {
        let mut pool = WaterPool::new(Water(2.), Water(4.));

        assert!(!pool.spend(Water(-3.)));
        assert_eq!(pool.current(), Water(2.));
        assert!(pool.current() <= pool.max());
    }

    #[test]
    fn pools_are_clamped() {
        let pool = WaterPool::new(Water(12.), Water(4.));
        assert_eq!(pool.current(), Water(4.));

        let pool = WaterPool::new(Water(-1.), Water(4.));
        assert!(pool.is_empty());
    }
}
