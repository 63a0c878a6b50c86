//! How expensive it is for a unit to enter each kind of terrain.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Id, TerrainKind};

/// The price of entering a single tile of some terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementCost {
    /// Entering costs this much of the movement budget.
    ///
    /// This is always finite and non-negative.
    Passable(f32),
    /// This terrain can never be entered.
    Impassable,
}

impl MovementCost {
    /// Creates a [`MovementCost`] from a raw number.
    ///
    /// Negative, infinite and NaN costs cannot be spent sensibly, and are treated as impassable.
    #[must_use]
    pub fn from_value(cost: f32) -> Self {
        if cost.is_finite() && cost >= 0. {
            MovementCost::Passable(cost)
        } else {
            MovementCost::Impassable
        }
    }

    /// The cost as a number, where impassable terrain costs [`f32::INFINITY`].
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        match self {
            MovementCost::Passable(cost) => cost,
            MovementCost::Impassable => f32::INFINITY,
        }
    }

    /// Can this terrain be entered at all?
    #[inline]
    #[must_use]
    pub fn is_passable(self) -> bool {
        matches!(self, MovementCost::Passable(_))
    }
}

/// A per-terrain table of [`MovementCost`]s.
///
/// Terrain that has no entry in this table is impassable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementCosts {
    /// The cost of entering each known kind of terrain
    costs: HashMap<Id<TerrainKind>, MovementCost>,
}

impl MovementCosts {
    /// Creates an empty table, where all terrain is impassable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cost of entering `terrain`, returning the previous cost if any.
    ///
    /// Passable costs that are negative or not finite are stored as [`MovementCost::Impassable`].
    pub fn insert(&mut self, terrain: Id<TerrainKind>, cost: MovementCost) -> Option<MovementCost> {
        let cost = match cost {
            MovementCost::Passable(value) => {
                let sanitized = MovementCost::from_value(value);
                if !sanitized.is_passable() {
                    warn!(
                        "Treating invalid movement cost {value} for {terrain:?} as impassable"
                    );
                }
                sanitized
            }
            MovementCost::Impassable => MovementCost::Impassable,
        };

        self.costs.insert(terrain, cost)
    }

    /// Builder-style version of [`MovementCosts::insert`].
    #[must_use]
    pub fn with(mut self, terrain: Id<TerrainKind>, cost: MovementCost) -> Self {
        self.insert(terrain, cost);
        self
    }

    /// Returns the configured cost for `terrain`, if any.
    #[must_use]
    pub fn get(&self, terrain: Id<TerrainKind>) -> Option<MovementCost> {
        self.costs.get(&terrain).copied()
    }

    /// Returns the cost of entering `terrain`.
    ///
    /// Terrain with no entry costs [`f32::INFINITY`], and so can never be entered.
    #[inline]
    #[must_use]
    pub fn cost(&self, terrain: Id<TerrainKind>) -> f32 {
        self.get(terrain).map_or(f32::INFINITY, MovementCost::value)
    }

    /// Iterates over all configured entries, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Id<TerrainKind>, MovementCost)> + '_ {
        self.costs.iter().map(|(terrain, cost)| (*terrain, *cost))
    }

    /// The number of configured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Is this table empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

impl FromIterator<(Id<TerrainKind>, MovementCost)> for MovementCosts {
    fn from_iter<I: IntoIterator<Item = (Id<TerrainKind>, MovementCost)>>(iter: I) -> Self {
        let mut costs = MovementCosts::new();
        for (terrain, cost) in iter {
            costs.insert(terrain, cost);
        }
        costs
    }
}

/// A movement cost, as written in a manifest file.
///
/// Either a number, or the string `"impassable"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMovementCost {
    /// A numeric cost
    Value(f32),
    /// A keyword
    Keyword(CostKeyword),
}

/// Keywords that can stand in for a numeric [`RawMovementCost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKeyword {
    /// The terrain cannot be entered
    Impassable,
}

impl From<RawMovementCost> for MovementCost {
    fn from(raw: RawMovementCost) -> Self {
        match raw {
            RawMovementCost::Value(value) => MovementCost::Passable(value),
            RawMovementCost::Keyword(CostKeyword::Impassable) => MovementCost::Impassable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_terrain_is_impassable() {
        let costs = MovementCosts::new().with(Id::from_name("loam"), MovementCost::Passable(1.));

        assert_eq!(costs.cost(Id::from_name("loam")), 1.);
        assert_eq!(costs.cost(Id::from_name("lava")), f32::INFINITY);
    }

    #[test]
    fn invalid_costs_are_impassable() {
        let costs = MovementCosts::new()
            .with(Id::from_name("negative"), MovementCost::Passable(-1.))
            .with(Id::from_name("nan"), MovementCost::Passable(f32::NAN))
            .with(Id::from_name("infinite"), MovementCost::Passable(f32::INFINITY))
            .with(Id::from_name("free"), MovementCost::Passable(0.));

        assert_eq!(
            costs.get(Id::from_name("negative")),
            Some(MovementCost::Impassable)
        );
        assert_eq!(costs.get(Id::from_name("nan")), Some(MovementCost::Impassable));
        assert_eq!(
            costs.get(Id::from_name("infinite")),
            Some(MovementCost::Impassable)
        );
        assert_eq!(costs.cost(Id::from_name("free")), 0.);
    }

    #[test]
    fn raw_costs_parse() {
        let raw: Vec<RawMovementCost> = serde_json::from_str(r#"[1.5, 2, "impassable"]"#).unwrap();
        let costs: Vec<MovementCost> = raw.into_iter().map(MovementCost::from).collect();

        assert_eq!(
            costs,
            vec![
                MovementCost::Passable(1.5),
                MovementCost::Passable(2.),
                MovementCost::Impassable
            ]
        );

        assert!(serde_json::from_str::<RawMovementCost>(r#""cheap""#).is_err());
    }
}
