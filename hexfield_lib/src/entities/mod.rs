//! Everything that can be placed on the grid.

use serde::{Deserialize, Serialize};

mod identity;
pub use identity::{EntityId, Identified, IdentityAllocator, Owner};

mod tile;
pub use tile::Tile;

mod unit;
pub use unit::{Unit, Water, WaterPool};

mod building;
pub use building::Building;

/// Any placeable object.
///
/// Each variant lives in its own layer: tiles in the terrain layer,
/// units and buildings in layers constrained to the terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    /// A terrain cell
    Tile(Tile),
    /// A mobile unit
    Unit(Unit),
    /// A structure
    Building(Building),
}

impl Entity {
    /// Who controls this entity, if anyone.
    #[must_use]
    pub fn owner(&self) -> Option<Owner> {
        match self {
            Entity::Tile(tile) => tile.owner,
            Entity::Unit(unit) => unit.owner,
            Entity::Building(building) => building.owner,
        }
    }
}

impl Identified for Entity {
    fn id(&self) -> EntityId {
        match self {
            Entity::Tile(tile) => tile.id(),
            Entity::Unit(unit) => unit.id(),
            Entity::Building(building) => building.id(),
        }
    }
}

impl From<Tile> for Entity {
    fn from(tile: Tile) -> Self {
        Entity::Tile(tile)
    }
}

impl From<Unit> for Entity {
    fn from(unit: Unit) -> Self {
        Entity::Unit(unit)
    }
}

impl From<Building> for Entity {
    fn from(building: Building) -> Self {
        Entity::Building(building)
    }
}
