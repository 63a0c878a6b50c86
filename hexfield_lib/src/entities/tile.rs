//! Terrain cells.

use serde::{Deserialize, Serialize};

use crate::geometry::{HexDirection, HexDirections};
use crate::manifest::{Id, TerrainData, TerrainKind};

use super::{EntityId, Identified, Owner};

/// A single cell of terrain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// The unique identity of this tile
    id: EntityId,
    /// Who controls this tile, if anyone
    pub owner: Option<Owner>,
    /// The kind of terrain, used to look up movement costs
    terrain: Id<TerrainKind>,
    /// The edges that movement can leave this tile through
    pub connections: HexDirections,
}

impl Tile {
    /// Creates a tile with explicit connectivity.
    #[must_use]
    pub fn new(id: EntityId, terrain: Id<TerrainKind>, connections: HexDirections) -> Self {
        Tile {
            id,
            owner: None,
            terrain,
            connections,
        }
    }

    /// Creates a tile whose connectivity comes from its terrain's definition.
    #[must_use]
    pub fn from_data(id: EntityId, terrain: Id<TerrainKind>, data: &TerrainData) -> Self {
        Tile::new(id, terrain, data.connections)
    }

    /// The kind of terrain this tile is made of.
    #[must_use]
    pub fn terrain(&self) -> Id<TerrainKind> {
        self.terrain
    }

    /// Can movement leave this tile toward `direction`?
    #[must_use]
    pub fn is_connected(&self, direction: HexDirection) -> bool {
        self.connections.contains(direction)
    }
}

impl Identified for Tile {
    fn id(&self) -> EntityId {
        self.id
    }
}
