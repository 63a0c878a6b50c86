//! The ways that level operations can fail.

use thiserror::Error;

use crate::entities::EntityId;
use crate::geometry::HexPos;
use crate::manifest::{BuildingClass, Id, TerrainKind, UnitClass};

/// An entity could not be spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// The terrain type is not in the terrain manifest.
    #[error("the terrain type {0:?} is not defined")]
    UnknownTerrain(Id<TerrainKind>),
    /// The unit class is not in the unit manifest.
    #[error("the unit class {0:?} is not defined")]
    UnknownUnitClass(Id<UnitClass>),
    /// The building class is not in the building manifest.
    #[error("the building class {0:?} is not defined")]
    UnknownBuildingClass(Id<BuildingClass>),
    /// Something of the same kind is already at this coordinate.
    #[error("{0} is already occupied")]
    Occupied(HexPos),
    /// Units and buildings can only be placed on terrain.
    #[error("there is no terrain at {0}")]
    NoTerrain(HexPos),
}

/// A unit could not be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// No unit with this identity exists.
    #[error("there is no unit {0}")]
    UnknownUnit(EntityId),
    /// The destination is out of range of the unit's water budget, or cut off entirely.
    #[error("unit {unit} cannot reach {destination}")]
    Unreachable {
        /// The unit that tried to move
        unit: EntityId,
        /// Where it tried to go
        destination: HexPos,
    },
    /// Another unit is standing at the destination.
    #[error("{0} is already occupied by another unit")]
    Occupied(HexPos),
}

/// A unit could not refill its water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RefillError {
    /// No unit with this identity exists.
    #[error("there is no unit {0}")]
    UnknownUnit(EntityId),
    /// The unit is not standing on a building that provides water.
    #[error("unit {unit} at {coord} is not at a water source")]
    NoWaterSource {
        /// The thirsty unit
        unit: EntityId,
        /// Where it is standing
        coord: HexPos,
    },
}

/// A saved level could not be restored.
///
/// The level is left empty when this happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A saved entity refers to a definition that is not in the current manifests.
    #[error("saved entity {entity} at {coord} could not be restored: {source}")]
    Spawn {
        /// The saved entity
        entity: EntityId,
        /// Where it was saved
        coord: HexPos,
        /// What was wrong with it
        source: SpawnError,
    },
    /// The same identity appears more than once in the save.
    #[error("the identity {0} is used by more than one saved entity")]
    DuplicateIdentity(EntityId),
}
