//! Immobile structures placed on terrain.

use serde::{Deserialize, Serialize};

use crate::manifest::{BuildingClass, Id};

use super::{EntityId, Identified, Owner};

/// A structure that sits on a single tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// The unique identity of this building
    id: EntityId,
    /// Who controls this building, if anyone
    pub owner: Option<Owner>,
    /// The building's template
    class: Id<BuildingClass>,
}

impl Building {
    /// Creates a new building.
    #[must_use]
    pub fn new(id: EntityId, class: Id<BuildingClass>) -> Self {
        Building {
            id,
            owner: None,
            class,
        }
    }

    /// The class that this building was created from.
    #[must_use]
    pub fn class(&self) -> Id<BuildingClass> {
        self.class
    }
}

impl Identified for Building {
    fn id(&self) -> EntityId {
        self.id
    }
}
