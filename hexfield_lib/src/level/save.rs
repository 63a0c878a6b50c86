//! The serialized form of a level.

use serde::{Deserialize, Serialize};

use crate::entities::{Building, IdentityAllocator, Tile, Unit};
use crate::geometry::HexPos;

/// Everything needed to restore a [`Level`](super::Level), apart from its manifests.
///
/// Entries are ordered by row, then column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSave {
    /// The allocator state, so restored levels never reuse identities.
    pub allocator: IdentityAllocator,
    /// Every terrain tile
    pub tiles: Vec<(HexPos, Tile)>,
    /// Every unit
    pub units: Vec<(HexPos, Unit)>,
    /// Every building
    pub buildings: Vec<(HexPos, Building)>,
}

impl LevelSave {
    /// Serializes this save as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a save from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
