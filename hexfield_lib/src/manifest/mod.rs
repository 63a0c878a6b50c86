//! Read-only definitions for grid objects.
//!
//! These are intended to be loaded from a file or generated by the embedding application.
//! Other code should look up the data contained here,
//! in order to populate the properties of placed entities.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

mod identifier;
pub use identifier::Id;

mod raw;
pub use raw::{Manifests, RawManifest};

mod terrain;
pub use terrain::{RawTerrainData, RawTerrainManifest, TerrainData, TerrainKind, TerrainManifest};

mod unit;
pub use unit::{RawUnitData, RawUnitManifest, UnitClass, UnitData, UnitManifest};

mod building;
pub use building::{BuildingClass, BuildingData, BuildingManifest, RawBuildingManifest};

mod costs;
pub use costs::{CostKeyword, MovementCost, MovementCosts, RawMovementCost};

/// Something went wrong while building a [`Manifest`].
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The raw manifest could not be parsed.
    #[error("could not parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two entries hashed to the same [`Id`].
    #[error("the identifiers '{existing}' and '{new}' produce the same ID")]
    DuplicateIdentifier {
        /// The identifier that was already registered
        existing: String,
        /// The identifier that collided with it
        new: String,
    },
    /// A movement cost table refers to a terrain type that does not exist.
    #[error("unit type '{unit}' has a movement cost for unknown terrain '{terrain}'")]
    UnknownTerrain {
        /// The unit type whose cost table is invalid
        unit: String,
        /// The terrain name that could not be found
        terrain: String,
    },
}

/// Write-once data definitions.
///
/// Entries are keyed by an [`Id`] derived from their string name,
/// and iterate in the order they were inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest<Marker, Data> {
    /// The internal mapping.
    data_map: IndexMap<Id<Marker>, Data>,
    /// The human-readable name of each entry.
    name_map: IndexMap<Id<Marker>, String>,
}

impl<Marker, Data> Default for Manifest<Marker, Data> {
    fn default() -> Self {
        Manifest {
            data_map: IndexMap::default(),
            name_map: IndexMap::default(),
        }
    }
}

impl<Marker, Data> Manifest<Marker, Data> {
    /// Create a new empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry to the manifest, returning the [`Id`] it can be looked up by.
    ///
    /// Fails if another entry with the same name (or the same hash) is already present.
    pub fn insert(&mut self, name: &str, data: Data) -> Result<Id<Marker>, ManifestError> {
        let id = Id::from_name(name);

        if let Some(existing) = self.name_map.get(&id) {
            return Err(ManifestError::DuplicateIdentifier {
                existing: existing.clone(),
                new: name.to_string(),
            });
        }

        debug!("Registering manifest entry '{name}'");
        self.name_map.insert(id, name.to_string());
        self.data_map.insert(id, data);

        Ok(id)
    }

    /// Get the data entry for the given ID.
    #[must_use]
    pub fn get(&self, id: Id<Marker>) -> Option<&Data> {
        self.data_map.get(&id)
    }

    /// Returns the human-readable name associated with the provided `id`.
    #[must_use]
    pub fn name(&self, id: Id<Marker>) -> Option<&str> {
        self.name_map.get(&id).map(String::as_str)
    }

    /// Is there an entry for `id`?
    #[must_use]
    pub fn contains(&self, id: Id<Marker>) -> bool {
        self.data_map.contains_key(&id)
    }

    /// The complete list of loaded options, in insertion order.
    pub fn variants(&self) -> impl Iterator<Item = Id<Marker>> + '_ {
        self.data_map.keys().copied()
    }

    /// Iterates over every entry, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Id<Marker>, &Data)> {
        self.data_map.iter().map(|(id, data)| (*id, data))
    }

    /// The number of entries in this manifest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data_map.len()
    }

    /// Does this manifest have no entries?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected() {
        let mut manifest = Manifest::<TerrainKind, TerrainData>::new();
        manifest.insert("loam", TerrainData::default()).unwrap();

        let result = manifest.insert("loam", TerrainData::default());
        assert!(matches!(
            result,
            Err(ManifestError::DuplicateIdentifier { .. })
        ));
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn entries_are_ordered_and_named() {
        let mut manifest = Manifest::<TerrainKind, TerrainData>::new();
        let rocky = manifest.insert("rocky", TerrainData::default()).unwrap();
        let loam = manifest.insert("loam", TerrainData::default()).unwrap();

        assert_eq!(manifest.variants().collect::<Vec<_>>(), vec![rocky, loam]);
        assert_eq!(manifest.name(loam), Some("loam"));
        assert!(manifest.contains(rocky));
        assert!(manifest.get(Id::from_name("lava")).is_none());
    }
}
