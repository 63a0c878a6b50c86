//! Data and manifest definitions for buildings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Manifest, ManifestError, RawManifest};

/// The marker type for [`Id<BuildingClass>`](super::Id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingClass;

/// Stores the read-only definitions for all buildings.
pub type BuildingManifest = Manifest<BuildingClass, BuildingData>;

/// The immutable template shared by every building of a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingData {
    /// Can units standing on this building refill their water?
    #[serde(default)]
    pub provides_water: bool,
}

/// The building manifest as seen in the manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBuildingManifest {
    /// The data for each building class.
    pub building_types: IndexMap<String, BuildingData>,
}

impl RawManifest for RawBuildingManifest {
    type Marker = BuildingClass;
    type Data = BuildingData;

    fn path() -> &'static str {
        "manifests/buildings.manifest.json"
    }

    fn process(&self) -> Result<Manifest<Self::Marker, Self::Data>, ManifestError> {
        let mut manifest = Manifest::new();

        for (name, data) in &self.building_types {
            manifest.insert(name, data.clone())?;
        }

        Ok(manifest)
    }
}
