//! Data and manifest definitions for terrain.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{HexDirection, HexDirections};

use super::{Manifest, ManifestError, RawManifest};

/// The marker type for [`Id<TerrainKind>`](super::Id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainKind;

/// Stores the read-only definitions for all terrain types.
pub type TerrainManifest = Manifest<TerrainKind, TerrainData>;

/// Data stored in a [`TerrainManifest`] for each [`Id<TerrainKind>`](super::Id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainData {
    /// The edges that tiles of this terrain can be left through, unless the tile overrides them.
    pub connections: HexDirections,
}

impl TerrainData {
    /// Constructs a new [`TerrainData`] object
    #[must_use]
    pub fn new(connections: HexDirections) -> Self {
        TerrainData { connections }
    }
}

impl Default for TerrainData {
    fn default() -> Self {
        TerrainData {
            connections: HexDirections::ALL,
        }
    }
}

/// The terrain data as seen in the original manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTerrainData {
    /// The directions tiles of this terrain connect toward.
    ///
    /// When omitted, every direction is connected.
    #[serde(default)]
    pub connections: Option<Vec<HexDirection>>,
}

impl From<&RawTerrainData> for TerrainData {
    fn from(raw: &RawTerrainData) -> Self {
        match &raw.connections {
            Some(directions) => TerrainData::new(directions.iter().copied().collect()),
            None => TerrainData::default(),
        }
    }
}

/// The terrain manifest as seen in the manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTerrainManifest {
    /// The data for each terrain type.
    pub terrain_types: IndexMap<String, RawTerrainData>,
}

impl RawManifest for RawTerrainManifest {
    type Marker = TerrainKind;
    type Data = TerrainData;

    fn path() -> &'static str {
        "manifests/terrain.manifest.json"
    }

    fn process(&self) -> Result<Manifest<Self::Marker, Self::Data>, ManifestError> {
        let mut manifest = Manifest::new();

        for (name, raw_data) in &self.terrain_types {
            manifest.insert(name, TerrainData::from(raw_data))?;
        }

        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Id;

    #[test]
    fn connections_default_to_all_directions() {
        let raw = RawTerrainManifest::from_json(
            r#"{"terrain_types": {
                "loam": {},
                "ridge": {"connections": ["north", "south"]}
            }}"#,
        )
        .unwrap();
        let manifest = raw.process().unwrap();

        let loam = manifest.get(Id::from_name("loam")).unwrap();
        assert_eq!(loam.connections, HexDirections::ALL);

        let ridge = manifest.get(Id::from_name("ridge")).unwrap();
        assert_eq!(
            ridge.connections,
            HexDirections::from(HexDirection::North) | HexDirection::South
        );
    }

    #[test]
    fn unknown_directions_fail_to_parse() {
        let json = r#"{"terrain_types": {"loam": {"connections": ["up"]}}}"#;
        let result = RawTerrainManifest::from_json(json);
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }
}
