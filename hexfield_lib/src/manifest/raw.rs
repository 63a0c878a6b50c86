//! The raw manifest data before it has been processed.
//!
//! The processing will primarily remove the string IDs and replace them by numbers.

use anyhow::Context;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::info;

use super::{
    BuildingClass, BuildingData, Manifest, ManifestError, RawBuildingManifest, RawTerrainManifest,
    RawUnitManifest, TerrainData, TerrainKind, UnitClass, UnitData,
};

/// A utility trait to ensure that all trait bounds are satisfied.
pub trait RawManifest: Debug + for<'de> Deserialize<'de> {
    /// The marker type for the manifest ID.
    type Marker;

    /// The type of the processed manifest data.
    type Data: Debug;

    /// The path of the bundled manifest, relative to the asset folder.
    fn path() -> &'static str;

    /// Parses the raw manifest from its JSON representation.
    fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Process the raw manifest from the file into the manifest data used by the level.
    fn process(&self) -> Result<Manifest<Self::Marker, Self::Data>, ManifestError>;
}

/// Every manifest needed to populate a level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifests {
    /// Terrain definitions, including their default connectivity.
    pub terrain: Manifest<TerrainKind, TerrainData>,
    /// Unit definitions, including their movement costs.
    pub units: Manifest<UnitClass, UnitData>,
    /// Building definitions.
    pub buildings: Manifest<BuildingClass, BuildingData>,
}

impl Manifests {
    /// Parses and processes the three manifests from their JSON text.
    ///
    /// Unit movement costs may only refer to terrain defined in the terrain manifest.
    pub fn from_json(terrain: &str, units: &str, buildings: &str) -> anyhow::Result<Self> {
        let raw_terrain = RawTerrainManifest::from_json(terrain)
            .with_context(|| format!("failed to parse {}", RawTerrainManifest::path()))?;
        let raw_units = RawUnitManifest::from_json(units)
            .with_context(|| format!("failed to parse {}", RawUnitManifest::path()))?;
        let raw_buildings = RawBuildingManifest::from_json(buildings)
            .with_context(|| format!("failed to parse {}", RawBuildingManifest::path()))?;

        let terrain = raw_terrain
            .process()
            .with_context(|| format!("failed to process {}", RawTerrainManifest::path()))?;

        raw_units
            .check_terrain(&terrain)
            .with_context(|| format!("failed to process {}", RawUnitManifest::path()))?;
        let units = raw_units
            .process()
            .with_context(|| format!("failed to process {}", RawUnitManifest::path()))?;

        let buildings = raw_buildings
            .process()
            .with_context(|| format!("failed to process {}", RawBuildingManifest::path()))?;

        info!(
            "Loaded {} terrain types, {} unit types and {} building types",
            terrain.len(),
            units.len(),
            buildings.len()
        );

        Ok(Manifests {
            terrain,
            units,
            buildings,
        })
    }

    /// The manifests that ship with this crate, under `assets/manifests`.
    pub fn bundled() -> anyhow::Result<Self> {
        Self::from_json(
            include_str!("../../assets/manifests/terrain.manifest.json"),
            include_str!("../../assets/manifests/units.manifest.json"),
            include_str!("../../assets/manifests/buildings.manifest.json"),
        )
    }
}
