//! Data and manifest definitions for units.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{
    Id, Manifest, ManifestError, MovementCost, MovementCosts, RawManifest, RawMovementCost,
    TerrainKind,
};

/// The marker type for [`Id<UnitClass>`](super::Id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitClass;

/// Stores the read-only definitions for all units.
pub type UnitManifest = Manifest<UnitClass, UnitData>;

/// The immutable template shared by every unit of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitData {
    /// The health a freshly spawned unit starts with.
    pub max_health: u32,
    /// The size of the unit's water budget, spent when moving.
    pub water_capacity: f32,
    /// How many tiles the unit can cross per turn, used by display collaborators.
    pub speed: f32,
    /// The cost of entering each kind of terrain.
    pub movement_costs: MovementCosts,
}

/// The unit data as seen in the original manifest file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUnitData {
    /// See [`UnitData::max_health`].
    pub max_health: u32,
    /// See [`UnitData::water_capacity`].
    pub water_capacity: f32,
    /// See [`UnitData::speed`].
    pub speed: f32,
    /// The movement cost for each named terrain type.
    #[serde(default)]
    pub movement_costs: IndexMap<String, RawMovementCost>,
}

impl From<&RawUnitData> for UnitData {
    fn from(raw: &RawUnitData) -> Self {
        UnitData {
            max_health: raw.max_health,
            water_capacity: raw.water_capacity.max(0.),
            speed: raw.speed,
            movement_costs: raw
                .movement_costs
                .iter()
                .map(|(terrain, cost)| {
                    (
                        Id::<TerrainKind>::from_name(terrain),
                        MovementCost::from(*cost),
                    )
                })
                .collect(),
        }
    }
}

/// The unit manifest as seen in the manifest file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUnitManifest {
    /// The data for each unit class.
    pub unit_types: IndexMap<String, RawUnitData>,
}

impl RawUnitManifest {
    /// Ensures that every movement cost refers to a terrain type in `terrain`.
    pub fn check_terrain<D>(
        &self,
        terrain: &Manifest<TerrainKind, D>,
    ) -> Result<(), ManifestError> {
        for (unit, data) in &self.unit_types {
            if let Some(unknown) = data
                .movement_costs
                .keys()
                .find(|name| !terrain.contains(Id::from_name(name)))
            {
                return Err(ManifestError::UnknownTerrain {
                    unit: unit.clone(),
                    terrain: unknown.clone(),
                });
            }
        }

        Ok(())
    }
}

impl RawManifest for RawUnitManifest {
    type Marker = UnitClass;
    type Data = UnitData;

    fn path() -> &'static str {
        "manifests/units.manifest.json"
    }

    fn process(&self) -> Result<Manifest<Self::Marker, Self::Data>, ManifestError> {
        let mut manifest = Manifest::new();

        for (name, raw_data) in &self.unit_types {
            manifest.insert(name, UnitData::from(raw_data))?;
        }

        Ok(manifest)
    }
}
