//! The level: terrain, and everything placed on it.
//!
//! A [`Level`] owns the identity allocator and every layer,
//! and is the only place where entities are created.

use itertools::Itertools;
use tracing::{debug, info};

use crate::entities::{
    Building, Entity, EntityId, Identified, IdentityAllocator, Owner, Tile, Unit, Water,
};
use crate::geometry::HexPos;
use crate::layers::{ConstrainedLayer, Layer, LayerEvent, Subscription};
use crate::manifest::{BuildingClass, Id, Manifests, TerrainKind, UnitClass};
use crate::reachability::{reachable, Reachable};

mod errors;
pub use errors::{LoadError, MoveError, RefillError, SpawnError};

mod save;
pub use save::LevelSave;

/// The owning context for a map.
///
/// Units and buildings live in layers constrained to the terrain,
/// so removing a tile also removes whatever stood on it.
#[derive(Debug)]
pub struct Level {
    /// Hands out identities for new entities
    allocator: IdentityAllocator,
    /// The definitions that entities are created from
    manifests: Manifests,
    /// The terrain itself
    terrain: Layer<Tile>,
    /// Mobile units, on top of the terrain
    units: ConstrainedLayer<Unit>,
    /// Buildings, on top of the terrain
    buildings: ConstrainedLayer<Building>,
}

impl Level {
    /// Creates an empty level whose entities are defined by `manifests`.
    #[must_use]
    pub fn new(manifests: Manifests) -> Self {
        let mut terrain = Layer::new();
        let units = ConstrainedLayer::new(&mut terrain);
        let buildings = ConstrainedLayer::new(&mut terrain);

        Level {
            allocator: IdentityAllocator::new(),
            manifests,
            terrain,
            units,
            buildings,
        }
    }

    /// The definitions used by this level.
    #[must_use]
    pub fn manifests(&self) -> &Manifests {
        &self.manifests
    }

    /// The terrain layer.
    #[must_use]
    pub fn terrain(&self) -> &Layer<Tile> {
        &self.terrain
    }

    /// The unit layer.
    #[must_use]
    pub fn units(&self) -> &ConstrainedLayer<Unit> {
        &self.units
    }

    /// The building layer.
    #[must_use]
    pub fn buildings(&self) -> &ConstrainedLayer<Building> {
        &self.buildings
    }

    /// Calls `observer` with each tile at every `event` of the terrain layer.
    pub fn subscribe_terrain(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos, &Tile) + 'static,
    ) -> Subscription {
        self.terrain.subscribe(event, observer)
    }

    /// Calls `observer` with the affected cell at every `event` of the terrain layer.
    pub fn subscribe_terrain_coordinates(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos) + 'static,
    ) -> Subscription {
        self.terrain.subscribe_coordinates(event, observer)
    }

    /// Removes an observer of the terrain layer, returning `false` if it was already gone.
    pub fn unsubscribe_terrain(&mut self, subscription: Subscription) -> bool {
        self.terrain.unsubscribe(subscription)
    }

    /// Calls `observer` with each unit at every `event` of the unit layer.
    pub fn subscribe_units(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos, &Unit) + 'static,
    ) -> Subscription {
        self.units.subscribe(event, observer)
    }

    /// Calls `observer` with the affected cell at every `event` of the unit layer.
    pub fn subscribe_units_coordinates(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos) + 'static,
    ) -> Subscription {
        self.units.subscribe_coordinates(event, observer)
    }

    /// Removes an observer of the unit layer, returning `false` if it was already gone.
    pub fn unsubscribe_units(&mut self, subscription: Subscription) -> bool {
        self.units.unsubscribe(subscription)
    }

    /// Calls `observer` with each building at every `event` of the building layer.
    pub fn subscribe_buildings(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos, &Building) + 'static,
    ) -> Subscription {
        self.buildings.subscribe(event, observer)
    }

    /// Calls `observer` with the affected cell at every `event` of the building layer.
    pub fn subscribe_buildings_coordinates(
        &mut self,
        event: LayerEvent,
        observer: impl FnMut(HexPos) + 'static,
    ) -> Subscription {
        self.buildings.subscribe_coordinates(event, observer)
    }

    /// Removes an observer of the building layer, returning `false` if it was already gone.
    pub fn unsubscribe_buildings(&mut self, subscription: Subscription) -> bool {
        self.buildings.unsubscribe(subscription)
    }

    /// Places a new tile of `terrain` at `coord`.
    pub fn spawn_tile(
        &mut self,
        coord: HexPos,
        terrain: Id<TerrainKind>,
    ) -> Result<EntityId, SpawnError> {
        let data = self
            .manifests
            .terrain
            .get(terrain)
            .ok_or(SpawnError::UnknownTerrain(terrain))?;

        if self.terrain.contains(coord) {
            return Err(SpawnError::Occupied(coord));
        }

        let tile = Tile::from_data(self.allocator.allocate(), terrain, data);
        let id = tile.id();
        self.terrain.try_add(coord, tile);
        debug!("Spawned tile {id} at {coord}");

        Ok(id)
    }

    /// Places a new unit of `class` at `coord`, with full health and water.
    pub fn spawn_unit(
        &mut self,
        coord: HexPos,
        class: Id<UnitClass>,
        owner: Option<Owner>,
    ) -> Result<EntityId, SpawnError> {
        let data = self
            .manifests
            .units
            .get(class)
            .ok_or(SpawnError::UnknownUnitClass(class))?;

        if !self.units.allows(coord) {
            return Err(SpawnError::NoTerrain(coord));
        }
        if self.units.contains(coord) {
            return Err(SpawnError::Occupied(coord));
        }

        let mut unit = Unit::from_data(self.allocator.allocate(), class, data);
        unit.owner = owner;
        let id = unit.id();
        self.units.try_add(coord, unit);
        debug!("Spawned unit {id} at {coord}");

        Ok(id)
    }

    /// Places a new building of `class` at `coord`.
    pub fn spawn_building(
        &mut self,
        coord: HexPos,
        class: Id<BuildingClass>,
        owner: Option<Owner>,
    ) -> Result<EntityId, SpawnError> {
        if !self.manifests.buildings.contains(class) {
            return Err(SpawnError::UnknownBuildingClass(class));
        }

        if !self.buildings.allows(coord) {
            return Err(SpawnError::NoTerrain(coord));
        }
        if self.buildings.contains(coord) {
            return Err(SpawnError::Occupied(coord));
        }

        let mut building = Building::new(self.allocator.allocate(), class);
        building.owner = owner;
        let id = building.id();
        self.buildings.try_add(coord, building);
        debug!("Spawned building {id} at {coord}");

        Ok(id)
    }

    /// Removes the tile at `coord`, along with any unit or building standing on it.
    ///
    /// Returns `false` if there was no tile there.
    pub fn despawn_tile(&mut self, coord: HexPos) -> bool {
        self.terrain.try_remove(coord)
    }

    /// Removes the unit with identity `id` from the level, returning it.
    pub fn remove_unit(&mut self, id: EntityId) -> Option<Unit> {
        let coord = self.units.position_of(id)?;
        self.units.take(coord)
    }

    /// Removes the building with identity `id` from the level, returning it.
    pub fn remove_building(&mut self, id: EntityId) -> Option<Building> {
        let coord = self.buildings.position_of(id)?;
        self.buildings.take(coord)
    }

    /// Returns a copy of the entity with identity `id`.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        if let Some((_, tile)) = self.terrain.get_by_id(id) {
            return Some(Entity::Tile(tile.clone()));
        }

        if let Some(unit) = self.units.get_by_id(id) {
            return Some(Entity::Unit(unit.clone()));
        }

        self.buildings
            .get_by_id(id)
            .map(|building| Entity::Building(building.clone()))
    }

    /// Returns where the entity with identity `id` is placed.
    ///
    /// Entities that are not in any layer have no location.
    #[must_use]
    pub fn location_of(&self, id: EntityId) -> Option<HexPos> {
        self.terrain
            .position_of(id)
            .or_else(|| self.units.position_of(id))
            .or_else(|| self.buildings.position_of(id))
    }

    /// Every cell the unit `id` can reach with its remaining water.
    #[must_use]
    pub fn reachable_for(&self, id: EntityId) -> Option<Reachable> {
        let coord = self.units.position_of(id)?;
        let unit = self.units.get(coord)?;
        let data = self.manifests.units.get(unit.class())?;

        Some(reachable(
            coord,
            &self.terrain,
            &data.movement_costs,
            unit.water.current().0,
        ))
    }

    /// Moves the unit `id` to `destination`, paying the cost of the cheapest route in water.
    ///
    /// Observers of the unit layer see the move as a removal followed by an addition.
    /// Returns the water spent.
    pub fn move_unit(&mut self, id: EntityId, destination: HexPos) -> Result<f32, MoveError> {
        let origin = self
            .units
            .position_of(id)
            .ok_or(MoveError::UnknownUnit(id))?;

        if origin == destination {
            return Ok(0.);
        }

        if self.units.contains(destination) {
            return Err(MoveError::Occupied(destination));
        }

        let cost = self
            .reachable_for(id)
            .and_then(|reachable| reachable.cost(destination))
            .ok_or(MoveError::Unreachable {
                unit: id,
                destination,
            })?;

        let mut unit = self.units.take(origin).ok_or(MoveError::UnknownUnit(id))?;
        unit.water.spend(Water(cost));
        self.units.try_add(destination, unit);
        debug!("Moved unit {id} from {origin} to {destination} for {cost}");

        Ok(cost)
    }

    /// Refills the water of the unit `id`.
    ///
    /// The unit must be standing on a building that provides water.
    pub fn refill_water(&mut self, id: EntityId) -> Result<(), RefillError> {
        let coord = self
            .units
            .position_of(id)
            .ok_or(RefillError::UnknownUnit(id))?;

        let has_water = self.buildings.get(coord).map_or(false, |building| {
            self.manifests
                .buildings
                .get(building.class())
                .map_or(false, |data| data.provides_water)
        });

        if !has_water {
            return Err(RefillError::NoWaterSource { unit: id, coord });
        }

        self.units.update(coord, |unit| unit.water.refill());
        debug!("Refilled the water of unit {id} at {coord}");

        Ok(())
    }

    /// Removes every entity from the level, notifying observers of each removal.
    ///
    /// Units and buildings are removed as their terrain is.
    pub fn unload(&mut self) {
        let n_tiles = self.terrain.len();
        self.terrain.clear();
        info!("Unloaded level with {n_tiles} tiles");
    }

    /// Captures the current state of the level.
    #[must_use]
    pub fn save(&self) -> LevelSave {
        LevelSave {
            allocator: self.allocator.clone(),
            tiles: self
                .terrain
                .iter()
                .map(|(coord, tile)| (coord, tile.clone()))
                .sorted_by_key(by_row)
                .collect(),
            units: self
                .units
                .layer()
                .iter()
                .map(|(coord, unit)| (coord, unit.clone()))
                .sorted_by_key(by_row)
                .collect(),
            buildings: self
                .buildings
                .layer()
                .iter()
                .map(|(coord, building)| (coord, building.clone()))
                .sorted_by_key(by_row)
                .collect(),
        }
    }

    /// Replaces the contents of this level with `save`.
    ///
    /// Entities are restored one at a time through the normal layer operations,
    /// so observers see every addition. If anything in the save is invalid,
    /// the level is left empty.
    pub fn load(&mut self, save: &LevelSave) -> Result<(), LoadError> {
        self.unload();

        if let Err(error) = self.restore(save) {
            self.unload();
            return Err(error);
        }

        info!(
            "Loaded level with {} tiles, {} units and {} buildings",
            self.terrain.len(),
            self.units.len(),
            self.buildings.len()
        );
        Ok(())
    }

    /// Adds every entity in `save` to this level.
    fn restore(&mut self, save: &LevelSave) -> Result<(), LoadError> {
        self.allocator.merge(&save.allocator);

        for (coord, tile) in &save.tiles {
            let error = |source| LoadError::Spawn {
                entity: tile.id(),
                coord: *coord,
                source,
            };

            if !self.manifests.terrain.contains(tile.terrain()) {
                return Err(error(SpawnError::UnknownTerrain(tile.terrain())));
            }
            if self.terrain.contains(*coord) {
                return Err(error(SpawnError::Occupied(*coord)));
            }
            self.claim(tile.id())?;
            self.terrain.try_add(*coord, tile.clone());
        }

        for (coord, unit) in &save.units {
            let error = |source| LoadError::Spawn {
                entity: unit.id(),
                coord: *coord,
                source,
            };

            if !self.manifests.units.contains(unit.class()) {
                return Err(error(SpawnError::UnknownUnitClass(unit.class())));
            }
            if !self.units.allows(*coord) {
                return Err(error(SpawnError::NoTerrain(*coord)));
            }
            if self.units.contains(*coord) {
                return Err(error(SpawnError::Occupied(*coord)));
            }
            self.claim(unit.id())?;
            self.units.try_add(*coord, unit.clone());
        }

        for (coord, building) in &save.buildings {
            let error = |source| LoadError::Spawn {
                entity: building.id(),
                coord: *coord,
                source,
            };

            if !self.manifests.buildings.contains(building.class()) {
                return Err(error(SpawnError::UnknownBuildingClass(building.class())));
            }
            if !self.buildings.allows(*coord) {
                return Err(error(SpawnError::NoTerrain(*coord)));
            }
            if self.buildings.contains(*coord) {
                return Err(error(SpawnError::Occupied(*coord)));
            }
            self.claim(building.id())?;
            self.buildings.try_add(*coord, building.clone());
        }

        Ok(())
    }

    /// Checks that no restored entity already uses `id`,
    /// and stops the allocator from handing it out.
    fn claim(&mut self, id: EntityId) -> Result<(), LoadError> {
        if self.location_of(id).is_some() {
            return Err(LoadError::DuplicateIdentity(id));
        }

        self.allocator.reserve(id);
        Ok(())
    }
}

/// Sort key that orders saved entries by row, then column.
fn by_row<T>((coord, _): &(HexPos, T)) -> (i32, i32) {
    (coord.r(), coord.q())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::hexagon;

    fn level() -> Level {
        let mut level = Level::new(Manifests::bundled().unwrap());
        for coord in hexagon(HexPos::ZERO, 2) {
            level.spawn_tile(coord, Id::from_name("loam")).unwrap();
        }
        level
    }

    #[test]
    fn spawning_checks_the_manifests() {
        let mut level = level();

        assert_eq!(
            level.spawn_tile(HexPos::new(9, 9), Id::from_name("lava")),
            Err(SpawnError::UnknownTerrain(Id::from_name("lava")))
        );
        assert_eq!(
            level.spawn_unit(HexPos::ZERO, Id::from_name("dragon"), None),
            Err(SpawnError::UnknownUnitClass(Id::from_name("dragon")))
        );
        assert_eq!(
            level.spawn_unit(HexPos::new(9, 9), Id::from_name("ant"), None),
            Err(SpawnError::NoTerrain(HexPos::new(9, 9)))
        );
    }

    #[test]
    fn entities_are_found_by_identity() {
        let mut level = level();
        let ant = level
            .spawn_unit(HexPos::ZERO, Id::from_name("ant"), Some(Owner(1)))
            .unwrap();
        let spring = level
            .spawn_building(HexPos::ZERO, Id::from_name("spring"), None)
            .unwrap();

        assert_eq!(level.location_of(ant), Some(HexPos::ZERO));
        assert_eq!(level.location_of(spring), Some(HexPos::ZERO));
        assert!(matches!(level.entity(ant), Some(Entity::Unit(_))));
        assert_eq!(level.entity(ant).unwrap().owner(), Some(Owner(1)));
        assert!(matches!(level.entity(spring), Some(Entity::Building(_))));

        let removed = level.remove_unit(ant).unwrap();
        assert_eq!(removed.id(), ant);
        assert_eq!(level.location_of(ant), None);
        assert_eq!(level.entity(ant), None);
    }

    #[test]
    fn moving_spends_water() {
        let mut level = level();
        let ant = level
            .spawn_unit(HexPos::ZERO, Id::from_name("ant"), None)
            .unwrap();
        let destination = HexPos::new(2, 0);

        assert_eq!(level.move_unit(ant, destination), Ok(2.));
        assert_eq!(level.location_of(ant), Some(destination));

        let Some(Entity::Unit(unit)) = level.entity(ant) else {
            panic!("the ant should still exist");
        };
        assert_eq!(unit.water.current(), Water(4.));
    }

    #[test]
    fn moves_beyond_the_water_budget_fail() {
        let mut level = level();
        let ant = level
            .spawn_unit(HexPos::ZERO, Id::from_name("ant"), None)
            .unwrap();
        let other = level
            .spawn_unit(HexPos::new(1, 0), Id::from_name("ant"), None)
            .unwrap();

        assert_eq!(
            level.move_unit(ant, HexPos::new(1, 0)),
            Err(MoveError::Occupied(HexPos::new(1, 0)))
        );
        assert_eq!(
            level.move_unit(ant, HexPos::new(5, 0)),
            Err(MoveError::Unreachable {
                unit: ant,
                destination: HexPos::new(5, 0)
            })
        );
        assert_eq!(level.move_unit(other, HexPos::new(1, 0)), Ok(0.));
    }

    #[test]
    fn water_is_refilled_at_springs() {
        let mut level = level();
        let ant = level
            .spawn_unit(HexPos::ZERO, Id::from_name("ant"), None)
            .unwrap();
        level.move_unit(ant, HexPos::new(0, 2)).unwrap();

        assert_eq!(
            level.refill_water(ant),
            Err(RefillError::NoWaterSource {
                unit: ant,
                coord: HexPos::new(0, 2)
            })
        );

        level
            .spawn_building(HexPos::new(0, 2), Id::from_name("spring"), None)
            .unwrap();
        assert_eq!(level.refill_water(ant), Ok(()));

        let Some(Entity::Unit(unit)) = level.entity(ant) else {
            panic!("the ant should still exist");
        };
        assert_eq!(unit.water.current(), unit.water.max());
    }

    #[test]
    fn despawning_terrain_cascades() {
        let mut level = level();
        let ant = level
            .spawn_unit(HexPos::ZERO, Id::from_name("ant"), None)
            .unwrap();
        let hive = level
            .spawn_building(HexPos::ZERO, Id::from_name("ant_hive"), None)
            .unwrap();

        assert!(level.despawn_tile(HexPos::ZERO));
        assert_eq!(level.location_of(ant), None);
        assert_eq!(level.location_of(hive), None);
        assert!(!level.despawn_tile(HexPos::ZERO));
    }
}
