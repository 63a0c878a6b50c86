use hexfield_lib::entities::{Entity, Identified, IdentityAllocator, Owner, Tile, Unit};
use hexfield_lib::geometry::{hexagon, HexDirections, HexPos};
use hexfield_lib::layers::LayerEvent;
use hexfield_lib::level::{Level, LevelSave, LoadError, SpawnError};
use hexfield_lib::manifest::{Id, Manifests};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Shows the level's log output when run with `RUST_LOG` set.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn populated_level() -> Level {
    init_logging();
    let mut level = Level::new(Manifests::bundled().unwrap());

    for coord in hexagon(HexPos::ZERO, 3) {
        let terrain = if coord.q() == 2 { "rocky" } else { "loam" };
        level.spawn_tile(coord, Id::from_name(terrain)).unwrap();
    }

    level
        .spawn_unit(HexPos::ZERO, Id::from_name("ant"), Some(Owner(1)))
        .unwrap();
    level
        .spawn_unit(HexPos::new(-1, 2), Id::from_name("beetle"), None)
        .unwrap();
    level
        .spawn_building(HexPos::new(0, 1), Id::from_name("spring"), Some(Owner(1)))
        .unwrap();

    level
}

#[test]
fn saves_round_trip_through_json() {
    let level = populated_level();
    let save = level.save();
    let json = save.to_json().unwrap();

    let mut restored = Level::new(Manifests::bundled().unwrap());
    restored.load(&LevelSave::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored.save(), save);
    assert_eq!(restored.terrain().len(), 37);
    assert_eq!(restored.units().len(), 2);
    assert_eq!(restored.buildings().len(), 1);
}

#[test]
fn loading_notifies_observers() {
    let save = populated_level().save();
    let mut level = Level::new(Manifests::bundled().unwrap());

    let added = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&added);
    level.subscribe_terrain_coordinates(LayerEvent::Added, move |_| *counter.borrow_mut() += 1);

    let arrivals = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&arrivals);
    let subscription = level.subscribe_units(LayerEvent::Added, move |coord, unit: &Unit| {
        recorder.borrow_mut().push((coord, unit.id()))
    });

    level.load(&save).unwrap();
    assert_eq!(*added.borrow(), 37);
    assert_eq!(arrivals.borrow().len(), 2);

    assert!(level.unsubscribe_units(subscription));
    assert!(!level.unsubscribe_units(subscription));
    level
        .spawn_unit(HexPos::new(1, 0), Id::from_name("ant"), None)
        .unwrap();
    assert_eq!(arrivals.borrow().len(), 2);
}

#[test]
fn identities_issued_elsewhere_are_reserved_on_load() {
    let mut elsewhere = IdentityAllocator::new();
    let foreign_tile = Tile::new(elsewhere.allocate(), Id::from_name("loam"), HexDirections::ALL);
    let save = LevelSave {
        allocator: IdentityAllocator::new(),
        tiles: vec![(HexPos::ZERO, foreign_tile.clone())],
        ..LevelSave::default()
    };

    let mut level = Level::new(Manifests::bundled().unwrap());
    level.load(&save).unwrap();
    let ant = level
        .spawn_unit(HexPos::ZERO, Id::from_name("ant"), None)
        .unwrap();

    assert_ne!(ant, foreign_tile.id());
    assert!(matches!(level.entity(ant), Some(Entity::Unit(_))));
    assert!(matches!(level.entity(foreign_tile.id()), Some(Entity::Tile(_))));
}

#[test]
fn identities_are_not_reused_after_loading() {
    let original = populated_level();
    let save = original.save();
    let mut level = Level::new(Manifests::bundled().unwrap());
    level.load(&save).unwrap();

    let fresh = level
        .spawn_unit(HexPos::new(1, 0), Id::from_name("ant"), None)
        .unwrap();

    for (_, tile) in &save.tiles {
        assert_ne!(tile.id(), fresh);
    }
    assert!(matches!(level.entity(fresh), Some(Entity::Unit(_))));
}

#[test]
fn invalid_saves_leave_the_level_empty() {
    let mut save = populated_level().save();
    let lonely_unit = save.units[0].1.clone();
    save.units.push((HexPos::new(10, 10), lonely_unit.clone()));

    let mut level = populated_level();
    let error = level.load(&save).unwrap_err();

    assert!(matches!(
        error,
        LoadError::Spawn {
            source: SpawnError::NoTerrain(_),
            ..
        }
    ));
    assert!(level.terrain().is_empty());
    assert!(level.units().is_empty());
}

#[test]
fn duplicate_identities_are_rejected() {
    let mut save = populated_level().save();
    let (coord, unit) = save.units[0].clone();
    let free_tile = save
        .tiles
        .iter()
        .map(|(coord, _)| *coord)
        .find(|candidate| *candidate != coord && save.units.iter().all(|(c, _)| c != candidate))
        .unwrap();
    save.units.push((free_tile, unit.clone()));

    let mut level = Level::new(Manifests::bundled().unwrap());
    let error = level.load(&save).unwrap_err();

    assert_eq!(
        error,
        LoadError::DuplicateIdentity(unit.id())
    );
}

#[test]
fn unloading_cascades_to_units_and_buildings() {
    let mut level = populated_level();
    level.unload();

    assert!(level.terrain().is_empty());
    assert!(level.units().is_empty());
    assert!(level.buildings().is_empty());
}
