use hexfield_lib::entities::{Identified, IdentityAllocator, Tile};
use hexfield_lib::geometry::{parallelogram, HexDirection, HexDirections, HexPos};
use hexfield_lib::layers::Layer;
use hexfield_lib::manifest::{Id, MovementCost, MovementCosts};
use hexfield_lib::reachability::reachable;

/// A 7 by 7 parallelogram of open loam, centered on the origin.
fn open_grid() -> Layer<Tile> {
    let mut allocator = IdentityAllocator::new();
    let mut terrain = Layer::new();

    for coord in parallelogram(HexPos::new(-3, -3), HexPos::new(3, 3)) {
        terrain.try_add(
            coord,
            Tile::new(allocator.allocate(), Id::from_name("loam"), HexDirections::ALL),
        );
    }

    terrain
}

fn replace_terrain(terrain: &mut Layer<Tile>, coord: HexPos, kind: &str) {
    let old = terrain.take(coord).unwrap();
    assert!(terrain.try_add(coord, Tile::new(old.id(), Id::from_name(kind), old.connections)));
}

fn uniform_costs() -> MovementCosts {
    MovementCosts::new()
        .with(Id::from_name("loam"), MovementCost::Passable(1.))
        .with(Id::from_name("cliff"), MovementCost::Impassable)
}

#[test]
fn open_grid_examples() {
    let terrain = open_grid();
    assert_eq!(terrain.len(), 49);

    let one = reachable(HexPos::ZERO, &terrain, &uniform_costs(), 1.);
    assert_eq!(one.len(), 7);
    assert_eq!(one.cost(HexPos::ZERO), Some(0.));
    for neighbor in HexPos::ZERO.all_neighbors() {
        assert_eq!(one.cost(neighbor), Some(1.));
    }

    // The budget is inclusive, so the whole second ring is reachable
    let two = reachable(HexPos::ZERO, &terrain, &uniform_costs(), 2.);
    assert_eq!(two.len(), 19);
    for coord in two.coordinates() {
        assert_eq!(two.cost(coord), Some(coord.distance_to(HexPos::ZERO) as f32));
    }
}

#[test]
fn zero_budget_reaches_only_the_origin() {
    let terrain = open_grid();
    let result = reachable(HexPos::ZERO, &terrain, &uniform_costs(), 0.);

    assert_eq!(result.len(), 1);
    assert_eq!(result.cost(HexPos::ZERO), Some(0.));
}

#[test]
fn impassable_neighbors_block_what_lies_behind_them() {
    let mut terrain = open_grid();
    let cliff = HexPos::ZERO.neighbor(HexDirection::SouthEast);
    let behind = cliff.neighbor(HexDirection::SouthEast);
    replace_terrain(&mut terrain, cliff, "cliff");

    let result = reachable(HexPos::ZERO, &terrain, &uniform_costs(), 2.);

    assert!(!result.contains(cliff));
    assert!(!result.contains(behind));
    assert_eq!(result.len(), 17);
}

#[test]
fn terrain_without_a_cost_is_impassable() {
    let mut terrain = open_grid();
    let unmapped = HexPos::ZERO.neighbor(HexDirection::North);
    replace_terrain(&mut terrain, unmapped, "glass");

    let result = reachable(HexPos::ZERO, &terrain, &uniform_costs(), 1.);

    assert!(!result.contains(unmapped));
    assert_eq!(result.len(), 6);
}

#[test]
fn movement_leaves_only_through_connected_edges() {
    let mut terrain = open_grid();
    let mut origin = terrain.take(HexPos::ZERO).unwrap();
    origin.connections = HexDirection::North.into();
    assert!(terrain.try_add(HexPos::ZERO, origin));

    let result = reachable(HexPos::ZERO, &terrain, &uniform_costs(), 1.);

    assert_eq!(result.len(), 2);
    assert!(result.contains(HexPos::ZERO.neighbor(HexDirection::North)));
}

#[test]
fn origins_off_the_terrain_reach_nothing() {
    let terrain = open_grid();
    let result = reachable(HexPos::new(10, 10), &terrain, &uniform_costs(), 5.);

    assert!(result.is_empty());
}
