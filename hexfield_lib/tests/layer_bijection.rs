use hashbrown::HashMap;
use hexfield_lib::entities::{Identified, IdentityAllocator, Tile};
use hexfield_lib::geometry::{parallelogram, HexDirections, HexPos};
use hexfield_lib::layers::Layer;
use hexfield_lib::manifest::Id;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn snapshot(layer: &Layer<Tile>) -> HashMap<HexPos, Tile> {
    layer
        .iter()
        .map(|(coord, tile)| (coord, tile.clone()))
        .collect()
}

fn assert_bijection(layer: &Layer<Tile>) {
    let mut seen = HashMap::new();

    for (coord, tile) in layer.iter() {
        assert_eq!(layer.get_coordinates(tile), Some(coord));
        assert_eq!(layer.position_of(tile.id()), Some(coord));
        assert!(seen.insert(tile.id(), coord).is_none());
    }

    assert_eq!(seen.len(), layer.len());
}

#[test]
fn random_operations_preserve_the_bijection() {
    let mut rng = SmallRng::seed_from_u64(0x4845_5846);
    let mut allocator = IdentityAllocator::new();
    let mut layer: Layer<Tile> = Layer::new();
    let coords: Vec<HexPos> =
        parallelogram(HexPos::new(-4, -4), HexPos::new(4, 4)).collect();
    let mut removed: Vec<Tile> = Vec::new();

    for _ in 0..2_000 {
        let coord = *coords.choose(&mut rng).unwrap();

        match rng.gen_range(0..3) {
            0 => {
                let tile = Tile::new(
                    allocator.allocate(),
                    Id::from_name("loam"),
                    HexDirections::ALL,
                );
                let expected = !layer.contains(coord);
                assert_eq!(layer.try_add(coord, tile), expected);
            }
            1 => {
                // Re-adding a removed tile somewhere else is fine, but only once
                if let Some(tile) = removed.pop() {
                    let expected = !layer.contains(coord) && !layer.contains_item(&tile);
                    assert_eq!(layer.try_add(coord, tile), expected);
                }
            }
            _ => {
                let expected = layer.contains(coord);
                match layer.take(coord) {
                    Some(tile) => removed.push(tile),
                    None => assert!(!expected),
                }
            }
        }

        assert_bijection(&layer);
    }
}

#[test]
fn failed_adds_leave_the_layer_unchanged() {
    let mut allocator = IdentityAllocator::new();
    let mut layer: Layer<Tile> = Layer::new();
    let stored = Tile::new(allocator.allocate(), Id::from_name("loam"), HexDirections::ALL);
    layer.try_add(HexPos::ZERO, stored.clone());
    layer.try_add(
        HexPos::new(1, 0),
        Tile::new(allocator.allocate(), Id::from_name("rocky"), HexDirections::NONE),
    );

    let before = snapshot(&layer);

    let newcomer = Tile::new(allocator.allocate(), Id::from_name("muddy"), HexDirections::ALL);
    assert!(!layer.try_add(HexPos::ZERO, newcomer));
    assert!(!layer.try_add(HexPos::new(2, 0), stored));

    assert_eq!(snapshot(&layer), before);
}
