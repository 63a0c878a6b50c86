use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hexfield_lib::entities::{IdentityAllocator, Tile};
use hexfield_lib::geometry::{hexagon, HexPos};
use hexfield_lib::layers::Layer;
use hexfield_lib::manifest::{Id, Manifests, MovementCosts, TerrainKind};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Setup function
fn random_terrain(manifests: &Manifests, map_radius: u32) -> Layer<Tile> {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut allocator = IdentityAllocator::new();
    let kinds: Vec<Id<TerrainKind>> = manifests.terrain.variants().collect();
    let mut terrain = Layer::new();

    for coord in hexagon(HexPos::ZERO, map_radius) {
        let kind = *kinds.choose(&mut rng).unwrap();
        let data = manifests.terrain.get(kind).unwrap();
        terrain.try_add(coord, Tile::from_data(allocator.allocate(), kind, data));
    }

    terrain
}

fn criterion_benchmark(c: &mut Criterion) {
    let manifests = Manifests::bundled().unwrap();
    let costs: &MovementCosts = &manifests.units.get(Id::from_name("ant")).unwrap().movement_costs;

    let mut group = c.benchmark_group("reachable");
    for budget in [2., 6., 20.] {
        let terrain = random_terrain(&manifests, 30);
        group.bench_with_input(BenchmarkId::from_parameter(budget), &budget, |b, &budget| {
            b.iter(|| hexfield_lib::reachability::reachable(HexPos::ZERO, &terrain, costs, budget))
        });
    }
    group.finish();

    c.bench_function("populate_terrain_radius_30", |b| {
        b.iter(|| random_terrain(&manifests, 30))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
