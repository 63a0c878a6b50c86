//! Verifies that the manifests bundled with the library parse and cross-reference correctly.

use anyhow::Context;
use hexfield_lib::manifest::Manifests;

/// Loads every bundled manifest, reporting what was found.
pub(super) fn verify_manifests_load() -> anyhow::Result<()> {
    let manifests = Manifests::bundled().context("bundled manifests are invalid")?;

    println!("Terrain types:");
    for (id, data) in manifests.terrain.iter() {
        let name = manifests.terrain.name(id).unwrap_or("?");
        println!("    {name} - connections {:#08b}", data.connections.bits());
    }

    println!("Unit types:");
    for (id, data) in manifests.units.iter() {
        let name = manifests.units.name(id).unwrap_or("?");
        println!(
            "    {name} - {} terrain costs, water {}",
            data.movement_costs.len(),
            data.water_capacity
        );
    }

    println!("Building types:");
    for id in manifests.buildings.variants() {
        println!("    {}", manifests.buildings.name(id).unwrap_or("?"));
    }

    Ok(())
}
