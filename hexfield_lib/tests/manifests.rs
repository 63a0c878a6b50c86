use anyhow::Context;
use hexfield_lib::geometry::{HexDirection, HexDirections};
use hexfield_lib::manifest::{Id, Manifests, MovementCost, RawManifest, RawUnitManifest};

#[test]
fn bundled_manifests_cross_reference() -> anyhow::Result<()> {
    let manifests = Manifests::bundled()?;

    let cliff = manifests
        .terrain
        .get(Id::from_name("cliff"))
        .context("cliff should be defined")?;
    assert_eq!(cliff.connections, HexDirections::NONE);

    let ridge = manifests
        .terrain
        .get(Id::from_name("ridge"))
        .context("ridge should be defined")?;
    assert!(ridge.connections.contains(HexDirection::South));
    assert!(!ridge.connections.contains(HexDirection::North));

    let ant = manifests
        .units
        .get(Id::from_name("ant"))
        .context("ant should be defined")?;
    assert_eq!(
        ant.movement_costs.get(Id::from_name("cliff")),
        Some(MovementCost::Impassable)
    );

    let beetle = manifests
        .units
        .get(Id::from_name("beetle"))
        .context("beetle should be defined")?;
    assert_eq!(beetle.movement_costs.cost(Id::from_name("cliff")), f32::INFINITY);

    Ok(())
}

#[test]
fn unit_manifests_serialize() -> anyhow::Result<()> {
    let raw = RawUnitManifest::from_json(include_str!("../assets/manifests/units.manifest.json"))?;
    let json = serde_json::to_string(&raw)?;
    let reparsed = RawUnitManifest::from_json(&json)?;

    assert_eq!(reparsed, raw);
    assert_eq!(reparsed.process()?, raw.process()?);

    Ok(())
}
