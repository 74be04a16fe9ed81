//! End-to-end body and equipment scenarios across the public API.

use mudcore::body::{equip, sample, Body};
use mudcore::item::ItemRecord;
use mudcore::race::RaceRegistry;
use mudcore::{Character, CoreError, World};

fn scenario_body() -> Body {
    let mut body = Body::new();
    body.add_position("head", "head", 5);
    body.add_position("left_hand", "hand", 3);
    body.add_position("right_hand", "hand", 3);
    body
}

#[test]
fn sword_shield_dagger() {
    let mut world = World::new();
    let sword = world.add_item(ItemRecord::new("sword").with_type("weapon"));
    let shield = world.add_item(ItemRecord::new("shield").with_type("shield"));
    let dagger = world.add_item(ItemRecord::new("dagger").with_type("weapon"));

    let mut body = scenario_body();
    equip::equip_by_types(&mut body, sword, &["hand"]).expect("sword takes a hand");
    equip::equip_by_types(&mut body, shield, &["hand"]).expect("shield takes the other");

    let err = equip::equip_by_types(&mut body, dagger, &["hand"]).unwrap_err();
    assert!(matches!(err, CoreError::InsufficientFreeSlots { .. }));
    assert!(body.where_equipped(dagger).is_empty(), "dagger equipped nowhere");

    // the first two are untouched by the failure
    assert_eq!(body.where_equipped(sword).len(), 1);
    assert_eq!(body.where_equipped(shield).len(), 1);
}

#[test]
fn ratios_and_occupancy_after_unequip_all() {
    let mut body = scenario_body();
    let sword = ItemRecord::new("sword");
    let helm = ItemRecord::new("helm");
    equip::equip_by_types(&mut body, sword.id, &["hand"]).expect("sword");
    equip::equip_by_names(&mut body, helm.id, &["head"]).expect("helm");

    let mut removed = equip::unequip_all(&mut body);
    removed.sort_unstable();
    let mut expected = vec![sword.id, helm.id];
    expected.sort_unstable();
    assert_eq!(removed, expected);

    assert!(body.all_equipment().is_empty());
    assert!(body.parts().all(|part| part.is_free()));
    // ratios are about weights, not occupancy: still well-formed
    let total: f64 = body
        .part_names()
        .iter()
        .map(|name| sample::part_ratio(&body, Some(name)))
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn race_stamped_character_equips_through_the_world() {
    let races = RaceRegistry::new();
    let mut world = World::new();
    let sword = world.add_item(ItemRecord::new("iron sword").with_type("weapon"));

    let ch = Character::new(&races);
    let ch_id = world.add_character(ch);

    let ch = world.character_mut(ch_id).expect("character");
    equip::equip_by_types(ch.body_mut(), sword, &["right hand", "left hand"])
        .expect("human has both hands");
    assert_eq!(ch.body().where_equipped(sword).len(), 2);

    // destroying the item forgets it from the body
    world.destroy_item(sword);
    let ch = world.character(ch_id).expect("character");
    assert!(ch.body().where_equipped(sword).is_empty());
}

#[test]
fn layered_clothing_with_world_item_types() {
    let mut world = World::new();
    let shirt = world.add_item(ItemRecord::new("linen shirt").with_type("shirt"));
    let cloak = world.add_item(ItemRecord::new("wool cloak").with_type("cloak"));
    let second_shirt = world.add_item(ItemRecord::new("silk shirt").with_type("shirt"));

    let mut body = scenario_body();
    body.add_position("torso", "torso", 50);

    let is_type = |id, t: &str| world.item_is_type(id, t);
    equip::equip_by_names_ex(&mut body, shirt, &["torso"], Some("shirt"), false, is_type)
        .expect("shirt on bare torso");
    equip::equip_by_names_ex(&mut body, cloak, &["torso"], Some("cloak"), false, is_type)
        .expect("cloak layers");
    let err = equip::equip_by_names_ex(
        &mut body,
        second_shirt,
        &["torso"],
        Some("shirt"),
        false,
        is_type,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::TypeConflict { .. }));
    assert_eq!(body.equipment_at("torso").unwrap(), &[shirt, cloak]);
}
