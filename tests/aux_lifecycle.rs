//! End-to-end auxiliary data lifecycle: register, attach, mutate, persist,
//! and reload through a real sled store.

mod common;

use common::{quest_registry, QuestLog};
use mudcore::character::Character;
use mudcore::race::RaceRegistry;
use mudcore::storage::StorageSet;
use mudcore::{CoreError, WorldStoreBuilder};
use tempfile::TempDir;

#[test]
fn quest_log_survives_serialize_deserialize() {
    let registry = quest_registry();
    let races = RaceRegistry::new();

    let mut ch = Character::new(&races);
    ch.name = "Brak".to_string();

    // fresh aux data starts as the registered default
    let log = ch
        .get_aux::<QuestLog>(&registry, "quest_log")
        .expect("default construct");
    assert!(log.entries.is_empty());
    log.entries.push("slay_dragon".to_string());

    // serialize, then rebuild a fresh character from the payload
    let payload = ch.to_storage();
    let mut reloaded = Character::from_storage(&payload, &registry, &races);
    let entries = &reloaded
        .get_aux::<QuestLog>(&registry, "quest_log")
        .expect("reloaded")
        .entries;
    assert_eq!(entries, &["slay_dragon"]);
}

#[test]
fn quest_log_survives_a_sled_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let registry = quest_registry();
    let races = RaceRegistry::new();
    let store = WorldStoreBuilder::new(dir.path()).open().expect("store");

    let mut ch = Character::new(&races);
    ch.name = "Zorak".to_string();
    ch.get_aux::<QuestLog>(&registry, "quest_log")
        .expect("aux")
        .entries
        .push("slay_dragon".to_string());
    let id = ch.id();
    store.put_character(&ch).expect("put");

    let mut fetched = store.get_character(id, &registry, &races).expect("get");
    let entries = &fetched
        .get_aux::<QuestLog>(&registry, "quest_log")
        .expect("aux")
        .entries;
    assert_eq!(entries, &["slay_dragon"]);
}

#[test]
fn late_registration_still_serves_existing_owners() {
    // an owner created before a module registers its auxiliary type still
    // gets a working default on first access afterwards
    let races = RaceRegistry::new();
    let mut ch = Character::new(&races);

    let registry = quest_registry();
    let log = ch
        .get_aux::<QuestLog>(&registry, "quest_log")
        .expect("lazy default");
    assert!(log.entries.is_empty());
}

#[test]
fn payload_from_a_newer_save_is_tolerated() {
    // surface the skip-warning when running with RUST_LOG=warn
    let _ = env_logger::builder().is_test(true).try_init();
    let registry = quest_registry();
    let races = RaceRegistry::new();

    let mut ch = Character::new(&races);
    ch.get_aux::<QuestLog>(&registry, "quest_log")
        .expect("aux")
        .entries
        .push("slay_dragon".to_string());
    let mut payload = ch.to_storage();

    // splice in a payload only some future module understands
    let mut aux_bundle = payload.read_set("auxiliary").clone();
    let mut future = StorageSet::new();
    future.store_string("mode", "hyper");
    aux_bundle.store_set("hologram_state", future);
    payload.store_set("auxiliary", aux_bundle);

    let mut reloaded = Character::from_storage(&payload, &registry, &races);
    assert!(!reloaded.aux().contains("hologram_state"));
    let entries = &reloaded
        .get_aux::<QuestLog>(&registry, "quest_log")
        .expect("known aux intact")
        .entries;
    assert_eq!(entries, &["slay_dragon"]);
}

#[test]
fn registration_conflicts_surface_as_errors() {
    let mut registry = quest_registry();
    let err = registry
        .register(
            "quest_log",
            mudcore::OwnerKind::Character,
            QuestLog::default,
            common::read_quest_log,
        )
        .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateRegistration(_)));
}
