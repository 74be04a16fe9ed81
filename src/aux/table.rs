//! Per-owner auxiliary data container.
//!
//! Every owner object carries one [`AuxTable`]; the table exclusively owns its
//! instances and no instance outlives it. Instances are constructed lazily on
//! first access, which keeps the table tolerant of auxiliary types registered
//! after some owners were already created or persisted.

use std::collections::BTreeMap;

use log::warn;

use crate::aux::registry::{AuxData, AuxRegistry};
use crate::errors::CoreError;
use crate::logutil::clean_label;
use crate::storage::{StorageSet, StorageValue};
use crate::types::OwnerKind;

/// Mapping from auxiliary name to live instance for a single owner object.
pub struct AuxTable {
    owner_kind: OwnerKind,
    entries: BTreeMap<String, Box<dyn AuxData>>,
}

impl AuxTable {
    pub fn new(owner_kind: OwnerKind) -> Self {
        Self {
            owner_kind,
            entries: BTreeMap::new(),
        }
    }

    pub fn owner_kind(&self) -> OwnerKind {
        self.owner_kind
    }

    /// Names of currently instantiated auxiliaries, in name order.
    pub fn instantiated(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Fetch the instance for `name`, constructing the default on first
    /// access. Repeated calls return the same instance until the owner is
    /// destroyed or the slot is cleared. Fails with `UnknownExtension` for an
    /// unregistered name and `InvalidOwnerType` when the auxiliary does not
    /// apply to this table's owner kind.
    pub fn get<'a>(
        &'a mut self,
        registry: &AuxRegistry,
        name: &str,
    ) -> Result<&'a mut dyn AuxData, CoreError> {
        if !self.entries.contains_key(name) {
            let descriptor = registry.lookup(name)?;
            if !descriptor.applies_to(self.owner_kind) {
                return Err(CoreError::InvalidOwnerType {
                    extension: name.to_string(),
                    kind: self.owner_kind,
                });
            }
            self.entries.insert(name.to_string(), descriptor.construct());
        }
        Ok(self
            .entries
            .get_mut(name)
            .expect("entry just ensured")
            .as_mut())
    }

    /// Typed convenience over [`get`](Self::get).
    pub fn get_as<'a, T: AuxData>(
        &'a mut self,
        registry: &AuxRegistry,
        name: &str,
    ) -> Result<&'a mut T, CoreError> {
        let data = self.get(registry, name)?;
        data.as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| CoreError::AuxTypeMismatch(name.to_string()))
    }

    /// Look at an instance without constructing one.
    pub fn peek(&self, name: &str) -> Option<&dyn AuxData> {
        self.entries.get(name).map(|data| data.as_ref())
    }

    /// Drop the instance for `name`, if any. The next `get` constructs a
    /// fresh default.
    pub fn clear(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Deep-copy every instance present in `source` into this table,
    /// replacing same-named instances. Copies never alias mutable
    /// substructure owned by the source.
    pub fn copy_from(&mut self, source: &AuxTable) {
        debug_assert_eq!(self.owner_kind, source.owner_kind);
        for (name, data) in &source.entries {
            match self.entries.get_mut(name) {
                Some(existing) => data.copy_into(existing.as_mut()),
                None => {
                    self.entries.insert(name.clone(), data.copy());
                }
            }
        }
    }

    /// Serialize every currently instantiated auxiliary whose store operation
    /// returns a non-empty payload. Enumeration is in name order, so repeated
    /// saves of an unchanged owner produce identical output.
    pub fn serialize_all(&self) -> Vec<(String, StorageSet)> {
        self.entries
            .iter()
            .filter_map(|(name, data)| {
                let payload = data.store();
                if payload.is_empty() {
                    None
                } else {
                    Some((name.clone(), payload))
                }
            })
            .collect()
    }

    /// Bundle [`serialize_all`](Self::serialize_all) into one nested set,
    /// ready to store under an owner's "auxiliary" field.
    pub fn to_storage(&self) -> StorageSet {
        let mut set = StorageSet::new();
        for (name, payload) in self.serialize_all() {
            set.store_set(&name, payload);
        }
        set
    }

    /// Materialize instances from persisted payloads. Unknown names are
    /// skipped with a warning so newer saves load on older code; a payload
    /// that fails to decode falls back to that auxiliary's default instance
    /// and never aborts the owner's load. Auxiliaries with no payload stay
    /// unconstructed until first access.
    pub fn deserialize_all(&mut self, registry: &AuxRegistry, payloads: &StorageSet) {
        for (name, value) in payloads.iter() {
            let StorageValue::Set(payload) = value else {
                warn!(
                    "auxiliary payload {} is not a set, skipping",
                    clean_label(name)
                );
                continue;
            };
            let descriptor = match registry.lookup(name) {
                Ok(descriptor) => descriptor,
                Err(_) => {
                    warn!(
                        "skipping unknown auxiliary data {} in persisted payload",
                        clean_label(name)
                    );
                    continue;
                }
            };
            if !descriptor.applies_to(self.owner_kind) {
                warn!(
                    "auxiliary data {} does not apply to {} owners, skipping",
                    clean_label(name),
                    self.owner_kind
                );
                continue;
            }
            let instance = match descriptor.read(payload) {
                Ok(instance) => instance,
                Err(err) => {
                    warn!(
                        "malformed payload for auxiliary data {}: {}; using defaults",
                        clean_label(name),
                        err
                    );
                    descriptor.construct()
                }
            };
            self.entries.insert(name.to_string(), instance);
        }
    }

    /// Build a table of `owner_kind` straight from a persisted bundle.
    pub fn from_storage(
        registry: &AuxRegistry,
        owner_kind: OwnerKind,
        payloads: &StorageSet,
    ) -> Self {
        let mut table = Self::new(owner_kind);
        table.deserialize_all(registry, payloads);
        table
    }
}

impl std::fmt::Debug for AuxTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuxTable")
            .field("owner_kind", &self.owner_kind)
            .field("instantiated", &self.instantiated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OwnerKinds;

    #[derive(Clone, Default, Debug, PartialEq)]
    struct QuestLog {
        entries: Vec<String>,
    }

    impl AuxData for QuestLog {
        fn copy(&self) -> Box<dyn AuxData> {
            Box::new(self.clone())
        }

        fn copy_into(&self, dest: &mut dyn AuxData) {
            if let Some(dest) = dest.as_any_mut().downcast_mut::<QuestLog>() {
                *dest = self.clone();
            }
        }

        fn store(&self) -> StorageSet {
            let mut set = StorageSet::new();
            if !self.entries.is_empty() {
                set.store_string_list("entries", &self.entries);
            }
            set
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    fn read_quest_log(set: &StorageSet) -> Result<QuestLog, CoreError> {
        Ok(QuestLog {
            entries: set.read_string_list("entries"),
        })
    }

    /// Serializes to a payload that read_quest_log chokes on via the registry
    /// read fn below.
    fn read_always_malformed(_set: &StorageSet) -> Result<QuestLog, CoreError> {
        Err(CoreError::MalformedPersistedData("bad quest log".into()))
    }

    fn quest_registry() -> AuxRegistry {
        let mut registry = AuxRegistry::new();
        registry
            .register(
                "quest_log",
                OwnerKind::Character,
                QuestLog::default,
                read_quest_log,
            )
            .expect("register quest_log");
        registry
    }

    #[test]
    fn get_is_lazy_and_identity_stable() {
        let registry = quest_registry();
        let mut table = AuxTable::new(OwnerKind::Character);
        assert!(!table.contains("quest_log"));

        let log = table
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("construct");
        assert!(log.entries.is_empty());
        log.entries.push("slay_dragon".to_string());

        // same instance on repeat access
        let log = table
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("re-access");
        assert_eq!(log.entries, vec!["slay_dragon".to_string()]);
    }

    #[test]
    fn wrong_owner_kind_is_rejected() {
        let registry = quest_registry();
        let mut table = AuxTable::new(OwnerKind::Room);
        let Err(err) = table.get(&registry, "quest_log") else {
            panic!("expected error");
        };
        assert!(matches!(
            err,
            CoreError::InvalidOwnerType { kind: OwnerKind::Room, .. }
        ));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let registry = quest_registry();
        let mut table = AuxTable::new(OwnerKind::Character);
        let Err(err) = table.get(&registry, "combat_stats") else {
            panic!("expected error");
        };
        assert!(matches!(err, CoreError::UnknownExtension(_)));
    }

    #[test]
    fn copy_from_is_a_deep_copy() {
        let registry = quest_registry();
        let mut source = AuxTable::new(OwnerKind::Character);
        source
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("construct")
            .entries
            .push("slay_dragon".to_string());

        let mut dest = AuxTable::new(OwnerKind::Character);
        dest.copy_from(&source);

        // mutate the copy; the source must not change, and vice versa
        dest.get_as::<QuestLog>(&registry, "quest_log")
            .expect("copied")
            .entries
            .push("find_amulet".to_string());
        source
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("source")
            .entries
            .push("rescue_cat".to_string());

        let dest_entries = &dest
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("copied")
            .entries;
        assert_eq!(dest_entries, &["slay_dragon", "find_amulet"]);
        let source_entries = &source
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("source")
            .entries;
        assert_eq!(source_entries, &["slay_dragon", "rescue_cat"]);
    }

    #[test]
    fn copy_from_replaces_existing_instance() {
        let registry = quest_registry();
        let mut source = AuxTable::new(OwnerKind::Character);
        source
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("construct")
            .entries
            .push("slay_dragon".to_string());

        let mut dest = AuxTable::new(OwnerKind::Character);
        dest.get_as::<QuestLog>(&registry, "quest_log")
            .expect("construct")
            .entries
            .push("stale_entry".to_string());

        dest.copy_from(&source);
        let entries = &dest
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("copied")
            .entries;
        assert_eq!(entries, &["slay_dragon"]);
    }

    #[test]
    fn serialize_skips_empty_payloads_and_orders_by_name() {
        let mut registry = quest_registry();
        registry
            .register(
                "battle_log",
                OwnerKind::Character,
                QuestLog::default,
                read_quest_log,
            )
            .expect("register battle_log");

        let mut table = AuxTable::new(OwnerKind::Character);
        // battle_log instantiated but left empty => ephemeral, not persisted
        table.get(&registry, "battle_log").expect("construct");
        table
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("construct")
            .entries
            .push("slay_dragon".to_string());

        let payloads = table.serialize_all();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].0, "quest_log");

        // with both non-empty, enumeration is name-ordered and stable
        table
            .get_as::<QuestLog>(&registry, "battle_log")
            .expect("battle_log")
            .entries
            .push("goblin".to_string());
        let names: Vec<String> = table.serialize_all().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["battle_log", "quest_log"]);
        let again: Vec<String> = table.serialize_all().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, again);
    }

    #[test]
    fn deserialize_ignores_unknown_names() {
        let registry = quest_registry();
        let mut payloads = StorageSet::new();
        let mut quest = StorageSet::new();
        quest.store_string_list("entries", &["slay_dragon"]);
        payloads.store_set("quest_log", quest);
        payloads.store_set("from_the_future", StorageSet::new());

        let mut table = AuxTable::from_storage(&registry, OwnerKind::Character, &payloads);
        assert!(!table.contains("from_the_future"));
        let entries = &table
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("loaded")
            .entries;
        assert_eq!(entries, &["slay_dragon"]);
    }

    #[test]
    fn malformed_payload_falls_back_to_default() {
        let mut registry = quest_registry();
        registry
            .register(
                "fragile",
                OwnerKind::Character,
                QuestLog::default,
                read_always_malformed,
            )
            .expect("register fragile");

        let mut payloads = StorageSet::new();
        payloads.store_set("fragile", StorageSet::new());
        let mut quest = StorageSet::new();
        quest.store_string_list("entries", &["slay_dragon"]);
        payloads.store_set("quest_log", quest);

        let mut table = AuxTable::from_storage(&registry, OwnerKind::Character, &payloads);

        // the sibling loaded intact
        let entries = &table
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("sibling")
            .entries;
        assert_eq!(entries, &["slay_dragon"]);
        // the fragile one exists with defaults
        let fragile = table
            .get_as::<QuestLog>(&registry, "fragile")
            .expect("default");
        assert!(fragile.entries.is_empty());
    }

    #[test]
    fn clear_drops_instance_once() {
        let registry = quest_registry();
        let mut table = AuxTable::new(OwnerKind::Character);
        table
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("construct")
            .entries
            .push("slay_dragon".to_string());
        assert!(table.clear("quest_log"));
        assert!(!table.clear("quest_log"));
        // next access constructs a fresh default
        let log = table
            .get_as::<QuestLog>(&registry, "quest_log")
            .expect("fresh");
        assert!(log.entries.is_empty());
    }
}
