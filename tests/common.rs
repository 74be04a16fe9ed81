//! Shared fixtures for integration tests: a quest-log auxiliary type and a
//! registry with it installed.

use mudcore::aux::{AuxData, AuxRegistry};
use mudcore::storage::StorageSet;
use mudcore::types::OwnerKind;

#[derive(Clone, Default, Debug, PartialEq)]
pub struct QuestLog {
    pub entries: Vec<String>,
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

pub fn read_quest_log(set: &StorageSet) -> Result<QuestLog, mudcore::CoreError> {
    Ok(QuestLog {
        entries: set.read_string_list("entries"),
    })
}

/// Registry with `quest_log` installed for characters.
pub fn quest_registry() -> AuxRegistry {
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
