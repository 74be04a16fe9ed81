use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::StorageSet;

pub const ITEM_SCHEMA_VERSION: u8 = 1;

/// Handle to an item. Bodies and inventories hold these instead of owning
/// item data, so a stale handle is inert rather than dangling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn generate() -> Self {
        ItemId(Uuid::new_v4())
    }

    pub fn parse(text: &str) -> Option<Self> {
        Uuid::parse_str(text).ok().map(ItemId)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The item definition the equip layer cares about: a name, a weight, and the
/// wear-type tags that drive layering conflicts ("worn about body" vs a second
/// shirt on the same torso slot).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub weight: u32,
    pub item_types: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl ItemRecord {
    pub fn new(name: &str) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.to_string(),
            weight: 0,
            item_types: Vec::new(),
            created_at: Utc::now(),
            schema_version: ITEM_SCHEMA_VERSION,
        }
    }

    pub fn with_type(mut self, item_type: &str) -> Self {
        if !self.is_type(item_type) {
            self.item_types.push(item_type.to_string());
        }
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Case-insensitive wear-type check, the conflict test used when layering
    /// equipment.
    pub fn is_type(&self, item_type: &str) -> bool {
        self.item_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(item_type))
    }

    pub fn to_storage(&self) -> StorageSet {
        let mut set = StorageSet::new();
        set.store_string("id", &self.id.to_string());
        set.store_string("name", &self.name);
        set.store_int("weight", self.weight as i32);
        set.store_string_list("item_types", &self.item_types);
        set.store_long("created_at", self.created_at.timestamp());
        set.store_int("schema_version", self.schema_version as i32);
        set
    }

    pub fn from_storage(set: &StorageSet) -> Self {
        let id = ItemId::parse(set.read_string("id")).unwrap_or_else(ItemId::generate);
        let created_at = DateTime::from_timestamp(set.read_long("created_at"), 0)
            .unwrap_or_else(Utc::now);
        Self {
            id,
            name: set.read_string("name").to_string(),
            weight: set.read_int("weight").max(0) as u32,
            item_types: set.read_string_list("item_types"),
            created_at,
            schema_version: set.read_int("schema_version").clamp(0, u8::MAX as i32) as u8,
        }
    }
}
