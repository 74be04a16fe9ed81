//! Sled-backed persistence glue.
//!
//! Owners are serialized to [`StorageSet`] payloads by their own code; this
//! store only encodes those payloads with bincode and files them under
//! prefixed keys. Schema versions ride inside the payload and are checked on
//! the way back out.

use std::path::{Path, PathBuf};

use sled::IVec;
use uuid::Uuid;

use crate::aux::AuxRegistry;
use crate::character::{Character, CHAR_SCHEMA_VERSION};
use crate::errors::CoreError;
use crate::item::{ItemId, ItemRecord, ITEM_SCHEMA_VERSION};
use crate::race::RaceRegistry;
use crate::storage::StorageSet;

const TREE_CHARACTERS: &str = "mudcore_characters";
const TREE_ITEMS: &str = "mudcore_items";

/// Helper builder so tests can easily create throwaway stores.
pub struct WorldStoreBuilder {
    path: PathBuf,
}

impl WorldStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(self) -> Result<WorldStore, CoreError> {
        WorldStore::open(self.path)
    }
}

/// Sled-backed store for character and item payloads.
pub struct WorldStore {
    _db: sled::Db,
    characters: sled::Tree,
    items: sled::Tree,
}

impl WorldStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let characters = db.open_tree(TREE_CHARACTERS)?;
        let items = db.open_tree(TREE_ITEMS)?;
        Ok(Self {
            _db: db,
            characters,
            items,
        })
    }

    fn character_key(id: Uuid) -> Vec<u8> {
        format!("characters:{id}").into_bytes()
    }

    fn item_key(id: ItemId) -> Vec<u8> {
        format!("items:{id}").into_bytes()
    }

    fn encode(set: &StorageSet) -> Result<Vec<u8>, CoreError> {
        Ok(bincode::serialize(set)?)
    }

    fn decode(bytes: IVec) -> Result<StorageSet, CoreError> {
        Ok(bincode::deserialize(&bytes)?)
    }

    /// Insert or update a character.
    pub fn put_character(&self, ch: &Character) -> Result<(), CoreError> {
        let set = ch.to_storage();
        let bytes = Self::encode(&set)?;
        self.characters.insert(Self::character_key(ch.id()), bytes)?;
        self.characters.flush()?;
        Ok(())
    }

    /// Fetch a character, rebuilding body and auxiliary data through the
    /// given registries.
    pub fn get_character(
        &self,
        id: Uuid,
        registry: &AuxRegistry,
        races: &RaceRegistry,
    ) -> Result<Character, CoreError> {
        let Some(bytes) = self.characters.get(Self::character_key(id))? else {
            return Err(CoreError::NotFound(format!("character: {id}")));
        };
        let set = Self::decode(bytes)?;
        let found = set.read_int("schema_version");
        if found != i32::from(CHAR_SCHEMA_VERSION) {
            return Err(CoreError::SchemaMismatch {
                entity: "character",
                expected: CHAR_SCHEMA_VERSION,
                found: found.clamp(0, i32::from(u8::MAX)) as u8,
            });
        }
        Ok(Character::from_storage(&set, registry, races))
    }

    /// Ids of every stored character.
    pub fn list_character_ids(&self) -> Result<Vec<Uuid>, CoreError> {
        let mut ids = Vec::new();
        for entry in self.characters.scan_prefix(b"characters:") {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(raw) = text.strip_prefix("characters:") {
                if let Ok(id) = Uuid::parse_str(raw) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }

    pub fn remove_character(&self, id: Uuid) -> Result<bool, CoreError> {
        let removed = self.characters.remove(Self::character_key(id))?.is_some();
        self.characters.flush()?;
        Ok(removed)
    }

    /// Insert or update an item definition.
    pub fn put_item(&self, item: &ItemRecord) -> Result<(), CoreError> {
        let bytes = Self::encode(&item.to_storage())?;
        self.items.insert(Self::item_key(item.id), bytes)?;
        self.items.flush()?;
        Ok(())
    }

    pub fn get_item(&self, id: ItemId) -> Result<ItemRecord, CoreError> {
        let Some(bytes) = self.items.get(Self::item_key(id))? else {
            return Err(CoreError::NotFound(format!("item: {id}")));
        };
        let set = Self::decode(bytes)?;
        let found = set.read_int("schema_version");
        if found != i32::from(ITEM_SCHEMA_VERSION) {
            return Err(CoreError::SchemaMismatch {
                entity: "item",
                expected: ITEM_SCHEMA_VERSION,
                found: found.clamp(0, i32::from(u8::MAX)) as u8,
            });
        }
        Ok(ItemRecord::from_storage(&set))
    }
}
