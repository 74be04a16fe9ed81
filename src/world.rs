//! In-memory arena for live owners and item definitions.
//!
//! Bodies and inventories hold [`ItemId`] handles; the records behind them
//! live here. Destroying an item goes through [`World::destroy_item`], which
//! forgets the handle everywhere before dropping the record, so a stale
//! handle can never dangle.

use std::collections::HashMap;

use uuid::Uuid;

use crate::body::equip;
use crate::character::Character;
use crate::item::{ItemId, ItemRecord};

#[derive(Default)]
pub struct World {
    characters: HashMap<Uuid, Character>,
    items: HashMap<ItemId, ItemRecord>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_character(&mut self, ch: Character) -> Uuid {
        let id = ch.id();
        self.characters.insert(id, ch);
        id
    }

    pub fn character(&self, id: Uuid) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: Uuid) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Extract a character from the world. Equipped items stay equipped on
    /// the extracted body; the caller decides their fate.
    pub fn remove_character(&mut self, id: Uuid) -> Option<Character> {
        self.characters.remove(&id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn num_characters(&self) -> usize {
        self.characters.len()
    }

    pub fn add_item(&mut self, record: ItemRecord) -> ItemId {
        let id = record.id;
        self.items.insert(id, record);
        id
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemRecord> {
        self.items.get(&id)
    }

    /// Wear-type check usable as the conflict closure for
    /// [`equip::equip_by_names_ex`]. A handle with no record has no types.
    pub fn item_is_type(&self, id: ItemId, item_type: &str) -> bool {
        self.items
            .get(&id)
            .map(|record| record.is_type(item_type))
            .unwrap_or(false)
    }

    /// Destroy an item: forget its handle from every body and inventory,
    /// then drop the record. Returns false for an unknown handle.
    pub fn destroy_item(&mut self, id: ItemId) -> bool {
        if self.items.remove(&id).is_none() {
            return false;
        }
        for ch in self.characters.values_mut() {
            equip::unequip(ch.body_mut(), id);
            ch.inventory.retain(|&held| held != id);
        }
        true
    }
}
