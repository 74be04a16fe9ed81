//! Dynamic body model: named, typed, weighted slots that hold layered
//! equipment handles.
//!
//! Different creatures are shaped in fundamentally different ways (a biped,
//! a quadruped, a floating eye), so a body is data, not layout: an ordered
//! collection of [`BodyPart`]s plus a size category. Parts reference equipped
//! items by handle and never own them; whoever destroys an item must first
//! make every body forget it (see [`equip::unequip`] and
//! [`crate::world::World::destroy_item`]).

pub mod catalog;
pub mod equip;
pub mod sample;

pub use catalog::PositionCatalog;

use crate::item::ItemId;

/// Default size category for a freshly built body.
pub const DEFAULT_BODY_SIZE: &str = "medium";

/// One slot on a body: a unique name, a descriptive position-type tag, a
/// sampling weight, and the items layered on it in equip order.
///
/// The type tag is plain metadata, not a foreign key into a
/// [`PositionCatalog`]; a part keeps its tag even if the catalog later drops
/// the name. Weight 0 means the part can never be hit and never sampled.
#[derive(Debug)]
pub struct BodyPart {
    pub(crate) name: String,
    pub(crate) position_type: String,
    pub(crate) weight: u32,
    pub(crate) equipment: Vec<ItemId>,
}

impl BodyPart {
    fn new(name: &str, position_type: &str, weight: u32) -> Self {
        Self {
            name: name.to_string(),
            position_type: position_type.to_string(),
            weight,
            equipment: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position_type(&self) -> &str {
        &self.position_type
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Items layered on this part, oldest first.
    pub fn equipment(&self) -> &[ItemId] {
        &self.equipment
    }

    pub fn is_free(&self) -> bool {
        self.equipment.is_empty()
    }
}

/// Ordered collection of body parts plus a size category.
#[derive(Debug)]
pub struct Body {
    parts: Vec<BodyPart>,
    size: String,
}

impl Body {
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            size: DEFAULT_BODY_SIZE.to_string(),
        }
    }

    /// Size category name, plain data like a part's type tag.
    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn set_size(&mut self, size: &str) {
        self.size = size.to_string();
    }

    /// Add a position, or retag an existing one: if `name` is already a part,
    /// its type and weight are updated in place and its equipment is kept.
    pub fn add_position(&mut self, name: &str, position_type: &str, weight: u32) {
        match self.part_index(name) {
            Some(index) => {
                let part = &mut self.parts[index];
                part.position_type = position_type.to_string();
                part.weight = weight;
            }
            None => self.parts.push(BodyPart::new(name, position_type, weight)),
        }
    }

    /// Remove a position. Returns false if no part has the name. Equipment on
    /// the part is forgotten, not destroyed; items live elsewhere.
    pub fn remove_position(&mut self, name: &str) -> bool {
        match self.part_index(name) {
            Some(index) => {
                self.parts.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn part_index(&self, name: &str) -> Option<usize> {
        self.parts
            .iter()
            .position(|part| part.name.eq_ignore_ascii_case(name))
    }

    pub fn part(&self, name: &str) -> Option<&BodyPart> {
        self.part_index(name).map(|index| &self.parts[index])
    }

    pub(crate) fn parts_mut(&mut self) -> &mut Vec<BodyPart> {
        &mut self.parts
    }

    /// The position-type tag of a named part.
    pub fn part_type(&self, name: &str) -> Option<&str> {
        self.part(name).map(BodyPart::position_type)
    }

    /// Parts in declaration order.
    pub fn parts(&self) -> impl Iterator<Item = &BodyPart> {
        self.parts.iter()
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name()).collect()
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    /// Items equipped on the named part, oldest layer first.
    pub fn equipment_at(&self, name: &str) -> Option<&[ItemId]> {
        self.part(name).map(BodyPart::equipment)
    }

    /// Names of every part holding `item`.
    pub fn where_equipped(&self, item: ItemId) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|part| part.equipment.contains(&item))
            .map(|part| part.name())
            .collect()
    }

    /// Every distinct equipped item, in part order then layer order.
    pub fn all_equipment(&self) -> Vec<ItemId> {
        let mut items = Vec::new();
        for part in &self.parts {
            for &item in &part.equipment {
                if !items.contains(&item) {
                    items.push(item);
                }
            }
        }
        items
    }

    /// Duplicate this body's layout. Equipment does not carry over: the copy
    /// starts bare, the same way a freshly spawned twin would.
    pub fn copy(&self) -> Body {
        Body {
            parts: self
                .parts
                .iter()
                .map(|part| BodyPart::new(&part.name, &part.position_type, part.weight))
                .collect(),
            size: self.size.clone(),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}
