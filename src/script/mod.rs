//! Scripting boundary.
//!
//! The embedded scripting runtime is an external collaborator: it never
//! aliases engine structures, it reaches them through the [`ScriptHost`]
//! host-call interface. Values cross the boundary as [`StorageValue`]
//! snapshots; auxiliary state in particular is serialized out and
//! deserialized back in, so a script can hold its copy as long as it likes
//! without pinning engine memory. A [`ScriptObject`] carries an explicit
//! ownership tag; engine-owned objects are handed to scripts as `Borrowed`
//! and are only valid for the current call.
//!
//! Every host call is synchronous and safe to re-enter: a script invoked
//! mid-operation may call back into the host before returning.

use rand::thread_rng;
use uuid::Uuid;

use crate::aux::AuxRegistry;
use crate::body::{equip, sample};
use crate::errors::CoreError;
use crate::item::ItemId;
use crate::storage::{StorageSet, StorageValue};
use crate::world::World;

/// Which engine object a script reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptTarget {
    Character(Uuid),
    Item(ItemId),
}

/// Who is responsible for the referenced object's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Engine-owned; valid only for the duration of the current call/tick.
    Borrowed,
    /// Script-owned; the engine holds no reference.
    Owned,
}

/// An object reference as seen from the scripting runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptObject {
    pub target: ScriptTarget,
    pub ownership: Ownership,
}

impl ScriptObject {
    pub fn borrowed(target: ScriptTarget) -> Self {
        Self {
            target,
            ownership: Ownership::Borrowed,
        }
    }

    pub fn owned(target: ScriptTarget) -> Self {
        Self {
            target,
            ownership: Ownership::Owned,
        }
    }

    pub fn is_borrowed(&self) -> bool {
        self.ownership == Ownership::Borrowed
    }
}

/// The host-call interface the scripting runtime is compiled against.
pub trait ScriptHost {
    /// Read an attribute. Auxiliary state reads as `aux.<name>` and returns
    /// a serialized snapshot.
    fn get_attr(&mut self, obj: &ScriptObject, attr: &str) -> Result<StorageValue, CoreError>;

    /// Write an attribute. Writing `aux.<name>` replaces the instance from
    /// the given payload through the registry's deserialize operation.
    fn set_attr(
        &mut self,
        obj: &ScriptObject,
        attr: &str,
        value: StorageValue,
    ) -> Result<(), CoreError>;

    /// Call a named operation with a bag of arguments.
    fn invoke(
        &mut self,
        obj: &ScriptObject,
        op: &str,
        args: &StorageSet,
    ) -> Result<StorageValue, CoreError>;
}

/// [`ScriptHost`] over a [`World`]. Holds the world and registry only for
/// the duration of a dispatch, which is what keeps re-entry sound: each
/// nested call borrows afresh.
pub struct WorldHost<'a> {
    pub world: &'a mut World,
    pub registry: &'a AuxRegistry,
}

impl<'a> WorldHost<'a> {
    pub fn new(world: &'a mut World, registry: &'a AuxRegistry) -> Self {
        Self { world, registry }
    }

    fn character_id(obj: &ScriptObject) -> Result<Uuid, CoreError> {
        match obj.target {
            ScriptTarget::Character(id) => Ok(id),
            ScriptTarget::Item(_) => Err(CoreError::NotFound("character target".to_string())),
        }
    }

    fn item_arg(args: &StorageSet) -> Result<ItemId, CoreError> {
        ItemId::parse(args.read_string("item"))
            .ok_or_else(|| CoreError::MalformedPersistedData("item argument".to_string()))
    }

    fn names_arg(args: &StorageSet, key: &str) -> Vec<String> {
        args.read_string_list(key)
    }
}

impl ScriptHost for WorldHost<'_> {
    fn get_attr(&mut self, obj: &ScriptObject, attr: &str) -> Result<StorageValue, CoreError> {
        match obj.target {
            ScriptTarget::Character(id) => {
                if let Some(aux_name) = attr.strip_prefix("aux.") {
                    // snapshot semantics: serialize the live instance out
                    let ch = self
                        .world
                        .character_mut(id)
                        .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                    let data = ch.aux_mut().get(self.registry, aux_name)?;
                    return Ok(StorageValue::Set(data.store()));
                }
                let ch = self
                    .world
                    .character(id)
                    .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                match attr {
                    "name" => Ok(StorageValue::String(ch.name.clone())),
                    "desc" => Ok(StorageValue::String(ch.description.clone())),
                    "race" => Ok(StorageValue::String(ch.race().to_string())),
                    "sex" => Ok(StorageValue::String(ch.sex.name().to_string())),
                    "position" => Ok(StorageValue::String(ch.position.name().to_string())),
                    "weight" => Ok(StorageValue::Double(ch.weight)),
                    "hidden" => Ok(StorageValue::Int(ch.hidden)),
                    "bodysize" => Ok(StorageValue::String(ch.body().size().to_string())),
                    _ => Err(CoreError::NotFound(format!("attribute: {attr}"))),
                }
            }
            ScriptTarget::Item(id) => {
                let item = self
                    .world
                    .item(id)
                    .ok_or_else(|| CoreError::NotFound(format!("item: {id}")))?;
                match attr {
                    "name" => Ok(StorageValue::String(item.name.clone())),
                    "weight" => Ok(StorageValue::Int(item.weight as i32)),
                    "item_types" => Ok(StorageValue::List(
                        item.item_types
                            .iter()
                            .map(|t| StorageValue::String(t.clone()))
                            .collect(),
                    )),
                    _ => Err(CoreError::NotFound(format!("attribute: {attr}"))),
                }
            }
        }
    }

    fn set_attr(
        &mut self,
        obj: &ScriptObject,
        attr: &str,
        value: StorageValue,
    ) -> Result<(), CoreError> {
        let id = Self::character_id(obj)?;
        let ch = self
            .world
            .character_mut(id)
            .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
        if let Some(aux_name) = attr.strip_prefix("aux.") {
            let StorageValue::Set(payload) = value else {
                return Err(CoreError::MalformedPersistedData(format!(
                    "aux payload for {aux_name}"
                )));
            };
            // replace through the registry's deserialize operation; the
            // forgiving table rules apply (unknown name warns, bad payload
            // falls back to defaults)
            let mut bundle = StorageSet::new();
            bundle.store_set(aux_name, payload);
            ch.aux_mut().deserialize_all(self.registry, &bundle);
            return Ok(());
        }
        match (attr, value) {
            ("name", StorageValue::String(v)) => ch.name = v,
            ("desc", StorageValue::String(v)) => ch.description = v,
            ("race", StorageValue::String(v)) => ch.set_race(&v),
            ("sex", StorageValue::String(v)) => {
                ch.sex = crate::character::Sex::parse(&v)
                    .ok_or_else(|| CoreError::MalformedPersistedData(format!("sex: {v}")))?;
            }
            ("position", StorageValue::String(v)) => {
                ch.position = crate::character::Position::parse(&v)
                    .ok_or_else(|| CoreError::MalformedPersistedData(format!("position: {v}")))?;
            }
            ("weight", StorageValue::Double(v)) => ch.weight = v,
            ("hidden", StorageValue::Int(v)) => ch.hidden = v,
            (attr, _) => return Err(CoreError::NotFound(format!("attribute: {attr}"))),
        }
        Ok(())
    }

    fn invoke(
        &mut self,
        obj: &ScriptObject,
        op: &str,
        args: &StorageSet,
    ) -> Result<StorageValue, CoreError> {
        let id = Self::character_id(obj)?;
        match op {
            "equip_types" => {
                let item = Self::item_arg(args)?;
                let types = Self::names_arg(args, "types");
                let refs: Vec<&str> = types.iter().map(String::as_str).collect();
                let ch = self
                    .world
                    .character_mut(id)
                    .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                equip::equip_by_types(ch.body_mut(), item, &refs)?;
                Ok(StorageValue::Bool(true))
            }
            "equip_names" => {
                let item = Self::item_arg(args)?;
                let names = Self::names_arg(args, "names");
                let refs: Vec<&str> = names.iter().map(String::as_str).collect();
                let ch = self
                    .world
                    .character_mut(id)
                    .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                equip::equip_by_names(ch.body_mut(), item, &refs)?;
                Ok(StorageValue::Bool(true))
            }
            "unequip" => {
                let item = Self::item_arg(args)?;
                let ch = self
                    .world
                    .character_mut(id)
                    .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                Ok(StorageValue::Bool(equip::unequip(ch.body_mut(), item)))
            }
            "unequip_all" => {
                let ch = self
                    .world
                    .character_mut(id)
                    .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                let removed = equip::unequip_all(ch.body_mut());
                Ok(StorageValue::List(
                    removed
                        .into_iter()
                        .map(|item| StorageValue::String(item.to_string()))
                        .collect(),
                ))
            }
            "where_equipped" => {
                let item = Self::item_arg(args)?;
                let ch = self
                    .world
                    .character(id)
                    .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                Ok(StorageValue::List(
                    ch.body()
                        .where_equipped(item)
                        .into_iter()
                        .map(|name| StorageValue::String(name.to_string()))
                        .collect(),
                ))
            }
            "part_ratio" => {
                let ch = self
                    .world
                    .character(id)
                    .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                let filter = args.read_string("filter");
                let filter = if filter.is_empty() { None } else { Some(filter) };
                Ok(StorageValue::Double(sample::part_ratio(ch.body(), filter)))
            }
            "random_part" => {
                let ch = self
                    .world
                    .character(id)
                    .ok_or_else(|| CoreError::NotFound(format!("character: {id}")))?;
                let filter = args.read_string("filter");
                let filter = if filter.is_empty() { None } else { Some(filter) };
                let part = sample::random_part(ch.body(), filter, &mut thread_rng());
                Ok(StorageValue::String(part.unwrap_or("").to_string()))
            }
            _ => Err(CoreError::NotFound(format!("operation: {op}"))),
        }
    }
}
