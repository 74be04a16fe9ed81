//! # Mudcore - Object-Model Core for MUD-Style Game Servers
//!
//! Mudcore is the object-model heart of a text game server: it lets
//! independently-loaded modules attach their own versioned data to long-lived
//! game objects (characters, rooms, items, accounts, zones) without touching
//! those objects' layout, and it models creature bodies as data-driven
//! collections of weighted equipment slots.
//!
//! ## Features
//!
//! - **Auxiliary Data**: Register a type once at startup; every matching
//!   owner object lazily constructs, deep-copies, persists, and destroys an
//!   instance in lockstep with its own lifecycle.
//! - **Dynamic Bodies**: Parts are named, typed, and weighted at runtime;
//!   a biped, a wyrm, and a floating eye are data, not code.
//! - **Atomic Equipping**: Multi-slot equip requests reserve before they
//!   commit; a failed request leaves the body untouched.
//! - **Hit-Location Sampling**: Weighted-random part selection and weight
//!   ratios for combat and targeting logic.
//! - **Forgiving Persistence**: Payloads from newer or older saves load with
//!   warnings instead of aborts; missing fields read as documented defaults.
//! - **Scripting Boundary**: An explicit host-call interface with tagged
//!   ownership, so an embedded script runtime never aliases engine memory.
//!
//! ## Quick Start
//!
//! ```rust
//! use mudcore::aux::{AuxData, AuxRegistry};
//! use mudcore::character::Character;
//! use mudcore::race::RaceRegistry;
//! use mudcore::storage::StorageSet;
//! use mudcore::types::OwnerKind;
//!
//! #[derive(Clone, Default)]
//! struct QuestLog { entries: Vec<String> }
//!
//! impl AuxData for QuestLog {
//!     fn copy(&self) -> Box<dyn AuxData> { Box::new(self.clone()) }
//!     fn copy_into(&self, dest: &mut dyn AuxData) {
//!         if let Some(dest) = dest.as_any_mut().downcast_mut::<QuestLog>() {
//!             *dest = self.clone();
//!         }
//!     }
//!     fn store(&self) -> StorageSet {
//!         let mut set = StorageSet::new();
//!         if !self.entries.is_empty() {
//!             set.store_string_list("entries", &self.entries);
//!         }
//!         set
//!     }
//!     fn as_any(&self) -> &dyn std::any::Any { self }
//!     fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
//! }
//!
//! fn main() -> Result<(), mudcore::errors::CoreError> {
//!     let mut registry = AuxRegistry::new();
//!     registry.register(
//!         "quest_log",
//!         OwnerKind::Character,
//!         QuestLog::default,
//!         |set: &StorageSet| Ok(QuestLog { entries: set.read_string_list("entries") }),
//!     )?;
//!
//!     let races = RaceRegistry::new();
//!     let mut ch = Character::new(&races);
//!     ch.get_aux::<QuestLog>(&registry, "quest_log")?
//!         .entries
//!         .push("slay_dragon".to_string());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`aux`] - Auxiliary data registry and per-owner tables
//! - [`body`] - Bodies, the position catalog, equip resolution, sampling
//! - [`race`] - Race catalog with template bodies and JSON seeds
//! - [`character`] / [`item`] / [`world`] - Owner records and the item arena
//! - [`script`] - Host-call boundary for an embedded scripting runtime
//! - [`storage`] - The abstract `StorageSet` unit and the sled store glue
//! - [`config`] - Operator TOML configuration
//!
//! ## Scheduling Model
//!
//! The core is single-threaded and cooperative: every operation is a plain
//! synchronous call that completes or fails before returning. Re-entry is
//! the supported hazard (a script callback may call back into the engine)
//! and every component here is safe for it; parallel mutation of the same
//! owner is not.

pub mod aux;
pub mod body;
pub mod character;
pub mod config;
pub mod errors;
pub mod item;
pub mod logutil;
pub mod race;
pub mod script;
pub mod storage;
pub mod types;
pub mod validation;
pub mod world;

pub use aux::{AuxData, AuxRegistry, AuxTable};
pub use body::equip::{
    equip_by_names, equip_by_names_ex, equip_by_types, unequip, unequip_all,
};
pub use body::sample::{part_ratio, random_part};
pub use body::{Body, BodyPart, PositionCatalog};
pub use character::{Character, Position, Sex};
pub use config::CoreConfig;
pub use errors::CoreError;
pub use item::{ItemId, ItemRecord};
pub use race::{human_body, load_races_from_json, RaceRegistry, RaceSeed};
pub use script::{Ownership, ScriptHost, ScriptObject, ScriptTarget, WorldHost};
pub use storage::store::{WorldStore, WorldStoreBuilder};
pub use storage::{StorageSet, StorageValue};
pub use types::{OwnerKind, OwnerKinds};
pub use world::World;
