//! The character owner object: PCs and NPCs.
//!
//! Core identity and posture live here; everything else a game wants to hang
//! off a character goes through its auxiliary data table, so independently
//! loaded modules never have to touch this layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aux::{AuxData, AuxRegistry, AuxTable};
use crate::body::Body;
use crate::errors::CoreError;
use crate::item::ItemId;
use crate::race::RaceRegistry;
use crate::storage::StorageSet;
use crate::types::OwnerKind;

pub const CHAR_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    NonBinary,
    Other,
    #[default]
    Neutral,
}

impl Sex {
    pub fn name(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::NonBinary => "non-binary",
            Sex::Other => "other",
            Sex::Neutral => "neutral",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            "non-binary" | "nonbinary" => Some(Sex::NonBinary),
            "other" => Some(Sex::Other),
            "neutral" => Some(Sex::Neutral),
            _ => None,
        }
    }
}

/// Character posture. Ordering follows the definitions: a sleeping character
/// is "lower" than a standing one, which movement and combat checks rely on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Unconscious,
    Sleeping,
    Sitting,
    #[default]
    Standing,
    Flying,
}

impl Position {
    pub fn name(self) -> &'static str {
        match self {
            Position::Unconscious => "unconscious",
            Position::Sleeping => "sleeping",
            Position::Sitting => "sitting",
            Position::Standing => "standing",
            Position::Flying => "flying",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "unconscious" => Some(Position::Unconscious),
            "sleeping" => Some(Position::Sleeping),
            "sitting" => Some(Position::Sitting),
            "standing" => Some(Position::Standing),
            "flying" => Some(Position::Flying),
            _ => None,
        }
    }
}

/// A player or non-player character.
#[derive(Debug)]
pub struct Character {
    id: Uuid,
    pub name: String,
    pub description: String,
    pub sex: Sex,
    pub position: Position,
    pub hidden: i32,
    pub weight: f64,
    race: String,
    birth: DateTime<Utc>,
    body: Body,
    aux: AuxTable,
    pub inventory: Vec<ItemId>,
}

impl Character {
    /// A fresh character of the default race, body stamped from the race
    /// template.
    pub fn new(races: &RaceRegistry) -> Self {
        let race = races.default_race().to_string();
        let body = races
            .create_body(&race)
            .unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            sex: Sex::default(),
            position: Position::default(),
            hidden: 0,
            weight: 0.0,
            race,
            birth: Utc::now(),
            body,
            aux: AuxTable::new(OwnerKind::Character),
            inventory: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn birth(&self) -> DateTime<Utc> {
        self.birth
    }

    pub fn race(&self) -> &str {
        &self.race
    }

    /// Change race without touching the body; call
    /// [`reset_body`](Self::reset_body) to restamp.
    pub fn set_race(&mut self, race: &str) {
        self.race = race.to_string();
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Replace the body wholesale. The caller unequips first; bodies never
    /// destroy items.
    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }

    /// Restamp the body from the race template. Unknown race falls back to
    /// an empty body rather than failing a load.
    pub fn reset_body(&mut self, races: &RaceRegistry) {
        self.body = races.create_body(&self.race).unwrap_or_default();
    }

    pub fn aux(&self) -> &AuxTable {
        &self.aux
    }

    pub fn aux_mut(&mut self) -> &mut AuxTable {
        &mut self.aux
    }

    /// Typed auxiliary access, constructing the default on first touch.
    pub fn get_aux<'a, T: AuxData>(
        &'a mut self,
        registry: &AuxRegistry,
        name: &str,
    ) -> Result<&'a mut T, CoreError> {
        self.aux.get_as::<T>(registry, name)
    }

    /// Copy everything but identity onto `to`: `to` keeps its own id and
    /// birth stamp, the way a cloned mob is still its own creature. The body
    /// layout is duplicated bare and auxiliary data is deep-copied.
    pub fn copy_to(&self, to: &mut Character) {
        to.name = self.name.clone();
        to.description = self.description.clone();
        to.sex = self.sex;
        to.position = self.position;
        to.hidden = self.hidden;
        to.weight = self.weight;
        to.race = self.race.clone();
        to.body = self.body.copy();
        to.aux.copy_from(&self.aux);
    }

    /// Duplicate this character under a fresh id.
    pub fn copy(&self, races: &RaceRegistry) -> Character {
        let mut twin = Character::new(races);
        self.copy_to(&mut twin);
        twin
    }

    /// Serialize for persistence. The body is not stored; it is rebuilt from
    /// the race template on load, and inventory re-attachment is the
    /// inventory layer's job.
    pub fn to_storage(&self) -> StorageSet {
        let mut set = StorageSet::new();
        set.store_string("id", &self.id.to_string());
        set.store_string("name", &self.name);
        set.store_string("desc", &self.description);
        set.store_string("sex", self.sex.name());
        set.store_string("position", self.position.name());
        set.store_int("hidden", self.hidden);
        set.store_double("weight", self.weight);
        set.store_string("race", &self.race);
        set.store_long("birth", self.birth.timestamp());
        set.store_set("auxiliary", self.aux.to_storage());
        set.store_int("schema_version", CHAR_SCHEMA_VERSION as i32);
        set
    }

    /// Rebuild a character from a persisted payload. Missing fields read as
    /// defaults; an unknown race falls back to the default race; auxiliary
    /// payloads load through the forgiving table rules.
    pub fn from_storage(
        set: &StorageSet,
        registry: &AuxRegistry,
        races: &RaceRegistry,
    ) -> Character {
        let mut ch = Character::new(races);
        if let Ok(id) = Uuid::parse_str(set.read_string("id")) {
            ch.id = id;
        }
        ch.name = set.read_string("name").to_string();
        ch.description = set.read_string("desc").to_string();
        ch.sex = Sex::parse(set.read_string("sex")).unwrap_or_default();
        ch.position = Position::parse(set.read_string("position")).unwrap_or_default();
        ch.hidden = set.read_int("hidden");
        ch.weight = set.read_double("weight");
        ch.race = set.read_string("race").to_string();
        if set.contains("birth") {
            if let Some(birth) = DateTime::from_timestamp(set.read_long("birth"), 0) {
                ch.birth = birth;
            }
        }
        ch.aux = AuxTable::from_storage(registry, OwnerKind::Character, set.read_set("auxiliary"));

        if !races.is_race(&ch.race) {
            ch.race = races.default_race().to_string();
        }
        ch.reset_body(races);
        ch
    }
}
