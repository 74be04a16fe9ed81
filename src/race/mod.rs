//! Race catalog: each race carries a template body that new characters are
//! stamped from.
//!
//! Stock content ships a single human template; games add their own races at
//! startup, either in code or from a JSON seed file so operators can add
//! content without recompiling.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::body::{Body, DEFAULT_BODY_SIZE};
use crate::errors::CoreError;
use crate::validation::valid_registry_name;

/// One registered race.
#[derive(Debug)]
pub struct Race {
    name: String,
    abbrev: String,
    body: Body,
    pc_ok: bool,
}

impl Race {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    /// The template body. Use [`RaceRegistry::create_body`] for a copy.
    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn pc_ok(&self) -> bool {
        self.pc_ok
    }
}

/// The stock human body template: 26 parts whose weights sum to 100, so a
/// part's weight reads directly as a hit percentage.
pub fn human_body() -> Body {
    let mut body = Body::new();
    body.set_size("medium");
    body.add_position("right grip", "held", 0);
    body.add_position("left grip", "held", 0);
    body.add_position("right foot", "right foot", 2);
    body.add_position("left foot", "left foot", 2);
    body.add_position("right leg", "leg", 9);
    body.add_position("left leg", "leg", 9);
    body.add_position("waist", "waist", 1);
    body.add_position("right ring finger", "finger", 1);
    body.add_position("left ring finger", "finger", 1);
    body.add_position("left middle finger", "finger", 0);
    body.add_position("right middle finger", "finger", 0);
    body.add_position("right hand", "right hand", 2);
    body.add_position("left hand", "left hand", 2);
    body.add_position("right wrist", "wrist", 1);
    body.add_position("left wrist", "wrist", 1);
    body.add_position("right arm", "arm", 7);
    body.add_position("left arm", "arm", 7);
    body.add_position("about body", "about body", 0);
    body.add_position("torso", "torso", 50);
    body.add_position("neck", "neck", 1);
    body.add_position("right ear", "ear", 0);
    body.add_position("left ear", "ear", 0);
    body.add_position("eyes", "eyes", 0);
    body.add_position("face", "face", 2);
    body.add_position("head", "head", 2);
    body.add_position("floating about head", "floating about head", 0);
    body
}

/// Explicitly constructed race catalog, seeded with the stock human.
#[derive(Debug)]
pub struct RaceRegistry {
    races: HashMap<String, Race>,
}

impl RaceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            races: HashMap::new(),
        };
        registry
            .add_race("human", "hum", human_body(), true)
            .expect("stock human race");
        registry
    }

    /// Install or replace a race. Races are content, so re-registering a name
    /// replaces the old template rather than failing.
    pub fn add_race(
        &mut self,
        name: &str,
        abbrev: &str,
        body: Body,
        pc_ok: bool,
    ) -> Result<(), CoreError> {
        if !valid_registry_name(name) {
            return Err(CoreError::InvalidName(name.to_string()));
        }
        self.races.insert(
            name.to_string(),
            Race {
                name: name.to_string(),
                abbrev: abbrev.to_string(),
                body,
                pc_ok,
            },
        );
        Ok(())
    }

    pub fn remove_race(&mut self, name: &str) -> bool {
        self.races.remove(name).is_some()
    }

    pub fn is_race(&self, name: &str) -> bool {
        self.races.contains_key(name)
    }

    pub fn race(&self, name: &str) -> Option<&Race> {
        self.races.get(name)
    }

    /// Every race always present at startup.
    pub fn default_race(&self) -> &'static str {
        "human"
    }

    /// Stamp a fresh body from the race's template. The copy is independent:
    /// mutating it never touches the template or sibling bodies.
    pub fn create_body(&self, name: &str) -> Option<Body> {
        self.races.get(name).map(|race| race.body.copy())
    }

    pub fn abbrev(&self, name: &str) -> Option<&str> {
        self.races.get(name).map(Race::abbrev)
    }

    /// Race names, sorted; `pc_only` restricts to player-selectable races.
    pub fn names(&self, pc_only: bool) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .races
            .values()
            .filter(|race| !pc_only || race.pc_ok)
            .map(Race::name)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn count(&self) -> usize {
        self.races.len()
    }

    /// Install every race from a seed list.
    pub fn install_seeds(&mut self, seeds: &[RaceSeed]) -> Result<usize, CoreError> {
        for seed in seeds {
            self.add_race(&seed.name, &seed.abbrev, seed.build_body(), seed.pc_ok)?;
        }
        Ok(seeds.len())
    }
}

impl Default for RaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One body part in a race seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartSeed {
    pub name: String,
    #[serde(rename = "type")]
    pub position_type: String,
    #[serde(default)]
    pub weight: u32,
}

fn default_seed_size() -> String {
    DEFAULT_BODY_SIZE.to_string()
}

/// Data-driven race definition, loadable from JSON seed files or inline TOML
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceSeed {
    pub name: String,
    #[serde(default)]
    pub abbrev: String,
    #[serde(default = "default_seed_size")]
    pub size: String,
    #[serde(default)]
    pub pc_ok: bool,
    pub parts: Vec<PartSeed>,
}

impl RaceSeed {
    pub fn build_body(&self) -> Body {
        let mut body = Body::new();
        body.set_size(&self.size);
        for part in &self.parts {
            body.add_position(&part.name, &part.position_type, part.weight);
        }
        body
    }
}

/// Load race seeds from a JSON file.
pub fn load_races_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<RaceSeed>, CoreError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CoreError::MalformedPersistedData(format!("race seeds {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_human_is_registered() {
        let registry = RaceRegistry::new();
        assert!(registry.is_race("human"));
        assert_eq!(registry.abbrev("human"), Some("hum"));
        assert_eq!(registry.names(true), vec!["human"]);
    }

    #[test]
    fn human_template_weights_sum_to_100() {
        let body = human_body();
        let total: u32 = body.parts().map(|part| part.weight()).sum();
        assert_eq!(total, 100);
        assert_eq!(body.num_parts(), 26);
    }

    #[test]
    fn create_body_hands_out_independent_copies() {
        let registry = RaceRegistry::new();
        let mut first = registry.create_body("human").expect("human body");
        let second = registry.create_body("human").expect("human body");

        first.remove_position("torso");
        assert!(second.part("torso").is_some());
        assert!(registry.race("human").unwrap().body().part("torso").is_some());
    }

    #[test]
    fn unknown_race_has_no_body() {
        let registry = RaceRegistry::new();
        assert!(registry.create_body("modron").is_none());
    }

    #[test]
    fn add_race_replaces_existing_template() {
        let mut registry = RaceRegistry::new();
        let mut slug_body = Body::new();
        slug_body.set_size("small");
        slug_body.add_position("mantle", "torso", 100);
        registry
            .add_race("human", "hum", slug_body, true)
            .expect("replace");
        let body = registry.create_body("human").expect("body");
        assert_eq!(body.num_parts(), 1);
    }

    #[test]
    fn seeds_build_and_install() {
        let json = r#"[
            {
                "name": "wyrm",
                "abbrev": "wyr",
                "size": "gargantuan",
                "pc_ok": false,
                "parts": [
                    {"name": "maw", "type": "head", "weight": 10},
                    {"name": "scales", "type": "torso", "weight": 80},
                    {"name": "tail", "type": "tail", "weight": 10}
                ]
            }
        ]"#;
        let seeds: Vec<RaceSeed> = serde_json::from_str(json).expect("parse seeds");
        let mut registry = RaceRegistry::new();
        registry.install_seeds(&seeds).expect("install");
        assert!(registry.is_race("wyrm"));
        let body = registry.create_body("wyrm").expect("body");
        assert_eq!(body.size(), "gargantuan");
        assert_eq!(body.part_type("maw"), Some("head"));
        assert_eq!(registry.names(true), vec!["human"], "wyrm is not pc_ok");
    }
}
