//! Operator configuration.
//!
//! Games extend the core's seeded catalogs without recompiling: a TOML file
//! can add position types and body sizes, define whole races inline, and
//! pick the default race for new characters. Every field has a sensible
//! default, so an empty file (or no file at all) yields a working core.
//!
//! ```toml
//! default_race = "human"
//!
//! [body]
//! extra_position_types = ["tentacle"]
//! extra_sizes = ["titanic"]
//!
//! [[races]]
//! name = "wyrm"
//! abbrev = "wyr"
//! size = "gargantuan"
//! parts = [
//!     { name = "maw", type = "head", weight = 10 },
//!     { name = "scales", type = "torso", weight = 90 },
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::body::PositionCatalog;
use crate::errors::CoreError;
use crate::race::{RaceRegistry, RaceSeed};

/// Catalog additions layered on top of the seeded defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyConfig {
    #[serde(default)]
    pub extra_position_types: Vec<String>,
    #[serde(default)]
    pub extra_sizes: Vec<String>,
}

fn default_race() -> String {
    "human".to_string()
}

/// Root configuration for the object-model core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Race new characters default to; must exist after `races` install.
    #[serde(default = "default_race")]
    pub default_race: String,
    #[serde(default)]
    pub body: BodyConfig,
    /// Inline race seeds, same shape as the JSON seed files.
    #[serde(default)]
    pub races: Vec<RaceSeed>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_race: default_race(),
            body: BodyConfig::default(),
            races: Vec::new(),
        }
    }
}

impl CoreConfig {
    /// Parse configuration from TOML text.
    pub fn load_str(text: &str) -> Result<Self, CoreError> {
        toml::from_str(text)
            .map_err(|e| CoreError::MalformedPersistedData(format!("config: {e}")))
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let contents = fs::read_to_string(path)?;
        Self::load_str(&contents)
    }

    /// Apply this configuration: extend the catalog, install inline races,
    /// and verify the default race exists. Already-present catalog names are
    /// fine; re-applying a config is idempotent.
    pub fn apply(
        &self,
        catalog: &mut PositionCatalog,
        races: &mut RaceRegistry,
    ) -> Result<(), CoreError> {
        for name in &self.body.extra_position_types {
            catalog.add_position_type(name);
        }
        for name in &self.body.extra_sizes {
            catalog.add_size(name);
        }
        races.install_seeds(&self.races)?;
        if !races.is_race(&self.default_race) {
            return Err(CoreError::NotFound(format!(
                "default race: {}",
                self.default_race
            )));
        }
        Ok(())
    }
}
