//! Catalog of valid body position-type and body-size names.
//!
//! An explicitly constructed object, passed by reference to whatever needs it;
//! builder modules and scripts extend it at runtime. Names are plain data once
//! written into a body part. Removing a name here only affects future
//! lookups, never existing parts.

/// Stock position types every game starts with.
const DEFAULT_POSITION_TYPES: &[&str] = &[
    "floating about head",
    "about body",
    "head",
    "face",
    "ear",
    "eyes",
    "neck",
    "torso",
    "arm",
    "wing",
    "wrist",
    "left hand",
    "right hand",
    "finger",
    "waist",
    "leg",
    "left foot",
    "right foot",
    "hoof",
    "claw",
    "tail",
    "held",
    "hands",
    "legs",
    "feet",
    "wings",
    "hooves",
];

/// Stock body sizes, smallest to largest.
const DEFAULT_SIZES: &[&str] = &[
    "diminuitive",
    "tiny",
    "small",
    "medium",
    "large",
    "huge",
    "gargantuan",
    "collosal",
];

/// Mutable catalog of position-type and size names. Case-insensitive dedup;
/// insertion order is preserved for display.
#[derive(Debug, Clone)]
pub struct PositionCatalog {
    position_types: Vec<String>,
    sizes: Vec<String>,
}

impl PositionCatalog {
    /// A catalog seeded with the stock defaults.
    pub fn new() -> Self {
        let mut catalog = Self {
            position_types: Vec::new(),
            sizes: Vec::new(),
        };
        catalog.seed_defaults();
        catalog
    }

    /// Discard every runtime addition and restore the seeded defaults.
    pub fn reset(&mut self) {
        self.position_types.clear();
        self.sizes.clear();
        self.seed_defaults();
    }

    fn seed_defaults(&mut self) {
        self.position_types
            .extend(DEFAULT_POSITION_TYPES.iter().map(|s| s.to_string()));
        self.sizes.extend(DEFAULT_SIZES.iter().map(|s| s.to_string()));
    }

    fn find(list: &[String], name: &str) -> Option<usize> {
        list.iter().position(|entry| entry.eq_ignore_ascii_case(name))
    }

    /// Add a position type. Returns false if it is already present.
    pub fn add_position_type(&mut self, name: &str) -> bool {
        if Self::find(&self.position_types, name).is_some() {
            return false;
        }
        self.position_types.push(name.to_string());
        true
    }

    /// Remove a position type. Returns false if it is absent. Existing body
    /// parts tagged with the name keep it as plain data.
    pub fn remove_position_type(&mut self, name: &str) -> bool {
        match Self::find(&self.position_types, name) {
            Some(index) => {
                self.position_types.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_position_type(&self, name: &str) -> bool {
        Self::find(&self.position_types, name).is_some()
    }

    /// Add a body size. Returns false if it is already present.
    pub fn add_size(&mut self, name: &str) -> bool {
        if Self::find(&self.sizes, name).is_some() {
            return false;
        }
        self.sizes.push(name.to_string());
        true
    }

    /// Remove a body size. Returns false if it is absent.
    pub fn remove_size(&mut self, name: &str) -> bool {
        match Self::find(&self.sizes, name) {
            Some(index) => {
                self.sizes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_size(&self, name: &str) -> bool {
        Self::find(&self.sizes, name).is_some()
    }

    /// Independent copy of the position-type list; callers never observe
    /// later catalog mutation through it.
    pub fn list_position_types(&self) -> Vec<String> {
        self.position_types.clone()
    }

    /// Independent copy of the size list.
    pub fn list_sizes(&self) -> Vec<String> {
        self.sizes.clone()
    }
}

impl Default for PositionCatalog {
    fn default() -> Self {
        Self::new()
    }
}
