//! Auxiliary data registry.
//!
//! Independently-loaded modules install their auxiliary types here at startup.
//! A registration names the type, tags the owner kinds it applies to, and
//! supplies the construct-default and deserialize operations; deep-copy,
//! copy-into, and serialize live on the [`AuxData`] trait each type implements.
//! Registration happens once per name for the process lifetime; there is no
//! unregister, because modules are never unloaded at runtime.

use std::any::Any;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::storage::StorageSet;
use crate::types::{OwnerKind, OwnerKinds};
use crate::validation::valid_registry_name;

/// Per-instance operations every auxiliary type implements.
///
/// `copy` and `copy_into` must produce genuinely independent state: a copied
/// instance may not alias mutable substructure (lists, maps) of its source.
pub trait AuxData: Any {
    /// Deep-copy into a fresh boxed instance.
    fn copy(&self) -> Box<dyn AuxData>;

    /// Deep-copy this instance's state into `dest`, which holds another
    /// instance of the same auxiliary type.
    fn copy_into(&self, dest: &mut dyn AuxData);

    /// Serialize for persistence. Returning an empty set marks the instance
    /// ephemeral: it is skipped when the owner is saved.
    fn store(&self) -> StorageSet;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

type ConstructFn = Box<dyn Fn() -> Box<dyn AuxData>>;
type ReadFn = Box<dyn Fn(&StorageSet) -> Result<Box<dyn AuxData>, CoreError>>;

/// One installed auxiliary type: its name, the owner kinds it applies to, and
/// the construct/deserialize operations supplied at registration.
pub struct AuxDescriptor {
    name: String,
    owner_kinds: OwnerKinds,
    construct: ConstructFn,
    read: ReadFn,
}

impl AuxDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_kinds(&self) -> &OwnerKinds {
        &self.owner_kinds
    }

    pub fn applies_to(&self, kind: OwnerKind) -> bool {
        self.owner_kinds.contains(kind)
    }

    /// Construct the default instance.
    pub fn construct(&self) -> Box<dyn AuxData> {
        (self.construct)()
    }

    /// Construct an instance from a persisted payload.
    pub fn read(&self, payload: &StorageSet) -> Result<Box<dyn AuxData>, CoreError> {
        (self.read)(payload)
    }
}

impl std::fmt::Debug for AuxDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuxDescriptor")
            .field("name", &self.name)
            .field("owner_kinds", &self.owner_kinds)
            .finish()
    }
}

/// Catalog of every installed auxiliary type, keyed by name. Constructed
/// explicitly and passed by reference; there is no hidden global registry.
#[derive(Debug, Default)]
pub struct AuxRegistry {
    entries: HashMap<String, AuxDescriptor>,
}

impl AuxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an auxiliary type. Fails with [`CoreError::DuplicateRegistration`]
    /// if the name is taken (the original registration is left untouched) and
    /// with [`CoreError::InvalidName`] on an unusable name. Either failure
    /// is a programmer error and should abort loading the offending module.
    pub fn register<T, C, R>(
        &mut self,
        name: &str,
        owner_kinds: impl Into<OwnerKinds>,
        construct: C,
        read: R,
    ) -> Result<(), CoreError>
    where
        T: AuxData,
        C: Fn() -> T + 'static,
        R: Fn(&StorageSet) -> Result<T, CoreError> + 'static,
    {
        if !valid_registry_name(name) {
            return Err(CoreError::InvalidName(name.to_string()));
        }
        if self.entries.contains_key(name) {
            return Err(CoreError::DuplicateRegistration(name.to_string()));
        }
        let descriptor = AuxDescriptor {
            name: name.to_string(),
            owner_kinds: owner_kinds.into(),
            construct: Box::new(move || Box::new(construct()) as Box<dyn AuxData>),
            read: Box::new(move |set| read(set).map(|data| Box::new(data) as Box<dyn AuxData>)),
        };
        self.entries.insert(name.to_string(), descriptor);
        Ok(())
    }

    /// Fetch the descriptor for `name`.
    pub fn lookup(&self, name: &str) -> Result<&AuxDescriptor, CoreError> {
        self.entries
            .get(name)
            .ok_or_else(|| CoreError::UnknownExtension(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Installed names, sorted for stable display.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
