//! Registration-time name validation.
//!
//! Auxiliary data and race names come from module init code, so a bad name is
//! a programmer error and registration refuses it outright. Body part names
//! stay free-form plain data and are not validated here.

/// Maximum length for a registry name (auxiliary type or race).
pub const MAX_REGISTRY_NAME: usize = 64;

/// Check a name destined for a registry key: non-empty, no surrounding
/// whitespace, printable, and within the length cap.
pub fn valid_registry_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_REGISTRY_NAME {
        return false;
    }
    if name.trim() != name {
        return false;
    }
    name.chars().all(|c| !c.is_control())
}
