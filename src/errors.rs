use thiserror::Error;

use crate::types::OwnerKind;

/// Errors that can arise in the object-model core and its storage glue.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Returned when installing an auxiliary type under a name that is taken.
    #[error("auxiliary data already registered: {0}")]
    DuplicateRegistration(String),

    /// Returned when looking up an auxiliary name nobody has registered.
    #[error("unknown auxiliary data: {0}")]
    UnknownExtension(String),

    /// Returned when an auxiliary type does not apply to the owner's kind.
    #[error("auxiliary data {extension} does not apply to {kind} owners")]
    InvalidOwnerType {
        extension: String,
        kind: OwnerKind,
    },

    /// Returned when an equip request names a body part that does not exist.
    #[error("no such body part: {0}")]
    SlotNotFound(String),

    /// Returned when an equip request targets a part that is already taken.
    #[error("body part already occupied: {0}")]
    SlotOccupied(String),

    /// Returned when layering is blocked by an item of the same wear type.
    #[error("wear type {conflict_type} already present on {part}")]
    TypeConflict {
        part: String,
        conflict_type: String,
    },

    /// Returned when a multi-slot equip cannot claim every requested slot.
    #[error("requested {requested} slots, only {matched} available")]
    InsufficientFreeSlots { requested: usize, matched: usize },

    /// Returned when a persisted payload cannot be decoded.
    #[error("malformed persisted data: {0}")]
    MalformedPersistedData(String),

    /// Returned when registering under an unusable name.
    #[error("invalid registry name: {0:?}")]
    InvalidName(String),

    /// Returned when a typed accessor names an auxiliary registered with a
    /// different concrete type.
    #[error("auxiliary data {0} is registered with a different type")]
    AuxTypeMismatch(String),

    /// Returned when fetching a record that is not present in the store.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Returned when a stored record carries an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, seed files, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
