//! Auxiliary data: attach independently-versioned state to game objects
//! without touching their core layout.
//!
//! Modules install an [`AuxData`] implementation in an [`AuxRegistry`] at
//! startup; every owner object then carries an [`AuxTable`] that constructs,
//! copies, persists, and destroys instances in lockstep with the owner's own
//! lifecycle.

pub mod registry;
pub mod table;

pub use registry::{AuxData, AuxDescriptor, AuxRegistry};
pub use table::AuxTable;
