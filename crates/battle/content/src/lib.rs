//! Data-driven battle content.
//!
//! This crate houses the definitions battles are built from and the loaders
//! that read them:
//! - Ability, Djinn and equipment catalogs (RON)
//! - Unit templates, encounters and preset parties (RON)
//! - Battle configuration (TOML)
//!
//! [`Catalog`] implements the `battle-core` oracle traits, so a loaded catalog
//! is handed to the engine as-is through [`Catalog::env`]. Content never
//! appears in battle state except as copies of equipped definitions.

pub mod catalog;
pub mod loaders;

pub use catalog::{Catalog, EncounterDefinition, PartyDefinition, Spawn, SynergyGrant};
pub use loaders::{CatalogFile, CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
