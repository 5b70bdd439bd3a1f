//! Data-driven battle content and its loaders.
//!
//! This crate turns data files into ready-to-run battle inputs:
//! - Battle configuration (data-driven via TOML)
//! - Move, item and character catalogs (data-driven via RON)
//!
//! All loaders deserialize battle-core types directly with serde; content is
//! validated by the same constructors the engine uses.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CharacterEntry, ConfigLoader, LoadResult, LoadedRoster, RosterCatalog, RosterLoader};
