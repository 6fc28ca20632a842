//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::catalog::Catalog;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── catalog/
///     ├── abilities.ron
///     ├── djinn.ron
///     └── encounters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads `config.toml`, falling back to defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Loads every RON file under `catalog/`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load_dir(&self.data_dir.join("catalog"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ContentFactory::new(dir.path()).load_config().unwrap();
        assert_eq!(config, BattleConfig::default());
    }

    #[test]
    fn shipped_data_directory_loads() {
        let factory = ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));

        let config = factory.load_config().unwrap();
        assert!(config.check_invariants);
        assert_eq!(config.summon_damage, [80, 150, 300]);

        let from_disk = factory.load_catalog().unwrap();
        let builtin = Catalog::builtin().unwrap();
        assert_eq!(from_disk.encounters().count(), builtin.encounters().count());
        assert_eq!(from_disk.parties().count(), builtin.parties().count());
    }
}
