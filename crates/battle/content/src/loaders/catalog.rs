//! Catalog loader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use battle_core::{AbilityDefinition, DjinnDefinition, EquipmentDefinition, UnitTemplate};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, EncounterDefinition, PartyDefinition, SynergyGrant};
use crate::loaders::{LoadResult, read_file};

/// Contents of one RON catalog file.
///
/// Every section is optional, so content can be split across files by kind:
///
/// ```ron
/// (
///     abilities: [
///         (id: "quake", kind: Psynergy, element: Venus, mana_cost: 1, base_power: 18),
///     ],
///     units: {
///         "isaac": (element: Venus, base: (hp: 120, atk: 14, def: 9, mag: 12, spd: 9)),
///     },
/// )
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub abilities: Vec<AbilityDefinition>,
    pub djinn: Vec<DjinnDefinition>,
    pub equipment: Vec<EquipmentDefinition>,
    pub synergies: Vec<SynergyGrant>,
    pub units: BTreeMap<String, UnitTemplate>,
    pub encounters: Vec<EncounterDefinition>,
    pub parties: Vec<PartyDefinition>,
}

const BUILTIN: [(&str, &str); 5] = [
    ("abilities.ron", include_str!("../../data/catalog/abilities.ron")),
    ("djinn.ron", include_str!("../../data/catalog/djinn.ron")),
    ("equipment.ron", include_str!("../../data/catalog/equipment.ron")),
    ("units.ron", include_str!("../../data/catalog/units.ron")),
    ("encounters.ron", include_str!("../../data/catalog/encounters.ron")),
];

/// Loader for RON catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parses one catalog file. `origin` names the source in error messages.
    pub fn parse(source: &str, origin: &str) -> LoadResult<CatalogFile> {
        ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON {}: {}", origin, e))
    }

    /// Loads and validates a single catalog file.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        let file = Self::parse(&content, &path.display().to_string())?;
        let mut catalog = Catalog::new();
        Self::merge(&mut catalog, file)?;
        Self::finish(catalog, 1)
    }

    /// Loads every `.ron` file in `dir`, in file-name order, into one catalog.
    ///
    /// An id defined in two files is an error.
    pub fn load_dir(dir: &Path) -> LoadResult<Catalog> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read catalog directory {}", dir.display()))?;
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Catalog::new();
        for path in &paths {
            let content = read_file(path)?;
            let file = Self::parse(&content, &path.display().to_string())?;
            Self::merge(&mut catalog, file)
                .with_context(|| format!("merging {}", path.display()))?;
        }
        Self::finish(catalog, paths.len())
    }

    /// The catalog embedded in this crate.
    pub fn builtin() -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();
        for (name, source) in BUILTIN {
            let file = Self::parse(source, name)?;
            Self::merge(&mut catalog, file).with_context(|| format!("merging {name}"))?;
        }
        Self::finish(catalog, BUILTIN.len())
    }

    /// Adds every definition in `file` to `catalog`.
    pub fn merge(catalog: &mut Catalog, file: CatalogFile) -> LoadResult<()> {
        for ability in file.abilities {
            catalog.add_ability(ability)?;
        }
        for djinn in file.djinn {
            catalog.add_djinn(djinn)?;
        }
        for item in file.equipment {
            catalog.add_equipment(item)?;
        }
        for grant in file.synergies {
            catalog.add_synergy(grant)?;
        }
        for (name, template) in file.units {
            catalog.add_unit(name, template)?;
        }
        for encounter in file.encounters {
            catalog.add_encounter(encounter)?;
        }
        for party in file.parties {
            catalog.add_party(party)?;
        }
        Ok(())
    }

    fn finish(catalog: Catalog, files: usize) -> LoadResult<Catalog> {
        catalog.validate()?;
        tracing::debug!(
            files,
            encounters = catalog.encounters().count(),
            parties = catalog.parties().count(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
