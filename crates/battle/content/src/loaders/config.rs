//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BattleConfig`] from TOML files.
///
/// Omitted keys keep their defaults, so a file only lists what it tunes:
///
/// ```toml
/// check_invariants = true
/// poison_percent = 0.1
/// summon_damage = [90, 160, 320]
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::check(&config)?;
        Ok(config)
    }

    fn check(config: &BattleConfig) -> LoadResult<()> {
        let chances = [
            ("poison_percent", config.poison_percent),
            ("burn_percent", config.burn_percent),
            ("freeze_break_chance", config.freeze_break_chance),
            ("paralyze_fail_chance", config.paralyze_fail_chance),
        ];
        for (key, value) in chances {
            anyhow::ensure!(
                (0.0..=1.0).contains(&value),
                "{key} must be within [0, 1], got {value}"
            );
        }
        anyhow::ensure!(
            config.decision_tie_window >= 0.0,
            "decision_tie_window must not be negative"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config.poison_percent, BattleConfig::DEFAULT_POISON_PERCENT);
        assert_eq!(config.summon_damage, BattleConfig::DEFAULT_SUMMON_DAMAGE);
    }

    #[test]
    fn overrides_listed_keys() {
        let config = ConfigLoader::parse(
            "check_invariants = true\nburn_percent = 0.2\nsummon_damage = [90, 160, 320]\n",
        )
        .unwrap();
        assert!(config.check_invariants);
        assert_eq!(config.burn_percent, 0.2);
        assert_eq!(config.summon_damage_for(2), 160);
        assert_eq!(config.paralyze_fail_chance, BattleConfig::DEFAULT_PARALYZE_FAIL_CHANCE);
    }

    #[test]
    fn rejects_out_of_range_chances() {
        let err = ConfigLoader::parse("freeze_break_chance = 1.5").unwrap_err();
        assert!(err.to_string().contains("freeze_break_chance"));
    }
}
