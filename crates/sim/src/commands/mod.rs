//! Subcommand implementations.
//!
//! Each command owns its CLI arguments and execution logic.

mod batch;
mod list;
mod replay;
mod run;

pub use batch::Batch;
pub use list::List;
pub use replay::Replay;
pub use run::Run;

use std::path::Path;

use anyhow::Result;
use battle_content::{Catalog, ContentFactory};
use battle_core::{BattleConfig, BattleEngine};
use battle_sim::{AutoPolicy, BasicAttackPolicy, DjinnUse, Policy};

/// Catalog and config shared by every command.
pub struct Content {
    pub catalog: Catalog,
    pub config: BattleConfig,
}

impl Content {
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let content = match data_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                Self {
                    catalog: factory.load_catalog()?,
                    config: factory.load_config()?,
                }
            }
            None => Self {
                catalog: Catalog::builtin()?,
                config: BattleConfig::default(),
            },
        };
        Ok(content)
    }

    pub fn engine(&self) -> BattleEngine<'_> {
        BattleEngine::new(self.catalog.env(), &self.config)
    }
}

/// Party policy selectable from the command line.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum PolicyKind {
    /// Decision engine for every party unit, Djinn held
    #[default]
    Auto,
    /// Decision engine, activating all Djinn whenever they are all Set
    Unleash,
    /// Basic attack on the first living enemy
    Basic,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn Policy> {
        match self {
            PolicyKind::Auto => Box::new(AutoPolicy::new(DjinnUse::Hold)),
            PolicyKind::Unleash => Box::new(AutoPolicy::new(DjinnUse::Unleash)),
            PolicyKind::Basic => Box::new(BasicAttackPolicy),
        }
    }
}
