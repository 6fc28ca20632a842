//! Play many seeds and aggregate the results.

use anyhow::Result;
use battle_core::EncounterId;
use battle_sim::{BatchReport, SimError, Simulator};
use clap::Parser;

use super::{Content, PolicyKind};

/// Play many seeds and report aggregate results
#[derive(Parser)]
pub struct Batch {
    /// Encounter id from the catalog
    #[arg(short, long, default_value = "forest_ambush")]
    encounter: String,

    /// Preset party id from the catalog
    #[arg(short, long, default_value = "adepts")]
    party: String,

    /// First seed of the batch
    #[arg(long, default_value_t = 1)]
    first_seed: u32,

    /// Number of battles
    #[arg(short = 'n', long, default_value_t = 100)]
    runs: u32,

    #[arg(long, value_enum, default_value_t)]
    policy: PolicyKind,

    /// Abandon battles after this many rounds
    #[arg(long, default_value_t = Simulator::DEFAULT_ROUND_LIMIT)]
    round_limit: u32,

    /// Print the full report, per-seed summaries included, as JSON
    #[arg(long)]
    json: bool,
}

impl Batch {
    pub fn execute(self, content: &Content) -> Result<()> {
        let encounter = EncounterId::new(self.encounter.as_str());
        let simulator = Simulator::new(content.engine()).with_round_limit(self.round_limit);
        let mut policy = self.policy.build();

        let seeds = (0..self.runs).map(|offset| self.first_seed.wrapping_add(offset));
        let summaries = simulator.batch(
            seeds,
            |seed| -> Result<_, SimError> {
                Ok(content.catalog.battle(&self.party, &encounter, seed)?)
            },
            policy.as_mut(),
        )?;
        let report = BatchReport::new(encounter.clone(), &self.party, policy.name(), summaries);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "{} vs {} ({} policy, {} runs)",
                report.party, report.encounter, report.policy, report.runs
            );
            println!(
                "  victories {}  defeats {}  unfinished {}",
                report.victories, report.defeats, report.unfinished
            );
            println!("  win rate      {:.1}%", report.win_rate * 100.0);
            println!("  avg rounds    {:.2}", report.average_rounds);
            println!("  avg HP left   {:.1}%", report.average_survivor_hp_percent);
        }
        Ok(())
    }
}
