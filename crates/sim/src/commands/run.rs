//! Play one battle.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::EncounterId;
use battle_sim::Simulator;
use clap::Parser;

use super::{Content, PolicyKind};

/// Play one battle and print its event log
#[derive(Parser)]
pub struct Run {
    /// Encounter id from the catalog
    #[arg(short, long, default_value = "training_ground")]
    encounter: String,

    /// Preset party id from the catalog
    #[arg(short, long, default_value = "adepts")]
    party: String,

    #[arg(short, long, default_value_t = 12345)]
    seed: u32,

    #[arg(long, value_enum, default_value_t)]
    policy: PolicyKind,

    /// Abandon the battle after this many rounds
    #[arg(long, default_value_t = Simulator::DEFAULT_ROUND_LIMIT)]
    round_limit: u32,

    /// Write the transcript to this file
    #[arg(short, long, value_name = "FILE")]
    transcript: Option<PathBuf>,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

impl Run {
    pub fn execute(self, content: &Content) -> Result<()> {
        let initial = content
            .catalog
            .battle(&self.party, &EncounterId::new(self.encounter.as_str()), self.seed)?;
        let simulator = Simulator::new(content.engine()).with_round_limit(self.round_limit);
        let mut policy = self.policy.build();
        let record = simulator.run(&initial, policy.as_mut())?;

        for event in &record.state.log {
            if self.json {
                println!("{}", serde_json::to_string(event)?);
            } else {
                println!("{:<16} {:?}", event.name(), event);
            }
        }

        let summary = record.summary();
        if !self.json {
            println!();
            println!(
                "{} after {} rounds, {} survivors at {:.1}% HP",
                summary.status, summary.rounds, summary.survivors, summary.survivor_hp_percent
            );
            println!("digest {}", summary.digest);
        }

        if let Some(path) = &self.transcript {
            record
                .transcript
                .save(path)
                .with_context(|| format!("Failed to write transcript {}", path.display()))?;
            eprintln!("transcript written to {}", path.display());
        }
        Ok(())
    }
}
