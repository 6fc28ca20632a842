//! Replay a recorded transcript.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_sim::Transcript;
use clap::Parser;

use super::Content;

/// Replay a transcript and check its final digest
#[derive(Parser)]
pub struct Replay {
    #[arg(value_name = "FILE")]
    transcript: PathBuf,
}

impl Replay {
    pub fn execute(self, content: &Content) -> Result<()> {
        let transcript = Transcript::load(&self.transcript)
            .with_context(|| format!("Failed to read transcript {}", self.transcript.display()))?;
        let state = transcript.verify(&content.engine())?;
        println!(
            "replay of {} (seed {}, {} commands) matches: {} after {} rounds",
            transcript.encounter,
            transcript.seed,
            transcript.commands.len(),
            state.phase(),
            state.round()
        );
        Ok(())
    }
}
