//! Recorded battles and byte-exact replay.

use std::path::Path;

use battle_core::{BattleCommand, BattleEngine, BattleState, EncounterId};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Everything needed to reproduce a battle: the initial snapshot, the
/// command sequence and the digest of the state it ended on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub encounter: EncounterId,
    pub seed: u32,
    pub policy: String,
    pub initial: BattleState,
    pub commands: Vec<BattleCommand>,
    /// Hex SHA-256 of the final state.
    pub final_digest: String,
}

impl Transcript {
    pub fn record(
        initial: &BattleState,
        policy: &str,
        commands: Vec<BattleCommand>,
        last: &BattleState,
    ) -> Self {
        Self {
            encounter: initial.encounter.clone(),
            seed: initial.seed,
            policy: policy.to_owned(),
            initial: initial.clone(),
            commands,
            final_digest: hex::encode(last.digest()),
        }
    }

    /// Re-executes every command from the initial snapshot.
    pub fn replay(&self, engine: &BattleEngine<'_>) -> Result<BattleState, SimError> {
        Ok(engine.execute_all(&self.initial, &self.commands)?.state)
    }

    /// Replays and checks the final digest.
    pub fn verify(&self, engine: &BattleEngine<'_>) -> Result<BattleState, SimError> {
        let state = self.replay(engine)?;
        let actual = hex::encode(state.digest());
        if actual != self.final_digest {
            return Err(SimError::DigestMismatch {
                expected: self.final_digest.clone(),
                actual,
            });
        }
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
