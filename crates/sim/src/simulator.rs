//! Whole-battle driver.

use battle_core::{BattleCommand, BattleEngine, BattleState};

use crate::error::SimError;
use crate::policy::Policy;
use crate::report::RunSummary;
use crate::transcript::Transcript;

/// A finished (or abandoned) battle and the transcript that reproduces it.
#[derive(Clone, Debug)]
pub struct BattleRecord {
    pub transcript: Transcript,
    pub state: BattleState,
}

impl BattleRecord {
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_state(&self.state)
    }
}

/// Runs battles to completion with a party policy.
#[derive(Clone, Copy, Debug)]
pub struct Simulator<'a> {
    engine: BattleEngine<'a>,
    round_limit: u32,
}

impl<'a> Simulator<'a> {
    pub const DEFAULT_ROUND_LIMIT: u32 = 100;

    pub fn new(engine: BattleEngine<'a>) -> Self {
        Self {
            engine,
            round_limit: Self::DEFAULT_ROUND_LIMIT,
        }
    }

    /// Battles still running after this many rounds are abandoned.
    pub fn with_round_limit(mut self, rounds: u32) -> Self {
        self.round_limit = rounds.max(1);
        self
    }

    pub fn engine(&self) -> &BattleEngine<'a> {
        &self.engine
    }

    /// Plays `initial` until a side wins or the round limit is reached.
    pub fn run(
        &self,
        initial: &BattleState,
        policy: &mut dyn Policy,
    ) -> Result<BattleRecord, SimError> {
        let mut state = initial.clone();
        let mut commands: Vec<BattleCommand> = Vec::new();

        while !state.is_over() {
            if state.round() > self.round_limit {
                tracing::warn!(
                    seed = state.seed,
                    rounds = self.round_limit,
                    "round limit reached, abandoning battle"
                );
                break;
            }

            let mut round = policy.plan_round(&self.engine, &state)?;
            round.push(BattleCommand::commit());
            round.push(BattleCommand::execute_round());

            let outcome = self.engine.execute_all(&state, &round)?;
            tracing::debug!(
                round = state.round(),
                events = outcome.events.len(),
                "round resolved"
            );
            state = outcome.state;
            commands.extend(round);
        }

        tracing::debug!(
            seed = state.seed,
            phase = %state.phase(),
            rounds = state.round(),
            "battle finished"
        );
        let transcript = Transcript::record(initial, policy.name(), commands, &state);
        Ok(BattleRecord { transcript, state })
    }

    /// Runs one battle per seed, building each initial state with `setup`.
    pub fn batch(
        &self,
        seeds: impl IntoIterator<Item = u32>,
        mut setup: impl FnMut(u32) -> Result<BattleState, SimError>,
        policy: &mut dyn Policy,
    ) -> Result<Vec<RunSummary>, SimError> {
        seeds
            .into_iter()
            .map(|seed| {
                let initial = setup(seed)?;
                Ok(self.run(&initial, policy)?.summary())
            })
            .collect()
    }
}
