//! Command execution pipeline.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`].
//! Every command runs as a transaction: the engine clones the caller's
//! state, drives the command through pre_validate → apply → post_validate,
//! runs the invariant pass when enabled and only then hands back the new
//! state. On any error the clone is dropped and the caller's state is
//! exactly what it was.
//!
//! ```text
//!   Planning ──QueueAction/CancelAction/QueueDjinn──▶ Planning
//!      │
//!   CommitPlan
//!      ▼
//!   Executing ──ExecuteRound──▶ Planning (round + 1)
//!                        └────▶ Victory | Defeat
//! ```
mod commands;
mod errors;
mod invariants;
mod resolve;
mod round;
mod scheduler;
mod setup;
mod transition;

pub use commands::{BattleCommand, CancelAction, CommitPlan, QueueAction, QueueDjinn};
pub use errors::{CommandError, ExecuteError, TransitionPhase, TransitionPhaseError};
pub use invariants::{InvariantCode, InvariantViolation, validate};
pub use round::ExecuteRound;
pub use scheduler::turn_order;
pub use setup::{BattleSetup, SetupError};
pub use transition::{BattleTransition, TransitionContext};

use crate::ai;
use crate::config::BattleConfig;
use crate::env::{BattleEnv, SeededRng, Stream};
use crate::state::{BattleEvent, BattleState, QueuedAction};

/// Result of a successfully committed command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    pub state: BattleState,
    /// Events appended to the log by this command, in order.
    pub events: Vec<BattleEvent>,
}

/// Stateless command executor bound to a content environment and config.
#[derive(Clone, Copy, Debug)]
pub struct BattleEngine<'a> {
    env: BattleEnv<'a>,
    config: &'a BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(env: BattleEnv<'a>, config: &'a BattleConfig) -> Self {
        Self { env, config }
    }

    pub fn env(&self) -> &BattleEnv<'a> {
        &self.env
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }

    /// Executes one command against a copy of `state`.
    ///
    /// # Errors
    ///
    /// Returns the failing transition stage wrapped in [`ExecuteError`], or
    /// [`ExecuteError::Invariant`] when the resulting state is inconsistent.
    /// `state` is never modified.
    pub fn execute(
        &self,
        state: &BattleState,
        command: &BattleCommand,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let mut next = state.clone();
        let logged = next.log.len();
        let ctx = TransitionContext {
            env: self.env,
            config: self.config,
        };

        transition::execute_transition(command, &mut next, &ctx).inspect_err(|err| {
            tracing::debug!(command = command.name(), error = %err, "command rejected");
        })?;

        if self.config.check_invariants {
            validate(&next).inspect_err(|violation| {
                tracing::error!(command = command.name(), %violation, "invariant violated");
            })?;
        }

        let events = next.log[logged..].to_vec();
        Ok(ExecutionOutcome {
            state: next,
            events,
        })
    }

    /// Executes a sequence of commands, stopping at the first failure.
    pub fn execute_all<'c>(
        &self,
        state: &BattleState,
        commands: impl IntoIterator<Item = &'c BattleCommand>,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let mut current = ExecutionOutcome {
            state: state.clone(),
            events: Vec::new(),
        };
        for command in commands {
            let outcome = self.execute(&current.state, command)?;
            current.events.extend(outcome.events);
            current.state = outcome.state;
        }
        Ok(current)
    }

    /// The actions the opposing side would choose if the round started now.
    ///
    /// Uses its own copy of the round's decision stream. The actual round
    /// resolves summons before the enemy plans, so a summon that knocks out
    /// an enemy changes the real plan.
    pub fn preview_enemy_actions(&self, state: &BattleState) -> Vec<QueuedAction> {
        let mut rng = SeededRng::derive(state.seed, state.round(), Stream::Decision);
        ai::plan_enemy_actions(state, &self.env, self.config, &mut rng)
    }
}
