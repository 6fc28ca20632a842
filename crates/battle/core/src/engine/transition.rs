//! Command transition dispatch and execution logic.

use crate::config::BattleConfig;
use crate::env::BattleEnv;
use crate::state::BattleState;

use super::commands::BattleCommand;
use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Read-only inputs shared by every transition.
#[derive(Clone, Copy, Debug)]
pub struct TransitionContext<'a> {
    pub env: BattleEnv<'a>,
    pub config: &'a BattleConfig,
}

/// A command that moves the battle from one state to the next.
pub trait BattleTransition {
    type Error;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(
        &self,
        _state: &BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the command by mutating the state directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut BattleState, ctx: &TransitionContext<'_>)
    -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(
        &self,
        _state: &BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Executes a transition through the three-phase pipeline.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    ctx: &TransitionContext<'_>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: BattleTransition,
{
    transition
        .pre_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes a command to its transition.
pub(super) fn execute_transition(
    command: &BattleCommand,
    state: &mut BattleState,
    ctx: &TransitionContext<'_>,
) -> Result<(), ExecuteError> {
    match command {
        BattleCommand::QueueAction(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::QueueAction)
        }
        BattleCommand::CancelAction(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::CancelAction)
        }
        BattleCommand::QueueDjinn(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::QueueDjinn)
        }
        BattleCommand::CommitPlan(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::CommitPlan)
        }
        BattleCommand::ExecuteRound(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::ExecuteRound)
        }
    }
}
