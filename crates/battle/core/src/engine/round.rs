//! The executing phase: one full round from summons to the end check.

use crate::ai;
use crate::djinn;
use crate::env::{SeededRng, Stream};
use crate::state::{BattleEvent, BattlePhase, BattleState, DjinnId, QueuedAction, Side};

use super::errors::CommandError;
use super::resolve::perform;
use super::scheduler::turn_order;
use super::transition::{BattleTransition, TransitionContext};

/// The three independent random streams of one round.
///
/// Each is derived from the battle seed and round number, so a round's
/// outcome only depends on the state it starts from.
#[derive(Clone, Debug)]
pub(crate) struct RoundStreams {
    /// Summon targeting, on-hit rolls.
    pub combat: SeededRng,
    /// Freeze breaks and paralysis.
    pub status: SeededRng,
    /// Enemy decisions.
    pub decision: SeededRng,
}

impl RoundStreams {
    pub fn new(seed: u32, round: u32) -> Self {
        Self {
            combat: SeededRng::derive(seed, round, Stream::Combat),
            status: SeededRng::derive(seed, round, Stream::Status),
            decision: SeededRng::derive(seed, round, Stream::Decision),
        }
    }
}

/// Resolves the committed plan.
///
/// Ends in Victory or Defeat when a side is wiped (Defeat when both are),
/// otherwise returns to Planning for the next round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecuteRound;

impl BattleTransition for ExecuteRound {
    type Error = CommandError;

    fn pre_validate(
        &self,
        state: &BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        if state.phase() == BattlePhase::Executing {
            Ok(())
        } else {
            Err(CommandError::WrongPhase {
                expected: BattlePhase::Executing,
                actual: state.phase(),
            })
        }
    }

    fn apply(
        &self,
        state: &mut BattleState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        let round = state.round();
        let mut streams = RoundStreams::new(state.seed, round);
        tracing::debug!(round, seed = state.seed, "executing round");

        let djinn: Vec<DjinnId> = state.queue.djinn.iter().cloned().collect();
        djinn::activate(state, &djinn, &ctx.env, ctx.config, &mut streams.combat);

        let party_actions: Vec<QueuedAction> = state.queue.queued().cloned().collect();
        let enemy_actions =
            ai::plan_enemy_actions(state, &ctx.env, ctx.config, &mut streams.decision);
        let order = turn_order(state, party_actions.into_iter().chain(enemy_actions));
        state.turn_order = order.iter().map(|action| action.actor.clone()).collect();

        for (index, action) in order.iter().enumerate() {
            state.queue.execution_index = index;
            perform(state, ctx, action, &mut streams)?;
            state.progress.current_turn += 1;
        }

        finish_round(state);
        Ok(())
    }

    fn post_validate(
        &self,
        state: &BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        if state.phase() == BattlePhase::Executing {
            return Err(CommandError::WrongPhase {
                expected: BattlePhase::Planning,
                actual: state.phase(),
            });
        }
        Ok(())
    }
}

fn finish_round(state: &mut BattleState) {
    let outcome = if state.is_wiped(Side::Party) {
        Some(BattlePhase::Defeat)
    } else if state.is_wiped(Side::Enemy) {
        Some(BattlePhase::Victory)
    } else {
        None
    };

    state.queue.clear();
    match outcome {
        Some(phase) => {
            state.progress.enter(phase);
            tracing::debug!(round = state.round(), outcome = %phase, "battle over");
            state.push_event(BattleEvent::BattleEnd {
                status: phase.status(),
                round: state.round(),
            });
        }
        None => {
            state.progress.round += 1;
            state.progress.enter(BattlePhase::Planning);
            djinn::recover(state);
            state.mana.refill();
            state.push_event(BattleEvent::RoundStarted {
                round: state.round(),
            });
        }
    }
}
