//! Whole-state consistency checks.
//!
//! [`validate`] runs after every committed command when
//! [`BattleConfig::check_invariants`](crate::config::BattleConfig) is set.
//! A violation never describes caller misuse: it means the engine produced a
//! state it should not be able to reach.

use std::collections::BTreeSet;

use crate::config::BattleConfig;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{BattlePhase, BattleState, DjinnState, Side, UnitId, UnitIndex};

/// Machine-readable identifier of a broken invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InvariantCode {
    ManaOutOfRange,
    HpOutOfRange,
    QueueLengthMismatch,
    QueueReferenceInvalid,
    QueuedDjinnNotSet,
    DjinnTimerMismatch,
    PlanningRoundInvalid,
    ExecutingQueueIncomplete,
    VictoryEnemiesAlive,
    DefeatPartyAlive,
    StatusPhaseMismatch,
    IndexMismatch,
    DuplicateDjinn,
    TooManyDjinn,
    PartyTooLarge,
}

/// A broken invariant, with enough detail to locate the defect.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("invariant {code} violated: {detail}")]
pub struct InvariantViolation {
    pub code: InvariantCode,
    pub detail: String,
    pub context: ErrorContext,
}

impl InvariantViolation {
    fn new(state: &BattleState, code: InvariantCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
            context: ErrorContext::new(state.round(), state.phase()),
        }
    }

    fn about(mut self, unit: &UnitId) -> Self {
        self.context = self.context.with_unit(unit);
        self
    }
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn context(&self) -> Option<&ErrorContext> {
        Some(&self.context)
    }

    fn error_code(&self) -> &'static str {
        self.code.into()
    }
}

/// Checks every structural invariant of `state`.
///
/// # Errors
///
/// Returns the first [`InvariantViolation`] found.
pub fn validate(state: &BattleState) -> Result<(), InvariantViolation> {
    check_roster(state)?;
    check_resources(state)?;
    check_queue(state)?;
    check_djinn(state)?;
    check_phase(state)
}

fn check_roster(state: &BattleState) -> Result<(), InvariantViolation> {
    if state.party.units.len() > BattleConfig::MAX_PARTY {
        return Err(InvariantViolation::new(
            state,
            InvariantCode::PartyTooLarge,
            format!("{} party units", state.party.units.len()),
        ));
    }

    let expected = UnitIndex::build(&state.party, &state.enemies);
    let total = state.party.units.len() + state.enemies.len();
    if state.index() != &expected || expected.len() != total {
        return Err(InvariantViolation::new(
            state,
            InvariantCode::IndexMismatch,
            format!("index holds {} entries for {total} units", state.index().len()),
        ));
    }
    Ok(())
}

fn check_resources(state: &BattleState) -> Result<(), InvariantViolation> {
    if state.mana.remaining > state.mana.max {
        return Err(InvariantViolation::new(
            state,
            InvariantCode::ManaOutOfRange,
            format!("{} of {}", state.mana.remaining, state.mana.max),
        ));
    }

    for side in [Side::Party, Side::Enemy] {
        for unit in state.roster(side) {
            let max = state.effective_stats(&unit.id).map_or(0, |stats| stats.hp);
            if unit.current_hp < 0 || unit.current_hp > max {
                return Err(InvariantViolation::new(
                    state,
                    InvariantCode::HpOutOfRange,
                    format!("'{}' at {} of {max}", unit.id, unit.current_hp),
                )
                .about(&unit.id));
            }
        }
    }
    Ok(())
}

fn check_queue(state: &BattleState) -> Result<(), InvariantViolation> {
    if state.queue.actions.len() != state.party.units.len() {
        return Err(InvariantViolation::new(
            state,
            InvariantCode::QueueLengthMismatch,
            format!(
                "{} slots for {} party units",
                state.queue.actions.len(),
                state.party.units.len()
            ),
        ));
    }

    for (slot, action) in state.queue.actions.iter().enumerate() {
        let Some(action) = action else {
            continue;
        };
        let owner = state.party.units.get(slot);
        let actor_ok = owner.is_some_and(|unit| unit.id == action.actor && unit.is_alive());
        let targets_ok = action
            .targets
            .iter()
            .all(|target| state.unit(target).is_some());
        if !actor_ok || !targets_ok {
            return Err(InvariantViolation::new(
                state,
                InvariantCode::QueueReferenceInvalid,
                format!("slot {slot} queued for '{}'", action.actor),
            )
            .about(&action.actor));
        }
    }

    for id in &state.queue.djinn {
        if state.party.djinn_state(id) != Some(DjinnState::Set) {
            return Err(InvariantViolation::new(
                state,
                InvariantCode::QueuedDjinnNotSet,
                format!("'{id}'"),
            ));
        }
    }
    Ok(())
}

fn check_djinn(state: &BattleState) -> Result<(), InvariantViolation> {
    let equipped = &state.party.equipped_djinn;
    if equipped.len() > BattleConfig::MAX_EQUIPPED_DJINN {
        return Err(InvariantViolation::new(
            state,
            InvariantCode::TooManyDjinn,
            format!("{} equipped", equipped.len()),
        ));
    }

    let mut seen = BTreeSet::new();
    for djinn in equipped {
        if !seen.insert(&djinn.id) {
            return Err(InvariantViolation::new(
                state,
                InvariantCode::DuplicateDjinn,
                format!("'{}'", djinn.id),
            ));
        }
        let standby = state.party.djinn_state(&djinn.id) == Some(DjinnState::Standby);
        if standby != state.djinn_recovery.contains_key(&djinn.id) {
            return Err(InvariantViolation::new(
                state,
                InvariantCode::DjinnTimerMismatch,
                format!("'{}' standby={standby}", djinn.id),
            ));
        }
    }
    if let Some(orphan) = state
        .djinn_recovery
        .keys()
        .find(|id| !state.party.is_equipped(id))
    {
        return Err(InvariantViolation::new(
            state,
            InvariantCode::DjinnTimerMismatch,
            format!("timer for unequipped '{orphan}'"),
        ));
    }
    Ok(())
}

fn check_phase(state: &BattleState) -> Result<(), InvariantViolation> {
    let phase = state.phase();
    if state.progress.status != phase.status() {
        return Err(InvariantViolation::new(
            state,
            InvariantCode::StatusPhaseMismatch,
            format!("{} during {phase}", state.progress.status),
        ));
    }

    match phase {
        BattlePhase::Planning if state.round() < 1 => Err(InvariantViolation::new(
            state,
            InvariantCode::PlanningRoundInvalid,
            format!("round {}", state.round()),
        )),
        BattlePhase::Executing => {
            let missing = state
                .party
                .units
                .iter()
                .enumerate()
                .find(|(slot, unit)| unit.is_alive() && state.queue.slot(*slot).is_none());
            match missing {
                Some((_, unit)) => Err(InvariantViolation::new(
                    state,
                    InvariantCode::ExecutingQueueIncomplete,
                    format!("'{}' has no action", unit.id),
                )),
                None => Ok(()),
            }
        }
        BattlePhase::Victory if !state.is_wiped(Side::Enemy) => Err(InvariantViolation::new(
            state,
            InvariantCode::VictoryEnemiesAlive,
            format!("{} enemies standing", state.living(Side::Enemy).count()),
        )),
        BattlePhase::Defeat if !state.is_wiped(Side::Party) => Err(InvariantViolation::new(
            state,
            InvariantCode::DefeatPartyAlive,
            format!("{} party units standing", state.living(Side::Party).count()),
        )),
        _ => Ok(()),
    }
}
