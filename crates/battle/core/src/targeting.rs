//! Target candidate enumeration shared by validation, execution and the
//! decision engine.

use crate::env::{AbilityDefinition, TargetMode, TargetSide};
use crate::state::{BattleState, Side, UnitId};

/// Roster a mode aims at, relative to the actor's side.
pub fn target_side(actor_side: Side, mode: TargetMode) -> Side {
    match mode.side() {
        TargetSide::Ally => actor_side,
        TargetSide::Enemy => actor_side.opponent(),
    }
}

/// Units `actor` may legally target with `ability`, in roster order.
///
/// Living units only, except that reviving abilities may also pick KO'd allies.
pub fn candidates(state: &BattleState, actor: &UnitId, ability: &AbilityDefinition) -> Vec<UnitId> {
    let Some(actor_side) = state.side_of(actor) else {
        return Vec::new();
    };
    if ability.target == TargetMode::SelfOnly {
        return vec![actor.clone()];
    }
    let side = target_side(actor_side, ability.target);
    let include_ko = ability.revive && side == actor_side;
    state
        .roster(side)
        .iter()
        .filter(|unit| include_ko || unit.is_alive())
        .map(|unit| unit.id.clone())
        .collect()
}

/// Targets an action actually hits at resolution time.
///
/// Area and self modes re-expand against the current rosters. A single
/// target that is no longer valid falls back to the first valid candidate,
/// then to the first living opposing unit. Returns an empty list when nothing
/// is left to hit.
pub fn resolve_targets(
    state: &BattleState,
    actor: &UnitId,
    ability: &AbilityDefinition,
    queued: &[UnitId],
) -> Vec<UnitId> {
    let valid = candidates(state, actor, ability);
    if ability.is_area() || ability.target == TargetMode::SelfOnly {
        return valid;
    }

    if let Some(target) = queued.first().filter(|target| valid.contains(target)) {
        return vec![target.clone()];
    }
    if let Some(first) = valid.into_iter().next() {
        return vec![first];
    }
    state
        .side_of(actor)
        .and_then(|side| state.living(side.opponent()).next())
        .map(|unit| vec![unit.id.clone()])
        .unwrap_or_default()
}
