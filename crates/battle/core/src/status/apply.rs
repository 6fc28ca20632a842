use crate::env::StatusRemoval;
use crate::state::{BattleEvent, BattleState, StatusEffect, StatusKind, Unit, UnitId};
use crate::stats::clamp_hp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// An active immunity blocked a negative effect.
    Resisted,
}

/// Adds `effect` to `unit` following the immunity and stacking rules.
///
/// - Negative effects covered by an active immunity are rejected.
/// - A new immunity replaces every prior immunity.
/// - Buffs, debuffs, damage reduction and elemental resistance stack.
/// - Any other kind replaces an existing effect of the same kind.
pub fn apply_status(unit: &mut Unit, effect: StatusEffect) -> ApplyOutcome {
    let kind = effect.kind();
    if kind.is_negative() && unit.statuses.is_immune_to(kind) {
        return ApplyOutcome::Resisted;
    }
    if !kind.stacks() {
        unit.statuses.drain_where(|existing| existing.kind() == kind);
    }
    unit.statuses.push(effect);
    ApplyOutcome::Applied
}

/// Applies `effect` to a living unit in `state` and records the outcome.
///
/// HP is clamped afterwards since buffs and debuffs may move max HP. Returns
/// `None` when the target is missing or KO'd.
pub fn inflict(
    state: &mut BattleState,
    target: &UnitId,
    effect: StatusEffect,
) -> Option<ApplyOutcome> {
    let unit = state.unit_mut(target).filter(|unit| unit.is_alive())?;
    let status = effect.kind();
    let outcome = apply_status(unit, effect);
    clamp_hp(unit);
    let event = match outcome {
        ApplyOutcome::Applied => BattleEvent::StatusApplied {
            target: target.clone(),
            status,
        },
        ApplyOutcome::Resisted => BattleEvent::StatusResisted {
            target: target.clone(),
            status,
        },
    };
    state.push_event(event);
    Some(outcome)
}

/// Strips the effects selected by `removal`. Returns the removed kinds in
/// application order.
pub fn cleanse(unit: &mut Unit, removal: &StatusRemoval) -> Vec<StatusKind> {
    unit.statuses
        .drain_where(|effect| removal.removes(effect.kind()))
        .iter()
        .map(StatusEffect::kind)
        .collect()
}
