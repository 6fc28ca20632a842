//! Planning-phase commands and the [`BattleCommand`] envelope.

use crate::djinn::known_abilities;
use crate::env::TargetMode;
use crate::state::{
    AbilityId, BattlePhase, BattleState, DjinnId, DjinnState, QueuedAction, Unit, UnitId,
};
use crate::targeting::candidates;

use super::errors::CommandError;
use super::resolve::action_definition;
use super::round::ExecuteRound;
use super::transition::{BattleTransition, TransitionContext};

/// Every input a caller can feed the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleCommand {
    QueueAction(QueueAction),
    CancelAction(CancelAction),
    QueueDjinn(QueueDjinn),
    CommitPlan(CommitPlan),
    ExecuteRound(ExecuteRound),
}

impl BattleCommand {
    pub fn basic_attack(actor: impl Into<UnitId>, target: impl Into<UnitId>) -> Self {
        Self::QueueAction(QueueAction::new(actor, None, vec![target.into()]))
    }

    pub fn use_ability(
        actor: impl Into<UnitId>,
        ability: impl Into<AbilityId>,
        targets: Vec<UnitId>,
    ) -> Self {
        Self::QueueAction(QueueAction::new(actor, Some(ability.into()), targets))
    }

    pub fn cancel(actor: impl Into<UnitId>) -> Self {
        Self::CancelAction(CancelAction {
            actor: actor.into(),
        })
    }

    pub fn djinn(djinn: impl IntoIterator<Item = DjinnId>) -> Self {
        Self::QueueDjinn(QueueDjinn {
            djinn: djinn.into_iter().collect(),
        })
    }

    pub fn commit() -> Self {
        Self::CommitPlan(CommitPlan)
    }

    pub fn execute_round() -> Self {
        Self::ExecuteRound(ExecuteRound)
    }

    /// Stable short name used in logs and transcripts.
    pub fn name(&self) -> &'static str {
        match self {
            BattleCommand::QueueAction(_) => "queue_action",
            BattleCommand::CancelAction(_) => "cancel_action",
            BattleCommand::QueueDjinn(_) => "queue_djinn",
            BattleCommand::CommitPlan(_) => "commit_plan",
            BattleCommand::ExecuteRound(_) => "execute_round",
        }
    }
}

impl From<QueuedAction> for BattleCommand {
    fn from(action: QueuedAction) -> Self {
        Self::QueueAction(QueueAction::new(action.actor, action.ability, action.targets))
    }
}

fn expect_phase(state: &BattleState, expected: BattlePhase) -> Result<(), CommandError> {
    if state.phase() == expected {
        Ok(())
    } else {
        Err(CommandError::WrongPhase {
            expected,
            actual: state.phase(),
        })
    }
}

/// Queue slot and unit of a party member.
fn party_member<'s>(
    state: &'s BattleState,
    id: &UnitId,
) -> Result<(usize, &'s Unit), CommandError> {
    let Some(slot) = state.party_slot(id) else {
        return Err(if state.unit(id).is_some() {
            CommandError::NotInParty(id.clone())
        } else {
            CommandError::UnknownUnit(id.clone())
        });
    };
    let unit = state
        .party
        .units
        .get(slot)
        .ok_or_else(|| CommandError::UnknownUnit(id.clone()))?;
    Ok((slot, unit))
}

/// First slot at or after the start whose living unit still needs an action.
fn next_open_slot(state: &BattleState) -> usize {
    state
        .party
        .units
        .iter()
        .enumerate()
        .position(|(slot, unit)| unit.is_alive() && state.queue.slot(slot).is_none())
        .unwrap_or(state.party.units.len())
}

/// Queues (or re-queues) a party unit's action for this round.
///
/// The ability's mana cost is deducted immediately; a previously queued
/// action for the same unit is refunded first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueAction {
    pub actor: UnitId,
    /// `None` is a basic attack.
    pub ability: Option<AbilityId>,
    pub targets: Vec<UnitId>,
}

impl QueueAction {
    pub fn new(actor: impl Into<UnitId>, ability: Option<AbilityId>, targets: Vec<UnitId>) -> Self {
        Self {
            actor: actor.into(),
            ability,
            targets,
        }
    }

    fn refund(&self, state: &BattleState, slot: usize) -> u32 {
        state
            .queue
            .slot(slot)
            .map_or(0, |queued| u32::from(queued.mana_cost))
    }
}

impl BattleTransition for QueueAction {
    type Error = CommandError;

    fn pre_validate(
        &self,
        state: &BattleState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        expect_phase(state, BattlePhase::Planning)?;
        let (slot, unit) = party_member(state, &self.actor)?;
        if unit.is_ko() {
            return Err(CommandError::ActorKnockedOut(self.actor.clone()));
        }

        if let Some(ability) = &self.ability {
            if !known_abilities(unit, Some(&state.party), &ctx.env).contains(ability) {
                return Err(CommandError::AbilityNotKnown {
                    actor: self.actor.clone(),
                    ability: ability.clone(),
                });
            }
        }
        let definition = action_definition(&ctx.env, self.ability.as_ref())?;

        let needs_target = matches!(
            definition.target,
            TargetMode::SingleEnemy | TargetMode::SingleAlly
        );
        if needs_target && self.targets.is_empty() {
            return Err(CommandError::MissingTarget {
                ability: definition.id.clone(),
            });
        }
        let valid = candidates(state, &self.actor, &definition);
        if let Some(target) = self.targets.iter().find(|target| !valid.contains(target)) {
            return Err(CommandError::InvalidTarget {
                actor: self.actor.clone(),
                target: target.clone(),
            });
        }

        let needed = u32::from(definition.mana_cost);
        let available = state.mana.remaining + self.refund(state, slot);
        if needed > available {
            return Err(CommandError::InsufficientMana { needed, available });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        let definition = action_definition(&ctx.env, self.ability.as_ref())?;
        let (slot, _) = party_member(state, &self.actor)?;

        let refund = self.refund(state, slot);
        let needed = u32::from(definition.mana_cost);
        let available = (state.mana.remaining + refund).min(state.mana.max);
        if needed > available {
            return Err(CommandError::InsufficientMana { needed, available });
        }
        state.mana.remaining = available - needed;

        let entry = state
            .queue
            .actions
            .get_mut(slot)
            .ok_or_else(|| CommandError::UnknownUnit(self.actor.clone()))?;
        *entry = Some(QueuedAction {
            actor: self.actor.clone(),
            ability: self.ability.clone(),
            targets: self.targets.clone(),
            mana_cost: definition.mana_cost,
        });
        state.queue.current_index = next_open_slot(state);
        Ok(())
    }
}

/// Clears a party unit's queued action and refunds its cost.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CancelAction {
    pub actor: UnitId,
}

impl BattleTransition for CancelAction {
    type Error = CommandError;

    fn pre_validate(
        &self,
        state: &BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        expect_phase(state, BattlePhase::Planning)?;
        let (slot, _) = party_member(state, &self.actor)?;
        if state.queue.slot(slot).is_none() {
            return Err(CommandError::NothingQueued(self.actor.clone()));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        let (slot, _) = party_member(state, &self.actor)?;
        let removed = state
            .queue
            .actions
            .get_mut(slot)
            .and_then(Option::take)
            .ok_or_else(|| CommandError::NothingQueued(self.actor.clone()))?;
        state.mana.remaining =
            (state.mana.remaining + u32::from(removed.mana_cost)).min(state.mana.max);
        state.queue.current_index = slot;
        Ok(())
    }
}

/// Replaces the Djinn queued for activation this round.
///
/// Duplicates are dropped, keeping the first occurrence. The first Djinn in
/// the list leads the summon. An empty list clears the selection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueDjinn {
    pub djinn: Vec<DjinnId>,
}

impl QueueDjinn {
    fn unique(&self) -> Vec<DjinnId> {
        let mut unique: Vec<DjinnId> = Vec::with_capacity(self.djinn.len());
        for id in &self.djinn {
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        unique
    }
}

impl BattleTransition for QueueDjinn {
    type Error = CommandError;

    fn pre_validate(
        &self,
        state: &BattleState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        expect_phase(state, BattlePhase::Planning)?;
        let unique = self.unique();
        let max = crate::config::BattleConfig::MAX_EQUIPPED_DJINN;
        if unique.len() > max {
            return Err(CommandError::TooManyDjinn { max });
        }
        for id in &unique {
            match state.party.djinn_state(id) {
                None => return Err(CommandError::DjinnNotEquipped(id.clone())),
                Some(DjinnState::Standby) => return Err(CommandError::DjinnNotSet(id.clone())),
                Some(DjinnState::Set) => {}
            }
            ctx.env.djinn_definition(id)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        let max = crate::config::BattleConfig::MAX_EQUIPPED_DJINN;
        state.queue.djinn.clear();
        for id in self.unique() {
            state
                .queue
                .djinn
                .try_push(id)
                .map_err(|_| CommandError::TooManyDjinn { max })?;
        }
        Ok(())
    }
}

/// Locks in the plan and moves the battle to the executing phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitPlan;

impl BattleTransition for CommitPlan {
    type Error = CommandError;

    fn pre_validate(
        &self,
        state: &BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        expect_phase(state, BattlePhase::Planning)?;
        for (slot, unit) in state.party.units.iter().enumerate() {
            if unit.is_alive() && state.queue.slot(slot).is_none() {
                return Err(CommandError::PlanIncomplete(unit.id.clone()));
            }
        }
        let cost = state.queue.total_cost();
        if cost > state.mana.max {
            return Err(CommandError::PlanOverBudget {
                cost,
                max: state.mana.max,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        state.progress.enter(BattlePhase::Executing);
        state.queue.execution_index = 0;
        Ok(())
    }

    fn post_validate(
        &self,
        state: &BattleState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), Self::Error> {
        expect_phase(state, BattlePhase::Executing)
    }
}
