//! Resolution of a single queued action during the executing phase.

use std::borrow::Cow;

use crate::combat::{
    DamageKind, DamageOutcome, healing_amount, mend, mitigate, physical_damage, psynergy_damage,
    revive, strike,
};
use crate::env::{AbilityDefinition, AbilityKind, BattleEnv, OracleError, SeededRng, TargetSide};
use crate::state::{
    AbilityId, BattleEvent, BattleState, BlockReason, Side, StatusEffect, Unit, UnitId,
};
use crate::stats::clamp_hp;
use crate::status::{TickReport, cleanse, inflict, paralysis_fails, tick_unit};
use crate::targeting::resolve_targets;

use super::errors::CommandError;
use super::round::RoundStreams;
use super::transition::TransitionContext;

/// Definition behind a queued ability, or the implicit basic attack.
pub(crate) fn action_definition<'a>(
    env: &BattleEnv<'a>,
    ability: Option<&AbilityId>,
) -> Result<Cow<'a, AbilityDefinition>, OracleError> {
    match ability {
        Some(id) => env.ability(id).map(Cow::Borrowed),
        None => Ok(Cow::Owned(AbilityDefinition::basic_attack())),
    }
}

/// Runs one actor's turn: status tick, paralysis check, then the action.
///
/// Blocked and skipped turns are reported as events, never as errors. An
/// error here means a definition disappeared from the oracle mid-battle.
pub(crate) fn perform(
    state: &mut BattleState,
    ctx: &TransitionContext<'_>,
    action: &crate::state::QueuedAction,
    streams: &mut RoundStreams,
) -> Result<(), CommandError> {
    let actor = &action.actor;
    let unit = state
        .unit_mut(actor)
        .ok_or_else(|| CommandError::UnknownUnit(actor.clone()))?;
    if unit.is_ko() {
        state.push_event(BattleEvent::ActionSkipped {
            actor: actor.clone(),
        });
        return Ok(());
    }

    let report = tick_unit(unit, ctx.config, &mut streams.status);
    clamp_hp(unit);
    record_tick(state, actor, &report);
    if let Some(reason) = report.blocked {
        state.push_event(BattleEvent::ActionBlocked {
            actor: actor.clone(),
            reason,
        });
        return Ok(());
    }

    let paralyzed = state
        .unit(actor)
        .is_some_and(|unit| paralysis_fails(unit, ctx.config, &mut streams.status));
    if paralyzed {
        state.push_event(BattleEvent::ActionBlocked {
            actor: actor.clone(),
            reason: BlockReason::Paralyzed,
        });
        return Ok(());
    }

    let definition = action_definition(&ctx.env, action.ability.as_ref())?;
    let targets = resolve_targets(state, actor, &definition, &action.targets);
    if targets.is_empty() {
        state.push_event(BattleEvent::ActionBlocked {
            actor: actor.clone(),
            reason: BlockReason::NoValidTargets,
        });
        return Ok(());
    }

    tracing::trace!(
        actor = %actor,
        ability = %definition.id,
        targets = targets.len(),
        "resolving action"
    );
    state.push_event(BattleEvent::AbilityUsed {
        actor: actor.clone(),
        ability: action.ability.clone(),
        targets: targets.clone(),
    });
    if let Some(unit) = state.unit_mut(actor) {
        unit.counters.actions_taken += 1;
    }

    match definition.kind {
        AbilityKind::Physical | AbilityKind::Psynergy | AbilityKind::Summon => {
            deal_damage(state, actor, &definition, &targets, &mut streams.combat);
        }
        AbilityKind::Healing => restore(state, actor, &definition, &targets),
        AbilityKind::Buff => {
            if !definition.modifier.is_zero() {
                for target in &targets {
                    inflict(
                        state,
                        target,
                        StatusEffect::Buff {
                            modifier: definition.modifier,
                            duration: definition.effect_duration,
                        },
                    );
                }
            }
        }
        AbilityKind::Debuff => {
            for target in &targets {
                if !definition.modifier.is_zero() {
                    inflict(
                        state,
                        target,
                        StatusEffect::Debuff {
                            modifier: definition.modifier,
                            duration: definition.effect_duration,
                        },
                    );
                }
                roll_on_hit(state, target, &definition, &mut streams.combat);
            }
        }
    }
    support(state, actor, &definition, &targets);

    if action.is_basic_attack() && state.side_of(actor) == Some(Side::Party) {
        let gained = state.mana.gain(1);
        if gained > 0 {
            state.push_event(BattleEvent::ManaGenerated {
                unit: actor.clone(),
                amount: gained,
            });
        }
    }
    Ok(())
}

fn record_tick(state: &mut BattleState, unit: &UnitId, report: &TickReport) {
    for &(status, amount) in &report.damage {
        state.push_event(BattleEvent::StatusDamage {
            target: unit.clone(),
            status,
            amount: amount as u32,
        });
    }
    if report.healed > 0 {
        state.push_event(BattleEvent::Heal {
            target: unit.clone(),
            amount: report.healed as u32,
        });
    }
    for &status in &report.expired {
        state.push_event(BattleEvent::StatusExpired {
            target: unit.clone(),
            status,
        });
    }
    if report.knocked_out {
        state.push_event(BattleEvent::Ko { unit: unit.clone() });
    }
    if let Some(hp) = report.revived {
        state.push_event(BattleEvent::Revived {
            unit: unit.clone(),
            hp: hp as u32,
        });
    }
}

fn damage_kind(kind: AbilityKind) -> DamageKind {
    match kind {
        AbilityKind::Psynergy => DamageKind::Psynergy,
        AbilityKind::Summon => DamageKind::Summon,
        _ => DamageKind::Physical,
    }
}

/// Raw pre-mitigation damage of one hit.
fn raw_damage(
    kind: DamageKind,
    definition: &AbilityDefinition,
    attacker: &crate::stats::Stats,
    defender: &Unit,
    defender_stats: &crate::stats::Stats,
) -> f64 {
    match kind {
        DamageKind::Physical => f64::from(physical_damage(
            definition.base_power,
            attacker,
            defender_stats,
            definition.ignore_def_percent,
        )),
        DamageKind::Psynergy => psynergy_damage(
            definition.base_power,
            definition.element,
            attacker,
            defender,
            defender_stats,
            definition.ignore_def_percent,
        ),
        DamageKind::Summon => f64::from(definition.base_power),
    }
}

fn deal_damage(
    state: &mut BattleState,
    actor: &UnitId,
    definition: &AbilityDefinition,
    targets: &[UnitId],
    rng: &mut SeededRng,
) {
    let Some(attacker) = state.effective_stats(actor) else {
        return;
    };
    let kind = damage_kind(definition.kind);
    let hits = definition.hits.max(1);
    let mut primary: Option<i32> = None;

    for target in targets {
        let mut landed = false;
        for _ in 0..hits {
            let Some(defender_stats) = state.effective_stats(target) else {
                break;
            };
            let Some(defender) = state.unit(target).filter(|unit| unit.is_alive()) else {
                break;
            };
            let raw = raw_damage(kind, definition, &attacker, defender, &defender_stats);
            let amount = mitigate(raw, kind, definition.element, defender);
            match strike(state, Some(actor), target, amount, definition.element) {
                Some(DamageOutcome::Dealt { amount, .. }) => {
                    landed = true;
                    primary.get_or_insert(amount);
                }
                Some(DamageOutcome::Blocked(_)) => {}
                None => break,
            }
        }
        if landed {
            roll_on_hit(state, target, definition, rng);
        }
    }

    splash(state, actor, definition, targets, primary);
}

/// Spreads a fraction of the primary hit to every other living unit on the
/// primary target's side.
fn splash(
    state: &mut BattleState,
    actor: &UnitId,
    definition: &AbilityDefinition,
    targets: &[UnitId],
    primary: Option<i32>,
) {
    if definition.splash_percent <= 0.0 || definition.target.is_area() {
        return;
    }
    let (Some(main), Some(primary)) = (targets.first(), primary) else {
        return;
    };
    let Some(side) = state.side_of(main) else {
        return;
    };
    let amount = (f64::from(primary) * definition.splash_percent).floor() as i32;
    if amount <= 0 {
        return;
    }
    for other in state.living_ids(side) {
        if &other != main {
            strike(state, Some(actor), &other, amount, definition.element);
        }
    }
}

fn roll_on_hit(
    state: &mut BattleState,
    target: &UnitId,
    definition: &AbilityDefinition,
    rng: &mut SeededRng,
) {
    let Some(on_hit) = &definition.on_hit else {
        return;
    };
    if state.unit(target).is_none_or(Unit::is_ko) {
        return;
    }
    if rng.chance(on_hit.chance) {
        inflict(state, target, on_hit.effect.clone());
    }
}

fn restore(
    state: &mut BattleState,
    actor: &UnitId,
    definition: &AbilityDefinition,
    targets: &[UnitId],
) {
    let magic = state.effective_stats(actor).map_or(0, |stats| stats.mag);
    let amount = healing_amount(definition.base_power, magic);
    for target in targets {
        let Some(unit) = state.unit_mut(target) else {
            continue;
        };
        if unit.is_ko() {
            if !definition.revive {
                continue;
            }
            if let Some(hp) = revive(unit, definition.revive_percent) {
                state.push_event(BattleEvent::Revived {
                    unit: target.clone(),
                    hp: hp as u32,
                });
            }
            continue;
        }
        if amount > 0 {
            mend(state, target, amount);
        }
    }
}

/// Status removal and protective grants carried by any ability kind.
///
/// Grants land on the targets of ally-side abilities and on the caster of
/// enemy-side ones.
fn support(
    state: &mut BattleState,
    actor: &UnitId,
    definition: &AbilityDefinition,
    targets: &[UnitId],
) {
    if let Some(removal) = &definition.remove_statuses {
        for target in targets {
            let Some(unit) = state.unit_mut(target) else {
                continue;
            };
            let removed = cleanse(unit, removal);
            clamp_hp(unit);
            for status in removed {
                state.push_event(BattleEvent::StatusExpired {
                    target: target.clone(),
                    status,
                });
            }
        }
    }

    let recipients: Vec<UnitId> = match definition.target.side() {
        TargetSide::Ally => targets.to_vec(),
        TargetSide::Enemy => vec![actor.clone()],
    };
    let mut grants = Vec::new();
    if let Some(charges) = definition.grant_shield {
        grants.push(StatusEffect::Shield { charges });
    }
    if let Some(hot) = definition.heal_over_time {
        grants.push(StatusEffect::HealOverTime {
            amount: hot.amount,
            duration: hot.duration,
        });
    }
    if let Some(reduction) = definition.grant_damage_reduction {
        grants.push(StatusEffect::DamageReduction {
            percent: reduction.percent,
            duration: reduction.duration,
        });
    }
    if let Some(resistance) = definition.grant_elemental_resistance {
        grants.push(StatusEffect::ElementalResistance {
            element: resistance.element,
            percent: resistance.percent,
            duration: resistance.duration,
        });
    }
    if let Some(immunity) = &definition.grant_immunity {
        grants.push(StatusEffect::Immunity {
            scope: immunity.scope.clone(),
            duration: immunity.duration,
        });
    }
    if grants.is_empty() {
        return;
    }
    for recipient in &recipients {
        for grant in &grants {
            inflict(state, recipient, grant.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{AbilityOracle, DjinnDefinition, DjinnOracle};
    use crate::state::{DjinnId, Element, EncounterId, QueuedAction, StatusKind, Team};
    use crate::stats::Stats;

    #[derive(Default)]
    struct Fixture {
        abilities: HashMap<AbilityId, AbilityDefinition>,
    }

    impl AbilityOracle for Fixture {
        fn definition(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
            self.abilities.get(id)
        }
    }

    impl DjinnOracle for Fixture {
        fn definition(&self, _id: &DjinnId) -> Option<&DjinnDefinition> {
            None
        }
    }

    fn fixture(abilities: impl IntoIterator<Item = AbilityDefinition>) -> Fixture {
        Fixture {
            abilities: abilities
                .into_iter()
                .map(|ability| (ability.id.clone(), ability))
                .collect(),
        }
    }

    fn battle(enemies: usize) -> BattleState {
        let mut team = Team::new();
        team.add_unit(
            Unit::new("hero", Element::Venus, Stats::new(100, 20, 10, 10, 10, 10))
                .with_abilities(["twin".into(), "cleave".into(), "venom".into()]),
        )
        .unwrap();
        let foes = (0..enemies)
            .map(|i| {
                let mut unit = Unit::new(
                    format!("slime_{i}"),
                    Element::Neutral,
                    Stats::new(50, 0, 10, 10, 10, 5),
                );
                unit.current_hp = 50;
                unit
            })
            .collect();
        let mut state = BattleState::new(EncounterId::from("test"), 7, team, foes);
        if let Some(hero) = state.party.units.first_mut() {
            hero.current_hp = 100;
        }
        state
    }

    fn run(state: &mut BattleState, fixture: &Fixture, action: QueuedAction) {
        let config = BattleConfig::new();
        let ctx = TransitionContext {
            env: BattleEnv::new(fixture, fixture),
            config: &config,
        };
        let mut streams = RoundStreams::new(state.seed, 1);
        perform(state, &ctx, &action, &mut streams).unwrap();
    }

    #[test]
    fn basic_attack_generates_mana_for_the_party() {
        let fixture = fixture([]);
        let mut state = battle(1);
        state.mana.remaining = 0;
        run(
            &mut state,
            &fixture,
            QueuedAction::basic_attack("hero".into(), "slime_0".into()),
        );
        assert_eq!(state.mana.remaining, 1);
        assert_eq!(state.enemies[0].current_hp, 35);
    }

    #[test]
    fn multi_hit_stops_once_the_target_falls() {
        let fixture = fixture([AbilityDefinition::physical("twin", 30).with_hits(3)]);
        let mut state = battle(1);
        run(
            &mut state,
            &fixture,
            QueuedAction::ability("hero".into(), "twin".into(), vec!["slime_0".into()], 0),
        );
        let hits = state
            .log
            .iter()
            .filter(|event| matches!(event, BattleEvent::Hit { .. }))
            .count();
        assert_eq!(hits, 2);
        assert!(state.enemies[0].is_ko());
    }

    #[test]
    fn splash_reaches_the_other_enemies() {
        let fixture = fixture([AbilityDefinition::physical("cleave", 10).with_splash(0.5)]);
        let mut state = battle(3);
        run(
            &mut state,
            &fixture,
            QueuedAction::ability("hero".into(), "cleave".into(), vec!["slime_1".into()], 0),
        );
        // 10 + 10 - 5 = 15 on the primary, half of that on the rest.
        assert_eq!(state.enemies[1].current_hp, 35);
        assert_eq!(state.enemies[0].current_hp, 43);
        assert_eq!(state.enemies[2].current_hp, 43);
    }

    #[test]
    fn guaranteed_on_hit_status_lands() {
        let fixture = fixture([
            AbilityDefinition::physical("venom", 5)
                .with_on_hit(StatusEffect::Poison { duration: 3 }, 1.0),
        ]);
        let mut state = battle(1);
        run(
            &mut state,
            &fixture,
            QueuedAction::ability("hero".into(), "venom".into(), vec!["slime_0".into()], 0),
        );
        assert!(state.enemies[0].statuses.has(StatusKind::Poison));
    }

    #[test]
    fn knocked_out_actors_are_skipped() {
        let fixture = fixture([]);
        let mut state = battle(1);
        state.party.units[0].current_hp = 0;
        run(
            &mut state,
            &fixture,
            QueuedAction::basic_attack("hero".into(), "slime_0".into()),
        );
        assert_eq!(
            state.log,
            vec![BattleEvent::ActionSkipped {
                actor: "hero".into()
            }]
        );
    }

    #[test]
    fn stunned_actor_is_blocked() {
        let fixture = fixture([]);
        let mut state = battle(1);
        state.party.units[0]
            .statuses
            .push(StatusEffect::Stun { duration: 2 });
        run(
            &mut state,
            &fixture,
            QueuedAction::basic_attack("hero".into(), "slime_0".into()),
        );
        assert!(state.log.contains(&BattleEvent::ActionBlocked {
            actor: "hero".into(),
            reason: BlockReason::Stunned,
        }));
        assert_eq!(state.enemies[0].current_hp, 50);
    }
}
