mod common;

use battle_core::{
    AbilityDefinition, AbilityId, AbilityKind, BattleCommand, BattleConfig, BattleEngine,
    BattleEvent, BattleSetup, BattleState, BlockReason, StatusEffect, StatusKind, TargetMode,
    UnitId,
};
use common::{Content, adept, dummy, play_round};

fn content() -> Content {
    Content::new().ability(
        AbilityDefinition::new("renew", AbilityKind::Buff, TargetMode::SingleAlly)
            .with_heal_over_time(10, 3),
    )
}

fn felix_vs_slime(content: &Content, seed: u32) -> BattleState {
    let mut felix = adept("felix", 10);
    felix.abilities.push(AbilityId::from("renew"));
    BattleSetup::new("marsh", seed)
        .party_unit(felix)
        .enemy(dummy("slime", 500, 10, 5))
        .build(&content.env())
        .unwrap()
}

fn paralyzed(content: &Content) -> BattleState {
    let mut state = felix_vs_slime(content, 9);
    state.party.units[0]
        .statuses
        .push(StatusEffect::Paralyze { duration: 3 });
    state
}

#[test]
fn paralysis_that_fires_blocks_the_action() {
    let content = content();
    let mut config = BattleConfig::new().with_invariant_checks(true);
    config.paralyze_fail_chance = 1.0;
    let engine = BattleEngine::new(content.env(), &config);

    let outcome = play_round(
        &engine,
        &paralyzed(&content),
        [BattleCommand::basic_attack("felix", "slime")],
    );
    assert!(outcome.events.contains(&BattleEvent::ActionBlocked {
        actor: UnitId::from("felix"),
        reason: BlockReason::Paralyzed,
    }));
    assert_eq!(outcome.state.enemies[0].current_hp, 500);
    assert!(!outcome.events.iter().any(|event| matches!(
        event,
        BattleEvent::AbilityUsed { actor, .. } if actor.as_str() == "felix"
    )));
}

#[test]
fn paralysis_that_misses_lets_the_unit_act() {
    let content = content();
    let mut config = BattleConfig::new().with_invariant_checks(true);
    config.paralyze_fail_chance = 0.0;
    let engine = BattleEngine::new(content.env(), &config);

    let outcome = play_round(
        &engine,
        &paralyzed(&content),
        [BattleCommand::basic_attack("felix", "slime")],
    );
    assert_eq!(outcome.state.enemies[0].current_hp, 485);
    assert!(outcome.state.party.units[0].statuses.has(StatusKind::Paralyze));
}

#[test]
fn heal_over_time_restores_hp_each_turn() {
    let content = content();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);

    let mut state = felix_vs_slime(&content, 4);
    state.party.units[0].current_hp = 60;

    let round1 = play_round(
        &engine,
        &state,
        [BattleCommand::use_ability("felix", "renew", vec!["felix".into()])],
    );
    assert!(round1.events.contains(&BattleEvent::StatusApplied {
        target: UnitId::from("felix"),
        status: StatusKind::HealOverTime,
    }));
    // Granted after felix's own tick, so nothing heals yet; the slime hits for 1.
    assert_eq!(round1.state.party.units[0].current_hp, 59);

    let round2 = play_round(
        &engine,
        &round1.state,
        [BattleCommand::basic_attack("felix", "slime")],
    );
    assert!(round2.events.contains(&BattleEvent::Heal {
        target: UnitId::from("felix"),
        amount: 10,
    }));
    assert_eq!(round2.state.party.units[0].current_hp, 68);
}
