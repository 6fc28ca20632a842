mod common;

use battle_core::env::StatusRemoval;
use battle_core::state::ImmunityScope;
use battle_core::{
    AbilityDefinition, AbilityId, BattleCommand, BattleConfig, BattleEngine, BattleEvent,
    BattleSetup, Element, Stats, StatusEffect, StatusKind, Unit, UnitId,
};
use common::{Content, adept, dummy, play_round};

fn content() -> Content {
    Content::new()
        .ability(
            AbilityDefinition::buff("ward", Stats::ZERO)
                .with_shield(2)
                .with_damage_reduction(0.5, 3)
                .with_resistance(Element::Mars, 0.3, 3)
                .with_immunity(ImmunityScope::All, 3),
        )
        .ability(AbilityDefinition::debuff("sap", Stats::new(0, 0, -3, 0, 0, 0)))
        .ability(AbilityDefinition::healing("purify", 0).with_removal(StatusRemoval::AllNegative))
        .ability(AbilityDefinition::healing("raise", 10).with_revive(0.5))
        .ability(AbilityDefinition::healing("cure", 10))
}

fn knowing(mut unit: Unit, abilities: &[&str]) -> Unit {
    unit.abilities.extend(abilities.iter().map(|id| AbilityId::from(*id)));
    unit
}

#[test]
fn ward_grants_every_protection_and_blocks_the_next_debuff() {
    let content = content();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);
    let state = BattleSetup::new("shrine", 3)
        .party_unit(knowing(adept("felix", 10), &["ward"]))
        .enemy(knowing(dummy("slime", 500, 10, 5), &["sap"]))
        .build(&content.env())
        .unwrap();

    let outcome = play_round(
        &engine,
        &state,
        [BattleCommand::use_ability("felix", "ward", vec!["felix".into()])],
    );
    let felix = &outcome.state.party.units[0];
    for kind in [
        StatusKind::Shield,
        StatusKind::DamageReduction,
        StatusKind::ElementalResistance,
        StatusKind::Immunity,
    ] {
        assert!(felix.statuses.has(kind), "missing {kind:?}");
        assert!(outcome.events.contains(&BattleEvent::StatusApplied {
            target: UnitId::from("felix"),
            status: kind,
        }));
    }
    assert_eq!(felix.statuses.damage_reduction(), 0.5);
    assert_eq!(felix.statuses.elemental_resistance(Element::Mars), 0.3);

    // The slime's only move is the debuff, which the immunity turns away.
    assert!(outcome.events.contains(&BattleEvent::StatusResisted {
        target: UnitId::from("felix"),
        status: StatusKind::Debuff,
    }));
    assert!(!felix.statuses.has(StatusKind::Debuff));
    assert_eq!(outcome.state.effective_stats(&felix.id).unwrap().def, 10);
}

#[test]
fn purify_strips_negative_statuses_and_keeps_buffs() {
    let content = content();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);
    let mut state = BattleSetup::new("shrine", 5)
        .party_unit(knowing(adept("isaac", 10), &["purify"]))
        .party_unit(adept("felix", 8))
        .enemy(dummy("slime", 500, 10, 5))
        .build(&content.env())
        .unwrap();
    let felix = &mut state.party.units[1];
    felix.statuses.push(StatusEffect::Poison { duration: 3 });
    felix.statuses.push(StatusEffect::Buff {
        modifier: Stats::new(0, 0, 4, 0, 0, 0),
        duration: 3,
    });

    let outcome = play_round(
        &engine,
        &state,
        [
            BattleCommand::use_ability("isaac", "purify", vec!["felix".into()]),
            BattleCommand::basic_attack("felix", "slime"),
        ],
    );
    assert!(outcome.events.contains(&BattleEvent::StatusExpired {
        target: UnitId::from("felix"),
        status: StatusKind::Poison,
    }));
    // Cleansed before felix's own turn, so poison never ticks.
    assert!(!outcome.events.iter().any(|event| matches!(
        event,
        BattleEvent::StatusDamage { target, .. } if target.as_str() == "felix"
    )));
    let felix = &outcome.state.party.units[1];
    assert!(!felix.statuses.has(StatusKind::Poison));
    assert!(felix.statuses.has(StatusKind::Buff));
}

#[test]
fn raise_brings_a_fallen_ally_back_at_half_health() {
    let content = content();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);
    let mut state = BattleSetup::new("shrine", 8)
        .party_unit(knowing(adept("isaac", 10), &["raise", "cure"]))
        .party_unit(adept("felix", 8))
        .enemy(dummy("slime", 500, 10, 5))
        .build(&content.env())
        .unwrap();
    state.party.units[1].current_hp = 0;

    // Plain healing cannot target a knocked-out ally.
    assert!(
        engine
            .execute(
                &state,
                &BattleCommand::use_ability("isaac", "cure", vec!["felix".into()]),
            )
            .is_err()
    );

    let outcome = play_round(
        &engine,
        &state,
        [BattleCommand::use_ability("isaac", "raise", vec!["felix".into()])],
    );
    assert!(outcome.events.contains(&BattleEvent::Revived {
        unit: UnitId::from("felix"),
        hp: 50,
    }));
    let felix = &outcome.state.party.units[1];
    assert!(felix.is_alive());
    assert!(felix.current_hp >= 49);
}
