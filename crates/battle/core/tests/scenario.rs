mod common;

use battle_core::{
    BattleCommand, BattleConfig, BattleEngine, BattleEvent, BattlePhase, BattleSetup, BattleState,
    BlockReason, Mitigation, StatusEffect, UnitId,
};
use common::{Content, adept, dummy, play_round};

fn hits_by(events: &[BattleEvent], source: &str) -> Vec<u32> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::Hit {
                source: Some(id),
                amount,
                ..
            } if id.as_str() == source => Some(*amount),
            _ => None,
        })
        .collect()
}

/// Isaac (ATK 10) basic-attacks a 50 HP slime with the given DEF until one
/// side falls.
fn basic_attack_battle_against(seed: u32, def: i32) -> BattleState {
    let content = Content::new();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);

    let mut state = BattleSetup::new("training_ground", seed)
        .party_unit(adept("isaac", 10))
        .enemy(dummy("slime", 50, def, 5))
        .build(&content.env())
        .unwrap();

    for _ in 0..10 {
        if state.is_over() {
            break;
        }
        state = play_round(&engine, &state, [BattleCommand::basic_attack("isaac", "slime")]).state;
    }
    state
}

fn basic_attack_battle(seed: u32) -> BattleState {
    basic_attack_battle_against(seed, 10)
}

#[test]
fn basic_attacks_win_in_four_hits() {
    let state = basic_attack_battle(12345);

    assert_eq!(state.phase(), BattlePhase::Victory);
    assert_eq!(state.round(), 4);
    assert_eq!(hits_by(&state.log, "isaac"), vec![15, 15, 15, 15]);
    assert!(state.enemies[0].is_ko());
    assert!(state.log.contains(&BattleEvent::ActionSkipped {
        actor: UnitId::from("slime"),
    }));
    assert!(matches!(
        state.log.last(),
        Some(BattleEvent::BattleEnd { round: 4, .. })
    ));
}

#[test]
fn thinner_armor_ends_the_fight_a_round_earlier() {
    // floor(10 + 10 - 5 * 0.5) = 17, and the last hit only has 16 HP left to take.
    let state = basic_attack_battle_against(12345, 5);

    assert_eq!(state.phase(), BattlePhase::Victory);
    assert_eq!(state.round(), 3);
    assert_eq!(hits_by(&state.log, "isaac"), vec![17, 17, 16]);
    assert_eq!(hits_by(&state.log, "slime"), vec![1, 1]);
}

#[test]
fn same_seed_same_battle() {
    assert_eq!(basic_attack_battle(12345), basic_attack_battle(12345));
}

#[cfg(feature = "serde")]
#[test]
fn same_seed_same_digest() {
    let first = hex::encode(basic_attack_battle(12345).digest());
    let second = hex::encode(basic_attack_battle(12345).digest());
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
}

#[test]
fn party_acts_first_on_speed_ties() {
    let content = Content::new();
    let config = BattleConfig::new();
    let engine = BattleEngine::new(content.env(), &config);

    for seed in 1..=25 {
        let state = BattleSetup::new("mirror", seed)
            .party_unit(adept("zed", 7))
            .enemy(dummy("able", 500, 10, 7))
            .build(&content.env())
            .unwrap();
        let outcome = play_round(&engine, &state, [BattleCommand::basic_attack("zed", "able")]);

        let first_actor = outcome.events.iter().find_map(|event| match event {
            BattleEvent::AbilityUsed { actor, .. } => Some(actor.clone()),
            _ => None,
        });
        assert_eq!(first_actor, Some(UnitId::from("zed")), "seed {seed}");
    }
}

#[test]
fn shield_blocks_two_hits_then_breaks() {
    let content = Content::new();
    let config = BattleConfig::new().with_invariant_checks(true);
    let engine = BattleEngine::new(content.env(), &config);

    let mut state = BattleSetup::new("bulwark", 1)
        .party_unit(adept("isaac", 10))
        .enemy(dummy("golem", 200, 10, 5))
        .build(&content.env())
        .unwrap();
    state.enemies[0]
        .statuses
        .push(StatusEffect::Shield { charges: 2 });

    let mut events = Vec::new();
    for _ in 0..3 {
        let outcome = play_round(&engine, &state, [BattleCommand::basic_attack("isaac", "golem")]);
        events.extend(outcome.events);
        state = outcome.state;
    }

    let blocked = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                BattleEvent::HitBlocked {
                    by: Mitigation::Shield,
                    ..
                }
            )
        })
        .count();
    assert_eq!(blocked, 2);
    assert_eq!(hits_by(&events, "isaac"), vec![15]);
    assert_eq!(state.enemies[0].current_hp, 185);
}

#[test]
fn damage_never_drops_below_one() {
    let content = Content::new();
    let config = BattleConfig::new();
    let engine = BattleEngine::new(content.env(), &config);

    let mut weakling = adept("isaac", 10);
    weakling.base.atk = 1;
    let state = BattleSetup::new("fortress", 5)
        .party_unit(weakling)
        .enemy(dummy("wall", 100, 100, 1))
        .build(&content.env())
        .unwrap();

    let outcome = play_round(&engine, &state, [BattleCommand::basic_attack("isaac", "wall")]);
    assert_eq!(hits_by(&outcome.events, "isaac"), vec![1]);
    assert_eq!(hits_by(&outcome.events, "wall"), vec![1]);
}

#[test]
fn stunned_enemy_loses_its_turn() {
    let content = Content::new();
    let config = BattleConfig::new();
    let engine = BattleEngine::new(content.env(), &config);

    let mut state = BattleSetup::new("stun", 5)
        .party_unit(adept("isaac", 10))
        .enemy(dummy("slime", 100, 10, 5))
        .build(&content.env())
        .unwrap();
    state.enemies[0]
        .statuses
        .push(StatusEffect::Stun { duration: 2 });

    let outcome = play_round(&engine, &state, [BattleCommand::basic_attack("isaac", "slime")]);
    assert!(outcome.events.contains(&BattleEvent::ActionBlocked {
        actor: UnitId::from("slime"),
        reason: BlockReason::Stunned,
    }));
    assert!(hits_by(&outcome.events, "slime").is_empty());
}
