//! Start-of-turn status processing.

use crate::combat::{apply_heal, try_auto_revive};
use crate::config::BattleConfig;
use crate::env::SeededRng;
use crate::state::{BlockReason, StatusEffect, StatusKind, Unit};
use crate::stats::max_hp;

/// Everything a single tick did to one unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Damage dealt by poison and burn, in effect order.
    pub damage: Vec<(StatusKind, i32)>,
    pub healed: i32,
    pub expired: Vec<StatusKind>,
    /// Set when the unit cannot act this turn.
    pub blocked: Option<BlockReason>,
    pub knocked_out: bool,
    pub revived: Option<i32>,
}

/// Runs one tick for `unit`, immediately before it acts.
///
/// 1. Every timed effect loses one turn of duration.
/// 2. Poison and burn deal a fraction of max HP, heal-over-time restores its
///    amount, freeze rolls to break, stun blocks.
/// 3. Effects at or below zero duration or uses are pruned.
///
/// Effects that reach zero in step 1 still act in step 2.
pub fn tick_unit(unit: &mut Unit, config: &BattleConfig, rng: &mut SeededRng) -> TickReport {
    let mut report = TickReport::default();

    for effect in unit.statuses.iter_mut() {
        effect.tick_duration();
    }

    let max = max_hp(unit);
    let mut freeze_broken = false;
    let active: Vec<StatusEffect> = unit.statuses.iter().cloned().collect();
    for effect in &active {
        match effect {
            StatusEffect::Poison { .. } | StatusEffect::Burn { .. } => {
                if unit.is_ko() {
                    continue;
                }
                let percent = if effect.kind() == StatusKind::Poison {
                    config.poison_percent
                } else {
                    config.burn_percent
                };
                let amount = (f64::from(max) * percent).floor() as i32;
                if amount > 0 {
                    let before = unit.current_hp;
                    unit.current_hp = (before - amount).max(0);
                    let lost = before - unit.current_hp;
                    unit.counters.damage_taken += lost as u32;
                    report.damage.push((effect.kind(), lost));
                    if unit.is_ko() {
                        report.knocked_out = true;
                        report.revived = try_auto_revive(unit);
                    }
                }
            }
            StatusEffect::HealOverTime { amount, .. } => {
                report.healed += apply_heal(unit, *amount);
            }
            StatusEffect::Freeze { .. } => {
                if rng.chance(config.freeze_break_chance) {
                    freeze_broken = true;
                } else {
                    report.blocked.get_or_insert(BlockReason::Frozen);
                }
            }
            StatusEffect::Stun { .. } => {
                report.blocked.get_or_insert(BlockReason::Stunned);
            }
            _ => {}
        }
    }

    let mut removed = unit.statuses.drain_where(|effect| {
        effect.is_expired() || (freeze_broken && effect.kind() == StatusKind::Freeze)
    });
    report.expired = removed.drain(..).map(|effect| effect.kind()).collect();

    if unit.is_ko() {
        report.blocked = Some(BlockReason::KnockedOut);
    }
    report
}

/// Rolls the paralysis check at action time. No draw is made for units
/// without paralysis.
pub fn paralysis_fails(unit: &Unit, config: &BattleConfig, rng: &mut SeededRng) -> bool {
    unit.statuses.has(StatusKind::Paralyze) && rng.chance(config.paralyze_fail_chance)
}
