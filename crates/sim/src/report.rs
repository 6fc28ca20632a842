//! Per-run summaries and batch aggregates.

use battle_core::{BattleState, BattleStatus, EncounterId, Side};
use serde::Serialize;

/// Outcome of one simulated battle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u32,
    /// `Ongoing` when the run hit the round limit.
    pub status: BattleStatus,
    pub rounds: u32,
    pub survivors: usize,
    /// Remaining party HP as a percentage of the party's effective max HP.
    pub survivor_hp_percent: f64,
    pub digest: String,
}

impl RunSummary {
    pub fn from_state(state: &BattleState) -> Self {
        let (current, max) = state
            .party
            .units
            .iter()
            .filter_map(|unit| {
                let max = state.effective_stats(&unit.id)?.hp;
                Some((unit.current_hp.max(0) as i64, max as i64))
            })
            .fold((0i64, 0i64), |(hp, total), (current, max)| {
                (hp + current, total + max)
            });
        let survivor_hp_percent = if max > 0 {
            current as f64 * 100.0 / max as f64
        } else {
            0.0
        };

        Self {
            seed: state.seed,
            status: state.progress.status,
            rounds: state.round(),
            survivors: state.living(Side::Party).count(),
            survivor_hp_percent,
            digest: hex::encode(state.digest()),
        }
    }
}

/// Aggregate over a batch of runs with the same party and encounter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchReport {
    pub encounter: EncounterId,
    pub party: String,
    pub policy: String,
    pub runs: usize,
    pub victories: usize,
    pub defeats: usize,
    pub unfinished: usize,
    pub win_rate: f64,
    pub average_rounds: f64,
    /// Mean survivor HP percentage over victories only.
    pub average_survivor_hp_percent: f64,
    pub summaries: Vec<RunSummary>,
}

impl BatchReport {
    pub fn new(
        encounter: EncounterId,
        party: impl Into<String>,
        policy: impl Into<String>,
        summaries: Vec<RunSummary>,
    ) -> Self {
        let runs = summaries.len();
        let count = |status: BattleStatus| summaries.iter().filter(|s| s.status == status).count();
        let victories = count(BattleStatus::Victory);
        let defeats = count(BattleStatus::Defeat);
        let unfinished = count(BattleStatus::Ongoing);

        let average_rounds = mean(summaries.iter().map(|s| f64::from(s.rounds)));
        let average_survivor_hp_percent = mean(
            summaries
                .iter()
                .filter(|s| s.status == BattleStatus::Victory)
                .map(|s| s.survivor_hp_percent),
        );
        let win_rate = if runs == 0 {
            0.0
        } else {
            victories as f64 / runs as f64
        };

        Self {
            encounter,
            party: party.into(),
            policy: policy.into(),
            runs,
            victories,
            defeats,
            unfinished,
            win_rate,
            average_rounds,
            average_survivor_hp_percent,
            summaries,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
