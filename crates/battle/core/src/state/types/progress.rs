/// Phase of the battle state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    Planning,
    Executing,
    Victory,
    Defeat,
}

impl BattlePhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::Victory | BattlePhase::Defeat)
    }

    /// Status that must accompany this phase.
    pub const fn status(self) -> BattleStatus {
        match self {
            BattlePhase::Planning | BattlePhase::Executing => BattleStatus::Ongoing,
            BattlePhase::Victory => BattleStatus::Victory,
            BattlePhase::Defeat => BattleStatus::Defeat,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleStatus {
    #[default]
    Ongoing,
    Victory,
    Defeat,
}

/// Phase bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleProgress {
    pub phase: BattlePhase,
    pub status: BattleStatus,
    /// Actions resolved so far across the whole battle.
    pub current_turn: u32,
    /// 1-based round counter.
    pub round: u32,
}

impl Default for BattleProgress {
    fn default() -> Self {
        Self {
            phase: BattlePhase::Planning,
            status: BattleStatus::Ongoing,
            current_turn: 0,
            round: 1,
        }
    }
}

impl BattleProgress {
    pub fn enter(&mut self, phase: BattlePhase) {
        self.phase = phase;
        self.status = phase.status();
    }
}

/// Team-wide mana pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManaPool {
    pub remaining: u32,
    pub max: u32,
}

impl ManaPool {
    pub fn full(max: u32) -> Self {
        Self {
            remaining: max,
            max,
        }
    }

    pub fn refill(&mut self) {
        self.remaining = self.max;
    }

    /// Adds mana up to the cap and returns the amount actually gained.
    pub fn gain(&mut self, amount: u32) -> u32 {
        let before = self.remaining;
        self.remaining = (self.remaining + amount).min(self.max);
        self.remaining - before
    }
}
