use crate::state::{AbilityId, BattleStatus, DjinnId, Element, StatusKind, UnitId};

/// Why an action resolved as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BlockReason {
    Frozen,
    Stunned,
    Paralyzed,
    NoValidTargets,
    /// Actor fell to a start-of-turn damage tick.
    KnockedOut,
}

/// How a damaging hit was stopped before reaching HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Mitigation {
    Invulnerable,
    Shield,
}

/// Presentation- and reward-facing record of everything that happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
    },
    AbilityUsed {
        actor: UnitId,
        /// `None` for a basic attack.
        ability: Option<AbilityId>,
        targets: Vec<UnitId>,
    },
    Hit {
        source: Option<UnitId>,
        target: UnitId,
        amount: u32,
        element: Element,
    },
    HitBlocked {
        target: UnitId,
        by: Mitigation,
    },
    Heal {
        target: UnitId,
        amount: u32,
    },
    StatusApplied {
        target: UnitId,
        status: StatusKind,
    },
    StatusResisted {
        target: UnitId,
        status: StatusKind,
    },
    StatusExpired {
        target: UnitId,
        status: StatusKind,
    },
    StatusDamage {
        target: UnitId,
        status: StatusKind,
        amount: u32,
    },
    ActionBlocked {
        actor: UnitId,
        reason: BlockReason,
    },
    ActionSkipped {
        actor: UnitId,
    },
    Ko {
        unit: UnitId,
    },
    Revived {
        unit: UnitId,
        hp: u32,
    },
    ManaGenerated {
        unit: UnitId,
        amount: u32,
    },
    DjinnStandby {
        djinn: DjinnId,
        recovery: u32,
    },
    DjinnRecovered {
        djinn: DjinnId,
    },
    Summon {
        djinn: Vec<DjinnId>,
        damage: u32,
        targets: Vec<UnitId>,
    },
    BattleEnd {
        status: BattleStatus,
        round: u32,
    },
}

impl BattleEvent {
    /// Short stable name of the event variant.
    pub fn name(&self) -> &'static str {
        match self {
            BattleEvent::RoundStarted { .. } => "round_started",
            BattleEvent::AbilityUsed { .. } => "ability_used",
            BattleEvent::Hit { .. } => "hit",
            BattleEvent::HitBlocked { .. } => "hit_blocked",
            BattleEvent::Heal { .. } => "heal",
            BattleEvent::StatusApplied { .. } => "status_applied",
            BattleEvent::StatusResisted { .. } => "status_resisted",
            BattleEvent::StatusExpired { .. } => "status_expired",
            BattleEvent::StatusDamage { .. } => "status_damage",
            BattleEvent::ActionBlocked { .. } => "action_blocked",
            BattleEvent::ActionSkipped { .. } => "action_skipped",
            BattleEvent::Ko { .. } => "ko",
            BattleEvent::Revived { .. } => "revived",
            BattleEvent::ManaGenerated { .. } => "mana_generated",
            BattleEvent::DjinnStandby { .. } => "djinn_standby",
            BattleEvent::DjinnRecovered { .. } => "djinn_recovered",
            BattleEvent::Summon { .. } => "summon",
            BattleEvent::BattleEnd { .. } => "battle_end",
        }
    }
}
