/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Runs the full invariant pass after every committed command.
    pub check_invariants: bool,

    /// Fraction of max HP lost to poison each tick.
    pub poison_percent: f64,
    /// Fraction of max HP lost to burn each tick.
    pub burn_percent: f64,
    /// Chance that freeze breaks on a tick.
    pub freeze_break_chance: f64,
    /// Chance that a paralyzed unit fails its action.
    pub paralyze_fail_chance: f64,

    /// Summon damage indexed by activated Djinn count minus one.
    pub summon_damage: [u32; 3],

    /// Score window inside which the decision engine picks between the top two.
    pub decision_tie_window: f64,
    /// Bonus added to abilities flagged as openers during round 1.
    pub opener_bonus: f64,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of units in the party.
    pub const MAX_PARTY: usize = 4;
    /// Maximum number of Djinn equipped at once.
    pub const MAX_EQUIPPED_DJINN: usize = 3;
    /// Equipment slots per unit (weapon, armor, helm, boots, accessory).
    pub const EQUIPMENT_SLOTS: usize = 5;
    /// Highest mana cost an ability may declare.
    pub const MAX_ABILITY_COST: u8 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_POISON_PERCENT: f64 = 0.08;
    pub const DEFAULT_BURN_PERCENT: f64 = 0.10;
    pub const DEFAULT_FREEZE_BREAK_CHANCE: f64 = 0.30;
    pub const DEFAULT_PARALYZE_FAIL_CHANCE: f64 = 0.25;
    pub const DEFAULT_SUMMON_DAMAGE: [u32; 3] = [80, 150, 300];
    pub const DEFAULT_DECISION_TIE_WINDOW: f64 = 2.0;
    pub const DEFAULT_OPENER_BONUS: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            check_invariants: cfg!(debug_assertions),
            poison_percent: Self::DEFAULT_POISON_PERCENT,
            burn_percent: Self::DEFAULT_BURN_PERCENT,
            freeze_break_chance: Self::DEFAULT_FREEZE_BREAK_CHANCE,
            paralyze_fail_chance: Self::DEFAULT_PARALYZE_FAIL_CHANCE,
            summon_damage: Self::DEFAULT_SUMMON_DAMAGE,
            decision_tie_window: Self::DEFAULT_DECISION_TIE_WINDOW,
            opener_bonus: Self::DEFAULT_OPENER_BONUS,
        }
    }

    /// Returns a copy with invariant checking forced on or off.
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    /// Summon damage for `count` activated Djinn (1–3).
    pub fn summon_damage_for(&self, count: usize) -> u32 {
        match count {
            0 => 0,
            n => self.summon_damage[n.min(Self::MAX_EQUIPPED_DJINN) - 1],
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
