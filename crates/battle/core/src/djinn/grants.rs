use crate::djinn::SynergyPattern;
use crate::env::BattleEnv;
use crate::state::{AbilityId, Compatibility, DjinnState, Team, Unit};

/// Abilities the team's Djinn currently grant to `unit`.
///
/// Set Djinn grant their same- or neutral-tier list. Standby Djinn grant their
/// counter-tier list to units whose element opposes theirs. A synergy pattern
/// may add one team ability on top. Djinn missing from the oracle grant
/// nothing.
pub fn granted_abilities(unit: &Unit, team: &Team, env: &BattleEnv<'_>) -> Vec<AbilityId> {
    let mut granted = Vec::new();
    for equipped in &team.equipped_djinn {
        let Some(definition) = env.djinn().definition(&equipped.id) else {
            continue;
        };
        let tier = Compatibility::between(unit.element, equipped.element);
        match (team.djinn_state(&equipped.id), tier) {
            (Some(DjinnState::Set), Compatibility::Same | Compatibility::Neutral) => {
                granted.extend(definition.grants.for_tier(tier).iter().cloned());
            }
            (Some(DjinnState::Standby), Compatibility::Counter) => {
                granted.extend(definition.grants.counter.iter().cloned());
            }
            _ => {}
        }
    }

    let synergy = SynergyPattern::detect(&team.set_elements())
        .filter(|pattern| pattern.grants_ability())
        .and_then(|pattern| env.djinn().synergy_ability(&pattern));
    granted.extend(synergy);
    granted
}

/// Every ability `unit` may use right now, without duplicates.
///
/// Order: level-unlocked abilities, then equipment unlocks, then Djinn grants.
/// Enemies pass `None` and only see their own and equipment abilities.
pub fn known_abilities(unit: &Unit, team: Option<&Team>, env: &BattleEnv<'_>) -> Vec<AbilityId> {
    let mut known: Vec<AbilityId> = Vec::new();
    let djinn = team
        .map(|team| granted_abilities(unit, team, env))
        .unwrap_or_default();
    for ability in unit
        .abilities
        .iter()
        .chain(unit.loadout.unlocked_abilities())
        .chain(djinn.iter())
    {
        if !known.contains(ability) {
            known.push(ability.clone());
        }
    }
    known
}
