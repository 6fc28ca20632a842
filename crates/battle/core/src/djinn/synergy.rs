use crate::state::{Compatibility, DjinnState, Element, Team};
use crate::stats::Stats;

/// Shape of the multiset of Set-state Djinn elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SynergyPattern {
    /// One Djinn.
    Single(Element),
    /// Two Djinn of one element.
    Pair(Element),
    /// Two Djinn of different elements, stored in element order.
    Split(Element, Element),
    /// Three Djinn of one element.
    Triple(Element),
    /// Two of `major` and one of `minor`.
    Hybrid { major: Element, minor: Element },
    /// Three different elements.
    Harmony,
}

impl SynergyPattern {
    /// Classifies up to three Set elements. Returns `None` for none.
    pub fn detect(elements: &[Element]) -> Option<Self> {
        let mut sorted = elements.to_vec();
        sorted.sort();
        match sorted.as_slice() {
            [] => None,
            [a] => Some(SynergyPattern::Single(*a)),
            [a, b] if a == b => Some(SynergyPattern::Pair(*a)),
            [a, b] => Some(SynergyPattern::Split(*a, *b)),
            [a, b, c] if a == b && b == c => Some(SynergyPattern::Triple(*a)),
            [a, b, c] if a == b => Some(SynergyPattern::Hybrid {
                major: *a,
                minor: *c,
            }),
            [a, b, c] if b == c => Some(SynergyPattern::Hybrid {
                major: *b,
                minor: *a,
            }),
            [_, _, _] => Some(SynergyPattern::Harmony),
            _ => None,
        }
    }

    /// Team-wide stat bonus added to every party unit's Djinn layer.
    pub const fn bonus(self) -> Stats {
        match self {
            SynergyPattern::Single(_) => Stats::new(0, 0, 1, 1, 0, 0),
            SynergyPattern::Pair(_) => Stats::new(0, 0, 3, 2, 2, 0),
            SynergyPattern::Split(..) => Stats::new(0, 0, 1, 1, 1, 1),
            SynergyPattern::Triple(_) => Stats::new(0, 0, 5, 4, 4, 0),
            SynergyPattern::Hybrid { .. } => Stats::new(0, 0, 3, 3, 2, 1),
            SynergyPattern::Harmony => Stats::new(0, 0, 2, 2, 2, 0),
        }
    }

    /// Class title unlocked by a same-element pair.
    pub const fn class_tag(self) -> Option<&'static str> {
        match self {
            SynergyPattern::Pair(element) => Some(match element {
                Element::Venus => "earth_adept",
                Element::Mars => "fire_adept",
                Element::Jupiter => "wind_adept",
                Element::Mercury => "water_adept",
                Element::Neutral => "adept",
            }),
            _ => None,
        }
    }

    /// Whether the pattern carries a team ability (ultimate, hybrid or harmony).
    pub const fn grants_ability(self) -> bool {
        matches!(
            self,
            SynergyPattern::Triple(_) | SynergyPattern::Hybrid { .. } | SynergyPattern::Harmony
        )
    }
}

/// Per-Djinn bonus for one Set Djinn, by compatibility with the unit.
pub const fn compatibility_bonus(tier: Compatibility) -> Stats {
    match tier {
        Compatibility::Same => Stats::new(0, 0, 4, 3, 0, 0),
        Compatibility::Neutral => Stats::new(0, 0, 2, 2, 0, 0),
        Compatibility::Counter => Stats::new(0, 0, -3, -2, 0, 0),
    }
}

/// Djinn layer for a unit of `element` on `team`: every Set Djinn's
/// compatibility bonus plus the team synergy bonus.
pub fn djinn_layer(element: Element, team: &Team) -> Stats {
    let per_djinn: Stats = team
        .djinn_in(DjinnState::Set)
        .map(|djinn| compatibility_bonus(Compatibility::between(element, djinn.element)))
        .sum();
    let synergy = SynergyPattern::detect(&team.set_elements())
        .map(SynergyPattern::bonus)
        .unwrap_or_default();
    per_djinn + synergy
}
