/// Elemental affinity of units, abilities and Djinn.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    Venus,
    Mars,
    Jupiter,
    Mercury,
    #[default]
    Neutral,
}

impl Element {
    /// The four elements that participate in the advantage cycle.
    pub const CYCLE: [Element; 4] = [
        Element::Venus,
        Element::Jupiter,
        Element::Mercury,
        Element::Mars,
    ];

    /// Element this one deals bonus damage to.
    ///
    /// Venus → Jupiter → Mercury → Mars → Venus. Neutral has no edge.
    pub const fn beats(self) -> Option<Element> {
        match self {
            Element::Venus => Some(Element::Jupiter),
            Element::Jupiter => Some(Element::Mercury),
            Element::Mercury => Some(Element::Mars),
            Element::Mars => Some(Element::Venus),
            Element::Neutral => None,
        }
    }

    /// Opposed element used for Djinn compatibility and counter abilities.
    pub const fn counter(self) -> Option<Element> {
        match self {
            Element::Venus => Some(Element::Jupiter),
            Element::Jupiter => Some(Element::Venus),
            Element::Mars => Some(Element::Mercury),
            Element::Mercury => Some(Element::Mars),
            Element::Neutral => None,
        }
    }

    pub const fn is_neutral(self) -> bool {
        matches!(self, Element::Neutral)
    }
}

/// How a Djinn's element relates to a unit's element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Compatibility {
    /// Same element.
    Same,
    /// Adjacent element, or either side neutral.
    Neutral,
    /// Opposed element.
    Counter,
}

impl Compatibility {
    pub fn between(unit: Element, djinn: Element) -> Self {
        if unit == djinn && !unit.is_neutral() {
            Compatibility::Same
        } else if unit.counter() == Some(djinn) {
            Compatibility::Counter
        } else {
            Compatibility::Neutral
        }
    }
}
