use crate::state::Element;

/// Damage multiplier for an `attack` element striking a `defend` element.
///
/// Venus → Jupiter → Mercury → Mars → Venus. Striking forward along the
/// cycle gives 1.5, striking backward 0.67, anything else 1.0.
pub fn element_modifier(attack: Element, defend: Element) -> f64 {
    if attack.beats() == Some(defend) {
        1.5
    } else if defend.beats() == Some(attack) {
        0.67
    } else {
        1.0
    }
}
