use serde::{Deserialize, Serialize};

pub const NUM_ELEMENTS: usize = 7;

/// Damage/affinity types. Every enemy has one; weapons may carry damage
/// components of several.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Element {
    Neutral,
    Fire,
    Water,
    Wind,
    Earth,
    Light,
    Dark,
}

impl Element {
    pub fn all() -> [Element; NUM_ELEMENTS] {
        [
            Element::Neutral,
            Element::Fire,
            Element::Water,
            Element::Wind,
            Element::Earth,
            Element::Light,
            Element::Dark,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Element::Neutral => 0,
            Element::Fire => 1,
            Element::Water => 2,
            Element::Wind => 3,
            Element::Earth => 4,
            Element::Light => 5,
            Element::Dark => 6,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Element::Neutral => "neutral",
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Wind => "wind",
            Element::Earth => "earth",
            Element::Light => "light",
            Element::Dark => "dark",
        }
    }
}

// Attacker element by row, defender element by column.
// Columns: Neutral  Fire  Water  Wind  Earth  Light  Dark
// The elemental cycle runs fire > wind > earth > water > fire (2.0 with the
// cycle, 0.5 against it); light and dark punish each other; Neutral never
// modifies and is never modified.
const AFFINITY_TABLE: [[f64; NUM_ELEMENTS]; NUM_ELEMENTS] = [
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0], // Neutral
    [1.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0], // Fire
    [1.0, 2.0, 1.0, 1.0, 0.5, 1.0, 1.0], // Water
    [1.0, 0.5, 1.0, 1.0, 2.0, 1.0, 1.0], // Wind
    [1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0], // Earth
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0], // Light
    [1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0], // Dark
];

/// Multiplier applied to an attack of `attacker` element hitting a defender
/// of `defender` element.
pub fn affinity_multiplier(attacker: Element, defender: Element) -> f64 {
    AFFINITY_TABLE[attacker.index()][defender.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_wind_asymmetry() {
        assert_eq!(affinity_multiplier(Element::Fire, Element::Wind), 2.0);
        assert_eq!(affinity_multiplier(Element::Wind, Element::Fire), 0.5);
    }

    #[test]
    fn test_self_element_is_always_neutral() {
        for element in Element::all() {
            assert_eq!(affinity_multiplier(element, element), 1.0);
        }
    }

    #[test]
    fn test_neutral_row_and_column_are_one() {
        for element in Element::all() {
            assert_eq!(affinity_multiplier(Element::Neutral, element), 1.0);
            assert_eq!(affinity_multiplier(element, Element::Neutral), 1.0);
        }
    }

    #[test]
    fn test_elemental_cycle() {
        // fire > wind > earth > water > fire
        assert_eq!(affinity_multiplier(Element::Fire, Element::Wind), 2.0);
        assert_eq!(affinity_multiplier(Element::Wind, Element::Earth), 2.0);
        assert_eq!(affinity_multiplier(Element::Earth, Element::Water), 2.0);
        assert_eq!(affinity_multiplier(Element::Water, Element::Fire), 2.0);

        // and 0.5 against the cycle
        assert_eq!(affinity_multiplier(Element::Wind, Element::Fire), 0.5);
        assert_eq!(affinity_multiplier(Element::Earth, Element::Wind), 0.5);
        assert_eq!(affinity_multiplier(Element::Water, Element::Earth), 0.5);
        assert_eq!(affinity_multiplier(Element::Fire, Element::Water), 0.5);
    }

    #[test]
    fn test_light_dark_mutual_weakness() {
        assert_eq!(affinity_multiplier(Element::Light, Element::Dark), 2.0);
        assert_eq!(affinity_multiplier(Element::Dark, Element::Light), 2.0);
    }

    #[test]
    fn test_all_multipliers_positive() {
        for attacker in Element::all() {
            for defender in Element::all() {
                assert!(affinity_multiplier(attacker, defender) > 0.0);
            }
        }
    }

    #[test]
    fn test_index_matches_all_ordering() {
        for (i, element) in Element::all().iter().enumerate() {
            assert_eq!(element.index(), i);
        }
    }
}
