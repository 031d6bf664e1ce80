use crate::core::constants::{NUM_STATS, STARTING_STAT_VALUE};
use serde::{Deserialize, Serialize};

/// The five allocatable base stats shared by the player and every enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatKind {
    Strength,
    Stamina,
    Intelligence,
    SpeedAgility,
    Luck,
}

impl StatKind {
    pub fn all() -> [StatKind; NUM_STATS] {
        [
            StatKind::Strength,
            StatKind::Stamina,
            StatKind::Intelligence,
            StatKind::SpeedAgility,
            StatKind::Luck,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatKind::Strength => "STR",
            StatKind::Stamina => "STA",
            StatKind::Intelligence => "INT",
            StatKind::SpeedAgility => "SPD",
            StatKind::Luck => "LCK",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatKind::Strength => 0,
            StatKind::Stamina => 1,
            StatKind::Intelligence => 2,
            StatKind::SpeedAgility => 3,
            StatKind::Luck => 4,
        }
    }
}

/// A block of the five base stats. Also reused as an allocation pattern and
/// as the per-stat gem tally, since all three are the same five counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseStats {
    values: [u32; NUM_STATS],
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::zero()
    }
}

impl BaseStats {
    /// Starting stats for a fresh character.
    pub fn new() -> Self {
        Self {
            values: [STARTING_STAT_VALUE; NUM_STATS],
        }
    }

    pub fn zero() -> Self {
        Self {
            values: [0; NUM_STATS],
        }
    }

    pub fn from_split(
        strength: u32,
        stamina: u32,
        intelligence: u32,
        speed_agility: u32,
        luck: u32,
    ) -> Self {
        Self {
            values: [strength, stamina, intelligence, speed_agility, luck],
        }
    }

    pub fn get(&self, stat: StatKind) -> u32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: StatKind, value: u32) {
        self.values[stat.index()] = value;
    }

    pub fn add_to(&mut self, stat: StatKind, amount: u32) {
        self.values[stat.index()] = self.values[stat.index()].saturating_add(amount);
    }

    /// Adds another block's values to this one (allocation application,
    /// gem tallies).
    pub fn add(&mut self, other: &BaseStats) {
        for stat in StatKind::all() {
            self.values[stat.index()] = self.values[stat.index()].saturating_add(other.get(stat));
        }
    }

    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    pub fn strength(&self) -> u32 {
        self.values[0]
    }

    pub fn stamina(&self) -> u32 {
        self.values[1]
    }

    pub fn intelligence(&self) -> u32 {
        self.values[2]
    }

    pub fn speed_agility(&self) -> u32 {
        self.values[3]
    }

    pub fn luck(&self) -> u32 {
        self.values[4]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_start_at_one() {
        let stats = BaseStats::new();
        for stat in StatKind::all() {
            assert_eq!(stats.get(stat), STARTING_STAT_VALUE);
        }
    }

    #[test]
    fn test_zero_block_is_empty() {
        let stats = BaseStats::zero();
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_get_set() {
        let mut stats = BaseStats::new();
        stats.set(StatKind::Strength, 16);
        assert_eq!(stats.get(StatKind::Strength), 16);
        assert_eq!(stats.get(StatKind::Stamina), STARTING_STAT_VALUE);
    }

    #[test]
    fn test_add_to_accumulates() {
        let mut stats = BaseStats::zero();
        stats.add_to(StatKind::Luck, 3);
        stats.add_to(StatKind::Luck, 2);
        assert_eq!(stats.luck(), 5);
    }

    #[test]
    fn test_add_to_saturates_at_max() {
        let mut stats = BaseStats::zero();
        stats.set(StatKind::SpeedAgility, u32::MAX);
        stats.add_to(StatKind::SpeedAgility, 1);
        assert_eq!(stats.get(StatKind::SpeedAgility), u32::MAX);
    }

    #[test]
    fn test_add_combines_blocks() {
        let mut base = BaseStats::from_split(3, 4, 1, 2, 5);
        let gems = BaseStats::from_split(1, 0, 2, 0, 1);
        base.add(&gems);

        assert_eq!(base.strength(), 4);
        assert_eq!(base.stamina(), 4);
        assert_eq!(base.intelligence(), 3);
        assert_eq!(base.speed_agility(), 2);
        assert_eq!(base.luck(), 6);
    }

    #[test]
    fn test_total_sums_all_five() {
        let stats = BaseStats::from_split(1, 2, 3, 4, 5);
        assert_eq!(stats.total(), 15);
    }

    #[test]
    fn test_all_returns_five_kinds_in_index_order() {
        let all = StatKind::all();
        assert_eq!(all.len(), 5);
        for (i, stat) in all.iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
    }

    #[test]
    fn test_abbrevs_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for stat in StatKind::all() {
            assert!(seen.insert(stat.abbrev()));
        }
    }

    #[test]
    fn test_named_accessors_match_get() {
        let stats = BaseStats::from_split(7, 8, 9, 10, 11);
        assert_eq!(stats.strength(), stats.get(StatKind::Strength));
        assert_eq!(stats.stamina(), stats.get(StatKind::Stamina));
        assert_eq!(stats.intelligence(), stats.get(StatKind::Intelligence));
        assert_eq!(stats.speed_agility(), stats.get(StatKind::SpeedAgility));
        assert_eq!(stats.luck(), stats.get(StatKind::Luck));
    }

    #[test]
    fn test_serde_round_trip() {
        let stats = BaseStats::from_split(2, 3, 4, 5, 6);
        let json = serde_json::to_string(&stats).unwrap();
        let back: BaseStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, back);
    }
}
