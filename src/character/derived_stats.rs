use super::attributes::{BaseStats, StatKind};
use crate::core::constants::*;
use crate::items::catalog::{completed_set, SetBonusKind};
use crate::items::types::BonusKind;
use crate::items::Equipment;

/// Combat-facing stats, recomputed every tick from base stats plus
/// equipment. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DerivedStats {
    pub max_hp: u32,
    pub physical_attack: u32,
    pub physical_defense: u32,
    pub magical_attack: u32,
    pub magical_defense: u32,
    pub speed: u32,
    pub luck_value: u32,
}

impl DerivedStats {
    pub fn add_bonus(&mut self, kind: BonusKind, value: u32) {
        match kind {
            BonusKind::MaxHp => self.max_hp += value,
            BonusKind::PhysicalAttack => self.physical_attack += value,
            BonusKind::PhysicalDefense => self.physical_defense += value,
            BonusKind::MagicalAttack => self.magical_attack += value,
            BonusKind::MagicalDefense => self.magical_defense += value,
            BonusKind::Speed => self.speed += value,
            BonusKind::LuckValue => self.luck_value += value,
        }
    }
}

/// Derives the player's combat stats from allocatable base stats, level and
/// worn equipment. Pure and deterministic.
pub fn derive_player_stats(base: &BaseStats, equipment: &Equipment, level: u32) -> DerivedStats {
    let strength = base.strength();
    let stamina = base.stamina();
    let intelligence = base.intelligence();
    let agility = base.speed_agility();
    let levels_gained = level.saturating_sub(1);

    let mut stats = DerivedStats {
        // Max HP = 20 + 10×STA + 2×STR + 10×(level - 1)
        max_hp: PLAYER_BASE_HP
            + PLAYER_HP_PER_STAMINA * stamina
            + PLAYER_HP_PER_STRENGTH * strength
            + PLAYER_HP_PER_LEVEL * levels_gained,
        // Physical attack = 5 + 2×STR
        physical_attack: PLAYER_BASE_PHYSICAL_ATTACK + PLAYER_ATTACK_PER_STRENGTH * strength,
        // Physical defense = STA + STR
        physical_defense: stamina + strength,
        // Magical attack = 2×INT
        magical_attack: PLAYER_MAGIC_PER_INTELLIGENCE * intelligence,
        // Magical defense = 2×INT + STA
        magical_defense: PLAYER_MAGIC_PER_INTELLIGENCE * intelligence + stamina,
        // Speed = 10 + 2×SPD
        speed: PLAYER_BASE_SPEED + PLAYER_SPEED_PER_AGILITY * agility,
        // Luck value = 5 + LCK
        luck_value: PLAYER_BASE_LUCK_VALUE + base.luck(),
    };

    // Equipment bonuses are purely additive per derived field.
    for item in equipment.iter_equipped() {
        for bonus in &item.bonuses {
            stats.add_bonus(bonus.kind, bonus.value);
        }
    }

    // Set bonuses apply after every additive bonus has landed.
    if let Some(set) = completed_set(&equipment.equipped_master_ids()) {
        match set.bonus {
            SetBonusKind::LuckIntoPhysical { divisor } => {
                let share = stats.luck_value / divisor;
                stats.physical_attack += share;
                stats.physical_defense += share;
            }
            SetBonusKind::DoubleSpeed => stats.speed *= 2,
        }
    }

    stats
}

/// Scales an enemy species' base stats for its spawned level:
/// `floor(stat × (1 + 0.15×(level - 1) + 0.005×(level - 1)²))`.
pub fn scale_enemy_stats(base: &BaseStats, level: u32) -> BaseStats {
    let steps = level.saturating_sub(1) as f64;
    let multiplier = 1.0 + ENEMY_SCALE_LINEAR * steps + ENEMY_SCALE_QUADRATIC * steps * steps;
    let mut scaled = BaseStats::zero();
    for kind in StatKind::all() {
        scaled.set(kind, (base.get(kind) as f64 * multiplier).floor() as u32);
    }
    scaled
}

/// Derives an enemy's combat stats from its already level-scaled base stats.
/// Same shape as the player formulas with flatter coefficients.
pub fn derive_enemy_stats(scaled: &BaseStats) -> DerivedStats {
    let strength = scaled.strength();
    let stamina = scaled.stamina();
    let intelligence = scaled.intelligence();

    DerivedStats {
        max_hp: ENEMY_BASE_HP + ENEMY_HP_PER_STAMINA * stamina + ENEMY_HP_PER_STRENGTH * strength,
        physical_attack: ENEMY_BASE_PHYSICAL_ATTACK + ENEMY_ATTACK_PER_STRENGTH * strength,
        physical_defense: stamina + strength / 2,
        magical_attack: ENEMY_MAGIC_PER_INTELLIGENCE * intelligence,
        magical_defense: intelligence + stamina,
        speed: ENEMY_BASE_SPEED + ENEMY_SPEED_PER_AGILITY * scaled.speed_agility(),
        luck_value: scaled.luck(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog::master;
    use crate::items::generation::instantiate_master;
    use crate::items::types::EquipSlot;

    #[test]
    fn test_fresh_player_stats() {
        let base = BaseStats::new();
        let stats = derive_player_stats(&base, &Equipment::new(), 1);

        assert_eq!(stats.max_hp, 32); // 20 + 10 + 2
        assert_eq!(stats.physical_attack, 7); // 5 + 2
        assert_eq!(stats.physical_defense, 2); // 1 + 1
        assert_eq!(stats.magical_attack, 2);
        assert_eq!(stats.magical_defense, 3); // 2 + 1
        assert_eq!(stats.speed, 12); // 10 + 2
        assert_eq!(stats.luck_value, 6); // 5 + 1
    }

    #[test]
    fn test_level_term_only_raises_hp() {
        let base = BaseStats::new();
        let at_one = derive_player_stats(&base, &Equipment::new(), 1);
        let at_four = derive_player_stats(&base, &Equipment::new(), 4);

        assert_eq!(at_four.max_hp, at_one.max_hp + 30);
        assert_eq!(at_four.physical_attack, at_one.physical_attack);
        assert_eq!(at_four.speed, at_one.speed);
    }

    #[test]
    fn test_stat_allocation_moves_the_right_fields() {
        let mut base = BaseStats::new();
        base.add_to(StatKind::Strength, 4); // 5 total

        let stats = derive_player_stats(&base, &Equipment::new(), 1);
        assert_eq!(stats.physical_attack, 15); // 5 + 2×5
        assert_eq!(stats.physical_defense, 6); // 1 + 5
        assert_eq!(stats.max_hp, 40); // 20 + 10 + 2×5
        assert_eq!(stats.magical_attack, 2); // untouched
    }

    #[test]
    fn test_equipment_bonuses_are_additive() {
        let base = BaseStats::new();
        let mut equipment = Equipment::new();
        // Worn Shortsword: +3 physical attack
        let sword = instantiate_master(&master(0).unwrap(), 1);
        equipment.set(EquipSlot::Weapon, Some(sword));

        let bare = derive_player_stats(&base, &Equipment::new(), 1);
        let armed = derive_player_stats(&base, &equipment, 1);
        assert_eq!(armed.physical_attack, bare.physical_attack + 3);
        assert_eq!(armed.max_hp, bare.max_hp);
    }

    #[test]
    fn test_luck_set_converts_luck_into_physical() {
        let base = BaseStats::new();
        let mut equipment = Equipment::new();
        for id in [8, 16, 23] {
            let piece = instantiate_master(&master(id).unwrap(), 1);
            equipment.set(piece.slot, Some(piece));
        }

        let stats = derive_player_stats(&base, &equipment, 1);
        // Dirk +8, Vest +6, Signet +4 luck on top of base 6 = 24
        assert_eq!(stats.luck_value, 24);
        // 24 / 4 = 6 poured into each physical stat, after item bonuses
        assert_eq!(stats.physical_attack, 7 + 4 + 1 + 6);
        assert_eq!(stats.physical_defense, 2 + 3 + 6);
    }

    #[test]
    fn test_speed_set_doubles_speed() {
        let base = BaseStats::new();
        let mut equipment = Equipment::new();
        for id in [9, 17, 24] {
            let piece = instantiate_master(&master(id).unwrap(), 1);
            equipment.set(piece.slot, Some(piece));
        }

        let stats = derive_player_stats(&base, &equipment, 1);
        assert_eq!(stats.speed, 24); // 12 doubled
    }

    #[test]
    fn test_incomplete_set_grants_nothing() {
        let base = BaseStats::new();
        let mut equipment = Equipment::new();
        for id in [9, 17] {
            let piece = instantiate_master(&master(id).unwrap(), 1);
            equipment.set(piece.slot, Some(piece));
        }

        let stats = derive_player_stats(&base, &equipment, 1);
        assert_eq!(stats.speed, 12);
    }

    #[test]
    fn test_enemy_scaling_identity_at_level_one() {
        let base = BaseStats::from_split(4, 3, 2, 3, 1);
        assert_eq!(scale_enemy_stats(&base, 1), base);
    }

    #[test]
    fn test_enemy_scaling_exact_at_level_eleven() {
        // steps = 10: 1 + 0.15×10 + 0.005×100 = 3.0
        let base = BaseStats::from_split(4, 2, 1, 3, 2);
        let scaled = scale_enemy_stats(&base, 11);
        assert_eq!(scaled, BaseStats::from_split(12, 6, 3, 9, 6));
    }

    #[test]
    fn test_enemy_scaling_monotonic_in_level() {
        let base = BaseStats::from_split(5, 4, 3, 4, 2);
        let mut previous = scale_enemy_stats(&base, 1);
        for level in 2..40 {
            let current = scale_enemy_stats(&base, level);
            for kind in StatKind::all() {
                assert!(current.get(kind) >= previous.get(kind));
            }
            previous = current;
        }
    }

    #[test]
    fn test_enemy_derivation_shape() {
        let scaled = BaseStats::from_split(4, 3, 2, 3, 1);
        let stats = derive_enemy_stats(&scaled);

        assert_eq!(stats.max_hp, 38); // 12 + 6×3 + 2×4
        assert_eq!(stats.physical_attack, 11); // 3 + 2×4
        assert_eq!(stats.physical_defense, 5); // 3 + 4/2
        assert_eq!(stats.magical_attack, 4);
        assert_eq!(stats.magical_defense, 5);
        assert_eq!(stats.speed, 14); // 8 + 2×3
        assert_eq!(stats.luck_value, 1);
    }
}
