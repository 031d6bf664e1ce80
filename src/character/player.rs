use super::attributes::BaseStats;
use super::derived_stats::{derive_player_stats, DerivedStats};
use crate::core::constants::*;
use crate::items::{Equipment, Item};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The persistent player character. Derived combat stats are not stored
/// here; call `derived()` whenever they are needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    pub base_stats: BaseStats,
    pub unspent_stat_points: u32,
    /// When set, level-up points are spent automatically with this split
    /// instead of pausing the run.
    #[serde(default)]
    pub locked_allocation: Option<BaseStats>,
    pub gold: u64,
    pub current_hp: u32,
    /// World position in pixels, clamped at the world's left boundary.
    pub x: f64,
    pub equipment: Equipment,
    #[serde(default)]
    pub inventory: Vec<Item>,
    /// Stage indices whose teleporter the player has stood near at least once.
    #[serde(default)]
    pub discovered_teleporters: Vec<u32>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        let name: String = name.chars().take(PROFILE_NAME_MAX_LENGTH).collect();
        let base_stats = BaseStats::new();
        let starting_hp = derive_player_stats(&base_stats, &Equipment::new(), 1).max_hp;

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            level: 1,
            xp: 0,
            xp_to_next: XP_THRESHOLD_INITIAL,
            base_stats,
            unspent_stat_points: 0,
            locked_allocation: None,
            gold: STARTING_GOLD,
            current_hp: starting_hp,
            x: PLAYER_START_X,
            equipment: Equipment::new(),
            inventory: Vec::new(),
            discovered_teleporters: Vec::new(),
        }
    }

    pub fn derived(&self) -> DerivedStats {
        derive_player_stats(&self.base_stats, &self.equipment, self.level)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Restores HP to the current derived maximum.
    pub fn heal_full(&mut self) {
        self.current_hp = self.derived().max_hp;
    }

    /// Caps current HP at the derived maximum. Needed after equipment or
    /// allocation changes shrink max HP.
    pub fn clamp_hp(&mut self) {
        let max_hp = self.derived().max_hp;
        if self.current_hp > max_hp {
            self.current_hp = max_hp;
        }
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.gold >= cost
    }

    pub fn spend_gold(&mut self, cost: u64) -> bool {
        if self.can_afford(cost) {
            self.gold -= cost;
            true
        } else {
            false
        }
    }

    pub fn has_discovered_teleporter(&self, stage_index: u32) -> bool {
        self.discovered_teleporters.contains(&stage_index)
    }

    pub fn discover_teleporter(&mut self, stage_index: u32) -> bool {
        if self.has_discovered_teleporter(stage_index) {
            return false;
        }
        self.discovered_teleporters.push(stage_index);
        self.discovered_teleporters.sort_unstable();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new("Rowan");

        assert_eq!(player.name, "Rowan");
        assert_eq!(player.level, 1);
        assert_eq!(player.xp, 0);
        assert_eq!(player.xp_to_next, XP_THRESHOLD_INITIAL);
        assert_eq!(player.gold, STARTING_GOLD);
        assert_eq!(player.unspent_stat_points, 0);
        assert!(player.locked_allocation.is_none());
        assert_eq!(player.current_hp, player.derived().max_hp);
        assert!(player.inventory.is_empty());
        assert_eq!(player.id.len(), 36);
    }

    #[test]
    fn test_name_is_truncated() {
        let player = Player::new("An Unreasonably Long Wanderer Name");
        assert_eq!(player.name.chars().count(), PROFILE_NAME_MAX_LENGTH);
    }

    #[test]
    fn test_take_damage_saturates_at_zero() {
        let mut player = Player::new("Rowan");
        player.take_damage(10);
        assert!(player.is_alive());
        player.take_damage(10_000);
        assert_eq!(player.current_hp, 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_heal_full_restores_max() {
        let mut player = Player::new("Rowan");
        player.take_damage(15);
        player.heal_full();
        assert_eq!(player.current_hp, player.derived().max_hp);
    }

    #[test]
    fn test_spend_gold_refuses_overdraft() {
        let mut player = Player::new("Rowan");
        assert!(player.spend_gold(30));
        assert_eq!(player.gold, STARTING_GOLD - 30);
        assert!(!player.spend_gold(1_000));
        assert_eq!(player.gold, STARTING_GOLD - 30);
    }

    #[test]
    fn test_teleporter_discovery_is_idempotent() {
        let mut player = Player::new("Rowan");
        assert!(player.discover_teleporter(8));
        assert!(!player.discover_teleporter(8));
        assert!(player.discover_teleporter(18));
        assert_eq!(player.discovered_teleporters, vec![8, 18]);
    }

    #[test]
    fn test_player_serde_round_trip() {
        let mut player = Player::new("Rowan");
        player.gold = 777;
        player.x = 1234.5;

        let json = serde_json::to_string(&player).unwrap();
        let restored: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.gold, 777);
        assert_eq!(restored.x, 1234.5);
        assert_eq!(restored.id, player.id);
    }

    #[test]
    fn test_old_save_without_new_fields_loads() {
        let player = Player::new("Rowan");
        let mut value = serde_json::to_value(&player).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("locked_allocation");
        obj.remove("inventory");
        obj.remove("discovered_teleporters");

        let restored: Player = serde_json::from_value(value).unwrap();
        assert!(restored.locked_allocation.is_none());
        assert!(restored.inventory.is_empty());
        assert!(restored.discovered_teleporters.is_empty());
    }
}
