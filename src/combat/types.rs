use super::element::Element;
use crate::character::attributes::BaseStats;
use crate::character::derived_stats::{derive_enemy_stats, scale_enemy_stats, DerivedStats};
use crate::core::constants::*;
use crate::world::areas::Species;

pub type EnemyId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesKind {
    Standard,
    Boss,
    GemSlime,
    GoldSlime,
}

/// Attack cycle phase. Transitions are timestamp-driven, see `combat::ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackState {
    Idle,
    Preparing,
    Attacking,
}

/// A spawned enemy. Enemies live only while their stage is loaded and are
/// rebuilt from species data on every stage change, so nothing here is
/// persisted.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    pub kind: SpeciesKind,
    pub element: Element,
    pub level: u32,
    /// Species base stats with level scaling already applied.
    pub base_stats: BaseStats,
    pub current_hp: u32,
    pub x: f64,
    pub half_width: f64,
    pub base_xp: u64,
    pub gold_value: u64,
    pub prepare_ms: u64,
    pub recover_ms: u64,
    pub attack_state: AttackState,
    /// Absolute time at which the current attack phase ends.
    pub state_until_ms: u64,
    /// Absolute time of the last completed attack; cooldowns count from here.
    pub last_attack_ms: u64,
}

impl Enemy {
    pub fn spawn(id: EnemyId, species: &Species, level: u32, x: f64, spawn_ms: u64) -> Self {
        let base_stats = scale_enemy_stats(&species.base_stats, level);
        let max_hp = derive_enemy_stats(&base_stats).max_hp;

        Self {
            id,
            name: species.name.to_string(),
            kind: species.kind,
            element: species.element,
            level,
            base_stats,
            current_hp: max_hp,
            x,
            half_width: species.half_width,
            base_xp: species.base_xp,
            gold_value: species.gold_value,
            prepare_ms: species.prepare_ms,
            recover_ms: species.recover_ms,
            attack_state: AttackState::Idle,
            state_until_ms: 0,
            last_attack_ms: spawn_ms,
        }
    }

    pub fn derived(&self) -> DerivedStats {
        derive_enemy_stats(&self.base_stats)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn gap_to_player(&self, player_x: f64) -> f64 {
        bounding_gap(self.x, self.half_width, player_x, PLAYER_HALF_WIDTH)
    }

    pub fn in_attack_range(&self, player_x: f64) -> bool {
        self.gap_to_player(player_x) <= ATTACK_RANGE
    }
}

/// Distance between two sprites' bounding box edges; 0 when overlapping.
pub fn bounding_gap(ax: f64, a_half: f64, bx: f64, b_half: f64) -> f64 {
    ((ax - bx).abs() - (a_half + b_half)).max(0.0)
}
