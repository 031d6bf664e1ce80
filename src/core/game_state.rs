use crate::character::attributes::{BaseStats, StatKind};
use crate::character::player::Player;
use crate::combat::types::EnemyId;
use crate::core::constants::*;
use crate::core::events::{FloatKind, FloatingText};
use crate::items::types::{EquipSlot, Item, MasterId};
use crate::world::types::WorldState;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Top-level mode of the simulation. The world only advances in `Playing`
/// and `PlayerDead`; the other phases gate the loop while the host runs a
/// menu over the frozen snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Start,
    Playing,
    Shopping,
    InHouse,
    Teleporting,
    LevelUp,
    PlayerDead,
}

/// Cumulative profile counters. Increment-only; they survive death and are
/// reset only by starting a fresh profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayStats {
    pub play_time_seconds: u64,
    pub enemies_defeated: u64,
    pub farthest_stage: u32,
    pub total_xp: u64,
    /// Master ids of every equipment template ever picked up, for the
    /// collection completion count.
    #[serde(default)]
    pub collected_masters: HashSet<MasterId>,
    /// Gems banked per stat over the profile's lifetime.
    #[serde(default)]
    pub gems_collected: BaseStats,
}

impl PlayStats {
    pub fn record_defeat(&mut self) {
        self.enemies_defeated += 1;
    }

    pub fn record_stage(&mut self, stage_index: u32) {
        if stage_index > self.farthest_stage {
            self.farthest_stage = stage_index;
        }
    }

    pub fn record_xp(&mut self, xp: u64) {
        self.total_xp += xp;
    }

    pub fn record_item(&mut self, master_id: MasterId) {
        self.collected_masters.insert(master_id);
    }

    pub fn record_gem(&mut self, stat: StatKind) {
        self.gems_collected.add_to(stat, 1);
    }
}

/// A shop the player is currently browsing. Stock is rolled fresh on every
/// visit and discarded on leave.
#[derive(Debug, Clone)]
pub struct ShopSession {
    pub structure_id: u32,
    pub slot: EquipSlot,
    pub stock: Vec<Item>,
}

/// Everything the simulation owns: the player, the loaded stage, engagement
/// references, transient effects, the event log and the simulated clock.
/// `game_tick` takes it by `&mut`; the host reads it as the render snapshot.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub phase: GamePhase,
    pub player: Player,
    pub world: WorldState,

    /// Simulated clock in ms, advanced by `TICK_INTERVAL_MS` per tick.
    pub now_ms: u64,
    pub tick_count: u64,

    /// Enemy currently fought, if any.
    pub engaged_enemy: Option<EnemyId>,
    /// Status-panel reference. Follows engagement but lingers after
    /// disengagement until that enemy dies or a new engagement occurs.
    pub displayed_enemy: Option<EnemyId>,
    /// Structure the action key would interact with this tick.
    pub prompt_structure: Option<u32>,

    pub player_last_attack_ms: u64,

    /// Floating combat text, pruned by expiry every tick.
    pub effects: Vec<FloatingText>,
    next_effect_id: u32,

    /// Last `EVENT_LOG_CAPACITY` human-readable lines, newest last.
    pub log: VecDeque<String>,

    pub play_stats: PlayStats,

    pub active_shop: Option<ShopSession>,

    /// Set while `PlayerDead`: the instant the respawn fires.
    pub respawn_at_ms: Option<u64>,
}

impl SimulationState {
    /// Fresh profile on the title screen. The world stays empty until the
    /// run begins and the first stage is populated.
    pub fn new(name: &str) -> Self {
        Self {
            phase: GamePhase::Start,
            player: Player::new(name),
            world: WorldState::default(),
            now_ms: 0,
            tick_count: 0,
            engaged_enemy: None,
            displayed_enemy: None,
            prompt_structure: None,
            player_last_attack_ms: 0,
            effects: Vec::new(),
            next_effect_id: 0,
            log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            play_stats: PlayStats::default(),
            active_shop: None,
            respawn_at_ms: None,
        }
    }

    /// Appends a log line, evicting the oldest once the cap is reached.
    pub fn push_log(&mut self, line: String) {
        if self.log.len() >= EVENT_LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    /// Spawns a floating text record expiring `FLOATING_TEXT_LIFETIME_MS`
    /// from now.
    pub fn spawn_effect(&mut self, x: f64, text: String, kind: FloatKind) {
        let id = self.next_effect_id;
        self.next_effect_id = self.next_effect_id.wrapping_add(1);
        self.effects.push(FloatingText {
            id,
            x,
            text,
            kind,
            expires_at_ms: self.now_ms + FLOATING_TEXT_LIFETIME_MS,
        });
    }

    pub fn prune_effects(&mut self) {
        let now = self.now_ms;
        self.effects.retain(|e| e.expires_at_ms > now);
    }

    /// Drops engagement and display references to a removed enemy.
    pub fn clear_enemy_refs(&mut self, id: EnemyId) {
        if self.engaged_enemy == Some(id) {
            self.engaged_enemy = None;
        }
        if self.displayed_enemy == Some(id) {
            self.displayed_enemy = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_on_title() {
        let state = SimulationState::new("Rowan");

        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.now_ms, 0);
        assert_eq!(state.tick_count, 0);
        assert!(state.world.enemies.is_empty());
        assert!(state.world.structures.is_empty());
        assert!(state.engaged_enemy.is_none());
        assert!(state.displayed_enemy.is_none());
        assert!(state.log.is_empty());
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_push_log_caps_and_drops_oldest() {
        let mut state = SimulationState::new("Rowan");
        for i in 0..EVENT_LOG_CAPACITY + 5 {
            state.push_log(format!("line {}", i));
        }

        assert_eq!(state.log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(state.log.front().map(String::as_str), Some("line 5"));
        assert_eq!(
            state.log.back().map(String::as_str),
            Some(format!("line {}", EVENT_LOG_CAPACITY + 4).as_str())
        );
    }

    #[test]
    fn test_spawn_effect_stamps_expiry_and_unique_ids() {
        let mut state = SimulationState::new("Rowan");
        state.now_ms = 1000;
        state.spawn_effect(120.0, "12".to_string(), FloatKind::Gold);
        state.spawn_effect(130.0, "5".to_string(), FloatKind::Heal);

        assert_eq!(state.effects.len(), 2);
        assert_eq!(state.effects[0].expires_at_ms, 1000 + FLOATING_TEXT_LIFETIME_MS);
        assert_ne!(state.effects[0].id, state.effects[1].id);
    }

    #[test]
    fn test_prune_effects_keeps_only_live_records() {
        let mut state = SimulationState::new("Rowan");
        state.now_ms = 0;
        state.spawn_effect(100.0, "early".to_string(), FloatKind::Gold);
        state.now_ms = 500;
        state.spawn_effect(100.0, "late".to_string(), FloatKind::Gold);

        state.now_ms = FLOATING_TEXT_LIFETIME_MS + 100;
        state.prune_effects();

        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].text, "late");
    }

    #[test]
    fn test_clear_enemy_refs_only_touches_matching_id() {
        let mut state = SimulationState::new("Rowan");
        state.engaged_enemy = Some(3);
        state.displayed_enemy = Some(7);

        state.clear_enemy_refs(3);
        assert!(state.engaged_enemy.is_none());
        assert_eq!(state.displayed_enemy, Some(7));

        state.clear_enemy_refs(7);
        assert!(state.displayed_enemy.is_none());
    }

    #[test]
    fn test_play_stats_farthest_stage_is_monotonic() {
        let mut stats = PlayStats::default();
        stats.record_stage(3);
        stats.record_stage(1);
        assert_eq!(stats.farthest_stage, 3);
        stats.record_stage(9);
        assert_eq!(stats.farthest_stage, 9);
    }

    #[test]
    fn test_play_stats_gem_tally_accumulates_per_stat() {
        let mut stats = PlayStats::default();
        stats.record_gem(StatKind::Luck);
        stats.record_gem(StatKind::Luck);
        stats.record_gem(StatKind::Strength);

        assert_eq!(stats.gems_collected.luck(), 2);
        assert_eq!(stats.gems_collected.strength(), 1);
        assert_eq!(stats.gems_collected.intelligence(), 0);
    }

    #[test]
    fn test_play_stats_collected_masters_dedupe() {
        let mut stats = PlayStats::default();
        stats.record_item(4);
        stats.record_item(4);
        stats.record_item(9);
        assert_eq!(stats.collected_masters.len(), 2);
    }

    #[test]
    fn test_play_stats_load_without_new_fields() {
        let json = r#"{
            "play_time_seconds": 120,
            "enemies_defeated": 14,
            "farthest_stage": 6,
            "total_xp": 900
        }"#;
        let stats: PlayStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.play_time_seconds, 120);
        assert!(stats.collected_masters.is_empty());
        assert_eq!(stats.gems_collected.total(), 0);
    }
}
