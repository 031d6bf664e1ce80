//! Records exchanged between the simulation and its host each tick:
//! sampled input in, events, audio cues and floating text out.

use crate::character::attributes::StatKind;
use crate::combat::element::Element;

/// Input intents the host samples once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left_held: bool,
    pub right_held: bool,
    /// Edge-triggered: set only on the tick the interact key went down.
    pub action_pressed: bool,
}

/// A single event produced by a game tick.
///
/// The host maps these to its own display. Messages are pre-formatted so
/// presentation code never re-derives game text.
#[derive(Debug, Clone)]
pub enum TickEvent {
    // ── Combat ──────────────────────────────────────────────────
    /// Player landed the physical part of an attack.
    PlayerAttack {
        damage: u32,
        critical: bool,
        message: String,
    },

    /// One elemental component of the player's weapon resolved.
    ElementalHit {
        element: Element,
        damage: u32,
        message: String,
    },

    /// The engaged enemy struck the player.
    EnemyAttack {
        enemy_name: String,
        damage: u32,
        message: String,
    },

    /// An enemy dropped to 0 HP and was removed from the stage.
    EnemyDefeated {
        enemy_name: String,
        xp: u64,
        gold: u64,
        message: String,
    },

    // ── Rewards ─────────────────────────────────────────────────
    /// An equipment drop or purchase went through the upgrade filter.
    ItemAcquired {
        item_name: String,
        kept: bool,
        message: String,
    },

    /// Stat gems dropped; one base stat point each, already applied.
    GemsFound {
        stats: Vec<StatKind>,
        message: String,
    },

    // ── Progression ─────────────────────────────────────────────
    /// Player leveled up (may occur several times on a large XP gain).
    LeveledUp {
        new_level: u32,
        auto_allocated: bool,
        message: String,
    },

    // ── Life cycle ──────────────────────────────────────────────
    /// Player HP reached 0; the respawn countdown started.
    PlayerDied { message: String },

    /// Respawn countdown elapsed; run restarted at the first stage.
    Respawned { message: String },

    // ── World ───────────────────────────────────────────────────
    /// Player crossed a stage boundary and the stage was repopulated.
    StageEntered { stage_index: u32, message: String },

    /// A teleporter was registered as a travel destination.
    TeleporterDiscovered { stage_index: u32, message: String },
}

impl TickEvent {
    /// The pre-formatted display line, also mirrored into the event log.
    pub fn message(&self) -> &str {
        match self {
            TickEvent::PlayerAttack { message, .. }
            | TickEvent::ElementalHit { message, .. }
            | TickEvent::EnemyAttack { message, .. }
            | TickEvent::EnemyDefeated { message, .. }
            | TickEvent::ItemAcquired { message, .. }
            | TickEvent::GemsFound { message, .. }
            | TickEvent::LeveledUp { message, .. }
            | TickEvent::PlayerDied { message }
            | TickEvent::Respawned { message }
            | TickEvent::StageEntered { message, .. }
            | TickEvent::TeleporterDiscovered { message, .. } => message,
        }
    }
}

/// Sound identifiers, fire-and-forget. The host decides what they sound
/// like, or ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    PlayerAttack,
    EnemyAttack,
    /// The player took damage.
    PlayerHit,
    /// An enemy took damage.
    EnemyHit,
    PlayerDeath,
    LevelUp,
}

/// Result of processing a single game tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<TickEvent>,

    /// Cues to play this tick, deduplicated per kind.
    pub audio_cues: Vec<AudioCue>,
}

impl TickResult {
    /// Pushes a cue unless the same cue already fired this tick.
    pub fn cue(&mut self, cue: AudioCue) {
        if !self.audio_cues.contains(&cue) {
            self.audio_cues.push(cue);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatKind {
    Damage { element: Element, critical: bool },
    Gold,
    Heal,
}

/// A transient marker anchored at a world x position. Spawned by the tick
/// loop, pruned once `expires_at_ms` passes on the simulated clock.
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub id: u32,
    pub x: f64,
    pub text: String,
    pub kind: FloatKind,
    pub expires_at_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_defaults_to_no_intent() {
        let input = InputState::default();
        assert!(!input.left_held);
        assert!(!input.right_held);
        assert!(!input.action_pressed);
    }

    #[test]
    fn test_cue_deduplicates_per_tick() {
        let mut result = TickResult::default();
        result.cue(AudioCue::EnemyHit);
        result.cue(AudioCue::EnemyHit);
        result.cue(AudioCue::PlayerAttack);

        assert_eq!(
            result.audio_cues,
            vec![AudioCue::EnemyHit, AudioCue::PlayerAttack]
        );
    }
}
