//! The central per-tick orchestration function.
//!
//! `game_tick()` advances the simulation by one fixed 50ms step: structure
//! interaction, engagement, attacks on both sides, walking, and stage
//! crossings, in that order. It returns a [`TickResult`] describing what
//! happened so the presentation layer can update the screen without game
//! logic depending on any UI types.

use crate::character::attributes::StatKind;
use crate::character::derived_stats::DerivedStats;
use crate::combat::ai::{
    advance_enemy_state, enemy_attack_cooldown_ms, player_attack_cooldown_ms, select_engaged,
    speed_ratio,
};
use crate::combat::element::{affinity_multiplier, Element};
use crate::combat::resolver::{resolve_magical, resolve_physical};
use crate::combat::types::EnemyId;
use crate::core::constants::{
    GEM_STAT_BONUS, RESPAWN_DELAY_MS, TICKS_PER_SECOND, TICK_INTERVAL_MS,
};
use crate::core::events::{AudioCue, FloatKind, InputState, TickEvent, TickResult};
use crate::core::game_logic::{
    apply_movement, apply_xp, handle_stage_crossing, interact, respawn_player, update_prompt,
};
use crate::core::game_state::{GamePhase, SimulationState};
use crate::items::drops::{resolve_defeat, RewardDrop};
use crate::items::equipment::{adopt_item, AdoptOutcome};
use crate::items::types::{ElementalDamage, Item};
use rand::Rng;

/// Process a single game tick.
///
/// Only the `Playing` and `PlayerDead` phases advance the clock. Every menu
/// phase (`Start`, `Shopping`, `InHouse`, `Teleporting`, `LevelUp`) returns an
/// empty result without touching the world, so time spent in a menu costs the
/// player nothing.
///
/// # Arguments
/// * `state` - the full simulation state, mutated in place
/// * `input` - the host's sampled input for this tick
/// * `rng` - random source for damage variance, crits, and drops
///
/// # Returns
/// A [`TickResult`] listing the events of this tick (already mirrored into
/// the state's event log) and the audio cues to play.
pub fn game_tick<R: Rng>(state: &mut SimulationState, input: &InputState, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();

    match state.phase {
        GamePhase::Playing => {}
        GamePhase::PlayerDead => {
            advance_clock(state);
            if let Some(respawn_at) = state.respawn_at_ms {
                if state.now_ms >= respawn_at {
                    respawn_player(state, rng);
                    emit(
                        state,
                        &mut result,
                        TickEvent::Respawned {
                            message: "\u{1f305} Back on your feet at the first stage".to_string(),
                        },
                    );
                }
            }
            tally_play_time(state);
            return result;
        }
        _ => return result,
    }

    advance_clock(state);

    // ── 1. Structure prompt and the action key ───────────────────────────
    update_prompt(state);
    if input.action_pressed {
        if let Some(event) = interact(state, rng) {
            emit(state, &mut result, event);
        }
        if state.phase != GamePhase::Playing {
            // Entering a structure freezes the rest of the tick
            tally_play_time(state);
            return result;
        }
    }

    // ── 2. Engagement ────────────────────────────────────────────────────
    state.engaged_enemy = select_engaged(&state.world.enemies, state.engaged_enemy, state.player.x);
    if state.engaged_enemy.is_some() {
        state.displayed_enemy = state.engaged_enemy;
    }

    // ── 3. Player attack ─────────────────────────────────────────────────
    let derived = state.player.derived();
    player_attack(state, &derived, &mut result, rng);
    if state.phase != GamePhase::Playing {
        // A level-up is waiting on manual stat points
        tally_play_time(state);
        return result;
    }

    // ── 4. Enemy attack cycles ───────────────────────────────────────────
    enemy_turns(state, &derived, &mut result, rng);
    if !state.player.is_alive() {
        state.phase = GamePhase::PlayerDead;
        state.respawn_at_ms = Some(state.now_ms + RESPAWN_DELAY_MS);
        emit(
            state,
            &mut result,
            TickEvent::PlayerDied {
                message: "\u{1f480} You died! The run restarts in a moment...".to_string(),
            },
        );
        result.cue(AudioCue::PlayerDeath);
        tally_play_time(state);
        return result;
    }

    // ── 5. Walking and stage crossings ───────────────────────────────────
    apply_movement(state, input);
    if let Some(stage_index) = handle_stage_crossing(state, rng) {
        emit(
            state,
            &mut result,
            TickEvent::StageEntered {
                stage_index,
                message: format!("\u{1f6a9} Stage {}", stage_index + 1),
            },
        );
    }

    // ── 6. Play time ─────────────────────────────────────────────────────
    tally_play_time(state);

    result
}

fn advance_clock(state: &mut SimulationState) {
    state.now_ms += TICK_INTERVAL_MS;
    state.tick_count += 1;
    state.prune_effects();
}

/// One wall-clock second of play time per `TICKS_PER_SECOND` open ticks.
fn tally_play_time(state: &mut SimulationState) {
    if state.tick_count % TICKS_PER_SECOND == 0 {
        state.play_stats.play_time_seconds += 1;
    }
}

/// Push an event into the result and mirror its display line into the log.
fn emit(state: &mut SimulationState, result: &mut TickResult, event: TickEvent) {
    state.push_log(event.message().to_string());
    result.events.push(event);
}

/// Swing at the engaged enemy if it is in reach and the cooldown has elapsed.
///
/// A swing resolves the physical hit first, then every elemental component
/// on the player's equipment as separate magical hits. Defeat is evaluated
/// once, after the whole swing has landed.
fn player_attack(
    state: &mut SimulationState,
    derived: &DerivedStats,
    result: &mut TickResult,
    rng: &mut impl Rng,
) {
    let enemy_id = match state.engaged_enemy {
        Some(id) => id,
        None => return,
    };
    let (enemy_stats, enemy_x, enemy_element, in_range) = match state.world.enemy(enemy_id) {
        Some(enemy) => (
            enemy.derived(),
            enemy.x,
            enemy.element,
            enemy.in_attack_range(state.player.x),
        ),
        None => return,
    };

    let cooldown = player_attack_cooldown_ms(speed_ratio(derived.speed, enemy_stats.speed));
    if !in_range || state.now_ms.saturating_sub(state.player_last_attack_ms) <= cooldown {
        return;
    }
    state.player_last_attack_ms = state.now_ms;

    let hit = resolve_physical(
        derived.physical_attack,
        enemy_stats.physical_defense,
        derived.luck_value,
        rng,
    );
    if let Some(enemy) = state.world.enemy_mut(enemy_id) {
        enemy.take_damage(hit.damage);
    }
    state.spawn_effect(
        enemy_x,
        hit.damage.to_string(),
        FloatKind::Damage {
            element: Element::Neutral,
            critical: hit.critical,
        },
    );
    let message = if hit.critical {
        format!("\u{1f4a5} CRITICAL HIT for {} damage!", hit.damage)
    } else {
        format!("\u{2694} You hit for {} damage", hit.damage)
    };
    emit(
        state,
        result,
        TickEvent::PlayerAttack {
            damage: hit.damage,
            critical: hit.critical,
            message,
        },
    );
    result.cue(AudioCue::PlayerAttack);
    result.cue(AudioCue::EnemyHit);

    let components: Vec<ElementalDamage> = state
        .player
        .equipment
        .iter_equipped()
        .flat_map(|item| item.elemental.iter().copied())
        .collect();
    for component in components {
        let affinity = affinity_multiplier(component.element, enemy_element);
        let damage = resolve_magical(
            derived.magical_attack,
            component.power,
            affinity,
            enemy_stats.magical_defense,
            rng,
        );
        if let Some(enemy) = state.world.enemy_mut(enemy_id) {
            enemy.take_damage(damage);
        }
        state.spawn_effect(
            enemy_x,
            damage.to_string(),
            FloatKind::Damage {
                element: component.element,
                critical: false,
            },
        );
        let message = format!("\u{1f4ab} +{} {} damage", damage, component.element.name());
        emit(
            state,
            result,
            TickEvent::ElementalHit {
                element: component.element,
                damage,
                message,
            },
        );
    }

    let defeated = state
        .world
        .enemy(enemy_id)
        .is_some_and(|enemy| !enemy.is_alive());
    if defeated {
        handle_enemy_defeat(state, enemy_id, derived.luck_value, result, rng);
    }
}

/// Remove the defeated enemy and pay out XP, gold, and any drop.
///
/// XP is applied last so its level-ups land after the reward events. When a
/// level-up could not be auto-allocated the phase switches to `LevelUp`,
/// which pauses the simulation from the next tick.
fn handle_enemy_defeat(
    state: &mut SimulationState,
    enemy_id: EnemyId,
    luck_value: u32,
    result: &mut TickResult,
    rng: &mut impl Rng,
) {
    let position = match state.world.enemies.iter().position(|e| e.id == enemy_id) {
        Some(position) => position,
        None => return,
    };
    let enemy = state.world.enemies.remove(position);
    state.clear_enemy_refs(enemy_id);

    let reward = resolve_defeat(&enemy, luck_value, state.world.stage_index, rng);
    state.player.gold += reward.gold;
    state.play_stats.record_defeat();
    state.play_stats.record_xp(reward.xp);
    state.spawn_effect(enemy.x, format!("+{}g", reward.gold), FloatKind::Gold);

    let message = format!(
        "\u{2728} {} defeated! +{} XP, +{} gold",
        enemy.name, reward.xp, reward.gold
    );
    emit(
        state,
        result,
        TickEvent::EnemyDefeated {
            enemy_name: enemy.name.clone(),
            xp: reward.xp,
            gold: reward.gold,
            message,
        },
    );

    match reward.drop {
        Some(RewardDrop::Item(item)) => grant_item(state, item, result),
        Some(RewardDrop::Gems(stats)) => grant_gems(state, stats, result),
        None => {}
    }

    let level_ups = apply_xp(&mut state.player, reward.xp);
    let manual_pending = level_ups.iter().any(|level_up| !level_up.auto_allocated);
    for level_up in level_ups {
        let message = if level_up.auto_allocated {
            format!("\u{1f389} Reached level {}!", level_up.new_level)
        } else {
            format!(
                "\u{1f389} Reached level {}! Spend your stat points",
                level_up.new_level
            )
        };
        emit(
            state,
            result,
            TickEvent::LeveledUp {
                new_level: level_up.new_level,
                auto_allocated: level_up.auto_allocated,
                message,
            },
        );
        result.cue(AudioCue::LevelUp);
    }
    if manual_pending {
        state.phase = GamePhase::LevelUp;
    }
}

fn grant_item(state: &mut SimulationState, item: Item, result: &mut TickResult) {
    let item_name = item.display_name.clone();
    let master_id = item.master_id;
    let outcome = adopt_item(&mut state.player.equipment, &mut state.player.inventory, item);
    let kept = outcome.was_kept();
    if kept {
        state.play_stats.record_item(master_id);
        // An equipment swap can lower max HP
        state.player.clamp_hp();
    }
    let message = match &outcome {
        AdoptOutcome::Equipped { .. } => format!("\u{1f4e6} Found {} and equipped it", item_name),
        AdoptOutcome::Stored => format!("\u{1f4e6} Found {}", item_name),
        AdoptOutcome::Rejected { dominated_by } => {
            format!("\u{1f4e6} Found {} ({} outclasses it)", item_name, dominated_by)
        }
    };
    emit(
        state,
        result,
        TickEvent::ItemAcquired {
            item_name,
            kept,
            message,
        },
    );
}

fn grant_gems(state: &mut SimulationState, stats: Vec<StatKind>, result: &mut TickResult) {
    for stat in &stats {
        state.player.base_stats.add_to(*stat, GEM_STAT_BONUS);
        state.play_stats.record_gem(*stat);
    }
    let listing = stats
        .iter()
        .map(|stat| format!("+{} {}", GEM_STAT_BONUS, stat.abbrev()))
        .collect::<Vec<_>>()
        .join(", ");
    let message = format!("\u{1f48e} Gems found: {}", listing);
    emit(state, result, TickEvent::GemsFound { stats, message });
}

/// Advance every enemy's attack state machine, then land the strikes that
/// completed this tick. A strike whiffs when the player has already stepped
/// out of reach, which `advance_enemy_state` reports by returning false.
fn enemy_turns(
    state: &mut SimulationState,
    derived: &DerivedStats,
    result: &mut TickResult,
    rng: &mut impl Rng,
) {
    let player_x = state.player.x;
    let engaged = state.engaged_enemy;
    let now_ms = state.now_ms;

    let mut strikes: Vec<(String, u32, u32)> = Vec::new();
    for enemy in &mut state.world.enemies {
        let enemy_stats = enemy.derived();
        let cooldown = enemy_attack_cooldown_ms(speed_ratio(derived.speed, enemy_stats.speed));
        let is_engaged = engaged == Some(enemy.id);
        if advance_enemy_state(enemy, now_ms, is_engaged, player_x, cooldown) {
            strikes.push((
                enemy.name.clone(),
                enemy_stats.physical_attack,
                enemy_stats.luck_value,
            ));
        }
    }

    for (enemy_name, attack, luck_value) in strikes {
        let hit = resolve_physical(attack, derived.physical_defense, luck_value, rng);
        state.player.take_damage(hit.damage);
        state.spawn_effect(
            player_x,
            hit.damage.to_string(),
            FloatKind::Damage {
                element: Element::Neutral,
                critical: hit.critical,
            },
        );
        let message = format!("\u{1f6e1} {} hits you for {} damage", enemy_name, hit.damage);
        emit(
            state,
            result,
            TickEvent::EnemyAttack {
                enemy_name,
                damage: hit.damage,
                message,
            },
        );
        result.cue(AudioCue::EnemyAttack);
        result.cue(AudioCue::PlayerHit);
        if !state.player.is_alive() {
            break;
        }
    }
}
