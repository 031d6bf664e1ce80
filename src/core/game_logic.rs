//! Progression rules and the actions a player can take outside combat.
//!
//! The per-tick pipeline in `core::tick` calls the XP, movement and stage
//! helpers here. The structure actions (heal, buy, teleport, allocate) are
//! driven directly by the host while the matching menu phase is open.

use crate::character::attributes::BaseStats;
use crate::character::player::Player;
use crate::core::constants::*;
use crate::core::events::{FloatKind, InputState, TickEvent};
use crate::core::game_state::{GamePhase, ShopSession, SimulationState};
use crate::items::equipment::{adopt_item, AdoptOutcome};
use crate::items::generation::item_price;
use crate::world::generator::{generate_shop_stock, repopulate};
use crate::world::types::{stage_for_x, stage_start_x, StructureKind};
use rand::Rng;
use std::fmt;

/// One level gained from an XP award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    /// True when a locked allocation spent the new points automatically.
    pub auto_allocated: bool,
}

/// Credits XP and processes any level-ups.
///
/// Overflow past each threshold carries into the next level, and the
/// threshold grows by `XP_THRESHOLD_GROWTH` per level, floored. A single
/// large award can produce several level-ups.
pub fn apply_xp(player: &mut Player, xp: u64) -> Vec<LevelUp> {
    player.xp += xp;

    let mut level_ups = Vec::new();
    while player.xp >= player.xp_to_next {
        player.xp -= player.xp_to_next;
        player.level += 1;
        player.xp_to_next = (player.xp_to_next as f64 * XP_THRESHOLD_GROWTH).floor() as u64;
        player.unspent_stat_points += LEVEL_UP_STAT_POINTS;

        level_ups.push(LevelUp {
            new_level: player.level,
            auto_allocated: try_auto_allocate(player),
        });
    }
    level_ups
}

/// Spends one level-up's worth of points along the locked split, if any.
/// A lock whose total does not match the per-level grant is left alone and
/// the points stay pending.
fn try_auto_allocate(player: &mut Player) -> bool {
    let pattern = match player.locked_allocation {
        Some(pattern) if pattern.total() == LEVEL_UP_STAT_POINTS => pattern,
        _ => return false,
    };
    player.base_stats.add(&pattern);
    player.unspent_stat_points -= LEVEL_UP_STAT_POINTS;
    true
}

/// Applies one tick of held walk input.
///
/// Opposite directions cancel. Walking into the engaged enemy stops at
/// bounding-box contact without ever pulling the player backward, and the
/// world's left edge clamps last.
pub fn apply_movement(state: &mut SimulationState, input: &InputState) {
    let direction = match (input.left_held, input.right_held) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => return,
    };

    let step = PLAYER_WALK_SPEED / TICKS_PER_SECOND as f64;
    let mut target = state.player.x + direction * step;

    if let Some(enemy) = state.engaged_enemy.and_then(|id| state.world.enemy(id)) {
        let contact = enemy.half_width + PLAYER_HALF_WIDTH;
        if direction > 0.0 && enemy.x >= state.player.x {
            target = target.min(enemy.x - contact).max(state.player.x);
        } else if direction < 0.0 && enemy.x <= state.player.x {
            target = target.max(enemy.x + contact).min(state.player.x);
        }
    }

    state.player.x = target.max(stage_start_x(0));
}

/// Repopulates the world when the player's position falls in a different
/// stage than the loaded one. Returns the stage entered, if any.
pub fn handle_stage_crossing(state: &mut SimulationState, rng: &mut impl Rng) -> Option<u32> {
    let stage_index = stage_for_x(state.player.x);
    if stage_index == state.world.stage_index {
        return None;
    }

    repopulate(&mut state.world, stage_index, state.now_ms, rng);
    state.engaged_enemy = None;
    state.displayed_enemy = None;
    state.prompt_structure = None;
    state.play_stats.record_stage(stage_index);
    Some(stage_index)
}

/// Refreshes which structure the action key would target: the nearest one
/// within `PROMPT_RANGE` of the player, by center distance.
pub fn update_prompt(state: &mut SimulationState) {
    let player_x = state.player.x;
    state.prompt_structure = state
        .world
        .structures
        .iter()
        .map(|s| (s.id, (s.x - player_x).abs()))
        .filter(|(_, distance)| *distance <= PROMPT_RANGE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id);
}

/// Handles the action key. Enters the prompted structure's menu phase;
/// silent no-op when no prompt is showing.
///
/// Shop stock is rolled fresh on every visit. A teleporter attunes itself
/// on first use and opens the travel menu either way.
pub fn interact(state: &mut SimulationState, rng: &mut impl Rng) -> Option<TickEvent> {
    let (structure_id, kind) = match state
        .prompt_structure
        .and_then(|id| state.world.structures.iter().find(|s| s.id == id))
    {
        Some(structure) => (structure.id, structure.kind),
        None => return None,
    };

    match kind {
        StructureKind::House => {
            state.phase = GamePhase::InHouse;
            None
        }
        StructureKind::WeaponShop | StructureKind::ArmorShop | StructureKind::AccessoryShop => {
            if let Some(slot) = kind.shop_slot() {
                let stock = generate_shop_stock(kind, state.world.stage_index, rng);
                state.active_shop = Some(ShopSession {
                    structure_id,
                    slot,
                    stock,
                });
                state.phase = GamePhase::Shopping;
            }
            None
        }
        StructureKind::Teleporter => {
            let stage_index = state.world.stage_index;
            let discovered = state.player.discover_teleporter(stage_index);
            state.phase = GamePhase::Teleporting;
            discovered.then(|| TickEvent::TeleporterDiscovered {
                stage_index,
                message: format!("\u{1f300} Teleporter attuned to stage {}", stage_index + 1),
            })
        }
    }
}

/// Why a player-initiated action was refused. Refusals never mutate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    InsufficientGold { needed: u64, have: u64 },
    /// An owned same-master item at equal or higher level makes the
    /// purchase pointless.
    Dominated { by: String },
    NoPointsToAllocate,
    InvalidAllocation { expected: u32, got: u32 },
    UnknownDestination,
    InvalidSelection,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InsufficientGold { needed, have } => {
                write!(f, "needs {} gold, carrying {}", needed, have)
            }
            ActionError::Dominated { by } => write!(f, "{} already outclasses it", by),
            ActionError::NoPointsToAllocate => write!(f, "no stat points to spend"),
            ActionError::InvalidAllocation { expected, got } => {
                write!(f, "allocation spends {} of {} available points", got, expected)
            }
            ActionError::UnknownDestination => write!(f, "that teleporter is not attuned"),
            ActionError::InvalidSelection => write!(f, "no such entry"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Full heal at a house. Free when already at max HP, otherwise costs
/// `HEAL_COST_PER_LEVEL` gold per player level. Returns the gold spent.
pub fn heal_at_house(state: &mut SimulationState) -> Result<u64, ActionError> {
    let max_hp = state.player.derived().max_hp;
    if state.player.current_hp >= max_hp {
        return Ok(0);
    }

    let cost = HEAL_COST_PER_LEVEL * state.player.level as u64;
    if !state.player.spend_gold(cost) {
        return Err(ActionError::InsufficientGold {
            needed: cost,
            have: state.player.gold,
        });
    }

    let healed = max_hp - state.player.current_hp;
    state.player.heal_full();
    let x = state.player.x;
    state.spawn_effect(x, format!("+{}", healed), FloatKind::Heal);
    state.push_log(format!(
        "\u{1f3e0} Rested fully, +{} HP (-{} gold)",
        healed, cost
    ));
    Ok(cost)
}

/// Buys the indexed entry of the open shop's stock.
///
/// The purchase runs through the same upgrade filter as drops; a dominated
/// item is refused before any gold moves, leaving the stock untouched.
pub fn buy_shop_item(
    state: &mut SimulationState,
    index: usize,
) -> Result<AdoptOutcome, ActionError> {
    let item = state
        .active_shop
        .as_ref()
        .and_then(|shop| shop.stock.get(index))
        .cloned()
        .ok_or(ActionError::InvalidSelection)?;

    let price = item_price(&item);
    if !state.player.can_afford(price) {
        return Err(ActionError::InsufficientGold {
            needed: price,
            have: state.player.gold,
        });
    }

    let master_id = item.master_id;
    let name = item.display_name.clone();
    match adopt_item(&mut state.player.equipment, &mut state.player.inventory, item) {
        AdoptOutcome::Rejected { dominated_by } => {
            Err(ActionError::Dominated { by: dominated_by })
        }
        outcome => {
            state.player.spend_gold(price);
            state.player.clamp_hp();
            if let Some(shop) = state.active_shop.as_mut() {
                shop.stock.remove(index);
            }
            state.play_stats.record_item(master_id);
            state.push_log(format!("\u{1f6d2} Bought {} (-{} gold)", name, price));
            Ok(outcome)
        }
    }
}

/// Travels to a previously attuned teleporter stage. Costs
/// `TELEPORT_COST_PER_STAGE` gold per stage of distance; returns the fare.
pub fn teleport_to(
    state: &mut SimulationState,
    stage_index: u32,
    rng: &mut impl Rng,
) -> Result<u64, ActionError> {
    if !state.player.has_discovered_teleporter(stage_index) {
        return Err(ActionError::UnknownDestination);
    }

    let distance = state.world.stage_index.abs_diff(stage_index) as u64;
    let cost = TELEPORT_COST_PER_STAGE * distance;
    if !state.player.spend_gold(cost) {
        return Err(ActionError::InsufficientGold {
            needed: cost,
            have: state.player.gold,
        });
    }

    repopulate(&mut state.world, stage_index, state.now_ms, rng);
    state.player.x = stage_start_x(stage_index) + PLAYER_START_X;
    state.engaged_enemy = None;
    state.displayed_enemy = None;
    state.prompt_structure = None;
    state.play_stats.record_stage(stage_index);
    state.phase = GamePhase::Playing;
    state.push_log(format!(
        "\u{1f300} Warped to stage {} (-{} gold)",
        stage_index + 1,
        cost
    ));
    Ok(cost)
}

/// Spends every pending stat point along `pattern`.
///
/// The pattern must spend exactly the pending total. With `lock` set and a
/// pattern worth exactly one level-up, future level-ups repeat it
/// automatically; without `lock` any stored split is cleared.
pub fn allocate_stat_points(
    state: &mut SimulationState,
    pattern: &BaseStats,
    lock: bool,
) -> Result<(), ActionError> {
    let player = &mut state.player;
    if player.unspent_stat_points == 0 {
        return Err(ActionError::NoPointsToAllocate);
    }
    if pattern.total() != player.unspent_stat_points {
        return Err(ActionError::InvalidAllocation {
            expected: player.unspent_stat_points,
            got: pattern.total(),
        });
    }

    player.base_stats.add(pattern);
    player.unspent_stat_points = 0;
    if lock && pattern.total() == LEVEL_UP_STAT_POINTS {
        player.locked_allocation = Some(*pattern);
    } else if !lock {
        player.locked_allocation = None;
    }

    if state.phase == GamePhase::LevelUp {
        state.phase = GamePhase::Playing;
    }
    Ok(())
}

/// Closes any open structure menu and resumes play.
pub fn leave_structure(state: &mut SimulationState) {
    state.active_shop = None;
    if matches!(
        state.phase,
        GamePhase::InHouse | GamePhase::Shopping | GamePhase::Teleporting
    ) {
        state.phase = GamePhase::Playing;
    }
}

/// Leaves the title screen: populates the first stage and starts play.
pub fn begin_run(state: &mut SimulationState, rng: &mut impl Rng) {
    repopulate(&mut state.world, 0, state.now_ms, rng);
    state.player.x = PLAYER_START_X;
    state.phase = GamePhase::Playing;
}

/// Death penalty: the run restarts at the first stage with full HP.
/// Levels, stats, gold, items and attuned teleporters are all kept.
pub fn respawn_player(state: &mut SimulationState, rng: &mut impl Rng) {
    repopulate(&mut state.world, 0, state.now_ms, rng);
    state.player.heal_full();
    state.player.x = PLAYER_START_X;
    state.engaged_enemy = None;
    state.displayed_enemy = None;
    state.prompt_structure = None;
    state.respawn_at_ms = None;
    state.phase = GamePhase::Playing;
}
