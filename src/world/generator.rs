//! Stage population.
//!
//! Every stage crossing rebuilds the full per-stage content from scratch;
//! only the shop rotation counter and id counters survive between stages.

use super::areas::{area_for_stage, area_tier, gem_slime_species, gold_slime_species, Area, Species};
use super::types::{
    stage_center_x, stage_end_x, stage_start_x, SceneryObject, Structure, StructureKind, WorldState,
};
use crate::combat::types::Enemy;
use crate::core::constants::*;
use crate::items::generation::{generate_item, item_level_for_stage};
use crate::items::types::Item;
use rand::Rng;

const SHOP_ROTATION: [StructureKind; 3] = [
    StructureKind::WeaponShop,
    StructureKind::ArmorShop,
    StructureKind::AccessoryShop,
];

/// Discards the old stage's content and generates the new stage.
pub fn repopulate(world: &mut WorldState, stage_index: u32, now_ms: u64, rng: &mut impl Rng) {
    world.stage_index = stage_index;
    world.structures.clear();
    world.enemies.clear();
    world.scenery.clear();

    let area = area_for_stage(stage_index);
    place_structures(world, stage_index, rng);
    place_enemies(world, &area, stage_index, now_ms, rng);
    place_scenery(world, &area, stage_index, rng);
}

fn place_structures(world: &mut WorldState, stage_index: u32, rng: &mut impl Rng) {
    let offset = stage_index % STAGE_AREA_SIZE;
    let kind = match offset {
        HOUSE_STAGE_OFFSET => Some(StructureKind::House),
        SHOP_A_STAGE_OFFSET | SHOP_B_STAGE_OFFSET => {
            let kind = SHOP_ROTATION[(world.shop_rotation % 3) as usize];
            world.shop_rotation += 1;
            Some(kind)
        }
        TELEPORTER_STAGE_OFFSET => Some(StructureKind::Teleporter),
        _ => None,
    };

    if let Some(kind) = kind {
        let jitter = rng.gen_range(-STRUCTURE_CENTER_JITTER..=STRUCTURE_CENTER_JITTER);
        let id = world.alloc_structure_id();
        world.structures.push(Structure {
            id,
            kind,
            x: stage_center_x(stage_index) + jitter,
        });
    }
}

fn place_enemies(
    world: &mut WorldState,
    area: &Area,
    stage_index: u32,
    now_ms: u64,
    rng: &mut impl Rng,
) {
    let level = 1 + stage_index;
    let is_boss_stage = stage_index % STAGE_AREA_SIZE == BOSS_STAGE_OFFSET;

    let species_batch = if is_boss_stage {
        let mut batch = vec![area.boss.clone()];
        for _ in 0..BOSS_ESCORT_COUNT {
            batch.push(area.roster[rng.gen_range(0..area.roster.len())].clone());
        }
        batch
    } else {
        let count = rng.gen_range(ENEMIES_PER_STAGE_MIN..=ENEMIES_PER_STAGE_MAX);
        (0..count).map(|_| roll_species(area, rng)).collect()
    };

    for species in species_batch {
        let (x, _clean) = sample_position(stage_index, &world.structures, &world.enemies, rng);
        let id = world.alloc_enemy_id();
        world.enemies.push(Enemy::spawn(id, &species, level, x, now_ms));
    }
}

/// Uniform roster pick with small override chances for the rare slimes.
fn roll_species(area: &Area, rng: &mut impl Rng) -> Species {
    if rng.gen_bool(GEM_SLIME_SPAWN_CHANCE) {
        gem_slime_species()
    } else if rng.gen_bool(GOLD_SLIME_SPAWN_CHANCE) {
        gold_slime_species()
    } else {
        area.roster[rng.gen_range(0..area.roster.len())].clone()
    }
}

/// Rejection-samples an x inside the spawn span, keeping clear of structures
/// and already placed enemies. After the attempt cap the last candidate is
/// accepted as-is; the bool reports whether the clearance checks passed.
fn sample_position(
    stage_index: u32,
    structures: &[Structure],
    placed: &[Enemy],
    rng: &mut impl Rng,
) -> (f64, bool) {
    let min_x = stage_start_x(stage_index) + SPAWN_MARGIN_LEFT;
    let max_x = stage_end_x(stage_index) - SPAWN_MARGIN_RIGHT;

    let mut candidate = min_x;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        candidate = rng.gen_range(min_x..max_x);
        let clear_of_structures = structures
            .iter()
            .all(|s| (candidate - s.x).abs() >= STRUCTURE_CLEARANCE);
        let clear_of_enemies = placed
            .iter()
            .all(|e| (candidate - e.x).abs() >= MIN_ENEMY_SEPARATION);
        if clear_of_structures && clear_of_enemies {
            return (candidate, true);
        }
    }
    (candidate, false)
}

fn place_scenery(world: &mut WorldState, area: &Area, stage_index: u32, rng: &mut impl Rng) {
    let start = stage_start_x(stage_index);
    let steps = (STAGE_LENGTH / SCENERY_STEP) as u32;

    for step in 0..steps {
        if rng.gen_bool(SCENERY_CHANCE_PER_STEP) {
            let sprite = area.scenery[rng.gen_range(0..SCENERY_VARIANTS) as usize];
            let x = start + step as f64 * SCENERY_STEP + rng.gen_range(0.0..SCENERY_STEP);
            world.scenery.push(SceneryObject {
                id: step,
                sprite,
                x,
            });
        }
    }
}

/// Rolls a shop's stock for the stage it stands in. A slice of the stock
/// comes out one level above the area's baseline.
pub fn generate_shop_stock(kind: StructureKind, stage_index: u32, rng: &mut impl Rng) -> Vec<Item> {
    let slot = match kind.shop_slot() {
        Some(slot) => slot,
        None => return Vec::new(),
    };

    let tier = area_tier(stage_index);
    let base_level = item_level_for_stage(stage_index);
    (0..SHOP_STOCK_SIZE)
        .map(|_| {
            let level = if rng.gen_bool(SHOP_PREMIUM_CHANCE) {
                base_level + 1
            } else {
                base_level
            };
            generate_item(slot, level, tier, rng)
        })
        .collect()
}
