//! Defeat rewards: xp, gold, stat gems and item drops.

use super::generation::{generate_item, item_level_for_stage, roll_slot};
use super::types::Item;
use crate::character::attributes::StatKind;
use crate::combat::types::{Enemy, SpeciesKind};
use crate::core::constants::*;
use crate::world::areas::area_tier;
use rand::Rng;

/// What a defeated enemy paid out. Applying it to the player is the
/// orchestrator's job.
#[derive(Debug, Clone)]
pub struct DefeatReward {
    pub xp: u64,
    pub gold: u64,
    pub drop: Option<RewardDrop>,
}

#[derive(Debug, Clone)]
pub enum RewardDrop {
    Item(Item),
    /// One base stat point per listed stat.
    Gems(Vec<StatKind>),
}

/// XP grows linearly with stage progress so a handful of clears per stage
/// keeps pace with the threshold curve.
pub fn xp_reward(base_xp: u64, stage_index: u32) -> u64 {
    (base_xp as f64 * (1.0 + XP_STAGE_FACTOR * stage_index as f64)).floor() as u64
}

/// Gold payout with an explicit variance factor; luck adds a linear bonus.
pub fn gold_reward_with_factor(gold_value: u64, luck_value: u32, factor: f64) -> u64 {
    let base = gold_value as f64 * factor;
    let bonus = 1.0 + luck_value as f64 / GOLD_LUCK_DIVISOR;
    (base * bonus).floor() as u64
}

pub fn roll_gold(gold_value: u64, luck_value: u32, rng: &mut impl Rng) -> u64 {
    let factor = rng.gen_range(GOLD_VARIANCE_MIN..GOLD_VARIANCE_MAX);
    gold_reward_with_factor(gold_value, luck_value, factor)
}

/// Chance for a standard enemy to drop anything, clamped to [0, 1].
pub fn item_drop_chance(luck_value: u32) -> f64 {
    (ITEM_DROP_BASE_CHANCE + luck_value as f64 * ITEM_DROP_LUCK_MULTIPLIER).clamp(0.0, 1.0)
}

fn random_stat(rng: &mut impl Rng) -> StatKind {
    StatKind::all()[rng.gen_range(0..NUM_STATS)]
}

/// Resolves everything a defeat pays out. Special species replace parts of
/// the standard path: gem slimes always shower gems, gold slimes pay a flat
/// stage-scaled pile, bosses always drop a premium item.
pub fn resolve_defeat(
    enemy: &Enemy,
    player_luck: u32,
    stage_index: u32,
    rng: &mut impl Rng,
) -> DefeatReward {
    let xp = xp_reward(enemy.base_xp, stage_index);
    let tier = area_tier(stage_index);

    match enemy.kind {
        SpeciesKind::GemSlime => {
            let count = rng.gen_range(GEM_SLIME_GEMS_MIN..=GEM_SLIME_GEMS_MAX);
            let gems = (0..count).map(|_| random_stat(rng)).collect();
            DefeatReward {
                xp,
                gold: roll_gold(enemy.gold_value, player_luck, rng),
                drop: Some(RewardDrop::Gems(gems)),
            }
        }
        SpeciesKind::GoldSlime => DefeatReward {
            xp,
            gold: GOLD_SLIME_BASE_GOLD * (1 + stage_index as u64),
            drop: None,
        },
        SpeciesKind::Boss => {
            let level = item_level_for_stage(stage_index) + 1;
            let item = generate_item(roll_slot(rng), level, tier, rng);
            DefeatReward {
                xp,
                gold: roll_gold(enemy.gold_value, player_luck, rng),
                drop: Some(RewardDrop::Item(item)),
            }
        }
        SpeciesKind::Standard => {
            let drop = if rng.gen_bool(item_drop_chance(player_luck)) {
                if rng.gen_bool(GEM_DROP_SHARE) {
                    Some(RewardDrop::Gems(vec![random_stat(rng)]))
                } else {
                    let level = item_level_for_stage(stage_index);
                    Some(RewardDrop::Item(generate_item(roll_slot(rng), level, tier, rng)))
                }
            } else {
                None
            };
            DefeatReward {
                xp,
                gold: roll_gold(enemy.gold_value, player_luck, rng),
                drop,
            }
        }
    }
}
