use super::catalog::{master, masters_for_slot, ItemMaster};
use super::types::{ElementalDamage, EquipSlot, Item, StatBonus};
use crate::core::constants::{SHOP_PRICE_PER_ITEM_LEVEL, STAGE_AREA_SIZE};
use rand::Rng;
use uuid::Uuid;

/// Item level granted by drops and shop stock at the given stage.
pub fn item_level_for_stage(stage_index: u32) -> u32 {
    stage_index / STAGE_AREA_SIZE + 1
}

/// Builds a concrete instance of a master at the given level. Bonus values
/// and elemental power scale linearly with level.
pub fn instantiate_master(master: &ItemMaster, level: u32) -> Item {
    let level = level.max(1);
    let bonuses = master
        .bonuses
        .iter()
        .map(|b| StatBonus {
            kind: b.kind,
            value: b.value * level,
        })
        .collect();
    let elemental = master
        .elemental
        .iter()
        .map(|e| ElementalDamage {
            element: e.element,
            power: e.power * level,
        })
        .collect();
    let display_name = if level > 1 {
        format!("{} Lv.{}", master.name, level)
    } else {
        master.name.to_string()
    };

    Item {
        master_id: master.id,
        instance_id: Uuid::new_v4().to_string(),
        slot: master.slot,
        level,
        base_name: master.name.to_string(),
        display_name,
        bonuses,
        elemental,
    }
}

/// Rolls a master of the given slot at or below the area tier and
/// instantiates it at the given level.
pub fn generate_item(slot: EquipSlot, level: u32, area_tier: u32, rng: &mut impl Rng) -> Item {
    let pool = masters_for_slot(slot, area_tier);
    let picked = &pool[rng.gen_range(0..pool.len())];
    instantiate_master(picked, level)
}

pub fn roll_slot(rng: &mut impl Rng) -> EquipSlot {
    match rng.gen_range(0..3) {
        0 => EquipSlot::Weapon,
        1 => EquipSlot::Armor,
        _ => EquipSlot::Accessory,
    }
}

/// Shop price for an item instance.
pub fn item_price(item: &Item) -> u64 {
    let per_level = master(item.master_id)
        .map(|m| m.base_price)
        .unwrap_or(SHOP_PRICE_PER_ITEM_LEVEL);
    per_level * item.level as u64
}
