use crate::combat::types::Enemy;
use crate::core::constants::*;
use crate::items::types::EquipSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    House,
    WeaponShop,
    ArmorShop,
    AccessoryShop,
    Teleporter,
}

impl StructureKind {
    pub fn name(&self) -> &'static str {
        match self {
            StructureKind::House => "House",
            StructureKind::WeaponShop => "Weapon Shop",
            StructureKind::ArmorShop => "Armor Shop",
            StructureKind::AccessoryShop => "Accessory Shop",
            StructureKind::Teleporter => "Teleporter",
        }
    }

    /// The slot a shop of this kind sells, None for non-shops.
    pub fn shop_slot(&self) -> Option<EquipSlot> {
        match self {
            StructureKind::WeaponShop => Some(EquipSlot::Weapon),
            StructureKind::ArmorShop => Some(EquipSlot::Armor),
            StructureKind::AccessoryShop => Some(EquipSlot::Accessory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Structure {
    pub id: u32,
    pub kind: StructureKind,
    pub x: f64,
}

/// Cosmetic only; no gameplay rules read these.
#[derive(Debug, Clone)]
pub struct SceneryObject {
    pub id: u32,
    pub sprite: &'static str,
    pub x: f64,
}

/// All per-stage world content plus the counters that outlive it.
///
/// Enemies, structures and scenery are discarded wholesale on every stage
/// change; the shop rotation and id counters are the only generator state
/// carried across stages.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    pub stage_index: u32,
    pub structures: Vec<Structure>,
    pub enemies: Vec<Enemy>,
    pub scenery: Vec<SceneryObject>,
    pub shop_rotation: u32,
    pub next_enemy_id: u32,
    pub next_structure_id: u32,
}

impl WorldState {
    pub fn alloc_enemy_id(&mut self) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        id
    }

    pub fn alloc_structure_id(&mut self) -> u32 {
        let id = self.next_structure_id;
        self.next_structure_id += 1;
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }
}

pub fn stage_start_x(stage_index: u32) -> f64 {
    stage_index as f64 * STAGE_LENGTH
}

pub fn stage_end_x(stage_index: u32) -> f64 {
    stage_start_x(stage_index) + STAGE_LENGTH
}

pub fn stage_center_x(stage_index: u32) -> f64 {
    stage_start_x(stage_index) + STAGE_LENGTH / 2.0
}

/// The stage a world x position falls into. Positions left of the world
/// start map to stage 0.
pub fn stage_for_x(x: f64) -> u32 {
    if x <= 0.0 {
        0
    } else {
        (x / STAGE_LENGTH).floor() as u32
    }
}
