use crate::combat::element::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    pub fn all() -> [EquipSlot; 3] {
        [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Armor => "Armor",
            EquipSlot::Accessory => "Accessory",
        }
    }
}

/// Derived-stat keys an equipment bonus may target. Bonuses on any other
/// quantity are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    MaxHp,
    PhysicalAttack,
    PhysicalDefense,
    MagicalAttack,
    MagicalDefense,
    Speed,
    LuckValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonus {
    pub kind: BonusKind,
    pub value: u32,
}

/// One elemental damage component on a weapon. Each component resolves as a
/// separate magical hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementalDamage {
    pub element: Element,
    pub power: u32,
}

/// Index into the master catalog.
pub type MasterId = u16;

/// A concrete equipment instance. Bonus values are already scaled by `level`
/// at creation time, so deriving stats never consults the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub master_id: MasterId,
    pub instance_id: String,
    pub slot: EquipSlot,
    pub level: u32,
    pub base_name: String,
    pub display_name: String,
    pub bonuses: Vec<StatBonus>,
    #[serde(default)]
    pub elemental: Vec<ElementalDamage>,
}

impl Item {
    /// Summed positive stat total used to compare items of different masters.
    pub fn score(&self) -> u32 {
        let bonus_total: u32 = self.bonuses.iter().map(|b| b.value).sum();
        let elemental_total: u32 = self.elemental.iter().map(|e| e.power).sum();
        bonus_total + elemental_total
    }

    pub fn bonus(&self, kind: BonusKind) -> u32 {
        self.bonuses
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.value)
            .sum()
    }
}
