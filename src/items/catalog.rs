use super::types::{BonusKind, ElementalDamage, EquipSlot, MasterId, StatBonus};
use crate::combat::element::Element;

/// A master template in the equipment catalog. `tier` is the first area
/// index where the factory may roll it; bonus values are per item level.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMaster {
    pub id: MasterId,
    pub name: &'static str,
    pub slot: EquipSlot,
    pub tier: u32,
    pub base_price: u64,
    pub bonuses: Vec<StatBonus>,
    pub elemental: Vec<ElementalDamage>,
}

fn bonus(kind: BonusKind, value: u32) -> StatBonus {
    StatBonus { kind, value }
}

fn elemental(element: Element, power: u32) -> ElementalDamage {
    ElementalDamage { element, power }
}

/// The full master catalog. Ids are stable and saved inside items, so
/// entries are append-only.
pub fn all_masters() -> Vec<ItemMaster> {
    vec![
        // Weapons
        ItemMaster {
            id: 0,
            name: "Worn Shortsword",
            slot: EquipSlot::Weapon,
            tier: 0,
            base_price: 40,
            bonuses: vec![bonus(BonusKind::PhysicalAttack, 3)],
            elemental: vec![],
        },
        ItemMaster {
            id: 1,
            name: "Hunter's Axe",
            slot: EquipSlot::Weapon,
            tier: 1,
            base_price: 60,
            bonuses: vec![bonus(BonusKind::PhysicalAttack, 5)],
            elemental: vec![],
        },
        ItemMaster {
            id: 2,
            name: "Ember Blade",
            slot: EquipSlot::Weapon,
            tier: 2,
            base_price: 80,
            bonuses: vec![bonus(BonusKind::PhysicalAttack, 6)],
            elemental: vec![elemental(Element::Fire, 20)],
        },
        ItemMaster {
            id: 3,
            name: "Gale Rapier",
            slot: EquipSlot::Weapon,
            tier: 3,
            base_price: 100,
            bonuses: vec![
                bonus(BonusKind::PhysicalAttack, 5),
                bonus(BonusKind::Speed, 2),
            ],
            elemental: vec![elemental(Element::Wind, 25)],
        },
        ItemMaster {
            id: 4,
            name: "Tidecaller Staff",
            slot: EquipSlot::Weapon,
            tier: 3,
            base_price: 100,
            bonuses: vec![
                bonus(BonusKind::PhysicalAttack, 3),
                bonus(BonusKind::MagicalAttack, 6),
            ],
            elemental: vec![elemental(Element::Water, 30)],
        },
        ItemMaster {
            id: 5,
            name: "Earthshaker Maul",
            slot: EquipSlot::Weapon,
            tier: 4,
            base_price: 120,
            bonuses: vec![bonus(BonusKind::PhysicalAttack, 9)],
            elemental: vec![elemental(Element::Earth, 25)],
        },
        ItemMaster {
            id: 6,
            name: "Lightbrand",
            slot: EquipSlot::Weapon,
            tier: 6,
            base_price: 160,
            bonuses: vec![bonus(BonusKind::PhysicalAttack, 8)],
            elemental: vec![elemental(Element::Light, 35)],
        },
        ItemMaster {
            id: 7,
            name: "Nightfang",
            slot: EquipSlot::Weapon,
            tier: 6,
            base_price: 160,
            bonuses: vec![
                bonus(BonusKind::PhysicalAttack, 8),
                bonus(BonusKind::LuckValue, 2),
            ],
            elemental: vec![elemental(Element::Dark, 35)],
        },
        ItemMaster {
            id: 8,
            name: "Gambler's Dirk",
            slot: EquipSlot::Weapon,
            tier: 2,
            base_price: 90,
            bonuses: vec![
                bonus(BonusKind::PhysicalAttack, 4),
                bonus(BonusKind::LuckValue, 8),
            ],
            elemental: vec![],
        },
        ItemMaster {
            id: 9,
            name: "Kingsguard Blade",
            slot: EquipSlot::Weapon,
            tier: 5,
            base_price: 140,
            bonuses: vec![bonus(BonusKind::PhysicalAttack, 7)],
            elemental: vec![],
        },
        // Armor
        ItemMaster {
            id: 10,
            name: "Cloth Tunic",
            slot: EquipSlot::Armor,
            tier: 0,
            base_price: 40,
            bonuses: vec![bonus(BonusKind::PhysicalDefense, 2)],
            elemental: vec![],
        },
        ItemMaster {
            id: 11,
            name: "Leather Jerkin",
            slot: EquipSlot::Armor,
            tier: 1,
            base_price: 60,
            bonuses: vec![bonus(BonusKind::PhysicalDefense, 4)],
            elemental: vec![],
        },
        ItemMaster {
            id: 12,
            name: "Scale Mail",
            slot: EquipSlot::Armor,
            tier: 2,
            base_price: 80,
            bonuses: vec![bonus(BonusKind::PhysicalDefense, 6)],
            elemental: vec![],
        },
        ItemMaster {
            id: 13,
            name: "Frostweave Robe",
            slot: EquipSlot::Armor,
            tier: 3,
            base_price: 100,
            bonuses: vec![
                bonus(BonusKind::PhysicalDefense, 3),
                bonus(BonusKind::MagicalDefense, 5),
            ],
            elemental: vec![],
        },
        ItemMaster {
            id: 14,
            name: "Stoneplate",
            slot: EquipSlot::Armor,
            tier: 4,
            base_price: 120,
            bonuses: vec![bonus(BonusKind::PhysicalDefense, 9)],
            elemental: vec![],
        },
        ItemMaster {
            id: 15,
            name: "Sunforged Cuirass",
            slot: EquipSlot::Armor,
            tier: 6,
            base_price: 160,
            bonuses: vec![
                bonus(BonusKind::PhysicalDefense, 8),
                bonus(BonusKind::MagicalDefense, 4),
            ],
            elemental: vec![],
        },
        ItemMaster {
            id: 16,
            name: "Gambler's Vest",
            slot: EquipSlot::Armor,
            tier: 2,
            base_price: 90,
            bonuses: vec![
                bonus(BonusKind::PhysicalDefense, 3),
                bonus(BonusKind::LuckValue, 6),
            ],
            elemental: vec![],
        },
        ItemMaster {
            id: 17,
            name: "Kingsguard Plate",
            slot: EquipSlot::Armor,
            tier: 5,
            base_price: 140,
            bonuses: vec![bonus(BonusKind::PhysicalDefense, 8)],
            elemental: vec![],
        },
        // Accessories
        ItemMaster {
            id: 18,
            name: "Copper Ring",
            slot: EquipSlot::Accessory,
            tier: 0,
            base_price: 40,
            bonuses: vec![
                bonus(BonusKind::PhysicalAttack, 1),
                bonus(BonusKind::PhysicalDefense, 1),
            ],
            elemental: vec![],
        },
        ItemMaster {
            id: 19,
            name: "Swift Anklet",
            slot: EquipSlot::Accessory,
            tier: 1,
            base_price: 60,
            bonuses: vec![bonus(BonusKind::Speed, 4)],
            elemental: vec![],
        },
        ItemMaster {
            id: 20,
            name: "Sage Pendant",
            slot: EquipSlot::Accessory,
            tier: 2,
            base_price: 80,
            bonuses: vec![
                bonus(BonusKind::MagicalAttack, 4),
                bonus(BonusKind::MagicalDefense, 2),
            ],
            elemental: vec![],
        },
        ItemMaster {
            id: 21,
            name: "Lucky Coin",
            slot: EquipSlot::Accessory,
            tier: 3,
            base_price: 100,
            bonuses: vec![bonus(BonusKind::LuckValue, 6)],
            elemental: vec![],
        },
        ItemMaster {
            id: 22,
            name: "Vital Charm",
            slot: EquipSlot::Accessory,
            tier: 4,
            base_price: 120,
            bonuses: vec![bonus(BonusKind::MaxHp, 15)],
            elemental: vec![],
        },
        ItemMaster {
            id: 23,
            name: "Gambler's Signet",
            slot: EquipSlot::Accessory,
            tier: 2,
            base_price: 90,
            bonuses: vec![
                bonus(BonusKind::LuckValue, 4),
                bonus(BonusKind::PhysicalAttack, 1),
            ],
            elemental: vec![],
        },
        ItemMaster {
            id: 24,
            name: "Kingsguard Signet",
            slot: EquipSlot::Accessory,
            tier: 5,
            base_price: 140,
            bonuses: vec![
                bonus(BonusKind::PhysicalDefense, 2),
                bonus(BonusKind::MaxHp, 10),
            ],
            elemental: vec![],
        },
    ]
}

pub fn master(id: MasterId) -> Option<ItemMaster> {
    all_masters().into_iter().find(|m| m.id == id)
}

/// Masters eligible for generation in the given slot at or below the given
/// area tier. Every slot has a tier-0 master, so this is never empty.
pub fn masters_for_slot(slot: EquipSlot, max_tier: u32) -> Vec<ItemMaster> {
    all_masters()
        .into_iter()
        .filter(|m| m.slot == slot && m.tier <= max_tier)
        .collect()
}

pub fn catalog_size() -> usize {
    all_masters().len()
}

/// Non-linear bonus granted by wearing a complete named set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetBonusKind {
    /// Adds luck_value/divisor to physical attack and physical defense.
    LuckIntoPhysical { divisor: u32 },
    /// Doubles derived speed.
    DoubleSpeed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetDefinition {
    pub name: &'static str,
    pub pieces: [MasterId; 3],
    pub bonus: SetBonusKind,
}

pub fn all_sets() -> Vec<SetDefinition> {
    vec![
        SetDefinition {
            name: "Gambler's Trio",
            pieces: [8, 16, 23],
            bonus: SetBonusKind::LuckIntoPhysical { divisor: 4 },
        },
        SetDefinition {
            name: "Kingsguard Regalia",
            pieces: [9, 17, 24],
            bonus: SetBonusKind::DoubleSpeed,
        },
    ]
}

/// First set whose three pieces are all among the equipped master ids.
pub fn completed_set(equipped_masters: &[MasterId]) -> Option<SetDefinition> {
    all_sets()
        .into_iter()
        .find(|set| set.pieces.iter().all(|p| equipped_masters.contains(p)))
}
