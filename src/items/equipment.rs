use super::types::{EquipSlot, Item, MasterId};
use serde::{Deserialize, Serialize};

/// The three equip slots.
///
/// When adding new slots, use `#[serde(default)]` so old save files keep
/// loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> &Option<Item> {
        match slot {
            EquipSlot::Weapon => &self.weapon,
            EquipSlot::Armor => &self.armor,
            EquipSlot::Accessory => &self.accessory,
        }
    }

    pub fn set(&mut self, slot: EquipSlot, item: Option<Item>) {
        match slot {
            EquipSlot::Weapon => self.weapon = item,
            EquipSlot::Armor => self.armor = item,
            EquipSlot::Accessory => self.accessory = item,
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    pub fn equipped_master_ids(&self) -> Vec<MasterId> {
        self.iter_equipped().map(|item| item.master_id).collect()
    }
}

/// Item A dominates item B when both share a master id and A's level is
/// equal or higher.
pub fn dominates(a: &Item, b: &Item) -> bool {
    a.master_id == b.master_id && a.level >= b.level
}

/// What happened to an item offered to the player.
#[derive(Debug, Clone, PartialEq)]
pub enum AdoptOutcome {
    /// Equipped into its slot; the previous occupant (if any, different
    /// master) moved to the inventory.
    Equipped { replaced: Option<String> },
    /// Kept in the inventory.
    Stored,
    /// Discarded: an owned instance of the same master already dominates it.
    Rejected { dominated_by: String },
}

impl AdoptOutcome {
    pub fn was_kept(&self) -> bool {
        !matches!(self, AdoptOutcome::Rejected { .. })
    }
}

/// Runs the upgrade filter for a newly acquired item.
///
/// Invariant preserved: for every master id, the equipped instance (if any)
/// is the highest-level owned instance, and the inventory never holds an
/// instance dominated by another owned one.
pub fn adopt_item(
    equipment: &mut Equipment,
    inventory: &mut Vec<Item>,
    item: Item,
) -> AdoptOutcome {
    // An owned same-master instance at equal or higher level wins outright.
    let owner = equipment
        .iter_equipped()
        .chain(inventory.iter())
        .find(|owned| dominates(owned, &item));
    if let Some(owned) = owner {
        return AdoptOutcome::Rejected {
            dominated_by: owned.display_name.clone(),
        };
    }

    // The incoming instance dominates any same-master stragglers.
    inventory.retain(|owned| owned.master_id != item.master_id);

    let slot = item.slot;
    match equipment.get(slot) {
        None => {
            equipment.set(slot, Some(item));
            AdoptOutcome::Equipped { replaced: None }
        }
        Some(current) if current.master_id == item.master_id => {
            // Same master at a lower level: replaced and discarded.
            let replaced = current.display_name.clone();
            equipment.set(slot, Some(item));
            AdoptOutcome::Equipped {
                replaced: Some(replaced),
            }
        }
        Some(current) if item.score() > current.score() => {
            let previous = current.clone();
            let replaced = previous.display_name.clone();
            equipment.set(slot, Some(item));
            inventory.push(previous);
            AdoptOutcome::Equipped {
                replaced: Some(replaced),
            }
        }
        Some(_) => {
            inventory.push(item);
            AdoptOutcome::Stored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog::master;
    use crate::items::generation::instantiate_master;

    fn item(master_id: MasterId, level: u32) -> Item {
        instantiate_master(&master(master_id).unwrap(), level)
    }

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert_eq!(eq.iter_equipped().count(), 0);
        assert!(eq.equipped_master_ids().is_empty());
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut eq = Equipment::new();
        let sword = item(0, 1);
        eq.set(EquipSlot::Weapon, Some(sword.clone()));
        assert_eq!(eq.get(EquipSlot::Weapon), &Some(sword));
        assert_eq!(eq.iter_equipped().count(), 1);
    }

    #[test]
    fn test_dominates_same_master_only() {
        assert!(dominates(&item(0, 2), &item(0, 1)));
        assert!(dominates(&item(0, 2), &item(0, 2)));
        assert!(!dominates(&item(0, 1), &item(0, 2)));
        assert!(!dominates(&item(1, 9), &item(0, 1)));
    }

    #[test]
    fn test_adopt_into_empty_slot_equips() {
        let mut eq = Equipment::new();
        let mut inv = Vec::new();
        let outcome = adopt_item(&mut eq, &mut inv, item(0, 1));
        assert_eq!(outcome, AdoptOutcome::Equipped { replaced: None });
        assert!(eq.weapon.is_some());
        assert!(inv.is_empty());
    }

    #[test]
    fn test_adopt_dominated_item_is_rejected() {
        let mut eq = Equipment::new();
        let mut inv = Vec::new();
        adopt_item(&mut eq, &mut inv, item(0, 3));

        let outcome = adopt_item(&mut eq, &mut inv, item(0, 2));
        assert!(matches!(outcome, AdoptOutcome::Rejected { .. }));
        assert_eq!(eq.weapon.as_ref().unwrap().level, 3);
        assert!(inv.is_empty());

        // Equal level also rejects
        let outcome = adopt_item(&mut eq, &mut inv, item(0, 3));
        assert!(matches!(outcome, AdoptOutcome::Rejected { .. }));
    }

    #[test]
    fn test_adopt_same_master_upgrade_replaces_in_place() {
        let mut eq = Equipment::new();
        let mut inv = Vec::new();
        adopt_item(&mut eq, &mut inv, item(0, 1));

        let outcome = adopt_item(&mut eq, &mut inv, item(0, 4));
        assert!(matches!(outcome, AdoptOutcome::Equipped { replaced: Some(_) }));
        assert_eq!(eq.weapon.as_ref().unwrap().level, 4);
        // The dominated old copy is discarded, not stored
        assert!(inv.is_empty());
    }

    #[test]
    fn test_adopt_better_different_master_moves_old_to_inventory() {
        let mut eq = Equipment::new();
        let mut inv = Vec::new();
        adopt_item(&mut eq, &mut inv, item(0, 1)); // Worn Shortsword, score 3

        let outcome = adopt_item(&mut eq, &mut inv, item(1, 2)); // Hunter's Axe, score 10
        assert!(matches!(outcome, AdoptOutcome::Equipped { replaced: Some(_) }));
        assert_eq!(eq.weapon.as_ref().unwrap().master_id, 1);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv[0].master_id, 0);
    }

    #[test]
    fn test_adopt_worse_different_master_is_stored() {
        let mut eq = Equipment::new();
        let mut inv = Vec::new();
        adopt_item(&mut eq, &mut inv, item(1, 3)); // strong axe

        let outcome = adopt_item(&mut eq, &mut inv, item(0, 1)); // weak sword
        assert_eq!(outcome, AdoptOutcome::Stored);
        assert_eq!(eq.weapon.as_ref().unwrap().master_id, 1);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_incoming_purges_dominated_inventory_copies() {
        let mut eq = Equipment::new();
        let mut inv = Vec::new();
        adopt_item(&mut eq, &mut inv, item(1, 5)); // equipped axe
        adopt_item(&mut eq, &mut inv, item(0, 1)); // stored sword lv1

        // A higher sword replaces the stored copy rather than stacking
        let outcome = adopt_item(&mut eq, &mut inv, item(0, 2));
        assert_eq!(outcome, AdoptOutcome::Stored);
        let swords: Vec<&Item> = inv.iter().filter(|i| i.master_id == 0).collect();
        assert_eq!(swords.len(), 1);
        assert_eq!(swords[0].level, 2);
    }

    #[test]
    fn test_no_downgrade_invariant_over_sequences() {
        let mut eq = Equipment::new();
        let mut inv = Vec::new();
        let offers = [
            (0, 1),
            (1, 1),
            (0, 3),
            (2, 1),
            (1, 2),
            (0, 2),
            (2, 1),
            (1, 5),
        ];
        for (master_id, level) in offers {
            adopt_item(&mut eq, &mut inv, item(master_id, level));
        }

        // Every equipped item is the highest-level owned copy of its master.
        for equipped in eq.iter_equipped() {
            for owned in eq.iter_equipped().chain(inv.iter()) {
                if owned.master_id == equipped.master_id {
                    assert!(equipped.level >= owned.level);
                }
            }
        }
        // No owned pair where one strictly dominates the other.
        let owned: Vec<&Item> = eq.iter_equipped().chain(inv.iter()).collect();
        for a in &owned {
            for b in &owned {
                if a.instance_id != b.instance_id {
                    assert!(
                        !(a.master_id == b.master_id),
                        "two copies of master {} held at once",
                        a.master_id
                    );
                }
            }
        }
    }
}
