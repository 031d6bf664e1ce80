//! Area themes and enemy species tables.

use crate::character::attributes::BaseStats;
use crate::combat::element::Element;
use crate::combat::types::SpeciesKind;
use crate::core::constants::STAGE_AREA_SIZE;

/// An enemy archetype. Spawned enemies copy these values and apply level
/// scaling on top, see `Enemy::spawn`.
#[derive(Debug, Clone)]
pub struct Species {
    pub name: &'static str,
    pub kind: SpeciesKind,
    pub element: Element,
    pub base_stats: BaseStats,
    pub base_xp: u64,
    pub gold_value: u64,
    pub half_width: f64,
    pub prepare_ms: u64,
    pub recover_ms: u64,
}

/// A ten-stage slice of the world sharing a roster, a boss and a look.
#[derive(Debug, Clone)]
pub struct Area {
    pub name: &'static str,
    pub roster: Vec<Species>,
    pub boss: Species,
    pub scenery: [&'static str; 3],
}

#[allow(clippy::too_many_arguments)]
fn species(
    name: &'static str,
    kind: SpeciesKind,
    element: Element,
    stats: (u32, u32, u32, u32, u32),
    base_xp: u64,
    gold_value: u64,
    half_width: f64,
    prepare_ms: u64,
    recover_ms: u64,
) -> Species {
    let (strength, stamina, intelligence, speed, luck) = stats;
    Species {
        name,
        kind,
        element,
        base_stats: BaseStats::from_split(strength, stamina, intelligence, speed, luck),
        base_xp,
        gold_value,
        half_width,
        prepare_ms,
        recover_ms,
    }
}

fn standard(
    name: &'static str,
    element: Element,
    stats: (u32, u32, u32, u32, u32),
    base_xp: u64,
    gold_value: u64,
    half_width: f64,
    prepare_ms: u64,
    recover_ms: u64,
) -> Species {
    species(
        name,
        SpeciesKind::Standard,
        element,
        stats,
        base_xp,
        gold_value,
        half_width,
        prepare_ms,
        recover_ms,
    )
}

fn boss(
    name: &'static str,
    element: Element,
    stats: (u32, u32, u32, u32, u32),
    base_xp: u64,
    gold_value: u64,
    half_width: f64,
) -> Species {
    species(
        name,
        SpeciesKind::Boss,
        element,
        stats,
        base_xp,
        gold_value,
        half_width,
        800,
        550,
    )
}

/// Returns all areas in west-to-east order. Stages past the final area keep
/// using its tables.
pub fn all_areas() -> Vec<Area> {
    use Element::*;

    vec![
        Area {
            name: "Verdant Plains",
            roster: vec![
                standard("Thorn Boar", Neutral, (3, 2, 1, 2, 1), 10, 6, 18.0, 500, 350),
                standard("Meadow Slime", Water, (2, 3, 1, 1, 1), 8, 5, 14.0, 600, 400),
                standard("Sprout Imp", Earth, (2, 2, 2, 3, 1), 12, 8, 12.0, 450, 300),
            ],
            boss: boss("Elder Boarlord", Earth, (5, 4, 2, 2, 2), 60, 45, 30.0),
            scenery: ["oak_tree", "wildflowers", "boulder"],
        },
        Area {
            name: "Whispering Woods",
            roster: vec![
                standard("Timber Wolf", Neutral, (4, 3, 1, 4, 2), 16, 10, 17.0, 420, 300),
                standard("Moss Treant", Earth, (4, 5, 2, 1, 1), 20, 12, 24.0, 700, 500),
                standard("Hollow Wisp", Wind, (2, 2, 4, 4, 2), 18, 11, 10.0, 400, 280),
            ],
            boss: boss("Heartwood Ancient", Earth, (7, 7, 3, 2, 2), 90, 70, 34.0),
            scenery: ["pine_tree", "fern_patch", "mossy_log"],
        },
        Area {
            name: "Sunscorch Desert",
            roster: vec![
                standard("Dune Scorpion", Neutral, (5, 4, 1, 3, 2), 24, 15, 16.0, 430, 300),
                standard("Mirage Serpent", Fire, (4, 3, 4, 4, 2), 28, 17, 15.0, 400, 280),
                standard("Sand Wraith", Wind, (3, 3, 5, 4, 3), 30, 18, 13.0, 380, 260),
            ],
            boss: boss("Dunetide Colossus", Fire, (9, 8, 4, 2, 2), 130, 100, 36.0),
            scenery: ["cactus", "dune_grass", "sun_bleached_bones"],
        },
        Area {
            name: "Frostbite Tundra",
            roster: vec![
                standard("Frost Lurker", Water, (6, 5, 3, 3, 2), 34, 20, 18.0, 450, 320),
                standard("Snow Harpy", Wind, (5, 4, 4, 6, 3), 36, 22, 15.0, 380, 260),
                standard("Ice Revenant", Water, (5, 5, 6, 3, 2), 40, 24, 16.0, 420, 300),
            ],
            boss: boss("Glacier Tyrant", Water, (11, 10, 6, 3, 3), 180, 140, 38.0),
            scenery: ["ice_spike", "snowdrift", "frozen_shrub"],
        },
        Area {
            name: "Ember Caldera",
            roster: vec![
                standard("Cinder Hound", Fire, (7, 5, 4, 6, 3), 44, 26, 16.0, 380, 260),
                standard("Magma Crawler", Fire, (8, 7, 3, 2, 2), 48, 28, 20.0, 520, 380),
                standard("Ash Djinn", Wind, (5, 5, 8, 5, 4), 52, 30, 14.0, 360, 250),
            ],
            boss: boss("Caldera Wyrm", Fire, (13, 12, 8, 4, 3), 240, 190, 40.0),
            scenery: ["lava_vent", "scorched_stump", "obsidian_shard"],
        },
        Area {
            name: "Stormreach Peaks",
            roster: vec![
                standard("Crag Eagle", Wind, (8, 6, 4, 8, 4), 56, 32, 15.0, 350, 240),
                standard("Thunder Ram", Neutral, (10, 8, 3, 5, 3), 60, 35, 19.0, 480, 340),
                standard("Storm Naga", Water, (7, 6, 9, 6, 4), 64, 38, 16.0, 400, 280),
            ],
            boss: boss("Tempest Roc", Wind, (15, 13, 9, 8, 4), 310, 250, 42.0),
            scenery: ["crag_spire", "wind_bent_pine", "rope_bridge_post"],
        },
        Area {
            name: "Gloomveil Marsh",
            roster: vec![
                standard("Bog Stalker", Dark, (10, 8, 5, 6, 4), 70, 40, 17.0, 420, 300),
                standard("Mire Toad", Water, (9, 10, 4, 3, 3), 74, 42, 21.0, 550, 400),
                standard("Veil Shade", Dark, (7, 6, 11, 7, 5), 80, 46, 13.0, 360, 250),
            ],
            boss: boss("Gloom Hydra", Dark, (17, 16, 11, 5, 4), 400, 320, 44.0),
            scenery: ["dead_willow", "bog_reeds", "glow_mushroom"],
        },
        Area {
            name: "Celestial Ruins",
            roster: vec![
                standard("Gilded Sentinel", Light, (12, 11, 6, 5, 4), 90, 52, 18.0, 460, 320),
                standard("Ruin Acolyte", Dark, (9, 8, 13, 7, 5), 96, 56, 14.0, 380, 260),
                standard("Radiant Wisp", Light, (8, 7, 14, 9, 6), 100, 60, 11.0, 340, 230),
            ],
            boss: boss("Archon of Dawn", Light, (20, 18, 14, 8, 6), 520, 420, 46.0),
            scenery: ["broken_column", "rune_stone", "floating_shard"],
        },
    ]
}

/// Rare spawn: always drops a handful of stat gems.
pub fn gem_slime_species() -> Species {
    species(
        "Gem Slime",
        SpeciesKind::GemSlime,
        Element::Light,
        (1, 2, 1, 6, 8),
        30,
        10,
        12.0,
        700,
        500,
    )
}

/// Rare spawn: drops a flat gold pile instead of the usual roll.
pub fn gold_slime_species() -> Species {
    species(
        "Gold Slime",
        SpeciesKind::GoldSlime,
        Element::Neutral,
        (1, 3, 1, 5, 8),
        20,
        0,
        12.0,
        700,
        500,
    )
}

/// Area tier for a stage, clamped to the last defined area.
pub fn area_tier(stage_index: u32) -> u32 {
    (stage_index / STAGE_AREA_SIZE).min(all_areas().len() as u32 - 1)
}

pub fn area_for_stage(stage_index: u32) -> Area {
    let areas = all_areas();
    let index = (area_tier(stage_index)) as usize;
    areas[index].clone()
}
