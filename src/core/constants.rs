// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 50;
pub const TICKS_PER_SECOND: u64 = 20;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 60;
pub const RESPAWN_DELAY_MS: u64 = 3000;

// Stage geometry (spatial units are pixels)
pub const STAGE_LENGTH: f64 = 960.0;
pub const STAGE_AREA_SIZE: u32 = 10;
pub const PLAYER_START_X: f64 = 80.0;
pub const PLAYER_HALF_WIDTH: f64 = 16.0;
pub const PLAYER_WALK_SPEED: f64 = 120.0; // px per second
pub const ATTACK_RANGE: f64 = 12.0; // max gap between bounding boxes
pub const ENGAGE_RANGE: f64 = 260.0;
pub const ENGAGE_HYSTERESIS_MARGIN: f64 = 24.0;
pub const PROMPT_RANGE: f64 = 48.0;

// Structure stage offsets within an area (stage_index % STAGE_AREA_SIZE)
pub const HOUSE_STAGE_OFFSET: u32 = 2;
pub const SHOP_A_STAGE_OFFSET: u32 = 4;
pub const SHOP_B_STAGE_OFFSET: u32 = 6;
pub const TELEPORTER_STAGE_OFFSET: u32 = 8;
pub const BOSS_STAGE_OFFSET: u32 = 9;
pub const STRUCTURE_CENTER_JITTER: f64 = 80.0;

// Enemy placement
pub const ENEMIES_PER_STAGE_MIN: u32 = 4;
pub const ENEMIES_PER_STAGE_MAX: u32 = 5;
pub const BOSS_ESCORT_COUNT: u32 = 2;
pub const SPAWN_MARGIN_LEFT: f64 = 140.0;
pub const SPAWN_MARGIN_RIGHT: f64 = 80.0;
pub const MIN_ENEMY_SEPARATION: f64 = 70.0;
pub const STRUCTURE_CLEARANCE: f64 = 90.0;
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 20;
pub const GEM_SLIME_SPAWN_CHANCE: f64 = 0.04;
pub const GOLD_SLIME_SPAWN_CHANCE: f64 = 0.02;

// Scenery
pub const SCENERY_STEP: f64 = 40.0;
pub const SCENERY_CHANCE_PER_STEP: f64 = 0.18;
pub const SCENERY_VARIANTS: u32 = 3;

// Combat math
pub const DAMAGE_VARIANCE_MIN: f64 = 0.9;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.1;
pub const CRIT_CHANCE_CAP: f64 = 0.75;
pub const CRIT_LUCK_DIVISOR: f64 = 400.0;
pub const CRIT_DAMAGE_MULTIPLIER: f64 = 1.5;
pub const MAGICAL_BASE_MULTIPLIER: f64 = 1.5;

// Enemy level scaling: 1 + LINEAR*(level-1) + QUADRATIC*(level-1)^2
pub const ENEMY_SCALE_LINEAR: f64 = 0.15;
pub const ENEMY_SCALE_QUADRATIC: f64 = 0.005;

// Attack cooldown breakpoints: (speed ratio, player cooldown ms).
// Looked up with ratio = player_speed / enemy_speed; the first row whose
// ratio is >= the computed ratio wins. The enemy cooldown is derived as
// player_cooldown / ratio, floored at ENEMY_COOLDOWN_FLOOR_MS.
pub const SPEED_RATIO_COOLDOWNS: [(f64, u64); 8] = [
    (0.25, 2400),
    (0.5, 1800),
    (0.75, 1500),
    (1.0, 1200),
    (1.5, 1000),
    (2.0, 800),
    (4.0, 600),
    (f64::INFINITY, 500),
];
pub const ENEMY_COOLDOWN_FLOOR_MS: u64 = 200;

// Character
pub const NUM_STATS: usize = 5;
pub const STARTING_STAT_VALUE: u32 = 1;
pub const STARTING_GOLD: u64 = 50;

// Player derived stat coefficients
pub const PLAYER_BASE_HP: u32 = 20;
pub const PLAYER_HP_PER_STAMINA: u32 = 10;
pub const PLAYER_HP_PER_STRENGTH: u32 = 2;
pub const PLAYER_HP_PER_LEVEL: u32 = 10;
pub const PLAYER_BASE_PHYSICAL_ATTACK: u32 = 5;
pub const PLAYER_ATTACK_PER_STRENGTH: u32 = 2;
pub const PLAYER_MAGIC_PER_INTELLIGENCE: u32 = 2;
pub const PLAYER_BASE_SPEED: u32 = 10;
pub const PLAYER_SPEED_PER_AGILITY: u32 = 2;
pub const PLAYER_BASE_LUCK_VALUE: u32 = 5;

// Enemy derived stat coefficients
pub const ENEMY_BASE_HP: u32 = 12;
pub const ENEMY_HP_PER_STAMINA: u32 = 6;
pub const ENEMY_HP_PER_STRENGTH: u32 = 2;
pub const ENEMY_BASE_PHYSICAL_ATTACK: u32 = 3;
pub const ENEMY_ATTACK_PER_STRENGTH: u32 = 2;
pub const ENEMY_MAGIC_PER_INTELLIGENCE: u32 = 2;
pub const ENEMY_BASE_SPEED: u32 = 8;
pub const ENEMY_SPEED_PER_AGILITY: u32 = 2;

// XP and leveling
pub const XP_THRESHOLD_INITIAL: u64 = 100;
pub const XP_THRESHOLD_GROWTH: f64 = 1.25;
pub const XP_STAGE_FACTOR: f64 = 0.25;
pub const LEVEL_UP_STAT_POINTS: u32 = 3;

// Rewards
pub const GOLD_VARIANCE_MIN: f64 = 0.8;
pub const GOLD_VARIANCE_MAX: f64 = 1.2;
pub const GOLD_LUCK_DIVISOR: f64 = 120.0;
pub const GOLD_SLIME_BASE_GOLD: u64 = 200;
pub const ITEM_DROP_BASE_CHANCE: f64 = 0.12;
pub const ITEM_DROP_LUCK_MULTIPLIER: f64 = 0.002;
pub const GEM_DROP_SHARE: f64 = 0.30;
pub const GEM_STAT_BONUS: u32 = 1;
pub const GEM_SLIME_GEMS_MIN: u32 = 3;
pub const GEM_SLIME_GEMS_MAX: u32 = 5;

// Shops and services
pub const SHOP_STOCK_SIZE: usize = 4;
pub const SHOP_PREMIUM_CHANCE: f64 = 0.25;
pub const SHOP_PRICE_PER_ITEM_LEVEL: u64 = 60;
pub const HEAL_COST_PER_LEVEL: u64 = 10;
pub const TELEPORT_COST_PER_STAGE: u64 = 5;

// Event surfaces
pub const EVENT_LOG_CAPACITY: usize = 50;
pub const FLOATING_TEXT_LIFETIME_MS: u64 = 900;

// Persistence
pub const SAVE_FILE_VERSION: u32 = 1;
pub const PROFILE_NAME_MAX_LENGTH: usize = 16;
