//! Damage formulas.
//!
//! Pure `*_with_factor` forms take the variance roll and crit flag as
//! arguments so outcomes can be pinned exactly in tests; the `resolve_*`
//! wrappers roll them from the injected rng.

use crate::core::constants::*;
use rand::Rng;

/// Outcome of a single physical attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalHit {
    pub damage: u32,
    pub critical: bool,
}

/// Critical chance from luck value, capped at 75%.
pub fn critical_chance(luck_value: u32) -> f64 {
    (luck_value as f64 / CRIT_LUCK_DIVISOR).min(CRIT_CHANCE_CAP)
}

/// Physical damage with an explicit variance factor and crit flag.
///
/// `raw = atk × atk/(atk+def) × variance`, times 1.5 on a critical,
/// floored, never below 1. A zero atk+def sum falls back to multiplier 1.
pub fn physical_damage_with_factor(
    attack: u32,
    defense: u32,
    variance: f64,
    critical: bool,
) -> u32 {
    let attack_f = attack as f64;
    let pool = attack_f + defense as f64;
    let multiplier = if pool > 0.0 { attack_f / pool } else { 1.0 };

    let mut raw = attack_f * multiplier * variance;
    if critical {
        raw *= CRIT_DAMAGE_MULTIPLIER;
    }
    (raw.floor() as u32).max(1)
}

pub fn resolve_physical(
    attack: u32,
    defense: u32,
    luck_value: u32,
    rng: &mut impl Rng,
) -> PhysicalHit {
    let critical = rng.gen_bool(critical_chance(luck_value));
    let variance = rng.gen_range(DAMAGE_VARIANCE_MIN..DAMAGE_VARIANCE_MAX);
    PhysicalHit {
        damage: physical_damage_with_factor(attack, defense, variance, critical),
        critical,
    }
}

/// Magical damage for one elemental component with an explicit variance
/// factor.
///
/// `base = matk × 1.5 × (1 + power/100)`; variance and the affinity
/// multiplier are floored separately; defense subtracts last and the result
/// never drops below 1.
pub fn magical_damage_with_factor(
    magical_attack: u32,
    elemental_power: u32,
    affinity: f64,
    magical_defense: u32,
    variance: f64,
) -> u32 {
    let base =
        magical_attack as f64 * MAGICAL_BASE_MULTIPLIER * (1.0 + elemental_power as f64 / 100.0);
    let raw = (base * variance).floor();
    let effective = (raw * affinity).floor();
    (effective as i64 - magical_defense as i64).max(1) as u32
}

pub fn resolve_magical(
    magical_attack: u32,
    elemental_power: u32,
    affinity: f64,
    magical_defense: u32,
    rng: &mut impl Rng,
) -> u32 {
    let variance = rng.gen_range(DAMAGE_VARIANCE_MIN..DAMAGE_VARIANCE_MAX);
    magical_damage_with_factor(
        magical_attack,
        elemental_power,
        affinity,
        magical_defense,
        variance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_physical_midpoint_example() {
        // 100 × (100/150) × 1.0 = 66.67, floored
        assert_eq!(physical_damage_with_factor(100, 50, 1.0, false), 66);
    }

    #[test]
    fn test_physical_crit_multiplies_by_half_again() {
        assert_eq!(physical_damage_with_factor(100, 0, 1.0, false), 100);
        assert_eq!(physical_damage_with_factor(100, 0, 1.0, true), 150);
    }

    #[test]
    fn test_physical_zero_pool_guard() {
        // atk + def == 0 falls back to multiplier 1; floor then raises to 1
        assert_eq!(physical_damage_with_factor(0, 0, 1.0, false), 1);
    }

    #[test]
    fn test_physical_damage_never_below_one() {
        for attack in [0, 1, 2, 5, 50] {
            for defense in [0, 1, 10, 500, 10_000] {
                for variance in [0.9, 1.0, 1.1] {
                    let damage = physical_damage_with_factor(attack, defense, variance, false);
                    assert!(damage >= 1, "atk={} def={} var={}", attack, defense, variance);
                }
            }
        }
    }

    #[test]
    fn test_critical_chance_scales_then_caps() {
        assert_eq!(critical_chance(0), 0.0);
        assert_eq!(critical_chance(100), 0.25);
        assert_eq!(critical_chance(400), 0.75);
        assert_eq!(critical_chance(10_000), 0.75);
    }

    #[test]
    fn test_magical_midpoint_example() {
        // base = 20 × 1.5 × 1.5 = 45; ×2 affinity = 90; minus 10 defense
        assert_eq!(magical_damage_with_factor(20, 50, 2.0, 10, 1.0), 80);
    }

    #[test]
    fn test_magical_weak_affinity_halves() {
        // base = 20 × 1.5 = 30; ×0.5 affinity = 15
        assert_eq!(magical_damage_with_factor(20, 0, 0.5, 0, 1.0), 15);
    }

    #[test]
    fn test_magical_defense_cannot_zero_damage() {
        assert_eq!(magical_damage_with_factor(2, 0, 0.5, 100, 1.0), 1);
        for defense in [0, 5, 50, 5_000] {
            assert!(magical_damage_with_factor(10, 20, 1.0, defense, 0.9) >= 1);
        }
    }

    #[test]
    fn test_resolved_physical_stays_in_variance_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..2_000 {
            let hit = resolve_physical(100, 50, 0, &mut rng);
            // luck 0 never crits, so damage sits in [66×0.9, 66×1.1]
            assert!(!hit.critical);
            assert!((59..=73).contains(&hit.damage), "damage {}", hit.damage);
        }
    }

    #[test]
    fn test_resolved_crit_rate_tracks_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let rolls = 10_000;
        let crits = (0..rolls)
            .filter(|_| resolve_physical(100, 50, 400, &mut rng).critical)
            .count();
        let rate = crits as f64 / rolls as f64;
        assert!((0.72..=0.78).contains(&rate), "crit rate {}", rate);
    }

    #[test]
    fn test_resolved_magical_stays_in_variance_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..2_000 {
            // base 45; variance then affinity 1.0; defense 10
            let damage = resolve_magical(20, 50, 1.0, 10, &mut rng);
            assert!((30..=39).contains(&damage), "damage {}", damage);
        }
    }
}
