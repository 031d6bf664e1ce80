//! Enemy attack cycle and engagement selection.
//!
//! All transitions are driven by absolute timestamps carried on the enemy,
//! so ticks can be replayed deterministically at any rate.

use super::types::{AttackState, Enemy, EnemyId};
use crate::core::constants::*;

/// Ratio of player speed to enemy speed, falling back to 1 when either side
/// is zero.
pub fn speed_ratio(player_speed: u32, enemy_speed: u32) -> f64 {
    if player_speed == 0 || enemy_speed == 0 {
        1.0
    } else {
        player_speed as f64 / enemy_speed as f64
    }
}

/// Player attack cooldown: the first breakpoint at or above the ratio wins.
pub fn player_attack_cooldown_ms(ratio: f64) -> u64 {
    for (breakpoint, cooldown) in SPEED_RATIO_COOLDOWNS {
        if breakpoint >= ratio {
            return cooldown;
        }
    }
    SPEED_RATIO_COOLDOWNS[SPEED_RATIO_COOLDOWNS.len() - 1].1
}

/// Engaged enemy cooldown: the player's cooldown divided by the ratio,
/// with a hard floor to cap attack rates.
pub fn enemy_attack_cooldown_ms(ratio: f64) -> u64 {
    let player_cooldown = player_attack_cooldown_ms(ratio);
    let raw = (player_cooldown as f64 / ratio).floor() as u64;
    raw.max(ENEMY_COOLDOWN_FLOOR_MS)
}

/// Advances one enemy's attack cycle. Returns true exactly when the
/// preparing phase completes with the player still in range, the single
/// instant at which this enemy deals damage.
pub fn advance_enemy_state(
    enemy: &mut Enemy,
    now_ms: u64,
    is_engaged: bool,
    player_x: f64,
    cooldown_ms: u64,
) -> bool {
    match enemy.attack_state {
        AttackState::Idle => {
            if is_engaged
                && enemy.in_attack_range(player_x)
                && now_ms.saturating_sub(enemy.last_attack_ms) > cooldown_ms
            {
                enemy.attack_state = AttackState::Preparing;
                enemy.state_until_ms = now_ms + enemy.prepare_ms;
            }
            false
        }
        AttackState::Preparing => {
            if now_ms >= enemy.state_until_ms {
                enemy.attack_state = AttackState::Attacking;
                enemy.state_until_ms = now_ms + enemy.recover_ms;
                enemy.in_attack_range(player_x)
            } else {
                false
            }
        }
        AttackState::Attacking => {
            if now_ms >= enemy.state_until_ms {
                enemy.attack_state = AttackState::Idle;
                enemy.last_attack_ms = now_ms;
            }
            false
        }
    }
}

/// Picks the engaged enemy among living enemies within range.
///
/// A valid current target is kept unless a candidate is closer by more than
/// the hysteresis margin, so equidistant enemies don't cause target flicker.
pub fn select_engaged(enemies: &[Enemy], current: Option<EnemyId>, player_x: f64) -> Option<EnemyId> {
    let mut nearest: Option<(EnemyId, f64)> = None;
    for enemy in enemies.iter().filter(|e| e.is_alive()) {
        let distance = (enemy.x - player_x).abs();
        if distance <= ENGAGE_RANGE {
            match nearest {
                Some((_, best)) if best <= distance => {}
                _ => nearest = Some((enemy.id, distance)),
            }
        }
    }

    let current_entry = current.and_then(|id| {
        enemies
            .iter()
            .find(|e| e.id == id && e.is_alive())
            .map(|e| (e.id, (e.x - player_x).abs()))
    });

    match (current_entry, nearest) {
        (Some((current_id, current_distance)), Some((nearest_id, nearest_distance)))
            if current_distance <= ENGAGE_RANGE =>
        {
            if nearest_distance + ENGAGE_HYSTERESIS_MARGIN < current_distance {
                Some(nearest_id)
            } else {
                Some(current_id)
            }
        }
        (_, nearest) => nearest.map(|(id, _)| id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::BaseStats;
    use crate::combat::element::Element;
    use crate::combat::types::SpeciesKind;
    use crate::world::areas::Species;

    fn test_species() -> Species {
        Species {
            name: "Thorn Boar",
            kind: SpeciesKind::Standard,
            element: Element::Neutral,
            base_stats: BaseStats::from_split(3, 2, 1, 2, 1),
            base_xp: 12,
            gold_value: 8,
            half_width: 18.0,
            prepare_ms: 450,
            recover_ms: 300,
        }
    }

    fn enemy_at(id: EnemyId, x: f64) -> Enemy {
        Enemy::spawn(id, &test_species(), 1, x, 0)
    }

    #[test]
    fn test_speed_ratio_guards_zero() {
        assert_eq!(speed_ratio(0, 14), 1.0);
        assert_eq!(speed_ratio(12, 0), 1.0);
        assert_eq!(speed_ratio(24, 12), 2.0);
    }

    #[test]
    fn test_cooldown_breakpoint_lookup() {
        assert_eq!(player_attack_cooldown_ms(0.2), 2400);
        assert_eq!(player_attack_cooldown_ms(0.25), 2400);
        assert_eq!(player_attack_cooldown_ms(0.3), 1800);
        assert_eq!(player_attack_cooldown_ms(1.0), 1200);
        assert_eq!(player_attack_cooldown_ms(1.2), 1000);
        assert_eq!(player_attack_cooldown_ms(1.6), 800);
        assert_eq!(player_attack_cooldown_ms(3.0), 600);
        assert_eq!(player_attack_cooldown_ms(100.0), 500);
    }

    #[test]
    fn test_enemy_cooldown_divides_and_floors() {
        assert_eq!(enemy_attack_cooldown_ms(1.0), 1200);
        assert_eq!(enemy_attack_cooldown_ms(2.0), 400);
        // 600 / 4 = 150 gets raised to the floor
        assert_eq!(enemy_attack_cooldown_ms(4.0), 200);
        // Slow player stretches the enemy's cycle too
        assert_eq!(enemy_attack_cooldown_ms(0.5), 3600);
    }

    #[test]
    fn test_idle_holds_until_engaged_in_range_off_cooldown() {
        let player_x = 466.0; // gap 0 to an enemy at 500
        let mut enemy = enemy_at(1, 500.0);

        // Off cooldown but not engaged
        assert!(!advance_enemy_state(&mut enemy, 2_000, false, player_x, 1_200));
        assert_eq!(enemy.attack_state, AttackState::Idle);

        // Engaged but out of range
        assert!(!advance_enemy_state(&mut enemy, 2_000, true, 100.0, 1_200));
        assert_eq!(enemy.attack_state, AttackState::Idle);

        // Engaged, in range, cooldown not yet elapsed
        assert!(!advance_enemy_state(&mut enemy, 1_000, true, player_x, 1_200));
        assert_eq!(enemy.attack_state, AttackState::Idle);

        // All three conditions met
        assert!(!advance_enemy_state(&mut enemy, 2_000, true, player_x, 1_200));
        assert_eq!(enemy.attack_state, AttackState::Preparing);
        assert_eq!(enemy.state_until_ms, 2_450);
    }

    #[test]
    fn test_full_attack_cycle_strikes_once() {
        let player_x = 466.0;
        let mut enemy = enemy_at(1, 500.0);

        advance_enemy_state(&mut enemy, 2_000, true, player_x, 1_200);
        assert_eq!(enemy.attack_state, AttackState::Preparing);

        // Timer not yet reached
        assert!(!advance_enemy_state(&mut enemy, 2_400, true, player_x, 1_200));

        // Strike lands exactly when preparing completes
        assert!(advance_enemy_state(&mut enemy, 2_450, true, player_x, 1_200));
        assert_eq!(enemy.attack_state, AttackState::Attacking);
        assert_eq!(enemy.state_until_ms, 2_750);

        // Recovery, then back to idle with the cooldown anchor updated
        assert!(!advance_enemy_state(&mut enemy, 2_750, true, player_x, 1_200));
        assert_eq!(enemy.attack_state, AttackState::Idle);
        assert_eq!(enemy.last_attack_ms, 2_750);
    }

    #[test]
    fn test_strike_whiffs_if_player_left_range() {
        let player_x = 466.0;
        let mut enemy = enemy_at(1, 500.0);

        advance_enemy_state(&mut enemy, 2_000, true, player_x, 1_200);
        // Player walked away during the windup
        assert!(!advance_enemy_state(&mut enemy, 2_450, true, 100.0, 1_200));
        // The cycle still advances
        assert_eq!(enemy.attack_state, AttackState::Attacking);
    }

    #[test]
    fn test_select_engaged_picks_nearest_in_range() {
        let enemies = vec![enemy_at(1, 700.0), enemy_at(2, 560.0), enemy_at(3, 2_000.0)];
        assert_eq!(select_engaged(&enemies, None, 500.0), Some(2));
    }

    #[test]
    fn test_select_engaged_none_in_range() {
        let enemies = vec![enemy_at(1, 2_000.0)];
        assert_eq!(select_engaged(&enemies, None, 500.0), None);
    }

    #[test]
    fn test_hysteresis_keeps_current_target() {
        // Enemy 2 is closer, but only by 10px: margin says keep enemy 1
        let enemies = vec![enemy_at(1, 600.0), enemy_at(2, 410.0)];
        assert_eq!(select_engaged(&enemies, Some(1), 500.0), Some(1));

        // Enemy 2 clearly closer: switch
        let enemies = vec![enemy_at(1, 700.0), enemy_at(2, 520.0)];
        assert_eq!(select_engaged(&enemies, Some(1), 500.0), Some(2));
    }

    #[test]
    fn test_dead_or_distant_target_is_dropped() {
        let mut enemies = vec![enemy_at(1, 600.0), enemy_at(2, 520.0)];
        enemies[0].current_hp = 0;
        assert_eq!(select_engaged(&enemies, Some(1), 500.0), Some(2));

        // Target walked out of range entirely
        let enemies = vec![enemy_at(1, 900.0)];
        assert_eq!(select_engaged(&enemies, Some(1), 500.0), None);
    }
}
