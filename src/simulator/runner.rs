//! Monte Carlo walker driving the real tick pipeline.
//!
//! Each run plays a fresh character through `game_tick` with the right key
//! held, so every number in the report comes from the same code path the
//! game itself executes. Statistics are tracked externally from TickResult
//! events.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::character::attributes::BaseStats;
use crate::core::events::{InputState, TickEvent, TickResult};
use crate::core::game_logic::begin_run;
use crate::core::game_state::SimulationState;
use crate::core::tick::game_tick;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Each run gets its own stream so runs stay independent under a
        // shared base seed.
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(config, &mut rng);
        all_runs.push(run_stats);

        if config.verbosity >= 2 {
            let r = all_runs.last().unwrap();
            println!(
                "Run {}/{} - Stage {}, Level {}, Kills {}, Deaths {}, Ticks {}",
                run_idx + 1,
                config.num_runs,
                r.farthest_stage + 1,
                r.final_level,
                r.total_kills,
                r.total_deaths,
                r.total_ticks
            );
        }
    }

    SimReport::from_runs(all_runs, config.target_stage, config.max_ticks_per_run)
}

/// Tracks statistics during a simulation run.
/// Accumulates data from TickResult events.
struct SimStats {
    total_kills: u64,
    total_deaths: u64,
    items_seen: u64,
    items_kept: u64,
    gems_found: u64,

    // Per-stage tracking, index = stage
    stage_entry_ticks: Vec<u64>,
    stage_kills: Vec<u64>,
    stage_deaths: Vec<u64>,
}

impl SimStats {
    fn new(target_stage: u32) -> Self {
        let slots = target_stage as usize + 1;
        Self {
            total_kills: 0,
            total_deaths: 0,
            items_seen: 0,
            items_kept: 0,
            gems_found: 0,
            stage_entry_ticks: vec![0; slots],
            stage_kills: vec![0; slots],
            stage_deaths: vec![0; slots],
        }
    }

    /// Process one tick's events. `current_stage` is the stage the walker
    /// occupied when the tick ran, so kills and deaths land on the stage
    /// that caused them.
    fn process_tick(&mut self, result: &TickResult, current_stage: u32, current_tick: u64) {
        for event in &result.events {
            match event {
                TickEvent::EnemyDefeated { .. } => {
                    self.total_kills += 1;
                    if let Some(kills) = self.stage_kills.get_mut(current_stage as usize) {
                        *kills += 1;
                    }
                }
                TickEvent::PlayerDied { .. } => {
                    self.total_deaths += 1;
                    if let Some(deaths) = self.stage_deaths.get_mut(current_stage as usize) {
                        *deaths += 1;
                    }
                }
                TickEvent::ItemAcquired { kept, .. } => {
                    self.items_seen += 1;
                    if *kept {
                        self.items_kept += 1;
                    }
                }
                TickEvent::GemsFound { stats, .. } => {
                    self.gems_found += stats.len() as u64;
                }
                TickEvent::StageEntered { stage_index, .. } => {
                    // Only the first entry matters for pacing; stage 0 keeps
                    // its implicit tick-0 entry.
                    if let Some(slot) = self.stage_entry_ticks.get_mut(*stage_index as usize) {
                        if *slot == 0 {
                            *slot = current_tick;
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

/// Simulate a single walker from a fresh character to the target stage.
fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> RunStats {
    let mut state = SimulationState::new("Walker");
    // A locked split keeps level-ups from ever pausing the run.
    state.player.locked_allocation = Some(BaseStats::from_split(1, 1, 1, 0, 0));
    begin_run(&mut state, rng);

    let mut stats = SimStats::new(config.target_stage);
    let input = InputState {
        left_held: false,
        right_held: true,
        action_pressed: false,
    };

    let mut ticks: u64 = 0;
    loop {
        if state.play_stats.farthest_stage >= config.target_stage {
            break;
        }
        if ticks >= config.max_ticks_per_run {
            break;
        }

        // Read the stage before the tick; a crossing mid-tick reports its
        // kills against the stage the walker fought in.
        let current_stage = state.world.stage_index;
        let result = game_tick(&mut state, &input, rng);
        stats.process_tick(&result, current_stage, ticks);

        ticks += 1;
    }

    RunStats {
        final_level: state.player.level,
        farthest_stage: state.play_stats.farthest_stage,
        total_kills: stats.total_kills,
        total_deaths: stats.total_deaths,
        total_ticks: ticks,
        items_seen: stats.items_seen,
        items_kept: stats.items_kept,
        gems_found: stats.gems_found,
        final_gold: state.player.gold,
        reached_target: state.play_stats.farthest_stage >= config.target_stage,
        stage_entry_ticks: stats.stage_entry_ticks,
        stage_kills: stats.stage_kills,
        stage_deaths: stats.stage_deaths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_run() {
        let config = SimConfig {
            num_runs: 1,
            seed: Some(12345),
            max_ticks_per_run: 300_000,
            target_stage: 1,
            verbosity: 0,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let stats = simulate_single_run(&config, &mut rng);

        assert!(stats.total_kills > 0);
        assert!(stats.final_level > 1);
        assert!(stats.reached_target);
    }

    #[test]
    fn test_full_simulation() {
        let config = SimConfig {
            num_runs: 3,
            seed: Some(42),
            max_ticks_per_run: 300_000,
            target_stage: 1,
            verbosity: 0,
        };

        let report = run_simulation(&config);

        assert_eq!(report.num_runs, 3);
        assert!(report.avg_total_kills > 0.0);
    }

    #[test]
    fn test_timeout_caps_run_length() {
        let config = SimConfig {
            num_runs: 1,
            seed: Some(99),
            max_ticks_per_run: 500,
            target_stage: 10,
            verbosity: 0,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let stats = simulate_single_run(&config, &mut rng);

        assert_eq!(stats.total_ticks, 500);
        assert!(!stats.reached_target);
    }

    #[test]
    fn test_stats_attribute_kills_to_stages() {
        let config = SimConfig {
            num_runs: 1,
            seed: Some(7),
            max_ticks_per_run: 300_000,
            target_stage: 1,
            verbosity: 0,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let stats = simulate_single_run(&config, &mut rng);

        // Everything before the first crossing lands on stage 0.
        assert!(stats.stage_kills[0] > 0);
        assert_eq!(
            stats.stage_kills.iter().sum::<u64>(),
            stats.total_kills
        );
    }
}
