//! Simulation configuration.

/// Configuration for a batch of simulated playthroughs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = entropy)
    pub seed: Option<u64>,

    /// Maximum ticks per run before the run counts as timed out
    pub max_ticks_per_run: u64,

    /// Stage index the walker tries to reach
    pub target_stage: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-run lines)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_ticks_per_run: 1_000_000,
            target_stage: 10,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for pacing checks over the early stages.
    pub fn stage_pacing_test(target_stage: u32) -> Self {
        Self {
            num_runs: 50,
            target_stage,
            ..Default::default()
        }
    }
}
