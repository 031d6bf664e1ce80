//! Simulation report generation.

use std::collections::HashMap;

/// Raw statistics from one simulated playthrough.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub final_level: u32,
    pub farthest_stage: u32,
    pub total_kills: u64,
    pub total_deaths: u64,
    pub total_ticks: u64,
    pub items_seen: u64,
    pub items_kept: u64,
    pub gems_found: u64,
    pub final_gold: u64,
    pub reached_target: bool,
    /// First tick each stage was entered; 0 = never (index = stage).
    pub stage_entry_ticks: Vec<u64>,
    pub stage_kills: Vec<u64>,
    pub stage_deaths: Vec<u64>,
}

impl RunStats {
    /// Ticks spent in each stage, derived from first-entry ticks. Time after
    /// a death counts against the stage the walker was pushing into.
    fn ticks_per_stage(&self) -> Vec<u64> {
        let mut ticks = vec![0u64; self.stage_entry_ticks.len()];
        for stage in 0..self.stage_entry_ticks.len() {
            let entered = stage == 0 || self.stage_entry_ticks[stage] > 0;
            if !entered {
                continue;
            }
            let start = self.stage_entry_ticks[stage];
            let next = self.stage_entry_ticks.get(stage + 1).copied().unwrap_or(0);
            ticks[stage] = if next > 0 {
                next - start
            } else {
                self.total_ticks - start
            };
        }
        ticks
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    pub avg_final_level: f64,
    pub avg_farthest_stage: f64,
    pub avg_total_kills: f64,
    pub avg_total_deaths: f64,
    pub avg_ticks_to_target: f64,

    /// Farthest stage reached -> number of runs that ended there.
    pub stage_distribution: HashMap<u32, u32>,
    pub death_distribution: Vec<u64>,

    pub avg_items_kept: f64,
    pub item_keep_rate: f64,
    pub avg_gems_found: f64,
    pub avg_final_gold: f64,

    pub avg_kills_per_stage: Vec<f64>,
    pub avg_deaths_per_stage: Vec<f64>,
    pub avg_ticks_per_stage: Vec<f64>,

    /// Individual run stats for detailed analysis.
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, target_stage: u32, max_ticks: u64) -> Self {
        let num_runs = runs.len() as u32;
        let denom = num_runs.max(1) as f64;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.total_ticks >= max_ticks).count() as u32;

        let avg_final_level = runs.iter().map(|r| r.final_level as f64).sum::<f64>() / denom;
        let avg_farthest_stage = runs.iter().map(|r| r.farthest_stage as f64).sum::<f64>() / denom;
        let avg_total_kills = runs.iter().map(|r| r.total_kills as f64).sum::<f64>() / denom;
        let avg_total_deaths = runs.iter().map(|r| r.total_deaths as f64).sum::<f64>() / denom;
        let avg_ticks_to_target = runs
            .iter()
            .filter(|r| r.reached_target)
            .map(|r| r.total_ticks as f64)
            .sum::<f64>()
            / runs_completed.max(1) as f64;

        let mut stage_distribution = HashMap::new();
        for run in &runs {
            *stage_distribution.entry(run.farthest_stage).or_insert(0) += 1;
        }
        let death_distribution: Vec<u64> = runs.iter().map(|r| r.total_deaths).collect();

        let avg_items_kept = runs.iter().map(|r| r.items_kept as f64).sum::<f64>() / denom;
        let total_seen: u64 = runs.iter().map(|r| r.items_seen).sum();
        let total_kept: u64 = runs.iter().map(|r| r.items_kept).sum();
        let item_keep_rate = if total_seen > 0 {
            total_kept as f64 / total_seen as f64
        } else {
            0.0
        };
        let avg_gems_found = runs.iter().map(|r| r.gems_found as f64).sum::<f64>() / denom;
        let avg_final_gold = runs.iter().map(|r| r.final_gold as f64).sum::<f64>() / denom;

        let slots = target_stage as usize + 1;
        let mut avg_kills_per_stage = vec![0.0; slots];
        let mut avg_deaths_per_stage = vec![0.0; slots];
        let mut avg_ticks_per_stage = vec![0.0; slots];
        let per_run_ticks: Vec<Vec<u64>> = runs.iter().map(|r| r.ticks_per_stage()).collect();

        for stage in 0..slots {
            avg_kills_per_stage[stage] = runs
                .iter()
                .map(|r| r.stage_kills.get(stage).copied().unwrap_or(0) as f64)
                .sum::<f64>()
                / denom;
            avg_deaths_per_stage[stage] = runs
                .iter()
                .map(|r| r.stage_deaths.get(stage).copied().unwrap_or(0) as f64)
                .sum::<f64>()
                / denom;
            avg_ticks_per_stage[stage] = per_run_ticks
                .iter()
                .map(|t| t.get(stage).copied().unwrap_or(0) as f64)
                .sum::<f64>()
                / denom;
        }

        Self {
            num_runs,
            runs_completed,
            runs_timed_out,
            avg_final_level,
            avg_farthest_stage,
            avg_total_kills,
            avg_total_deaths,
            avg_ticks_to_target,
            stage_distribution,
            death_distribution,
            avg_items_kept,
            item_keep_rate,
            avg_gems_found,
            avg_final_gold,
            avg_kills_per_stage,
            avg_deaths_per_stage,
            avg_ticks_per_stage,
            run_stats: runs,
        }
    }

    /// Generate a text report. Stage numbers are printed 1-based to match
    /// the in-game display.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("               (Using Real Game Mechanics)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Level:     {:.1}\n",
            self.avg_final_level
        ));
        report.push_str(&format!(
            "  Avg Farthest Stage:  {:.1}\n",
            self.avg_farthest_stage + 1.0
        ));
        report.push_str(&format!(
            "  Avg Total Kills:     {:.0}\n",
            self.avg_total_kills
        ));
        report.push_str(&format!(
            "  Avg Total Deaths:    {:.1}\n",
            self.avg_total_deaths
        ));
        report.push_str(&format!(
            "  Avg Ticks to Target: {:.0}\n\n",
            self.avg_ticks_to_target
        ));

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Item Keep Rate:      {:.1}%\n",
            self.item_keep_rate * 100.0
        ));
        report.push_str(&format!("  Avg Items Kept:      {:.1}\n", self.avg_items_kept));
        report.push_str(&format!("  Avg Gems Found:      {:.1}\n", self.avg_gems_found));
        report.push_str(&format!(
            "  Avg Final Gold:      {:.0}\n\n",
            self.avg_final_gold
        ));

        report.push_str("── STAGE REACH ──────────────────────────────────────────────────\n");
        let slots = self.avg_kills_per_stage.len() as u32;
        for stage in 0..slots {
            let reached = self
                .run_stats
                .iter()
                .filter(|r| r.farthest_stage >= stage)
                .count();
            let pct = (reached as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar_len = (pct / 5.0) as usize;
            let bar: String = "█".repeat(bar_len);
            report.push_str(&format!("  Stage {:2}: {:>5.1}% {}\n", stage + 1, pct, bar));
        }
        report.push('\n');

        report.push_str("── PER-STAGE BREAKDOWN ──────────────────────────────────────────\n");
        report.push_str("  Stage   Deaths    Kills    Ticks    Deaths/Kill\n");
        report.push_str("  ─────   ──────    ─────    ─────    ───────────\n");
        for stage in 0..slots as usize {
            let deaths = self.avg_deaths_per_stage[stage];
            let kills = self.avg_kills_per_stage[stage];
            let ticks = self.avg_ticks_per_stage[stage];
            let deaths_per_kill = if kills > 0.0 { deaths / kills } else { 0.0 };

            if kills > 0.0 {
                report.push_str(&format!(
                    "  {:5}   {:6.1}   {:6.0}   {:6.0}   {:.3}\n",
                    stage + 1,
                    deaths,
                    kills,
                    ticks,
                    deaths_per_kill
                ));
            }
        }
        report.push('\n');

        report.push_str("── DEATH ANALYSIS ───────────────────────────────────────────────\n");
        let min_deaths = self.death_distribution.iter().min().unwrap_or(&0);
        let max_deaths = self.death_distribution.iter().max().unwrap_or(&0);
        let median_deaths = {
            let mut sorted = self.death_distribution.clone();
            sorted.sort();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };
        report.push_str(&format!("  Min Deaths:    {}\n", min_deaths));
        report.push_str(&format!("  Median Deaths: {}\n", median_deaths));
        report.push_str(&format!("  Max Deaths:    {}\n\n", max_deaths));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let completion_rate = (self.runs_completed as f64 / self.num_runs.max(1) as f64) * 100.0;
        let death_rating = if self.avg_total_deaths < 3.0 {
            "TOO EASY - Walkers rarely die"
        } else if self.avg_total_deaths < 15.0 {
            "GOOD - Challenging but fair"
        } else if self.avg_total_deaths < 40.0 {
            "HARD - Many deaths but completable"
        } else {
            "TOO HARD - Excessive deaths"
        };

        report.push_str(&format!("  Completion Rate: {:.1}%\n", completion_rate));
        report.push_str(&format!("  Death Rating:    {}\n", death_rating));

        for stage in 0..slots as usize {
            let deaths = self.avg_deaths_per_stage[stage];
            let kills = self.avg_kills_per_stage[stage];
            if kills > 0.0 && deaths / kills > 0.5 {
                report.push_str(&format!(
                    "  ⚠️  Stage {} has a high death rate ({:.1}% per fight)\n",
                    stage + 1,
                    (deaths / kills) * 100.0
                ));
            }
        }
        if self.runs_timed_out > 0 {
            report.push_str(&format!(
                "  ⚠️  {} runs timed out before the target stage\n",
                self.runs_timed_out
            ));
        }
        if self.item_keep_rate < 0.2 && self.avg_items_kept > 0.0 {
            report.push_str("  ⚠️  Most drops are outclassed - drop levels lagging?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimReport", 16)?;
        state.serialize_field("num_runs", &self.num_runs)?;
        state.serialize_field("runs_completed", &self.runs_completed)?;
        state.serialize_field("runs_timed_out", &self.runs_timed_out)?;
        state.serialize_field("avg_final_level", &self.avg_final_level)?;
        state.serialize_field("avg_farthest_stage", &self.avg_farthest_stage)?;
        state.serialize_field("avg_total_kills", &self.avg_total_kills)?;
        state.serialize_field("avg_total_deaths", &self.avg_total_deaths)?;
        state.serialize_field("avg_ticks_to_target", &self.avg_ticks_to_target)?;
        state.serialize_field("avg_items_kept", &self.avg_items_kept)?;
        state.serialize_field("item_keep_rate", &self.item_keep_rate)?;
        state.serialize_field("avg_gems_found", &self.avg_gems_found)?;
        state.serialize_field("avg_final_gold", &self.avg_final_gold)?;
        state.serialize_field("avg_kills_per_stage", &self.avg_kills_per_stage)?;
        state.serialize_field("avg_deaths_per_stage", &self.avg_deaths_per_stage)?;
        state.serialize_field("avg_ticks_per_stage", &self.avg_ticks_per_stage)?;
        state.serialize_field(
            "completion_rate",
            &((self.runs_completed as f64 / self.num_runs.max(1) as f64) * 100.0),
        )?;
        state.end()
    }
}
