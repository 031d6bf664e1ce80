//! Headless balance simulator for Monte Carlo analysis.
//!
//! Runs scripted playthroughs of the real tick pipeline to measure:
//! - Time to reach each stage
//! - Death rates per stage
//! - Item and gem drop flow
//!
//! The walker policy holds right, never enters structures, and locks a stat
//! split so level-ups never pause the run. All statistics come from
//! `TickResult` events, so numbers here match real gameplay behavior.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::run_simulation;
