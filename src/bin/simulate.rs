//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 runs to stage 11
//!   cargo run --bin simulate -- -n 50 -g 5     # 50 runs to stage 5
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use std::env;
use wayfarer::build_info::build_string;
use wayfarer::simulator::{run_simulation, SimConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                  WAYFARER BALANCE SIMULATOR                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("Build: {}", build_string());
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Target Stage:   {}", config.target_stage + 1);
    println!("  Max Ticks:      {}", config.max_ticks_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            // Stage numbers on the command line are 1-based like the
            // in-game display.
            "-g" | "--stage" => {
                if i + 1 < args.len() {
                    let stage: u32 = args[i + 1].parse().unwrap_or(11);
                    config.target_stage = stage.saturating_sub(1);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run = args[i + 1].parse().unwrap_or(1_000_000);
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "--quick" => {
                config = SimConfig::stage_pacing_test(4);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Wayfarer Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 100)");
    println!("    -g, --stage <S>     Target stage to reach, 1-based (default: 11)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --ticks <T>     Max ticks per run (default: 1,000,000)");
    println!("    -v, --verbose       Print a line per completed run");
    println!("    -q, --quiet         Suppress progress output");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick pacing check (50 runs to stage 5)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -n 50 -g 5     # 50 runs to stage 5");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
    println!("    cargo run --bin simulate -- --quick        # Quick pacing check");
}
