//! Headless balance simulator CLI.
//!
//! Plays level runs with the stock party and prints aggregate statistics.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # 100 runs of level 1
//!   cargo run --bin simulate -- -n 500 -l 2      # 500 runs of level 2
//!   cargo run --bin simulate -- --seed 42 -v     # reproducible, per-run lines
//!   cargo run --bin simulate -- --json           # also dump JSON

use std::env;
use std::process;

use skirmish::simulator::{run_simulation, SimConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Usage: simulate [-n RUNS] [-l LEVEL] [-c BATTLE_CAP] [--seed SEED] [-v] [--json]");
            process::exit(2);
        }
    };

    println!("Skirmish balance simulator");
    println!("  Runs:       {}", config.num_runs);
    println!("  Level:      {}", config.level_number);
    println!("  Battle cap: {}", config.battle_cap);
    if let Some(seed) = config.seed {
        println!("  Seed:       {}", seed);
    }
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        println!();
        println!("{}", report.to_json());
    }
}

fn parse_args(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                config.num_runs = parse_value(args, &mut i)?;
            }
            "-l" | "--level" => {
                config.level_number = parse_value(args, &mut i)?;
            }
            "-c" | "--battle-cap" => {
                config.battle_cap = parse_value(args, &mut i)?;
            }
            "--seed" => {
                config.seed = Some(parse_value(args, &mut i)?);
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--json" => {}
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    let raw = args
        .get(*i)
        .ok_or_else(|| format!("{} requires a value", flag))?;
    raw.parse::<T>()
        .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
}
