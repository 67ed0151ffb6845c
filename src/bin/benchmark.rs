//! Benchmark CLI.
//!
//! Deploys the selected registry variant, drives its canonical workload,
//! and prints one JSON report line to stdout.
//!
//! Usage:
//!   cargo run --bin benchmark -- --variant optimized --users 100
//!
//! The `VARIANT` and `NUM_USERS` environment variables are honored when the
//! corresponding flag is absent.

use std::env;
use std::process;

use consent_meter::{run_benchmark, BenchmarkConfig, VariantKind};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut variant_arg = env::var("VARIANT").ok();
    let mut users_arg = env::var("NUM_USERS").ok();
    let mut seed_arg: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--variant" => {
                if i + 1 < args.len() {
                    variant_arg = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--users" => {
                if i + 1 < args.len() {
                    users_arg = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    seed_arg = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                eprintln!("Usage: benchmark [--variant basic|optimized|minimal] [--users N] [--seed LABEL]");
                return;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = BenchmarkConfig::default();
    if let Some(v) = variant_arg {
        config.variant = match v.parse::<VariantKind>() {
            Ok(kind) => kind,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        };
    }
    if let Some(n) = users_arg {
        config.population = match n.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Invalid population size: {n}");
                process::exit(1);
            }
        };
    }
    if let Some(seed) = seed_arg {
        config.seed_label = seed;
    }

    let report = match run_benchmark(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Benchmark run failed: {e}");
            process::exit(1);
        }
    };

    eprintln!(
        "Variant {} deployed at {}",
        report.variant, report.deployed_at
    );
    match serde_json::to_string(&report) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            process::exit(1);
        }
    }
}
