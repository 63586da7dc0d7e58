//! BB84 simulator CLI
//!
//! Runs one exchange and prints its records as JSON, or samples many runs
//! and prints detection statistics.

use anyhow::{Context, Result};
use bb84_sim::{Sampler, SimulationConfig, Simulator};
use clap::Parser;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// BB84 key distribution simulator
#[derive(Parser, Debug)]
#[command(name = "bb84-sim", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Number of symbols per run
    #[arg(short, long)]
    slots: Option<usize>,

    /// Run without an interceptor on the channel
    #[arg(long)]
    no_interceptor: bool,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Sample this many runs and report detection statistics
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

/// Loads the config file if given and applies flag overrides on top.
fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => SimulationConfig::default(),
    };
    if let Some(slots) = args.slots {
        config.slots = slots;
    }
    if args.no_interceptor {
        config.interceptor = false;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

/// Single run for `--runs 1`; every other count goes through the sampler,
/// which rejects zero.
fn execute(config: &SimulationConfig, runs: usize) -> Result<Value> {
    let simulator = Simulator::from_config(config)?;

    if runs == 1 {
        return Ok(serde_json::to_value(simulator.run()?)?);
    }

    let stats = Sampler::new(simulator).run_default(runs)?;
    Ok(json!({
        "slots": config.slots,
        "interceptor": config.interceptor,
        "stats": stats,
        "detection_rate": stats.detection_rate(),
        "mean_qber": stats.mean_qber(),
    }))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = execute(&config, args.runs)?;

    let text = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb84_sim::errors::SimulationError;
    use std::io::Write;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bb84-sim").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "slots = 8\ninterceptor = true\nseed = 1").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = parse(&[
            "--config",
            path.as_str(),
            "--slots",
            "20",
            "--no-interceptor",
            "--seed",
            "9",
        ]);
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.slots, 20);
        assert!(!config.interceptor);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn defaults_without_flags() {
        let config = resolve_config(&parse(&[])).unwrap();

        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn zero_slots_flag_is_invalid_configuration() {
        let config = resolve_config(&parse(&["--slots", "0"])).unwrap();

        let err = execute(&config, 1).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SimulationError>(),
            Some(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_runs_is_rejected() {
        let config = resolve_config(&parse(&["--seed", "4"])).unwrap();

        let err = execute(&config, 0).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SimulationError>(),
            Some(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn single_run_prints_records() {
        let config = resolve_config(&parse(&["--slots", "3", "--seed", "5"])).unwrap();

        let output = execute(&config, 1).unwrap();

        assert_eq!(output["slots"], 3);
        assert_eq!(output["receiver"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn many_runs_report_statistics() {
        let config =
            resolve_config(&parse(&["--slots", "6", "--no-interceptor", "--seed", "5"])).unwrap();

        let output = execute(&config, 10).unwrap();

        assert_eq!(output["stats"]["runs"], 10);
        assert_eq!(output["stats"]["compromised_runs"], 0);
    }
}
