//! # Commission Scenario Runner
//!
//! Runs one scenario file through commission-core and prints the result.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        commission (binary)                              │
//! │                                                                         │
//! │  env (COMMISSION_*) ──► CliConfig ──┐                                  │
//! │  argv ──────────────► Args ─────────┼──► run(scenario) ──► stdout JSON │
//! │  scenario.json ─────► Scenario ─────┘         │                         │
//! │                                               ▼                         │
//! │                                        tracing ──► stderr               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod scenario;

use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{parse_max_fee, CliConfig};
use crate::error::CliResult;
use crate::scenario::{run, Scenario};

/// Calculate the commission fee for one order scenario.
#[derive(Debug, Parser)]
#[command(name = "commission", version, about)]
struct Args {
    /// Path to the scenario JSON file
    scenario: PathBuf,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Veto every rule whose calculated fee exceeds this amount
    #[arg(long, value_name = "AMOUNT", value_parser = parse_max_fee)]
    max_fee: Option<Decimal>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = CliConfig::load()?;

    // RUST_LOG wins over COMMISSION_LOG
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    execute(&args, &config)?;
    Ok(())
}

fn execute(args: &Args, config: &CliConfig) -> CliResult<()> {
    info!(scenario = %args.scenario.display(), "Running commission scenario");

    let scenario = Scenario::from_path(&args.scenario)?;
    let report = run(scenario, args.max_fee.or(config.max_fee))?;

    let output = if args.compact || !config.pretty {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");

    info!(
        order_total = %report.result.order_total,
        calculated_fee = %report.result.calculated_fee,
        "Commission calculated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from(["commission", "order.json", "--compact", "--max-fee", "7.5"]);
        assert_eq!(args.scenario, PathBuf::from("order.json"));
        assert!(args.compact);
        assert_eq!(args.max_fee, Some(Decimal::new(75, 1)));
    }

    #[test]
    fn test_negative_max_fee_is_rejected() {
        assert!(Args::try_parse_from(["commission", "order.json", "--max-fee=-1"]).is_err());
        assert!(Args::try_parse_from(["commission", "order.json", "--max-fee", "abc"]).is_err());
    }
}
