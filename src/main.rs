//! Fraud Sequence Validator CLI
//!
//! Validates candidate fraud sequences from CSV files against an entity
//! registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- entities.csv sequences.csv > verdicts.csv
//! cargo run -- --strategy async entities.csv sequences.csv > verdicts.csv
//! cargo run -- --strategy async --batch-size 512 --max-concurrent 8 entities.csv sequences.csv
//! ```
//!
//! One verdict row per candidate is written to stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: All candidates processed, whatever their verdicts
//! - 1: Fatal error (file not found, unreadable input, duplicate entity, etc.)

use fraud_sequence_validator::cli;
use fraud_sequence_validator::io::load_registry;
use fraud_sequence_validator::strategy;
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn setup_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = cli::parse_args();
    setup_logging(args.log_level());

    let registry = match load_registry(&args.entities_file) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let untyped = registry.untyped_names();
    if !untyped.is_empty() {
        warn!(
            count = untyped.len(),
            "entities with unrecognized roles will fail every reference"
        );
    }
    info!(
        entities = registry.len(),
        balances = registry.tracks_balances(),
        "registry loaded"
    );

    let strategy = {
        let config = if args.strategy == cli::StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    match strategy.process(registry, &args.sequences_file, &mut output) {
        Ok(summary) => {
            info!(
                candidates = summary.candidates,
                valid = summary.valid,
                invalid = summary.invalid,
                "validation complete"
            );
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
