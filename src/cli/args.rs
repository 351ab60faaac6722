use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Validate candidate fraud sequences against an entity registry
#[derive(Parser, Debug)]
#[command(name = "fraud-sequence-validator")]
#[command(
    about = "Validate candidate fraud sequences against an entity registry",
    long_about = None
)]
pub struct CliArgs {
    /// Entities CSV file path (`name,role[,balance]`)
    #[arg(value_name = "ENTITIES", help = "Path to the entities CSV file")]
    pub entities_file: PathBuf,

    /// Sequences CSV file path (`sequence,step`)
    #[arg(value_name = "SEQUENCES", help = "Path to the sequences CSV file")]
    pub sequences_file: PathBuf,

    /// Validation strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Validation strategy: 'sync' for single-threaded or 'async' for batched multi-threaded"
    )]
    pub strategy: StrategyType,

    /// Number of candidates per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of candidates per batch (default: 256)"
    )]
    pub batch_size: Option<usize>,

    /// Worker threads for batch validation (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Worker threads for batch validation (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Available validation strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values take their defaults; zero values are replaced by the
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_none() && self.max_concurrent_batches.is_none() {
            return BatchConfig::default();
        }

        let default = BatchConfig::default();
        BatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.max_concurrent_batches
                .unwrap_or(default.max_concurrent_batches),
        )
    }

    /// Log filter directive implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}
