//! Synchronous validation strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ValidationStrategy trait. It streams candidates from the SyncReader, runs
//! each through the sequence validator, and writes the verdict immediately.
//!
//! # Memory Efficiency
//!
//! Only the candidate currently being validated is held in memory, so memory
//! use is O(largest candidate + registry), not O(file size).

use crate::core::registry::EntityRegistry;
use crate::io::csv_format::VerdictWriter;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{RunSummary, ValidationStrategy};
use crate::types::InputError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Synchronous validation strategy
///
/// # Examples
///
/// ```no_run
/// use fraud_sequence_validator::io::load_registry;
/// use fraud_sequence_validator::strategy::{SyncValidationStrategy, ValidationStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let registry = Arc::new(load_registry(Path::new("entities.csv")).unwrap());
/// let mut output = std::io::stdout();
///
/// SyncValidationStrategy
///     .process(registry, Path::new("sequences.csv"), &mut output)
///     .expect("Validation failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncValidationStrategy;

impl ValidationStrategy for SyncValidationStrategy {
    fn process(
        &self,
        registry: Arc<EntityRegistry>,
        sequences_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunSummary, InputError> {
        let reader = SyncReader::open(sequences_path)?;
        let mut writer = VerdictWriter::new(output)?;
        let mut summary = RunSummary::default();

        for result in reader {
            match result {
                Ok(candidate) => {
                    let verdict = candidate.validate(&registry);
                    summary.record(&verdict);
                    writer.write(&verdict)?;
                }
                Err(e) if e.is_row_error() => {
                    warn!(error = %e, "skipping malformed sequence row");
                }
                Err(e) => return Err(e),
            }
        }

        writer.flush()?;
        Ok(summary)
    }
}
