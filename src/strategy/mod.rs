//! Validation strategy module
//!
//! This module defines the Strategy pattern for complete batch validation
//! pipelines, encompassing CSV reading, validation and verdict output. This
//! allows different implementations (synchronous, asynchronous batch) to be
//! selected at runtime.

use crate::cli::StrategyType;
use crate::core::registry::EntityRegistry;
use crate::types::{CandidateVerdict, InputError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncValidationStrategy, BatchConfig};
pub use sync::SyncValidationStrategy;

/// Counts gathered over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub candidates: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl RunSummary {
    /// Account for one verdict
    pub fn record(&mut self, result: &CandidateVerdict) {
        self.candidates += 1;
        if result.verdict.is_valid() {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }

        debug!(
            sequence = %result.id,
            valid = result.verdict.is_valid(),
            errors = result.verdict.errors().len(),
            "candidate verdict"
        );
    }
}

/// Validation strategy trait for complete batch pipelines
///
/// Each strategy reads candidates from a sequences CSV, validates every one
/// against the shared registry snapshot, and writes one verdict row per
/// candidate to `output` in input order.
pub trait ValidationStrategy: Send + Sync {
    /// Validate all candidates in `sequences_path`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sequences file cannot be opened
    /// - A fatal I/O error occurs during reading or writing
    /// - The async runtime cannot be created
    ///
    /// Malformed rows are logged and skipped. Invalid candidates are
    /// ordinary output, never an error.
    fn process(
        &self,
        registry: Arc<EntityRegistry>,
        sequences_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunSummary, InputError>;
}

/// Create a validation strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ValidationStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncValidationStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncValidationStrategy::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Candidate, ValidationError, Verdict};

    #[test]
    fn test_run_summary_counts() {
        let mut summary = RunSummary::default();
        summary.record(&CandidateVerdict {
            id: "a".to_string(),
            verdict: Verdict::Valid,
        });
        summary.record(&CandidateVerdict {
            id: "b".to_string(),
            verdict: Verdict::Invalid(vec![ValidationError::EmptySequence]),
        });
        summary.record(&Candidate::new("c").validate(&EntityRegistry::default()));

        assert_eq!(
            summary,
            RunSummary {
                candidates: 3,
                valid: 1,
                invalid: 2
            }
        );
    }
}
