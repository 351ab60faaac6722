//! Asynchronous batch validation strategy
//!
//! This module provides a multi-threaded implementation of the
//! ValidationStrategy trait. Candidates are read in batches and each batch is
//! validated across tokio worker threads.
//!
//! # Architecture
//!
//! ```text
//! AsyncValidationStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (chunking + tokio tasks)
//!         └── Arc<EntityRegistry> (shared snapshot)
//! ```
//!
//! Batches are processed one after another and each batch's verdicts come
//! back in input order, so the output is identical to the sync strategy's.

use crate::core::r#async::BatchProcessor;
use crate::core::registry::EntityRegistry;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::VerdictWriter;
use crate::strategy::{RunSummary, ValidationStrategy};
use crate::types::InputError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::warn;

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of candidates per batch
    pub batch_size: usize,
    /// Worker threads, and the upper bound on tasks per batch
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 256,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid concurrency limit, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch validation strategy
#[derive(Debug, Clone)]
pub struct AsyncValidationStrategy {
    config: BatchConfig,
}

impl AsyncValidationStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ValidationStrategy for AsyncValidationStrategy {
    fn process(
        &self,
        registry: Arc<EntityRegistry>,
        sequences_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunSummary, InputError> {
        // Fields are public, so zero can arrive without going through `new`
        let workers = self.config.max_concurrent_batches.max(1);
        let batch_size = self.config.batch_size.max(1);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(workers)
            .build()
            .map_err(|e| InputError::Runtime {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let processor = BatchProcessor::new(registry, workers);

            let file = tokio::fs::File::open(sequences_path)
                .await
                .map_err(|e| InputError::open_failed(sequences_path, e))?;
            let mut reader = AsyncReader::new(file.compat());

            let mut writer = VerdictWriter::new(output)?;
            let mut summary = RunSummary::default();

            loop {
                let batch = reader.read_batch(batch_size).await?;
                if batch.is_empty() {
                    break;
                }

                for verdict in processor.process_batch(batch).await? {
                    summary.record(&verdict);
                    writer.write(&verdict)?;
                }
            }

            writer.flush()?;
            Ok::<_, InputError>(summary)
        })
    }
}
