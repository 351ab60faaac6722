//! Batch processing with chunk-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which validates a batch
//! of candidates concurrently and hands the verdicts back in input order.
//!
//! # Design
//!
//! A batch is cut into at most `max_concurrent` contiguous chunks. Each chunk
//! is validated sequentially inside its own tokio task, and the per-chunk
//! results are reassembled by input index once every task has finished.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     ├── Arc<EntityRegistry>  (shared, read-only)
//!     └── max_concurrent       (upper bound on tasks per batch)
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::error;

use crate::core::registry::EntityRegistry;
use crate::types::{Candidate, CandidateVerdict, InputError};

type ChunkTask = JoinHandle<Vec<(usize, CandidateVerdict)>>;

/// Batch validator sharing one registry across tasks
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Registry shared by every task
    registry: Arc<EntityRegistry>,

    /// Upper bound on tasks spawned per batch
    max_concurrent: usize,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// A `max_concurrent` of zero is treated as one.
    pub fn new(registry: Arc<EntityRegistry>, max_concurrent: usize) -> Self {
        Self {
            registry,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Cut a batch into contiguous, index-tagged chunks
    ///
    /// # Guarantees
    ///
    /// - Each candidate appears in exactly one chunk, tagged with its index
    /// - At most `max_concurrent` chunks are produced
    /// - No chunk is empty
    pub fn partition(&self, batch: Vec<Candidate>) -> Vec<Vec<(usize, Candidate)>> {
        if batch.is_empty() {
            return Vec::new();
        }

        let chunk_size = batch.len().div_ceil(self.max_concurrent);
        let mut chunks: Vec<Vec<(usize, Candidate)>> = Vec::new();

        for (index, candidate) in batch.into_iter().enumerate() {
            if index % chunk_size == 0 {
                chunks.push(Vec::with_capacity(chunk_size));
            }
            if let Some(chunk) = chunks.last_mut() {
                chunk.push((index, candidate));
            }
        }

        chunks
    }

    /// Validate one chunk sequentially
    fn validate_chunk(&self, chunk: Vec<(usize, Candidate)>) -> Vec<(usize, CandidateVerdict)> {
        chunk
            .into_iter()
            .map(|(index, candidate)| (index, candidate.validate(&self.registry)))
            .collect()
    }

    /// Validate a batch concurrently
    ///
    /// Verdicts come back in the same order as the input batch.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Runtime`] if any chunk's task panicked, since
    /// its candidates would otherwise be missing from the output.
    pub async fn process_batch(
        &self,
        batch: Vec<Candidate>,
    ) -> Result<Vec<CandidateVerdict>, InputError> {
        let expected = batch.len();

        let mut tasks = Vec::new();
        for chunk in self.partition(batch) {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move { processor.validate_chunk(chunk) }));
        }

        collect_in_order(tasks, expected).await
    }
}

/// Await every chunk task and reassemble verdicts by input index
async fn collect_in_order(
    tasks: Vec<ChunkTask>,
    expected: usize,
) -> Result<Vec<CandidateVerdict>, InputError> {
    let mut indexed = Vec::with_capacity(expected);
    for task in tasks {
        let chunk_results = task.await.map_err(|e| {
            error!(error = %e, "validation task failed");
            InputError::Runtime {
                message: format!("validation task failed: {}", e),
            }
        })?;
        indexed.extend(chunk_results);
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, verdict)| verdict).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn registry() -> Arc<EntityRegistry> {
        Arc::new(
            EntityRegistry::from_roles([
                ("govco", "fraudster"),
                ("sally", "individual"),
                ("acc_sally", "account"),
                ("acc_govco", "account"),
            ])
            .unwrap(),
        )
    }

    fn candidate(id: &str, steps: &[&str]) -> Candidate {
        Candidate {
            id: id.to_string(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn numbered(count: usize) -> Vec<Candidate> {
        (0..count)
            .map(|i| candidate(&format!("c{}", i), &["transaction(acc_sally, wire, acc_govco, 1)"]))
            .collect()
    }

    #[test]
    fn test_zero_concurrency_treated_as_one() {
        let processor = BatchProcessor::new(registry(), 0);
        assert_eq!(processor.partition(numbered(3)).len(), 1);
    }

    #[test]
    fn test_processor_shares_registry() {
        let registry = registry();
        let processor = BatchProcessor::new(Arc::clone(&registry), 4);
        let _clone = processor.clone();
        assert_eq!(Arc::strong_count(&registry), 3);
    }

    #[rstest]
    #[case::empty(0, 4, 0)]
    #[case::fewer_than_tasks(3, 8, 3)]
    #[case::even_split(8, 4, 4)]
    #[case::uneven_split(10, 4, 4)]
    #[case::single_task(5, 1, 1)]
    fn test_partition_chunk_count(
        #[case] size: usize,
        #[case] max_concurrent: usize,
        #[case] expected_chunks: usize,
    ) {
        let processor = BatchProcessor::new(registry(), max_concurrent);
        let chunks = processor.partition(numbered(size));

        assert_eq!(chunks.len(), expected_chunks);
        assert!(chunks.iter().all(|chunk| !chunk.is_empty()));

        // Every index appears exactly once, in order
        let indices: Vec<usize> = chunks.iter().flatten().map(|(i, _)| *i).collect();
        assert_eq!(indices, (0..size).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_process_batch_preserves_input_order() {
        let processor = BatchProcessor::new(registry(), 4);
        let batch: Vec<Candidate> = (0..25)
            .map(|i| {
                if i % 3 == 0 {
                    candidate(&format!("c{}", i), &["action(govco, call, sally, phone, hi)"])
                } else {
                    candidate(&format!("c{}", i), &["transaction(acc_sally, wire, acc_govco, 5)"])
                }
            })
            .collect();

        let results = processor.process_batch(batch).await.unwrap();

        assert_eq!(results.len(), 25);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.id, format!("c{}", i));
            assert_eq!(result.verdict.is_valid(), i % 3 != 0);
        }
    }

    #[tokio::test]
    async fn test_process_empty_batch() {
        let processor = BatchProcessor::new(registry(), 2);
        assert!(processor.process_batch(Vec::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_batch_matches_direct_validation() {
        let registry = registry();
        let processor = BatchProcessor::new(Arc::clone(&registry), 3);
        let batch = vec![
            candidate("empty", &[]),
            candidate("bad", &["transaction(acc_sally, wire, govco, 5)"]),
            candidate("ok", &["transaction(acc_sally, wire, acc_govco, 5)"]),
        ];

        let expected: Vec<CandidateVerdict> =
            batch.iter().map(|c| c.validate(&registry)).collect();
        let results = processor.process_batch(batch).await.unwrap();

        assert_eq!(results, expected);
    }

    fn exploding_chunk() -> Vec<(usize, CandidateVerdict)> {
        panic!("chunk exploded")
    }

    #[tokio::test]
    async fn test_panicked_chunk_fails_the_batch() {
        let registry = registry();
        let verdict = candidate("ok", &["transaction(acc_sally, wire, acc_govco, 5)"]).validate(&registry);

        let tasks: Vec<ChunkTask> = vec![
            tokio::spawn(async move { vec![(0, verdict)] }),
            tokio::spawn(async { exploding_chunk() }),
        ];

        let result = collect_in_order(tasks, 2).await;
        assert!(matches!(result, Err(InputError::Runtime { .. })));
    }

    #[tokio::test]
    async fn test_collect_in_order_sorts_by_index() {
        let registry = registry();
        let first = candidate("first", &["transaction(acc_sally, wire, acc_govco, 5)"]).validate(&registry);
        let second = candidate("second", &[]).validate(&registry);

        let tasks: Vec<ChunkTask> = vec![
            tokio::spawn(async move { vec![(1, second)] }),
            tokio::spawn(async move { vec![(0, first)] }),
        ];

        let ids: Vec<String> = collect_in_order(tasks, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|verdict| verdict.id)
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}
