//! Concurrent validation of candidate batches
//!
//! Validation of one candidate never depends on another, so a batch can be
//! split across tokio tasks freely. The registry is shared read-only through
//! an `Arc`; no locking is involved.

pub mod batch_processor;

pub use batch_processor::BatchProcessor;
