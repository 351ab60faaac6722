//! I/O module
//!
//! Handles CSV parsing and output for the batch front end.
//!
//! # Components
//!
//! - `csv_format` - Row formats, candidate grouping, registry loading, verdict output
//! - `sync_reader` - Synchronous candidate reader with iterator interface
//! - `async_reader` - Asynchronous candidate reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

use crate::core::registry::EntityRegistry;
use crate::types::InputError;
use std::fs::File;
use std::path::Path;

pub use async_reader::AsyncReader;
pub use csv_format::{
    read_registry, write_verdicts_csv, CandidateGrouper, EntityRecord, StepRecord, VerdictWriter,
};
pub use sync_reader::SyncReader;

/// Load the entity registry from an entities CSV file
pub fn load_registry(path: &Path) -> Result<EntityRegistry, InputError> {
    let file = File::open(path).map_err(|e| InputError::open_failed(path, e))?;
    read_registry(file)
}
