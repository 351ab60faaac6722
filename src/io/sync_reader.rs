//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over candidates from a sequences CSV.
//! Delegates row grouping to the csv_format module.
//!
//! # Design
//!
//! The SyncReader deserializes `sequence,step` rows one at a time and feeds
//! them to a [`CandidateGrouper`]. A candidate is yielded as soon as the next
//! row names a different sequence, so memory use is bounded by the largest
//! single candidate rather than by the file.
//!
//! ```no_run
//! use fraud_sequence_validator::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::open(Path::new("sequences.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(candidate) => println!("{}: {} steps", candidate.id, candidate.steps.len()),
//!         Err(e) => eprintln!("Skipped row: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable header) are returned from
//!   `open()`; I/O errors later in the file are yielded as [`InputError::Io`]
//! - Malformed rows are yielded as Err items carrying the line number; the
//!   candidate being assembled is unaffected

use crate::io::csv_format::{CandidateGrouper, StepRecord};
use crate::types::{Candidate, InputError};
use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Synchronous candidate reader
pub struct SyncReader<R: Read = File> {
    records: DeserializeRecordsIntoIter<R, StepRecord>,
    grouper: CandidateGrouper,
    exhausted: bool,
}

impl SyncReader<File> {
    /// Open a sequences CSV file
    ///
    /// # Errors
    ///
    /// Returns [`InputError::FileNotFound`] if the path does not exist and
    /// [`InputError::Io`] for any other open failure or an unreadable header.
    pub fn open(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|e| InputError::open_failed(path, e))?;
        Self::from_reader(file)
    }
}

impl<R: Read> SyncReader<R> {
    /// Wrap any reader producing sequences CSV
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for rows without a step)
    /// - Use an 8KB buffer
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Io`] if the header row cannot be read.
    pub fn from_reader(input: R) -> Result<Self, InputError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(input);

        // The deserializing iterator drops header errors and then reports EOF
        reader.byte_headers()?;

        Ok(Self {
            records: reader.into_deserialize(),
            grouper: CandidateGrouper::new(),
            exhausted: false,
        })
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<Candidate, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.exhausted {
                return self.grouper.finish().map(Ok);
            }

            match self.records.next() {
                Some(Ok(record)) => {
                    if let Some(candidate) = self.grouper.push(record) {
                        return Some(Ok(candidate));
                    }
                }
                Some(Err(e)) => return Some(Err(e.into())),
                None => self.exhausted = true,
            }
        }
    }
}
