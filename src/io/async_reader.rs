//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading of candidates from a sequences CSV for the async
//! strategy.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - the csv_format grouper, kept across calls so that a candidate whose
//!   rows straddle a batch boundary is never split
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Candidates
//!                  ↓
//!           csv_format module
//!       (StepRecord, CandidateGrouper)
//! ```

use crate::io::csv_format::{CandidateGrouper, StepRecord};
use crate::types::{Candidate, InputError};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous candidate reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    grouper: CandidateGrouper,
    exhausted: bool,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            grouper: CandidateGrouper::new(),
            exhausted: false,
        }
    }

    /// Read up to `batch_size` complete candidates
    ///
    /// Malformed rows are logged and skipped, I/O failures are returned.
    /// Returns an empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<Candidate>, InputError> {
        let mut batch = Vec::with_capacity(batch_size);
        if self.exhausted {
            return Ok(batch);
        }

        let mut records = self.csv_reader.deserialize::<StepRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(record)) => batch.extend(self.grouper.push(record)),
                Some(Err(e)) => {
                    let error = InputError::from(e);
                    if !error.is_row_error() {
                        return Err(error);
                    }
                    warn!(error = %error, "skipping malformed sequence row");
                }
                None => {
                    self.exhausted = true;
                    batch.extend(self.grouper.finish());
                    break;
                }
            }
        }

        Ok(batch)
    }
}
