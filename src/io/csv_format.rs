//! CSV format handling for registry rows, sequence rows and verdict output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for deserialization
//! - Grouping of sequence rows into candidates
//! - Registry construction from entity rows
//! - Verdict output serialization

use crate::core::registry::EntityRegistry;
use crate::types::{Candidate, CandidateVerdict, InputError};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::{Read, Write};
use std::str::FromStr;

/// Separator placed between messages in the `errors` column
pub const ERROR_SEPARATOR: &str = " | ";

/// Entities CSV row: `name,role[,balance]`
///
/// The balance column is optional, as is its value on any row. Only
/// entities with a balance have their funds tracked.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EntityRecord {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub balance: Option<String>,
}

/// Sequences CSV row: `sequence,step`
///
/// The step is optional so that a candidate can be declared with no steps.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StepRecord {
    pub sequence: String,
    pub step: Option<String>,
}

/// Groups contiguous step rows sharing an id into candidates
///
/// Rows are fed in file order. A candidate is complete as soon as a row with
/// a different id arrives, or when the input ends and [`finish`] is called.
///
/// [`finish`]: CandidateGrouper::finish
#[derive(Debug, Default)]
pub struct CandidateGrouper {
    current: Option<Candidate>,
}

impl CandidateGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one row, returning the previous candidate if this row closed it
    pub fn push(&mut self, record: StepRecord) -> Option<Candidate> {
        match self.current.as_mut() {
            Some(candidate) if candidate.id == record.sequence => {
                candidate.push_step(record.step);
                None
            }
            _ => {
                let mut next = Candidate::new(record.sequence);
                next.push_step(record.step);
                self.current.replace(next)
            }
        }
    }

    /// Flush the candidate still being assembled
    pub fn finish(&mut self) -> Option<Candidate> {
        self.current.take()
    }
}

/// Build a registry from an entities CSV
///
/// # Errors
///
/// Any malformed row is fatal, as is a duplicate entity name or a balance
/// that is not a decimal. A registry built from partial input would flag
/// valid candidates as invalid.
pub fn read_registry<R: Read>(input: R) -> Result<EntityRegistry, InputError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    let mut balances = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let row: EntityRecord = record.deserialize(Some(&headers))?;

        if let Some(raw) = row.balance.as_deref().filter(|raw| !raw.is_empty()) {
            let balance = Decimal::from_str(raw).map_err(|_| InputError::Csv {
                line: record.position().map(|pos| pos.line()),
                message: format!("invalid balance '{}' for entity '{}'", raw, row.name),
            })?;
            balances.push((row.name.clone(), balance));
        }
        rows.push((row.name, row.role));
    }

    Ok(EntityRegistry::from_roles(rows)?.with_balances(balances)?)
}

/// Streaming writer for the verdicts CSV
///
/// The header `sequence,valid,errors` is written on construction, so an
/// input with no candidates still yields a header-only output.
pub struct VerdictWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> VerdictWriter<W> {
    pub fn new(output: W) -> Result<Self, InputError> {
        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(["sequence", "valid", "errors"])?;
        Ok(Self { writer })
    }

    /// Write one verdict row
    pub fn write(&mut self, result: &CandidateVerdict) -> Result<(), InputError> {
        let valid = if result.verdict.is_valid() { "true" } else { "false" };
        let errors = result.verdict.messages().join(ERROR_SEPARATOR);
        self.writer
            .write_record([result.id.as_str(), valid, errors.as_str()])?;
        Ok(())
    }

    /// Flush buffered rows to the underlying writer
    pub fn flush(&mut self) -> Result<(), InputError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a full set of verdicts in one call
pub fn write_verdicts_csv(
    results: &[CandidateVerdict],
    output: &mut dyn Write,
) -> Result<(), InputError> {
    let mut writer = VerdictWriter::new(output)?;
    for result in results {
        writer.write(result)?;
    }
    writer.flush()
}
