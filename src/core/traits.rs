//! Core trait for sequence checks
//!
//! The syntax checker, the semantic rule engine and the façade all share one
//! shape: take an ordered sequence of steps and report every defect found.
//! This trait captures that shape so stages can be composed and tested
//! interchangeably.

use crate::core::parser::parse_sequence;
use crate::types::{Event, ParseError, ValidationError, Verdict};

/// A check over a whole sequence
///
/// Implementations must look at every step and never stop at the first
/// failing one, so that a caller gets the full error list in one pass.
pub trait SequenceCheck {
    /// Check steps that have already been run through the parser
    ///
    /// `steps[i]` is the parse result for step `i`. Returned errors are in
    /// step order.
    fn check_parsed(&self, steps: &[Result<Event, ParseError>]) -> Vec<ValidationError>;

    /// Parse and check a raw sequence
    fn check<S: AsRef<str>>(&self, sequence: &[S]) -> Verdict
    where
        Self: Sized,
    {
        Verdict::from_errors(self.check_parsed(&parse_sequence(sequence)))
    }
}
