//! Candidate sequences as handled by the batch front end
//!
//! A candidate is one named sequence read from input, and a candidate
//! verdict pairs that name with the outcome of validating it.

use super::verdict::Verdict;
use crate::core::registry::EntityRegistry;
use crate::core::validator::validate;

/// One named candidate sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Identifier from the `sequence` column
    pub id: String,

    /// Raw steps in input order
    pub steps: Vec<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Candidate {
            id: id.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step; blank steps are ignored
    ///
    /// Blank steps let an input declare a candidate with no steps at all.
    pub fn push_step(&mut self, step: Option<String>) {
        if let Some(step) = step {
            if !step.trim().is_empty() {
                self.steps.push(step);
            }
        }
    }

    /// Validate this candidate against a registry
    pub fn validate(&self, registry: &EntityRegistry) -> CandidateVerdict {
        CandidateVerdict {
            id: self.id.clone(),
            verdict: validate(&self.steps, registry),
        }
    }
}

/// Validation outcome of one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateVerdict {
    pub id: String,
    pub verdict: Verdict,
}
