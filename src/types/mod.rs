//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `candidate`: Named candidate sequences and their verdicts
//! - `entity`: Entity types and the role table
//! - `event`: Parsed action and transaction records
//! - `error`: Parse, validation, and input error types
//! - `verdict`: Pass/fail outcome of a validation pass

pub mod candidate;
pub mod entity;
pub mod error;
pub mod event;
pub mod verdict;

pub use candidate::{Candidate, CandidateVerdict};
pub use entity::{Entity, EntityType};
pub use error::{
    ErrorClass, InputError, LookupError, ParseError, RegistryError, RuleViolation,
    ValidationError,
};
pub use event::{Action, Event, EventKind, Transaction};
pub use verdict::Verdict;
