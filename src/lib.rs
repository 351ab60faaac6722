//! Fraud Sequence Validator Library
//!
//! # Overview
//!
//! Validates candidate fraud sequences: ordered lists of textual steps that
//! describe how a scam unfolds, each step either an action between two
//! entities or a money transfer between two accounts.
//!
//! ```text
//! action(govco, impersonation, sally, call, posed as irs agent)
//! transaction(acc_sally, fast payment, acc_govco, 3000.00)
//! ```
//!
//! A sequence is valid when every step parses, every name resolves in the
//! [`EntityRegistry`], no role-based semantic rule is violated, no account
//! with an opening balance is overdrawn, and the last step is a transaction.
//!
//! ```
//! use fraud_sequence_validator::{validate, EntityRegistry};
//!
//! let registry = EntityRegistry::from_roles([
//!     ("govco", "fraudster"),
//!     ("sally", "individual"),
//!     ("acc_sally", "account"),
//!     ("acc_govco", "account"),
//! ])
//! .unwrap();
//!
//! let (ok, errors) = validate(
//!     &[
//!         "action(govco, impersonation, sally, call, posed as irs agent)",
//!         "transaction(acc_sally, fast payment, acc_govco, 3000.00)",
//!     ],
//!     &registry,
//! )
//! .into_parts();
//!
//! assert!(ok);
//! assert!(errors.is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`types`] - Entities, events, verdicts and error types
//! - [`core`] - Validation logic:
//!   - [`core::parser`] - Step text to structured events
//!   - [`core::registry`] - Name to entity lookup
//!   - [`core::syntax`] - Parse and reference-integrity stage
//!   - [`core::rules`] - Role-based semantic rules
//!   - [`core::balances`] - Running balances of tracked accounts
//!   - [`core::validator`] - The full pipeline
//! - [`io`] - CSV input and verdict output for batch runs
//! - [`strategy`] - Sync and async batch pipelines
//! - [`cli`] - CLI argument parsing

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    check_semantics, check_syntax, parse_step, validate, validate_and_parse, EntityRegistry,
    SequenceCheck, SequenceValidator,
};
pub use io::write_verdicts_csv;
pub use types::{
    Entity, EntityType, Event, EventKind, ParseError, RuleViolation, ValidationError, Verdict,
};
