//! Core validation logic module
//!
//! This module contains the validation pipeline components:
//! - `registry` - Entity registry built once per run
//! - `parser` - Step text to structured event records
//! - `keywords` - Keyword sets used by the semantic rules
//! - `traits` - The check abstraction shared by every stage
//! - `syntax` - Parse and reference-integrity checks
//! - `rules` - Role-based semantic rules
//! - `balances` - Running balances of accounts with an opening balance
//! - `validator` - The two-stage pipeline plus sequence invariants
//! - `async` - Concurrent batch validation

pub mod r#async;
pub mod balances;
pub mod keywords;
pub mod parser;
pub mod registry;
pub mod rules;
pub mod syntax;
pub mod traits;
pub mod validator;

pub use balances::BalanceCheck;
pub use parser::parse_step;
pub use r#async::BatchProcessor;
pub use registry::EntityRegistry;
pub use rules::{check_semantics, RuleEngine};
pub use syntax::{check_syntax, SyntaxChecker};
pub use traits::SequenceCheck;
pub use validator::{validate, validate_and_parse, SequenceValidator};
