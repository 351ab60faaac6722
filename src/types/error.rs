//! Error types for the fraud sequence validator
//!
//! Two families of errors live here and they are handled very differently.
//!
//! # Data errors (recovered into a verdict)
//!
//! - **ParseError**: a step does not match the event grammar
//! - **ValidationError::UnknownReference**: a name is not in the registry
//! - **RuleViolation**: a capability rule fired for a step
//! - **ValidationError::EmptySequence / MissingTerminalTransaction**:
//!   sequence-level invariants
//! - **ValidationError::NegativeBalance**: a transfer overdraws an account
//!   whose opening balance is known
//!
//! These never propagate as `Err`. They are collected into a
//! [`Verdict`](crate::types::Verdict) so the caller can see every defect of a
//! candidate at once.
//!
//! # Fatal errors (propagated)
//!
//! - **InputError**: files that cannot be opened or decoded, registry build
//!   failures, runtime construction failures in the batch front end.

use super::entity::EntityType;
use super::event::EventKind;
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a single step fails to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Step does not start with `action(` or `transaction(`
    #[error("step must start with 'action(' or 'transaction('")]
    UnknownEventKind,

    /// Step does not end with `)`
    #[error("{kind} is missing its closing parenthesis")]
    MissingClosingParenthesis { kind: EventKind },

    /// A nested parenthesis closes before it opens or never closes
    #[error("{kind} has unbalanced parentheses")]
    UnbalancedParentheses { kind: EventKind },

    /// Wrong number of top-level comma-separated fields
    #[error("{kind} requires exactly {expected} fields, found {found}")]
    FieldCount {
        kind: EventKind,
        expected: usize,
        found: usize,
    },

    /// An entity-reference field is blank
    #[error("{kind} field '{field}' is empty")]
    EmptyField {
        kind: EventKind,
        field: &'static str,
    },

    /// Amount is not a decimal number
    #[error("invalid amount '{amount}'")]
    InvalidAmount { amount: String },

    /// Amount parsed but is below zero
    #[error("amount {amount} is negative")]
    NegativeAmount { amount: Decimal },
}

/// A capability rule that fired for one step
///
/// The display strings are written as corrective feedback: they name the
/// rule, the offending entity, and what would make the step acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// A referenced name does not resolve to a typed entity
    #[error("unknown entity '{name}' in {position} position{}", .role.as_ref().map(|r| format!(" (unrecognized role '{}')", r)).unwrap_or_default())]
    UnknownEntity {
        position: &'static str,
        name: String,
        role: Option<String>,
    },

    /// An account originated a communicative or volitional act
    #[error("agency rule: account '{subject}' cannot perform '{verb}' via '{channel}'; communicating and deciding require a person or fraudster as subject")]
    Agency {
        subject: String,
        verb: String,
        channel: String,
    },

    /// A non-human subject disclosed information
    #[error("information-submission rule: only people can submit information, not {entity_type} '{subject}'")]
    InformationSubmission {
        subject: String,
        entity_type: EntityType,
    },

    /// Manipulation aimed at something without volition
    #[error("psychological-target rule: '{verb}' targets human behaviour and cannot be performed on account '{object}'; target the account owner instead")]
    PsychologicalTarget { verb: String, object: String },

    /// Identity-based action aimed at an account
    #[error("identity rule: '{verb}' targets people or organizations, not account '{object}'")]
    IdentityTarget { verb: String, object: String },

    /// Non-technical action between two accounts
    #[error("account-to-account rule: account '{subject}' cannot perform '{verb}' on account '{object}'; accounts only interact technically, use transaction(...) to move funds")]
    AccountToAccount {
        subject: String,
        verb: String,
        object: String,
    },

    /// Transaction endpoint that is not an account
    #[error("endpoint-type rule: {field} must be an account, not {entity_type} '{name}'; use the account belonging to '{name}'")]
    TransactionEndpoint {
        field: &'static str,
        name: String,
        entity_type: EntityType,
    },
}

/// Broad class of a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Parse,
    Reference,
    Rule,
    Balance,
    Sequence,
}

/// One entry of a verdict's error list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Step {step}: failed to parse step: {source}")]
    Parse { step: usize, source: ParseError },

    #[error("Step {step}: {name} is not a valid entity{}", .role.as_ref().map(|r| format!(" (unrecognized role '{}')", r)).unwrap_or_default())]
    UnknownReference {
        step: usize,
        name: String,
        /// Raw role string when the name exists but its role is not recognised
        role: Option<String>,
    },

    #[error("Step {step}: {violation}")]
    Rule {
        step: usize,
        violation: RuleViolation,
    },

    #[error("Step {step}: negative balance detected for '{account}': {balance}")]
    NegativeBalance {
        step: usize,
        account: String,
        balance: Decimal,
    },

    #[error("Sequence: sequence is empty, at least one step is required")]
    EmptySequence,

    #[error("Sequence: last step must be a transaction, found {last}")]
    MissingTerminalTransaction { last: EventKind },
}

impl ValidationError {
    /// Create a Parse error
    pub fn parse(step: usize, source: ParseError) -> Self {
        ValidationError::Parse { step, source }
    }

    /// Create an UnknownReference error
    pub fn unknown_reference(step: usize, name: &str, role: Option<&str>) -> Self {
        ValidationError::UnknownReference {
            step,
            name: name.to_string(),
            role: role.map(str::to_string),
        }
    }

    /// Create a Rule error
    pub fn rule(step: usize, violation: RuleViolation) -> Self {
        ValidationError::Rule { step, violation }
    }

    /// 0-based step index, or `None` for sequence-level errors
    pub fn step(&self) -> Option<usize> {
        match self {
            ValidationError::Parse { step, .. }
            | ValidationError::UnknownReference { step, .. }
            | ValidationError::Rule { step, .. }
            | ValidationError::NegativeBalance { step, .. } => Some(*step),
            ValidationError::EmptySequence | ValidationError::MissingTerminalTransaction { .. } => {
                None
            }
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ValidationError::Parse { .. } => ErrorClass::Parse,
            ValidationError::UnknownReference { .. } => ErrorClass::Reference,
            ValidationError::Rule { .. } => ErrorClass::Rule,
            ValidationError::NegativeBalance { .. } => ErrorClass::Balance,
            ValidationError::EmptySequence | ValidationError::MissingTerminalTransaction { .. } => {
                ErrorClass::Sequence
            }
        }
    }
}

/// Why a registry lookup did not produce a typed entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("entity not found")]
    NotFound,

    #[error("unrecognized role '{role}'")]
    UnknownRole { role: String },
}

/// Registry construction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Duplicate entity name '{name}'")]
    DuplicateEntity { name: String },

    #[error("Opening balance given for unregistered entity '{name}'")]
    UnregisteredBalance { name: String },
}

/// Fatal errors of the batch front end
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("CSV error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv { line: Option<u64>, message: String },

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

impl InputError {
    /// Whether the error concerns a single input row
    ///
    /// Row errors are logged and skipped; everything else ends the run.
    pub fn is_row_error(&self) -> bool {
        matches!(self, InputError::Csv { .. })
    }

    /// Create an error for a file that could not be opened
    ///
    /// Missing files get their own variant so the CLI can report them plainly.
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            InputError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            InputError::Io {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }
}

impl From<std::io::Error> for InputError {
    fn from(error: std::io::Error) -> Self {
        InputError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for InputError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return InputError::Io {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        InputError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for InputError {
    fn from(error: csv_async::Error) -> Self {
        if error.is_io_error() {
            return InputError::Io {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        InputError::Csv {
            line,
            message: error.to_string(),
        }
    }
}
