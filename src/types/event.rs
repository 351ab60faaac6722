//! Event records for the fraud sequence validator
//!
//! A fraud sequence is an ordered list of events. Each event is either an
//! [`Action`] (one entity acting on another through a channel) or a
//! [`Transaction`] (money moving between two accounts).

use rust_decimal::Decimal;
use std::fmt;

/// Which grammar production a step was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Action,
    Transaction,
}

impl EventKind {
    /// Number of top-level fields the production requires
    pub fn field_count(&self) -> usize {
        match self {
            EventKind::Action => 5,
            EventKind::Transaction => 4,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Action => f.write_str("action"),
            EventKind::Transaction => f.write_str("transaction"),
        }
    }
}

/// `action(subject, verb, object, channel, detail)`
///
/// Read as "subject does verb to object via channel, described by detail".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Entity performing the action
    pub subject: String,

    /// Free-text description of what is done (e.g. "impersonation")
    pub verb: String,

    /// Entity the action is performed on
    pub object: String,

    /// Medium used (e.g. "call", "sms", "online portal")
    pub channel: String,

    /// Free-text narrative detail; may itself contain commas inside parentheses
    pub detail: String,
}

/// `transaction(from_account, method, to_account, amount)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Source account
    pub from_account: String,

    /// Payment method (e.g. "fast payment", "wire transfer")
    pub method: String,

    /// Destination account
    pub to_account: String,

    /// Amount transferred, never negative
    pub amount: Decimal,
}

/// One parsed step of a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Action(Action),
    Transaction(Transaction),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Action(_) => EventKind::Action,
            Event::Transaction(_) => EventKind::Transaction,
        }
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, Event::Transaction(_))
    }

    /// Entity-reference fields of this event, labelled by position
    ///
    /// Order matches field order in the source text.
    pub fn references(&self) -> [(&'static str, &str); 2] {
        match self {
            Event::Action(action) => [
                ("subject", action.subject.as_str()),
                ("object", action.object.as_str()),
            ],
            Event::Transaction(transaction) => [
                ("from_account", transaction.from_account.as_str()),
                ("to_account", transaction.to_account.as_str()),
            ],
        }
    }
}
