//! Event parser
//!
//! Turns one step of text into an [`Event`]. The grammar is:
//!
//! ```text
//! action(subject, verb, object, channel, detail)
//! transaction(from_account, method, to_account, amount)
//! ```
//!
//! The keyword is matched case-insensitively. Fields are separated by
//! top-level commas only: commas inside a nested parenthetical, as in
//! `posed as agent (irs, treasury)`, stay inside their field.
//!
//! The parser is purely structural. It never consults the registry.

use crate::types::{Action, Event, EventKind, ParseError, Transaction};
use rust_decimal::Decimal;
use std::str::FromStr;

const PREFIXES: [(&str, EventKind); 2] = [
    ("action(", EventKind::Action),
    ("transaction(", EventKind::Transaction),
];

/// Parse a single step
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first structural problem found.
/// Amounts are never coerced: a non-numeric or negative amount is an error.
pub fn parse_step(step: &str) -> Result<Event, ParseError> {
    let step = step.trim();
    let (kind, rest) = classify(step)?;

    let body = rest
        .strip_suffix(')')
        .ok_or(ParseError::MissingClosingParenthesis { kind })?;

    let fields = split_top_level(body).ok_or(ParseError::UnbalancedParentheses { kind })?;

    if fields.len() != kind.field_count() {
        return Err(ParseError::FieldCount {
            kind,
            expected: kind.field_count(),
            found: fields.len(),
        });
    }

    match kind {
        EventKind::Action => build_action(&fields),
        EventKind::Transaction => build_transaction(&fields),
    }
}

/// Parse every step of a sequence, keeping failures in place
pub fn parse_sequence<S: AsRef<str>>(sequence: &[S]) -> Vec<Result<Event, ParseError>> {
    sequence.iter().map(|step| parse_step(step.as_ref())).collect()
}

impl FromStr for Event {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_step(s)
    }
}

/// Match the keyword prefix and return the text after the opening parenthesis
fn classify(step: &str) -> Result<(EventKind, &str), ParseError> {
    for (prefix, kind) in PREFIXES {
        // `get` returns None when the prefix length splits a multi-byte char
        if let Some(head) = step.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return Ok((kind, &step[prefix.len()..]));
            }
        }
    }
    Err(ParseError::UnknownEventKind)
}

/// Split on commas at parenthesis depth zero, trimming each field
///
/// Returns `None` if a `)` closes a parenthesis that was never opened or if
/// any `(` is left open at the end of the body.
pub fn split_top_level(body: &str) -> Option<Vec<&str>> {
    let mut fields = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                fields.push(body[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }

    fields.push(body[start..].trim());
    Some(fields)
}

fn require_reference<'a>(
    kind: EventKind,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ParseError> {
    if value.is_empty() {
        Err(ParseError::EmptyField { kind, field })
    } else {
        Ok(value)
    }
}

fn build_action(fields: &[&str]) -> Result<Event, ParseError> {
    let kind = EventKind::Action;
    let subject = require_reference(kind, "subject", fields[0])?;
    let object = require_reference(kind, "object", fields[2])?;

    Ok(Event::Action(Action {
        subject: subject.to_string(),
        verb: fields[1].to_string(),
        object: object.to_string(),
        channel: fields[3].to_string(),
        detail: fields[4].to_string(),
    }))
}

fn build_transaction(fields: &[&str]) -> Result<Event, ParseError> {
    let kind = EventKind::Transaction;
    let from_account = require_reference(kind, "from_account", fields[0])?;
    let to_account = require_reference(kind, "to_account", fields[2])?;
    let amount = parse_amount(fields[3])?;

    Ok(Event::Transaction(Transaction {
        from_account: from_account.to_string(),
        method: fields[1].to_string(),
        to_account: to_account.to_string(),
        amount,
    }))
}

/// Parse a non-negative decimal amount
pub fn parse_amount(raw: &str) -> Result<Decimal, ParseError> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| ParseError::InvalidAmount {
        amount: raw.to_string(),
    })?;

    if amount < Decimal::ZERO {
        return Err(ParseError::NegativeAmount { amount });
    }

    Ok(amount)
}
