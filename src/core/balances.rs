//! Running-balance check
//!
//! Replays a sequence's transactions against the registry's opening
//! balances. An account without an opening balance is not tracked, so a
//! registry with no balances makes this check a no-op.

use crate::core::registry::EntityRegistry;
use crate::core::traits::SequenceCheck;
use crate::types::{Event, ParseError, ValidationError};
use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Flags transfers that overdraw a tracked account
#[derive(Debug, Clone, Copy)]
pub struct BalanceCheck<'r> {
    registry: &'r EntityRegistry,
}

impl<'r> BalanceCheck<'r> {
    pub fn new(registry: &'r EntityRegistry) -> Self {
        BalanceCheck { registry }
    }

    /// Current balance of `account`, seeded from the registry on first use
    fn balance<'a, 'b>(
        &self,
        balances: &'b mut HashMap<&'a str, Decimal>,
        account: &'a str,
    ) -> Option<&'b mut Decimal> {
        match balances.entry(account) {
            Entry::Occupied(entry) => Some(entry.into_mut()),
            Entry::Vacant(entry) => Some(entry.insert(self.registry.opening_balance(account)?)),
        }
    }
}

impl SequenceCheck for BalanceCheck<'_> {
    fn check_parsed(&self, steps: &[Result<Event, ParseError>]) -> Vec<ValidationError> {
        if !self.registry.tracks_balances() {
            return Vec::new();
        }

        let mut balances: HashMap<&str, Decimal> = HashMap::new();
        let mut errors = Vec::new();

        for (step, parsed) in steps.iter().enumerate() {
            let Ok(Event::Transaction(transaction)) = parsed else {
                continue;
            };

            // Debit and credit both land before the source is checked, so a
            // self-transfer nets out
            if let Some(from) = self.balance(&mut balances, &transaction.from_account) {
                *from -= transaction.amount;
            }
            if let Some(to) = self.balance(&mut balances, &transaction.to_account) {
                *to += transaction.amount;
            }

            if let Some(&balance) = balances.get(transaction.from_account.as_str()) {
                if balance < Decimal::ZERO {
                    errors.push(ValidationError::NegativeBalance {
                        step,
                        account: transaction.from_account.clone(),
                        balance,
                    });
                }
            }
        }

        errors
    }
}
