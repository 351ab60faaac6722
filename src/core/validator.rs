//! Sequence validator façade
//!
//! Runs the full validation pipeline over one candidate sequence:
//!
//! 1. Syntax check. On failure its errors are returned as-is; semantic
//!    rules over broken input would only add noise.
//! 2. Semantic rules. On failure their errors are returned.
//! 3. Running balances of accounts with an opening balance never go
//!    negative, together with the sequence invariants: the sequence is
//!    non-empty and ends with a transaction.
//!
//! Each step is parsed once and the parse results are shared by all stages.

use crate::core::balances::BalanceCheck;
use crate::core::parser::parse_sequence;
use crate::core::registry::EntityRegistry;
use crate::core::rules::RuleEngine;
use crate::core::syntax::SyntaxChecker;
use crate::core::traits::SequenceCheck;
use crate::types::{Event, ParseError, ValidationError, Verdict};
use tracing::debug;

/// Two-stage validator with sequence-level invariants
///
/// Borrowing the registry rather than owning it keeps the validator cheap to
/// construct per call and guarantees the registry cannot change mid-pass.
#[derive(Debug, Clone, Copy)]
pub struct SequenceValidator<'r> {
    syntax: SyntaxChecker<'r>,
    rules: RuleEngine<'r>,
    balances: BalanceCheck<'r>,
}

impl<'r> SequenceValidator<'r> {
    pub fn new(registry: &'r EntityRegistry) -> Self {
        SequenceValidator {
            syntax: SyntaxChecker::new(registry),
            rules: RuleEngine::new(registry),
            balances: BalanceCheck::new(registry),
        }
    }

    /// Validate one candidate sequence
    ///
    /// Returns [`Verdict::Valid`] only if syntax, semantics and sequence
    /// invariants all hold.
    pub fn validate<S: AsRef<str>>(&self, sequence: &[S]) -> Verdict {
        let verdict = self.check(sequence);
        debug!(
            steps = sequence.len(),
            errors = verdict.errors().len(),
            valid = verdict.is_valid(),
            "validated sequence"
        );
        verdict
    }
}

impl SequenceCheck for SequenceValidator<'_> {
    fn check_parsed(&self, steps: &[Result<Event, ParseError>]) -> Vec<ValidationError> {
        let errors = self.syntax.check_parsed(steps);
        if !errors.is_empty() {
            return errors;
        }

        let errors = self.rules.check_parsed(steps);
        if !errors.is_empty() {
            return errors;
        }

        let mut errors = self.balances.check_parsed(steps);
        errors.extend(sequence_invariants(steps));
        errors
    }
}

/// Sequence-level checks, run only once every step is individually sound
fn sequence_invariants(steps: &[Result<Event, ParseError>]) -> Option<ValidationError> {
    match steps.last() {
        None => Some(ValidationError::EmptySequence),
        Some(Ok(event)) if !event.is_transaction() => {
            Some(ValidationError::MissingTerminalTransaction { last: event.kind() })
        }
        // Parse failures never reach this stage; the syntax check returns first
        Some(_) => None,
    }
}

/// Validate `sequence` against `registry`
///
/// Convenience wrapper around [`SequenceValidator`].
pub fn validate<S: AsRef<str>>(sequence: &[S], registry: &EntityRegistry) -> Verdict {
    SequenceValidator::new(registry).validate(sequence)
}

/// Parse a sequence once and return both the events and the verdict
///
/// Used by callers that want the structured records of a valid candidate.
pub fn validate_and_parse<S: AsRef<str>>(
    sequence: &[S],
    registry: &EntityRegistry,
) -> (Vec<Result<Event, ParseError>>, Verdict) {
    let steps = parse_sequence(sequence);
    let verdict = Verdict::from_errors(SequenceValidator::new(registry).check_parsed(&steps));
    (steps, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorClass, EventKind, RuleViolation};

    fn registry() -> EntityRegistry {
        EntityRegistry::from_roles([
            ("govco", "fraudster"),
            ("sally", "individual"),
            ("acc_sally", "account"),
            ("acc_govco", "account"),
            ("acc_tmobile", "account"),
        ])
        .unwrap()
    }

    const VALID: [&str; 3] = [
        "action(govco, impersonation, sally, call, posed as irs agent)",
        "action(sally, sensitive info submission, govco, sms, sent ssn and dob)",
        "transaction(acc_sally, fast payment, acc_govco, 3000.00)",
    ];

    #[test]
    fn test_valid_sequence() {
        let (ok, errors) = validate(&VALID, &registry()).into_parts();
        assert!(ok);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_agency_violation_single_error() {
        let verdict = validate(
            &["action(acc_sally, sim swap, acc_tmobile, call, requested number change)"],
            &registry(),
        );

        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors().len(), 1);
        assert!(matches!(
            &verdict.errors()[0],
            ValidationError::Rule {
                step: 0,
                violation: RuleViolation::Agency { .. }
            }
        ));
        assert!(verdict.messages()[0].starts_with("Step 0: agency rule:"));
    }

    #[test]
    fn test_missing_terminal_transaction() {
        let verdict = validate(&VALID[..2], &registry());

        assert_eq!(
            verdict.errors(),
            &[ValidationError::MissingTerminalTransaction {
                last: EventKind::Action
            }]
        );
        assert!(verdict.messages()[0].contains("last step must be a transaction"));
        assert_eq!(verdict.errors()[0].step(), None);
    }

    #[test]
    fn test_empty_sequence() {
        let sequence: Vec<String> = Vec::new();
        let verdict = validate(&sequence, &registry());
        assert_eq!(verdict.errors(), &[ValidationError::EmptySequence]);
    }

    #[test]
    fn test_single_transaction_is_valid() {
        assert!(validate(&["transaction(acc_sally, wire, acc_govco, 0.01)"], &registry()).is_valid());
    }

    #[test]
    fn test_syntax_failure_short_circuits_semantics() {
        // Step 0 would violate the agency rule, but the unknown name in step 1
        // stops the pipeline at the syntax stage
        let verdict = validate(
            &[
                "action(acc_sally, sim swap, acc_tmobile, call, requested number change)",
                "transaction(acc_sally, wire, acc_nobody, 10)",
            ],
            &registry(),
        );

        assert_eq!(
            verdict.errors(),
            &[ValidationError::unknown_reference(1, "acc_nobody", None)]
        );
    }

    #[test]
    fn test_semantic_failure_hides_terminal_invariant() {
        let verdict = validate(&["action(acc_sally, payment, acc_govco, online, x)"], &registry());
        let classes: Vec<ErrorClass> = verdict.errors().iter().map(|e| e.class()).collect();
        assert_eq!(classes, vec![ErrorClass::Rule]);
    }

    #[test]
    fn test_overdraft_reported_with_terminal_invariant() {
        let registry = registry()
            .with_balances([("acc_sally", rust_decimal::Decimal::new(1000, 0))])
            .unwrap();

        let verdict = validate(
            &[
                "transaction(acc_sally, fast payment, acc_govco, 3000.00)",
                "action(govco, call, sally, phone, thanks)",
            ],
            &registry,
        );

        assert_eq!(
            verdict.messages(),
            vec![
                "Step 0: negative balance detected for 'acc_sally': -2000.00".to_string(),
                "Sequence: last step must be a transaction, found action".to_string(),
            ]
        );
    }

    #[test]
    fn test_balances_checked_only_after_rules_pass() {
        let registry = registry()
            .with_balances([("acc_sally", rust_decimal::Decimal::ZERO)])
            .unwrap();

        let verdict = validate(
            &[
                "action(acc_sally, payment, acc_govco, online, x)",
                "transaction(acc_sally, wire, acc_govco, 10)",
            ],
            &registry,
        );

        let classes: Vec<ErrorClass> = verdict.errors().iter().map(|e| e.class()).collect();
        assert_eq!(classes, vec![ErrorClass::Rule]);
    }

    #[test]
    fn test_validate_and_parse_returns_records() {
        let (steps, verdict) = validate_and_parse(&VALID, &registry());
        assert!(verdict.is_valid());
        assert_eq!(steps.len(), 3);
        assert!(steps[2].as_ref().unwrap().is_transaction());
    }

    #[test]
    fn test_validator_reusable_across_calls() {
        let registry = registry();
        let validator = SequenceValidator::new(&registry);

        assert!(validator.validate(&VALID).is_valid());
        assert!(!validator.validate(&VALID[..1]).is_valid());
        assert!(validator.validate(&VALID).is_valid());
    }

    #[test]
    fn test_concurrent_validation_shares_registry() {
        let registry = registry();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let registry = &registry;
                    scope.spawn(move || {
                        let sequence = if i % 2 == 0 { &VALID[..] } else { &VALID[..2] };
                        validate(sequence, registry).is_valid()
                    })
                })
                .collect();

            for (i, handle) in handles.into_iter().enumerate() {
                assert_eq!(handle.join().unwrap(), i % 2 == 0);
            }
        });
    }
}
