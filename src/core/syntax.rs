//! Syntax checker
//!
//! Verifies that every step of a sequence parses and that every entity it
//! names exists in the registry. All steps are checked; nothing short-circuits.

use crate::core::registry::EntityRegistry;
use crate::core::traits::SequenceCheck;
use crate::types::{Event, LookupError, ParseError, ValidationError, Verdict};

/// Structural and referential-integrity checker
#[derive(Debug, Clone, Copy)]
pub struct SyntaxChecker<'r> {
    registry: &'r EntityRegistry,
}

impl<'r> SyntaxChecker<'r> {
    pub fn new(registry: &'r EntityRegistry) -> Self {
        SyntaxChecker { registry }
    }

    /// Check one parsed step, appending any errors
    ///
    /// Reference fields are checked in field order, so an action with both
    /// subject and object missing yields two errors, subject first.
    fn check_step(
        &self,
        step: usize,
        parsed: &Result<Event, ParseError>,
        errors: &mut Vec<ValidationError>,
    ) {
        let event = match parsed {
            Ok(event) => event,
            Err(source) => {
                errors.push(ValidationError::parse(step, source.clone()));
                return;
            }
        };

        for (_, name) in event.references() {
            match self.registry.lookup(name) {
                Ok(_) => {}
                Err(LookupError::NotFound) => {
                    errors.push(ValidationError::unknown_reference(step, name, None));
                }
                Err(LookupError::UnknownRole { role }) => {
                    errors.push(ValidationError::unknown_reference(step, name, Some(&role)));
                }
            }
        }
    }
}

impl SequenceCheck for SyntaxChecker<'_> {
    fn check_parsed(&self, steps: &[Result<Event, ParseError>]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (step, parsed) in steps.iter().enumerate() {
            self.check_step(step, parsed, &mut errors);
        }
        errors
    }
}

/// Run the syntax check over a raw sequence
pub fn check_syntax<S: AsRef<str>>(sequence: &[S], registry: &EntityRegistry) -> Verdict {
    SyntaxChecker::new(registry).check(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorClass, EventKind};
    use rstest::rstest;

    fn registry() -> EntityRegistry {
        EntityRegistry::from_roles([
            ("govco", "fraudster"),
            ("sally", "individual"),
            ("acc_sally", "account"),
            ("acc_govco", "account"),
            ("mystery", "participant"),
        ])
        .unwrap()
    }

    #[test]
    fn test_fully_resolved_sequence_passes() {
        let sequence = [
            "action(govco, impersonation, sally, call, posed as irs agent)",
            "action(sally, sensitive info submission, govco, sms, sent ssn and dob)",
            "transaction(acc_sally, fast payment, acc_govco, 3000.00)",
        ];

        assert_eq!(check_syntax(&sequence, &registry()), Verdict::Valid);
    }

    #[rstest]
    #[case::unknown_subject("action(bob, call, sally, phone, hello)", 0, "bob")]
    #[case::unknown_object("action(govco, call, bob, phone, hello)", 0, "bob")]
    #[case::unknown_from("transaction(acc_bob, wire, acc_govco, 10)", 0, "acc_bob")]
    #[case::unknown_to("transaction(acc_sally, wire, acc_bob, 10)", 0, "acc_bob")]
    fn test_unknown_reference_named(#[case] step: &str, #[case] index: usize, #[case] name: &str) {
        let verdict = check_syntax(&[step], &registry());

        assert!(!verdict.is_valid());
        assert_eq!(
            verdict.errors(),
            &[ValidationError::unknown_reference(index, name, None)]
        );
        assert_eq!(
            verdict.messages(),
            vec![format!("Step {}: {} is not a valid entity", index, name)]
        );
    }

    #[test]
    fn test_collects_errors_from_every_step() {
        let sequence = [
            "action(ghost, call, sally, phone, hello)",
            "not a step",
            "action(sally, reply, phantom, sms, ok)",
            "transaction(acc_sally, wire, acc_govco, many)",
        ];

        let verdict = check_syntax(&sequence, &registry());
        let steps: Vec<Option<usize>> = verdict.errors().iter().map(|e| e.step()).collect();
        assert_eq!(steps, vec![Some(0), Some(1), Some(2), Some(3)]);

        let classes: Vec<ErrorClass> = verdict.errors().iter().map(|e| e.class()).collect();
        assert_eq!(
            classes,
            vec![
                ErrorClass::Reference,
                ErrorClass::Parse,
                ErrorClass::Reference,
                ErrorClass::Parse
            ]
        );
    }

    #[test]
    fn test_both_references_missing_reported_in_field_order() {
        let verdict = check_syntax(&["action(ghost, call, phantom, phone, hello)"], &registry());
        assert_eq!(
            verdict.messages(),
            vec![
                "Step 0: ghost is not a valid entity".to_string(),
                "Step 0: phantom is not a valid entity".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_failure_message() {
        let verdict = check_syntax(&["action(govco, call, sally)"], &registry());
        assert_eq!(
            verdict.errors(),
            &[ValidationError::parse(
                0,
                ParseError::FieldCount {
                    kind: EventKind::Action,
                    expected: 5,
                    found: 3
                }
            )]
        );
        assert!(verdict.messages()[0].starts_with("Step 0: failed to parse step"));
    }

    #[test]
    fn test_unknown_role_is_invalid_reference() {
        let verdict = check_syntax(&["action(mystery, call, sally, phone, hi)"], &registry());
        assert_eq!(
            verdict.messages(),
            vec!["Step 0: mystery is not a valid entity (unrecognized role 'participant')".to_string()]
        );
    }

    #[test]
    fn test_syntax_does_not_check_types() {
        // Person as a transaction endpoint is a semantic defect, not a syntax one
        let verdict = check_syntax(&["transaction(acc_sally, wire, govco, 10)"], &registry());
        assert!(verdict.is_valid());
    }

    #[test]
    fn test_empty_sequence_has_no_syntax_errors() {
        let sequence: [&str; 0] = [];
        assert!(check_syntax(&sequence, &registry()).is_valid());
    }
}
