//! Validation verdicts
//!
//! A verdict is either a clean pass or a non-empty, ordered list of errors.
//! Errors keep the order in which they were found: step order first, then
//! field order within a step, then sequence-level errors.

use super::error::ValidationError;

/// Outcome of checking one candidate sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every check passed
    Valid,

    /// At least one check failed; never constructed with an empty list
    Invalid(Vec<ValidationError>),
}

impl Verdict {
    /// Build a verdict from collected errors
    ///
    /// An empty list means the candidate passed.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            Verdict::Valid
        } else {
            Verdict::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Verdict::Valid => &[],
            Verdict::Invalid(errors) => errors,
        }
    }

    /// Rendered error messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }

    /// Split into the `(ok, errors)` pair handed back to sequence producers
    pub fn into_parts(self) -> (bool, Vec<String>) {
        let ok = self.is_valid();
        (ok, self.messages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_is_valid() {
        let verdict = Verdict::from_errors(Vec::new());
        assert!(verdict.is_valid());
        assert!(verdict.errors().is_empty());
        assert_eq!(verdict.into_parts(), (true, Vec::new()));
    }

    #[test]
    fn test_errors_keep_order() {
        let verdict = Verdict::from_errors(vec![
            ValidationError::unknown_reference(0, "a", None),
            ValidationError::unknown_reference(2, "b", None),
        ]);

        assert!(!verdict.is_valid());
        let (ok, messages) = verdict.into_parts();
        assert!(!ok);
        assert_eq!(
            messages,
            vec![
                "Step 0: a is not a valid entity".to_string(),
                "Step 2: b is not a valid entity".to_string(),
            ]
        );
    }
}
