//! Semantic rule engine
//!
//! Decides whether each event is plausible given what its participants are
//! capable of. Rules are keyed on entity types and on keyword classes of the
//! free-text verb and channel (see [`crate::core::keywords`]), never on a
//! fixed action vocabulary, so novel verbs produced upstream are still judged.
//!
//! # Evaluation
//!
//! For an action, references are resolved first (unknown-entity rule), then
//! the capability rules run in the fixed order of [`ACTION_RULES`]. A step
//! stops at its first violation. For a transaction, both endpoints are
//! resolved and must be accounts.
//!
//! Every step is evaluated regardless of earlier failures.

use crate::core::keywords::{
    matches_any, AGENCY_CHANNELS, AGENCY_VERBS, DISCLOSURE_VERBS, IDENTITY_TERMS,
    INFORMATION_TERMS, MANIPULATION_VERBS, TECHNICAL_VERBS,
};
use crate::core::registry::EntityRegistry;
use crate::core::traits::SequenceCheck;
use crate::types::{
    Action, Entity, Event, LookupError, ParseError, RuleViolation, ValidationError, Verdict,
};

/// A capability rule over a resolved action
pub type ActionRule = fn(&Action, &Entity, &Entity) -> Result<(), RuleViolation>;

/// Action rules in evaluation order
pub const ACTION_RULES: [ActionRule; 5] = [
    agency_rule,
    information_submission_rule,
    psychological_target_rule,
    identity_rule,
    account_to_account_rule,
];

/// Accounts cannot originate communicative or volitional acts
pub fn agency_rule(action: &Action, subject: &Entity, _object: &Entity) -> Result<(), RuleViolation> {
    let communicative = matches_any(&action.verb, AGENCY_VERBS)
        || matches_any(&action.channel, AGENCY_CHANNELS);

    if subject.is_account() && communicative {
        return Err(RuleViolation::Agency {
            subject: action.subject.clone(),
            verb: action.verb.clone(),
            channel: action.channel.clone(),
        });
    }
    Ok(())
}

/// Only people decide to hand over information
pub fn information_submission_rule(
    action: &Action,
    subject: &Entity,
    _object: &Entity,
) -> Result<(), RuleViolation> {
    let submission = matches_any(&action.verb, DISCLOSURE_VERBS)
        && matches_any(&action.verb, INFORMATION_TERMS);

    if submission && !subject.is_human() {
        return Err(RuleViolation::InformationSubmission {
            subject: action.subject.clone(),
            entity_type: subject.entity_type,
        });
    }
    Ok(())
}

/// Manipulation needs a target with volition
pub fn psychological_target_rule(
    action: &Action,
    _subject: &Entity,
    object: &Entity,
) -> Result<(), RuleViolation> {
    if object.is_account() && matches_any(&action.verb, MANIPULATION_VERBS) {
        return Err(RuleViolation::PsychologicalTarget {
            verb: action.verb.clone(),
            object: action.object.clone(),
        });
    }
    Ok(())
}

/// Identity-based actions target people or organizations
pub fn identity_rule(action: &Action, _subject: &Entity, object: &Entity) -> Result<(), RuleViolation> {
    if object.is_account() && matches_any(&action.verb, IDENTITY_TERMS) {
        return Err(RuleViolation::IdentityTarget {
            verb: action.verb.clone(),
            object: action.object.clone(),
        });
    }
    Ok(())
}

/// Between two accounts only technical interaction is possible
pub fn account_to_account_rule(
    action: &Action,
    subject: &Entity,
    object: &Entity,
) -> Result<(), RuleViolation> {
    if subject.is_account() && object.is_account() && !matches_any(&action.verb, TECHNICAL_VERBS) {
        return Err(RuleViolation::AccountToAccount {
            subject: action.subject.clone(),
            verb: action.verb.clone(),
            object: action.object.clone(),
        });
    }
    Ok(())
}

/// Transactions move money between accounts, not people or institutions
pub fn endpoint_rule(field: &'static str, endpoint: &Entity) -> Result<(), RuleViolation> {
    if !endpoint.is_account() {
        return Err(RuleViolation::TransactionEndpoint {
            field,
            name: endpoint.name.clone(),
            entity_type: endpoint.entity_type,
        });
    }
    Ok(())
}

/// Capability-based plausibility checker
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'r> {
    registry: &'r EntityRegistry,
}

impl<'r> RuleEngine<'r> {
    pub fn new(registry: &'r EntityRegistry) -> Self {
        RuleEngine { registry }
    }

    /// Check a single event, returning its first violation
    pub fn check_event(&self, event: &Event) -> Result<(), RuleViolation> {
        let [(first_field, first_name), (second_field, second_name)] = event.references();
        let first = self.resolve(first_field, first_name)?;
        let second = self.resolve(second_field, second_name)?;

        match event {
            Event::Action(action) => {
                for rule in ACTION_RULES {
                    rule(action, first, second)?;
                }
                Ok(())
            }
            Event::Transaction(_) => {
                endpoint_rule(first_field, first)?;
                endpoint_rule(second_field, second)
            }
        }
    }

    /// Unknown-entity rule: untyped and missing names both fail here
    fn resolve(&self, position: &'static str, name: &str) -> Result<&'r Entity, RuleViolation> {
        self.registry
            .lookup(name)
            .map_err(|error| RuleViolation::UnknownEntity {
                position,
                name: name.to_string(),
                role: match error {
                    LookupError::NotFound => None,
                    LookupError::UnknownRole { role } => Some(role),
                },
            })
    }
}

impl SequenceCheck for RuleEngine<'_> {
    fn check_parsed(&self, steps: &[Result<Event, ParseError>]) -> Vec<ValidationError> {
        steps
            .iter()
            .enumerate()
            .filter_map(|(step, parsed)| match parsed {
                Err(source) => Some(ValidationError::parse(step, source.clone())),
                Ok(event) => self
                    .check_event(event)
                    .err()
                    .map(|violation| ValidationError::rule(step, violation)),
            })
            .collect()
    }
}

/// Run the semantic rules over a raw sequence
pub fn check_semantics<S: AsRef<str>>(sequence: &[S], registry: &EntityRegistry) -> Verdict {
    RuleEngine::new(registry).check(sequence)
}
