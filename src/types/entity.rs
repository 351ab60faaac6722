//! Entity types for the fraud sequence validator
//!
//! This module defines the closed set of entity types an environment can
//! contain and the mapping from external role strings onto that set.

use std::fmt;

/// Kind of participant in a fraud narrative
///
/// The set is closed: external role strings are mapped onto it through
/// [`EntityType::from_role`], and anything that does not map is flagged by
/// the registry instead of being given a default type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// A private person (typically the victim)
    Individual,

    /// A person or persona acting fraudulently
    Fraudster,

    /// A financial institution
    Bank,

    /// A money-holding account; the only valid transaction endpoint
    Account,

    /// A generic organization (utility, restaurant, institution, ...)
    Organization,

    /// A telecommunications provider
    Telecom,

    /// A government agency
    Government,

    /// A merchant or retailer
    Merchant,
}

/// Role string → entity type table
///
/// This is the single place where external role vocabulary is interpreted.
/// Roles are compared after trimming and ASCII-lowercasing.
const ROLE_TABLE: &[(&str, EntityType)] = &[
    ("individual", EntityType::Individual),
    ("fraudster", EntityType::Fraudster),
    ("bank", EntityType::Bank),
    ("account", EntityType::Account),
    ("telecom", EntityType::Telecom),
    ("utility", EntityType::Organization),
    ("restaurant", EntityType::Organization),
    ("institution", EntityType::Organization),
    ("organization", EntityType::Organization),
    ("government", EntityType::Government),
    ("merchant", EntityType::Merchant),
];

impl EntityType {
    /// Map an external role string onto an entity type
    ///
    /// Returns `None` for roles outside the table. Callers must treat `None`
    /// as "no type" and fail closed, never as a default.
    pub fn from_role(role: &str) -> Option<Self> {
        let role = role.trim().to_ascii_lowercase();
        ROLE_TABLE
            .iter()
            .find(|(name, _)| *name == role)
            .map(|&(_, entity_type)| entity_type)
    }

    /// Canonical lowercase name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Individual => "individual",
            EntityType::Fraudster => "fraudster",
            EntityType::Bank => "bank",
            EntityType::Account => "account",
            EntityType::Organization => "organization",
            EntityType::Telecom => "telecom",
            EntityType::Government => "government",
            EntityType::Merchant => "merchant",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed participant in the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Unique name used to reference this entity in sequences
    pub name: String,

    /// The entity's type
    pub entity_type: EntityType,
}

impl Entity {
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        Entity {
            name: name.into(),
            entity_type,
        }
    }

    pub fn is_account(&self) -> bool {
        self.entity_type == EntityType::Account
    }

    /// Individuals and fraudsters: the only entities with their own volition
    pub fn is_human(&self) -> bool {
        matches!(
            self.entity_type,
            EntityType::Individual | EntityType::Fraudster
        )
    }

    pub fn is_organization(&self) -> bool {
        matches!(
            self.entity_type,
            EntityType::Bank
                | EntityType::Organization
                | EntityType::Telecom
                | EntityType::Government
                | EntityType::Merchant
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("individual", Some(EntityType::Individual))]
    #[case("fraudster", Some(EntityType::Fraudster))]
    #[case("bank", Some(EntityType::Bank))]
    #[case("account", Some(EntityType::Account))]
    #[case("telecom", Some(EntityType::Telecom))]
    #[case("utility", Some(EntityType::Organization))]
    #[case("restaurant", Some(EntityType::Organization))]
    #[case("institution", Some(EntityType::Organization))]
    #[case("government", Some(EntityType::Government))]
    #[case("merchant", Some(EntityType::Merchant))]
    #[case("  Fraudster ", Some(EntityType::Fraudster))] // trimmed, case insensitive
    #[case("participant", None)]
    #[case("", None)]
    fn test_from_role(#[case] role: &str, #[case] expected: Option<EntityType>) {
        assert_eq!(EntityType::from_role(role), expected);
    }

    #[test]
    fn test_every_type_reachable_from_its_own_name() {
        for entity_type in [
            EntityType::Individual,
            EntityType::Fraudster,
            EntityType::Bank,
            EntityType::Account,
            EntityType::Organization,
            EntityType::Telecom,
            EntityType::Government,
            EntityType::Merchant,
        ] {
            assert_eq!(EntityType::from_role(entity_type.as_str()), Some(entity_type));
        }
    }

    #[rstest]
    #[case(EntityType::Individual, false, true, false)]
    #[case(EntityType::Fraudster, false, true, false)]
    #[case(EntityType::Account, true, false, false)]
    #[case(EntityType::Bank, false, false, true)]
    #[case(EntityType::Organization, false, false, true)]
    #[case(EntityType::Telecom, false, false, true)]
    #[case(EntityType::Government, false, false, true)]
    #[case(EntityType::Merchant, false, false, true)]
    fn test_capability_predicates(
        #[case] entity_type: EntityType,
        #[case] account: bool,
        #[case] human: bool,
        #[case] organization: bool,
    ) {
        let entity = Entity::new("x", entity_type);
        assert_eq!(entity.is_account(), account);
        assert_eq!(entity.is_human(), human);
        assert_eq!(entity.is_organization(), organization);
    }
}
