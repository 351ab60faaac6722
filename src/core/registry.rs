//! Entity registry
//!
//! The registry is the read-only view of the environment used for one
//! validation pass: it maps each entity name to its type. It is built once
//! from `(name, role)` pairs and never mutated afterwards; a changed
//! environment means a new registry.
//!
//! Accounts may also carry an opening balance. Only accounts with one have
//! their funds tracked across a sequence's transactions.

use crate::types::{Entity, EntityType, LookupError, RegistryError};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::warn;

/// How a registered name resolved when the registry was built
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Typed(Entity),
    /// Name exists but its role is not in the role table
    Untyped { role: String },
}

/// Immutable name → entity mapping
///
/// # Thread Safety
///
/// EntityRegistry holds only owned data and exposes `&self` methods, so it is
/// `Send + Sync` and can be shared across threads behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    slots: HashMap<String, Slot>,
    balances: HashMap<String, Decimal>,
}

impl EntityRegistry {
    /// Build a registry from already-typed entities
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateEntity` if two entities share a name.
    pub fn from_entities<I>(entities: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Entity>,
    {
        let mut registry = EntityRegistry::default();
        for entity in entities {
            let name = entity.name.clone();
            registry.insert(name, Slot::Typed(entity))?;
        }
        Ok(registry)
    }

    /// Build a registry from `(name, role)` pairs using the role table
    ///
    /// Names whose role is not in the table are kept as untyped entries so
    /// that every later lookup of them fails closed with
    /// [`LookupError::UnknownRole`]. A warning is logged for each.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateEntity` if a name appears twice.
    pub fn from_roles<I, N, R>(pairs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (N, R)>,
        N: Into<String>,
        R: AsRef<str>,
    {
        let mut registry = EntityRegistry::default();
        for (name, role) in pairs {
            let name = name.into();
            let role = role.as_ref();
            let slot = match EntityType::from_role(role) {
                Some(entity_type) => Slot::Typed(Entity::new(name.clone(), entity_type)),
                None => {
                    warn!(entity = %name, role = %role, "unrecognized role, entity will fail validation");
                    Slot::Untyped {
                        role: role.trim().to_string(),
                    }
                }
            };
            registry.insert(name, slot)?;
        }
        Ok(registry)
    }

    /// Attach opening balances to registered names
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnregisteredBalance` if a name is not in the
    /// registry.
    pub fn with_balances<I, N>(mut self, balances: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (N, Decimal)>,
        N: Into<String>,
    {
        for (name, balance) in balances {
            let name = name.into();
            if !self.slots.contains_key(&name) {
                return Err(RegistryError::UnregisteredBalance { name });
            }
            self.balances.insert(name, balance);
        }
        Ok(self)
    }

    fn insert(&mut self, name: String, slot: Slot) -> Result<(), RegistryError> {
        if self.slots.contains_key(&name) {
            return Err(RegistryError::DuplicateEntity { name });
        }
        self.slots.insert(name, slot);
        Ok(())
    }

    /// Resolve a name to its typed entity
    ///
    /// Names are matched exactly (case-sensitive).
    pub fn lookup(&self, name: &str) -> Result<&Entity, LookupError> {
        match self.slots.get(name) {
            Some(Slot::Typed(entity)) => Ok(entity),
            Some(Slot::Untyped { role }) => Err(LookupError::UnknownRole { role: role.clone() }),
            None => Err(LookupError::NotFound),
        }
    }

    /// Opening balance of `name`, if its funds are tracked
    pub fn opening_balance(&self, name: &str) -> Option<Decimal> {
        self.balances.get(name).copied()
    }

    /// Whether any entity carries an opening balance
    pub fn tracks_balances(&self) -> bool {
        !self.balances.is_empty()
    }

    /// Number of registered names, typed or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Names registered with a role outside the role table, sorted
    pub fn untyped_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Untyped { .. }))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}
