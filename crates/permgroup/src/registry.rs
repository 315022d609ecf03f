//! The permission definition registry.
//!
//! Definitions live only in memory: they are never written to the permission
//! document, so the embedding application registers its capabilities again
//! at every startup.

use permgroup_core::{validate_name, validate_token, PermissionDefinition};
use tracing::debug;

/// In-memory catalog of registered capabilities, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PermissionRegistry {
    definitions: Vec<PermissionDefinition>,
}

impl PermissionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability.
    ///
    /// Returns false if the name or token is illegal, or the token is
    /// already registered.
    pub fn register(&mut self, name: &str, token: &str) -> bool {
        if let Err(e) = validate_name(name) {
            debug!(name, error = %e, "rejected permission name");
            return false;
        }
        if let Err(e) = validate_token(token) {
            debug!(token, error = %e, "rejected permission token");
            return false;
        }
        if self.is_registered(token) {
            return false;
        }

        self.definitions.push(PermissionDefinition::new(name, token));
        debug!(name, token, "permission registered");
        true
    }

    /// Remove a capability by token. Returns false if it was not registered.
    pub fn unregister(&mut self, token: &str) -> bool {
        match self.definitions.iter().position(|d| d.value == token) {
            Some(index) => {
                self.definitions.remove(index);
                debug!(token, "permission unregistered");
                true
            }
            None => false,
        }
    }

    /// Check if a token is registered.
    pub fn is_registered(&self, token: &str) -> bool {
        self.definitions.iter().any(|d| d.value == token)
    }

    /// Look up a definition by token.
    pub fn get(&self, token: &str) -> Option<&PermissionDefinition> {
        self.definitions.iter().find(|d| d.value == token)
    }

    /// Look up the first definition with a display name.
    ///
    /// Display names are not required to be unique.
    pub fn get_by_name(&self, name: &str) -> Option<&PermissionDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// All definitions in registration order.
    pub fn all(&self) -> &[PermissionDefinition] {
        &self.definitions
    }

    /// Display names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }

    /// Tokens in registration order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.value.as_str())
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
