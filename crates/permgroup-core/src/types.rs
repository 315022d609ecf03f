//! Record types for the permission model.
//!
//! Groups and the public group are fixed structures rather than free-form
//! maps. Field names on the wire follow the established document layout
//! (`groupName`, `authority`, `user`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named bundle of permission tokens and member principal ids.
///
/// Both lists keep insertion order and never hold duplicates; the
/// mutators below refuse to insert an entry that is already present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// The group name, unique across the document.
    #[serde(rename = "groupName")]
    pub name: String,

    /// Permission tokens granted to every member.
    #[serde(rename = "authority", default)]
    pub permissions: Vec<String>,

    /// Member principal ids.
    #[serde(rename = "user", default)]
    pub users: Vec<String>,
}

impl Group {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Check if this group grants a token.
    pub fn has_permission(&self, token: &str) -> bool {
        self.permissions.iter().any(|p| p == token)
    }

    /// Check if a principal is a member.
    pub fn has_user(&self, id: &str) -> bool {
        self.users.iter().any(|u| u == id)
    }

    /// Append a token. Returns false if it is already granted.
    pub fn grant(&mut self, token: &str) -> bool {
        push_unique(&mut self.permissions, token)
    }

    /// Remove a token. Returns false if it was not granted.
    pub fn revoke(&mut self, token: &str) -> bool {
        remove_first(&mut self.permissions, token)
    }

    /// Append a member. Returns false if already a member.
    pub fn add_user(&mut self, id: &str) -> bool {
        push_unique(&mut self.users, id)
    }

    /// Remove a member. Returns false if not a member.
    pub fn remove_user(&mut self, id: &str) -> bool {
        remove_first(&mut self.users, id)
    }
}

/// The fallback permission set applied to every principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicGroup {
    #[serde(rename = "authority", default)]
    pub permissions: Vec<String>,
}

impl PublicGroup {
    /// Check if the public group grants a token.
    pub fn has_permission(&self, token: &str) -> bool {
        self.permissions.iter().any(|p| p == token)
    }

    /// Append a token. Returns false if it is already granted.
    pub fn grant(&mut self, token: &str) -> bool {
        push_unique(&mut self.permissions, token)
    }

    /// Remove a token. Returns false if it was not granted.
    pub fn revoke(&mut self, token: &str) -> bool {
        remove_first(&mut self.permissions, token)
    }
}

/// A registered capability: a display name and its canonical token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDefinition {
    /// Human-facing display name.
    pub name: String,
    /// Canonical token used in group permission sets.
    pub value: String,
}

impl PermissionDefinition {
    /// Create a definition from a display name and a token.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The outcome of resolving a principal's permissions.
///
/// `permissions` is the flat capability set in first-seen order.
/// `source` records, per token, every group that granted it, in
/// document order and without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPermissions {
    pub permissions: Vec<String>,
    pub source: BTreeMap<String, Vec<String>>,
}

impl ResolvedPermissions {
    /// Create an empty resolution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one group's grants into the resolution.
    ///
    /// Empty groups contribute nothing.
    pub fn absorb(&mut self, group: &Group) {
        for token in &group.permissions {
            push_unique(&mut self.permissions, token);
            let granted_by = self.source.entry(token.clone()).or_default();
            push_unique(granted_by, &group.name);
        }
    }

    /// Check if the resolved set contains a token.
    pub fn contains(&self, token: &str) -> bool {
        self.permissions.iter().any(|p| p == token)
    }

    /// Groups that granted a token, in document order.
    pub fn granted_by(&self, token: &str) -> &[String] {
        self.source.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if nothing was granted.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) -> bool {
    if list.iter().any(|x| x == item) {
        return false;
    }
    list.push(item.to_string());
    true
}

fn remove_first(list: &mut Vec<String>, item: &str) -> bool {
    match list.iter().position(|x| x == item) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}
