//! The persisted permission document and its JSON codec.
//!
//! The document is the unit of load and save: the admin list, the ordered
//! user groups, and the optional public group. It is encoded as JSON using
//! the field names `adminGroup`, `userGroup` and `publicGroup` so existing
//! data files stay readable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Group, PublicGroup};

/// The durable aggregate written on every successful mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDocument {
    /// Principal ids with the admin override.
    #[serde(rename = "adminGroup", default)]
    pub admins: Vec<String>,

    /// Groups in document order.
    #[serde(rename = "userGroup", default)]
    pub groups: Vec<Group>,

    /// Fallback group, present only once the feature has been enabled.
    #[serde(
        rename = "publicGroup",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_group: Option<PublicGroup>,
}

impl PermissionDocument {
    /// Create an empty document with no public group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a group by exact name, with its index.
    pub fn find_group(&self, name: &str) -> Option<(usize, &Group)> {
        self.groups
            .iter()
            .enumerate()
            .find(|(_, g)| g.name == name)
    }

    /// Find a group by exact name for mutation.
    pub fn find_group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Check document-level invariants.
    ///
    /// Documents written by this crate always pass. Hand-edited files may
    /// carry duplicate group names or repeated entries.
    pub fn check(&self) -> Result<(), CoreError> {
        if let Some(dup) = first_duplicate(self.admins.iter()) {
            return Err(CoreError::MalformedDocument(format!(
                "admin {dup:?} listed twice"
            )));
        }

        if let Some(dup) = first_duplicate(self.groups.iter().map(|g| &g.name)) {
            return Err(CoreError::MalformedDocument(format!(
                "group {dup:?} defined twice"
            )));
        }

        for group in &self.groups {
            if let Some(dup) = first_duplicate(group.permissions.iter()) {
                return Err(CoreError::MalformedDocument(format!(
                    "group {:?} grants {dup:?} twice",
                    group.name
                )));
            }
            if let Some(dup) = first_duplicate(group.users.iter()) {
                return Err(CoreError::MalformedDocument(format!(
                    "group {:?} lists user {dup:?} twice",
                    group.name
                )));
            }
        }

        Ok(())
    }
}

fn first_duplicate<'a>(items: impl Iterator<Item = &'a String>) -> Option<&'a String> {
    let mut seen = HashSet::new();
    items.into_iter().find(|item| !seen.insert(*item))
}

/// Encode a document to its on-disk JSON form.
pub fn encode_document(doc: &PermissionDocument) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(doc).map_err(|e| CoreError::EncodingError(e.to_string()))
}

/// Decode a document from its on-disk JSON form.
///
/// Missing lists default to empty; unknown fields are ignored.
pub fn decode_document(bytes: &[u8]) -> Result<PermissionDocument, CoreError> {
    Ok(serde_json::from_slice(bytes)?)
}
