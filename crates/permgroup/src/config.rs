//! Configuration for the permission engine.

use serde::{Deserialize, Serialize};

/// Default document key (file name under a `FileStore` root).
pub const DEFAULT_DOCUMENT_KEY: &str = "permission.json";

/// Configuration for a [`PermissionStore`](crate::PermissionStore).
///
/// Serde-derivable so an embedding application can keep it in its own
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionConfig {
    /// Key of the permission document in the backing store.
    pub document_key: String,
    /// Whether the public fallback group is enabled.
    pub public_group_enabled: bool,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            document_key: DEFAULT_DOCUMENT_KEY.to_string(),
            public_group_enabled: false,
        }
    }
}

impl PermissionConfig {
    /// Set the document key.
    pub fn with_document_key(mut self, key: impl Into<String>) -> Self {
        self.document_key = key.into();
        self
    }

    /// Enable or disable the public group.
    pub fn with_public_group(mut self, enabled: bool) -> Self {
        self.public_group_enabled = enabled;
        self
    }
}
