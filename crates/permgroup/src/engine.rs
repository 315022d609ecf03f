//! The PermissionStore: group, admin and public-group management plus
//! permission resolution.
//!
//! The store keeps an in-memory mirror of the persisted document. Every
//! mutator checks its preconditions against the mirror, applies the change,
//! and writes the whole document back before reporting success.

use std::path::Path;

use permgroup_core::{
    decode_document, encode_document, validate_name, validate_token, Group,
    PermissionDefinition, PermissionDocument, PublicGroup, ResolvedPermissions,
};
use permgroup_store::{DocumentStore, DocumentStoreExt, FileStore, StoreError};
use tracing::{debug, info, warn};

use crate::config::PermissionConfig;
use crate::error::{PermissionError, Result};
use crate::registry::PermissionRegistry;

/// The permission engine.
///
/// Mutators take `&mut self`; to share one store between threads, wrap it
/// in a `Mutex`. Each call is a read-modify-save step and two calls are not
/// atomic with respect to each other.
pub struct PermissionStore<S: DocumentStore> {
    /// The storage backend.
    store: S,
    /// Configuration.
    config: PermissionConfig,
    /// In-memory mirror of the persisted document.
    document: PermissionDocument,
    /// Registered capabilities (never persisted).
    registry: PermissionRegistry,
}

impl PermissionStore<FileStore> {
    /// Open a file-backed store at `path`.
    ///
    /// The parent directory becomes the [`FileStore`] root and the file name
    /// the document key. The file is created if it does not exist.
    pub fn open_file(path: impl AsRef<Path>, public_group_enabled: bool) -> Result<Self> {
        let path = path.as_ref();
        let key = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreError::InvalidKey(path.display().to_string()))?;
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let config = PermissionConfig::default()
            .with_document_key(key)
            .with_public_group(public_group_enabled);
        Self::open(FileStore::open(root)?, config)
    }
}

impl<S: DocumentStore> PermissionStore<S> {
    /// Open a store over `store`, loading (or creating) the permission document.
    ///
    /// A missing document is initialized empty and saved. When the public
    /// group is enabled and the document has none, an empty one is added and
    /// saved.
    pub fn open(store: S, config: PermissionConfig) -> Result<Self> {
        let document = load_document(&store, &config.document_key)?;
        let mut this = Self {
            store,
            config,
            document,
            registry: PermissionRegistry::new(),
        };
        this.init_public_group()?;
        Ok(this)
    }

    /// Get the configuration.
    pub fn config(&self) -> &PermissionConfig {
        &self.config
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read-only view of the in-memory document.
    pub fn document(&self) -> &PermissionDocument {
        &self.document
    }

    /// Whether the public group feature is enabled.
    pub fn is_public_group_enabled(&self) -> bool {
        self.config.public_group_enabled
    }

    /// Discard the in-memory document and read it again from storage.
    ///
    /// The permission registry is not affected.
    pub fn reload(&mut self) -> Result<()> {
        self.document = load_document(&self.store, &self.config.document_key)?;
        self.init_public_group()
    }

    fn init_public_group(&mut self) -> Result<()> {
        if !self.config.public_group_enabled || self.document.public_group.is_some() {
            return Ok(());
        }
        self.document.public_group = Some(PublicGroup::default());
        self.save()?;
        info!(key = %self.config.document_key, "public group initialized");
        Ok(())
    }

    /// Write the whole document to storage.
    fn save(&self) -> Result<()> {
        let bytes = encode_document(&self.document)?;
        if let Err(e) = self.store.write_all(&self.config.document_key, &bytes) {
            warn!(key = %self.config.document_key, error = %e, "failed to save permission document");
            return Err(e.into());
        }
        debug!(key = %self.config.document_key, bytes = bytes.len(), "permission document saved");
        Ok(())
    }

    /// Save and report success for a mutation that took effect.
    fn commit(&self, op: &'static str) -> Result<bool> {
        self.save()?;
        debug!(op, "mutation committed");
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if a principal is an admin.
    pub fn is_admin(&self, id: &str) -> bool {
        self.document.admins.iter().any(|a| a == id)
    }

    /// Add an admin. Returns false if already an admin.
    pub fn add_admin(&mut self, id: &str) -> Result<bool> {
        if self.is_admin(id) {
            return Ok(false);
        }
        self.document.admins.push(id.to_string());
        self.commit("add_admin")
    }

    /// Remove an admin. Returns false if not an admin.
    pub fn remove_admin(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.document.admins.iter().position(|a| a == id) else {
            return Ok(false);
        };
        self.document.admins.remove(index);
        self.commit("remove_admin")
    }

    /// All admins in insertion order.
    pub fn admins(&self) -> &[String] {
        &self.document.admins
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Group Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if a group exists (exact, case-sensitive match).
    pub fn group_exists(&self, name: &str) -> bool {
        self.document.find_group(name).is_some()
    }

    /// Create an empty group.
    ///
    /// Returns false if the name is taken or illegal.
    pub fn create_group(&mut self, name: &str) -> Result<bool> {
        if self.group_exists(name) {
            return Ok(false);
        }
        if let Err(e) = validate_name(name) {
            debug!(name, error = %e, "rejected group name");
            return Ok(false);
        }
        self.document.groups.push(Group::new(name));
        self.commit("create_group")
    }

    /// Delete a group. Returns false if it does not exist.
    pub fn delete_group(&mut self, name: &str) -> Result<bool> {
        let Some((index, _)) = self.document.find_group(name) else {
            return Ok(false);
        };
        self.document.groups.remove(index);
        self.commit("delete_group")
    }

    /// Rename a group in place, keeping its position, permissions and members.
    ///
    /// Returns false if `name` does not exist, `new_name` is illegal, or
    /// `new_name` already belongs to another group. Renaming a group to its
    /// own name succeeds without writing.
    pub fn rename_group(&mut self, name: &str, new_name: &str) -> Result<bool> {
        let Some((index, _)) = self.document.find_group(name) else {
            return Ok(false);
        };
        if let Err(e) = validate_name(new_name) {
            debug!(new_name, error = %e, "rejected group name");
            return Ok(false);
        }
        if name == new_name {
            return Ok(true);
        }
        if self.group_exists(new_name) {
            debug!(name, new_name, "rename target already exists");
            return Ok(false);
        }
        self.document.groups[index].name = new_name.to_string();
        self.commit("rename_group")
    }

    /// Get a group and its position in document order.
    pub fn group(&self, name: &str) -> Option<(usize, &Group)> {
        self.document.find_group(name)
    }

    /// All groups in document order.
    pub fn groups(&self) -> &[Group] {
        &self.document.groups
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Group Permissions
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if a group grants a token. False if the group does not exist.
    pub fn group_has_permission(&self, name: &str, token: &str) -> bool {
        self.group(name)
            .is_some_and(|(_, group)| group.has_permission(token))
    }

    /// Grant a token to a group.
    ///
    /// Returns false if the group does not exist, the token is illegal, or
    /// the group already grants it.
    pub fn add_group_permission(&mut self, name: &str, token: &str) -> Result<bool> {
        if let Err(e) = validate_token(token) {
            debug!(token, error = %e, "rejected permission token");
            return Ok(false);
        }
        let Some(group) = self.document.find_group_mut(name) else {
            return Ok(false);
        };
        if !group.grant(token) {
            return Ok(false);
        }
        self.commit("add_group_permission")
    }

    /// Revoke a token from a group.
    ///
    /// Returns false if the group does not exist or does not grant it.
    pub fn remove_group_permission(&mut self, name: &str, token: &str) -> Result<bool> {
        let Some(group) = self.document.find_group_mut(name) else {
            return Ok(false);
        };
        if !group.revoke(token) {
            return Ok(false);
        }
        self.commit("remove_group_permission")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Group Membership
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if a principal is a member of a group.
    pub fn group_has_user(&self, name: &str, id: &str) -> bool {
        self.group(name).is_some_and(|(_, group)| group.has_user(id))
    }

    /// Add a principal to a group.
    ///
    /// Returns false if the group does not exist or already has the member.
    pub fn add_user_to_group(&mut self, name: &str, id: &str) -> Result<bool> {
        let Some(group) = self.document.find_group_mut(name) else {
            return Ok(false);
        };
        if !group.add_user(id) {
            return Ok(false);
        }
        self.commit("add_user_to_group")
    }

    /// Remove a principal from a group.
    ///
    /// Returns false if the group does not exist or the principal is not a member.
    pub fn remove_user_from_group(&mut self, name: &str, id: &str) -> Result<bool> {
        let Some(group) = self.document.find_group_mut(name) else {
            return Ok(false);
        };
        if !group.remove_user(id) {
            return Ok(false);
        }
        self.commit("remove_user_from_group")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// Groups that list `id` as a member, in document order.
    pub fn groups_containing(&self, id: &str) -> Vec<&Group> {
        self.document
            .groups
            .iter()
            .filter(|group| group.has_user(id))
            .collect()
    }

    /// Aggregate every token granted to `id` through group membership,
    /// together with the groups that granted each one.
    pub fn resolve_user_permissions(&self, id: &str) -> ResolvedPermissions {
        let mut resolved = ResolvedPermissions::new();
        for group in self.groups_containing(id) {
            if group.permissions.is_empty() {
                continue;
            }
            resolved.absorb(group);
        }
        resolved
    }

    /// Check if `id` holds `token`, falling back to the public group when
    /// the feature is enabled.
    pub fn has_permission(&self, id: &str, token: &str) -> bool {
        self.has_permission_with(id, token, self.config.public_group_enabled)
    }

    /// Check if `id` holds `token`.
    ///
    /// Group grants are checked first. Only if none matches, and both
    /// `check_public` and the public group feature are on, is the public
    /// group consulted.
    pub fn has_permission_with(&self, id: &str, token: &str, check_public: bool) -> bool {
        if self.resolve_user_permissions(id).contains(token) {
            return true;
        }
        if !(check_public && self.config.public_group_enabled) {
            return false;
        }
        self.document
            .public_group
            .as_ref()
            .is_some_and(|public| public.has_permission(token))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Public Group
    // ─────────────────────────────────────────────────────────────────────────

    fn public_group_ref(&self) -> Result<&PublicGroup> {
        if !self.config.public_group_enabled {
            return Err(PermissionError::FeatureDisabled);
        }
        self.document
            .public_group
            .as_ref()
            .ok_or(PermissionError::FeatureDisabled)
    }

    fn public_group_mut(&mut self) -> Result<&mut PublicGroup> {
        if !self.config.public_group_enabled {
            return Err(PermissionError::FeatureDisabled);
        }
        self.document
            .public_group
            .as_mut()
            .ok_or(PermissionError::FeatureDisabled)
    }

    /// Tokens granted by the public group.
    pub fn public_group_permissions(&self) -> Result<&[String]> {
        Ok(&self.public_group_ref()?.permissions)
    }

    /// Check if the public group grants a token.
    pub fn public_group_has_permission(&self, token: &str) -> Result<bool> {
        Ok(self.public_group_ref()?.has_permission(token))
    }

    /// Grant a token to the public group.
    ///
    /// Returns false if the token is illegal or already granted.
    pub fn add_public_group_permission(&mut self, token: &str) -> Result<bool> {
        let public = self.public_group_mut()?;
        if let Err(e) = validate_token(token) {
            debug!(token, error = %e, "rejected permission token");
            return Ok(false);
        }
        if !public.grant(token) {
            return Ok(false);
        }
        self.commit("add_public_group_permission")
    }

    /// Revoke a token from the public group. Returns false if not granted.
    pub fn remove_public_group_permission(&mut self, token: &str) -> Result<bool> {
        if !self.public_group_mut()?.revoke(token) {
            return Ok(false);
        }
        self.commit("remove_public_group_permission")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Registry
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a capability. See [`PermissionRegistry::register`].
    pub fn register_permission(&mut self, name: &str, token: &str) -> bool {
        self.registry.register(name, token)
    }

    /// Unregister a capability by token.
    pub fn unregister_permission(&mut self, token: &str) -> bool {
        self.registry.unregister(token)
    }

    /// Check if a token is registered.
    pub fn is_registered(&self, token: &str) -> bool {
        self.registry.is_registered(token)
    }

    /// Look up a registered capability by token.
    pub fn permission(&self, token: &str) -> Option<&PermissionDefinition> {
        self.registry.get(token)
    }

    /// Look up a registered capability by display name.
    pub fn permission_by_name(&self, name: &str) -> Option<&PermissionDefinition> {
        self.registry.get_by_name(name)
    }

    /// All registered capabilities in registration order.
    pub fn permissions(&self) -> &[PermissionDefinition] {
        self.registry.all()
    }

    /// Display names of registered capabilities.
    pub fn permission_names(&self) -> Vec<&str> {
        self.registry.names().collect()
    }

    /// Tokens of registered capabilities.
    pub fn permission_values(&self) -> Vec<&str> {
        self.registry.values().collect()
    }

    /// The registry itself.
    pub fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }
}

/// Load the document under `key`, creating an empty one if absent.
fn load_document<S: DocumentStore>(store: &S, key: &str) -> Result<PermissionDocument> {
    let empty = encode_document(&PermissionDocument::new())?;
    let (bytes, created) = store.read_or_init(key, &empty)?;
    if created {
        info!(key, "created empty permission document");
    }

    let document = decode_document(&bytes)?;
    if let Err(e) = document.check() {
        // Kept as-is: older writers allowed duplicate group names via rename.
        warn!(key, error = %e, "permission document violates uniqueness rules");
    }
    Ok(document)
}
