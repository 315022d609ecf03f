//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use permgroup::{PermissionConfig, PermissionStore};
use permgroup_core::{decode_document, PermissionDocument};
use permgroup_store::{FileStore, MemoryStore};
use tempfile::TempDir;

/// A memory-backed permission store plus a handle on its backend.
pub struct TestFixture {
    pub backend: Arc<MemoryStore>,
    pub store: PermissionStore<Arc<MemoryStore>>,
}

impl TestFixture {
    /// Create a fixture with the public group disabled.
    pub fn new() -> Self {
        Self::with_config(PermissionConfig::default())
    }

    /// Create a fixture with the public group enabled.
    pub fn with_public_group() -> Self {
        Self::with_config(PermissionConfig::default().with_public_group(true))
    }

    /// Create a fixture with an explicit configuration.
    pub fn with_config(config: PermissionConfig) -> Self {
        let backend = Arc::new(MemoryStore::new());
        let store = PermissionStore::open(Arc::clone(&backend), config)
            .expect("memory store never fails to open");
        Self { backend, store }
    }

    /// Create a group with the given grants and members.
    pub fn seed_group(&mut self, name: &str, tokens: &[&str], users: &[&str]) -> &mut Self {
        assert!(
            self.store.create_group(name).unwrap(),
            "group {name:?} could not be created"
        );
        for token in tokens {
            assert!(self.store.add_group_permission(name, token).unwrap());
        }
        for user in users {
            assert!(self.store.add_user_to_group(name, user).unwrap());
        }
        self
    }

    /// The document as last written to the backend.
    pub fn saved_document(&self) -> PermissionDocument {
        let key = &self.store.config().document_key;
        let bytes = self.backend.snapshot(key).expect("document was written");
        decode_document(&bytes).expect("saved document decodes")
    }

    /// Reopen a fresh engine over the same backend, as after a restart.
    pub fn restart(&self) -> PermissionStore<Arc<MemoryStore>> {
        PermissionStore::open(Arc::clone(&self.backend), self.store.config().clone())
            .expect("memory store never fails to open")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A file-backed permission store in a temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct FileFixture {
    pub dir: TempDir,
    pub store: PermissionStore<FileStore>,
}

impl FileFixture {
    /// Create a file-backed fixture.
    pub fn new(public_group_enabled: bool) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = PermissionStore::open_file(dir.path().join("permission.json"), public_group_enabled)
            .expect("file store opens");
        Self { dir, store }
    }

    /// Path of the permission document.
    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("permission.json")
    }

    /// Reopen the document from disk, as after a restart.
    pub fn restart(&self) -> PermissionStore<FileStore> {
        PermissionStore::open_file(self.path(), self.store.is_public_group_enabled())
            .expect("file store reopens")
    }
}
