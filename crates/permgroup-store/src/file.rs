//! File-backed implementation of the DocumentStore trait.
//!
//! This is the primary storage backend. Each key maps to one file under a
//! root directory. Writes go to a temporary file in the same directory which
//! is synced and then atomically renamed over the target, so readers see
//! either the old document or the new one, never a torn write.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::traits::DocumentStore;

/// Directory-based store implementation.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a file path under the root.
    ///
    /// Keys are relative paths; absolute keys and `..` components are
    /// rejected so a key can never address a file outside the root.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let only_normal = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if key.is_empty() || !only_normal || relative.file_name().is_none() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

impl DocumentStore for FileStore {
    fn exists(&self, key: &str) -> Result<bool> {
        match fs::metadata(self.path_for(key)?) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn read_all(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|err| {
            warn!(path = %path.display(), error = %err.error, "failed to replace document");
            StoreError::Io(err.error)
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DocumentStoreExt;
    use proptest::prelude::*;

    #[test]
    fn test_file_store_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(!store.exists("perm.json").unwrap());
        store.write_all("perm.json", br#"{"adminGroup":[]}"#).unwrap();

        assert!(store.exists("perm.json").unwrap());
        assert_eq!(
            store.read_all("perm.json").unwrap(),
            br#"{"adminGroup":[]}"#
        );
        assert!(dir.path().join("perm.json").is_file());
    }

    #[test]
    fn test_file_store_overwrite_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write_all("perm.json", b"a much longer first document").unwrap();
        store.write_all("perm.json", b"short").unwrap();
        assert_eq!(store.read_all("perm.json").unwrap(), b"short");

        // No temporary files left behind
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_file_store_nested_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write_all("plugins/perm/data.json", b"{}").unwrap();
        assert!(dir.path().join("plugins/perm/data.json").is_file());
        assert_eq!(store.read_optional("plugins/perm/data.json").unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn test_file_store_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.read_all("nope.json"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_file_store_exists_reports_metadata_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("blocker"), b"not a directory").unwrap();

        assert!(matches!(store.exists("blocker/perm.json"), Err(StoreError::Io(_))));
        assert!(matches!(
            store.read_or_init("blocker/perm.json", b"{}"),
            Err(StoreError::Io(_))
        ));
        assert_eq!(fs::read(dir.path().join("blocker")).unwrap(), b"not a directory");
    }

    #[test]
    fn test_file_store_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        for key in ["", "../perm.json", "a/../../perm.json", "/etc/perm.json"] {
            assert!(
                matches!(store.path_for(key), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    proptest! {
        #[test]
        fn test_accepted_keys_stay_under_root(
            segments in prop::collection::vec("[a-z.]{1,6}", 1..4),
        ) {
            let store = FileStore { root: PathBuf::from("/srv/perm") };
            let key = segments.join("/");
            if let Ok(path) = store.path_for(&key) {
                prop_assert!(path.starts_with(store.root()));
                prop_assert!(!key.split('/').any(|s| s == ".."));
            }
        }
    }
}
