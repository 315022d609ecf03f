//! DocumentStore trait: the abstract interface for document persistence.
//!
//! This trait keeps the permission engine storage-agnostic. Implementations
//! include a directory of files (primary), SQLite, and in-memory (for tests).

use std::sync::Arc;

use crate::error::{Result, StoreError};

/// A durable key-document store.
///
/// Each key names one opaque document. Writes replace the whole document
/// and either fully succeed or leave the previous contents in place.
///
/// # Design Notes
///
/// - **Whole-document writes**: there is no partial update or append.
/// - **No retries**: a failed write is reported once and never retried here.
/// - **Synchronous**: every call completes before returning.
pub trait DocumentStore: Send + Sync {
    /// Check whether a document exists under `key`.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Read the full document stored under `key`.
    ///
    /// Returns `NotFound` if nothing is stored there.
    fn read_all(&self, key: &str) -> Result<Vec<u8>>;

    /// Replace the document stored under `key`.
    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// Extension trait for common store patterns.
pub trait DocumentStoreExt: DocumentStore {
    /// Read a document, treating a missing key as `None`.
    fn read_optional(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.read_all(key) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read a document, writing `default` first if the key is absent.
    ///
    /// Returns the stored bytes and whether the default was written.
    fn read_or_init(&self, key: &str, default: &[u8]) -> Result<(Vec<u8>, bool)> {
        if self.exists(key)? {
            return Ok((self.read_all(key)?, false));
        }
        self.write_all(key, default)?;
        Ok((default.to_vec(), true))
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }

    fn read_all(&self, key: &str) -> Result<Vec<u8>> {
        (**self).read_all(key)
    }

    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).write_all(key, bytes)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }

    fn read_all(&self, key: &str) -> Result<Vec<u8>> {
        (**self).read_all(key)
    }

    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).write_all(key, bytes)
    }
}
