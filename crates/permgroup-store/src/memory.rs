//! In-memory implementation of the DocumentStore trait.
//!
//! This is primarily for testing. It has the same semantics as the file
//! store but keeps everything in memory with no persistence. Writes can be
//! made to fail on demand to exercise storage-error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::traits::DocumentStore;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Vec<u8>>>,

    /// When set, every write fails with an I/O error.
    fail_writes: AtomicBool,

    /// Number of successful writes, for asserting save behaviour.
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one document.
    pub fn with_document(key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        if let Ok(mut documents) = store.documents.write() {
            documents.insert(key.into(), bytes.into());
        }
        store
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of writes that have succeeded so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of the document under `key`, if any.
    pub fn snapshot(&self, key: &str) -> Option<Vec<u8>> {
        self.documents.read().ok()?.get(key).cloned()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Poisoned(e.to_string())
}

impl DocumentStore for MemoryStore {
    fn exists(&self, key: &str) -> Result<bool> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.contains_key(key))
    }

    fn read_all(&self, key: &str) -> Result<Vec<u8>> {
        let documents = self.documents.read().map_err(poisoned)?;
        documents
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "injected write failure",
            )));
        }

        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.insert(key.to_string(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
