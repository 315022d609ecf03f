//! SQLite implementation of the DocumentStore trait.
//!
//! Useful for embedders that already keep their state in SQLite. Uses
//! rusqlite with bundled SQLite. Each document is one row; a write is a
//! single upsert statement, so it is atomic.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::DocumentStore;

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Poisoned(format!("sqlite connection: {}", e)))
    }

    /// Last write time of a document (Unix ms).
    pub fn updated_at(&self, key: &str) -> Result<Option<i64>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                "SELECT updated_at FROM documents WHERE doc_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }
}

impl DocumentStore for SqliteStore {
    fn exists(&self, key: &str) -> Result<bool> {
        let conn = self.conn()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM documents WHERE doc_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn read_all(&self, key: &str) -> Result<Vec<u8>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT body FROM documents WHERE doc_key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO documents (doc_key, body, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(doc_key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
            params![key, bytes, now_millis()],
        )?;
        debug!(key, bytes = bytes.len(), "document upserted");
        Ok(())
    }
}
