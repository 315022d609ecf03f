//! # permgroup Store
//!
//! Storage abstraction for permgroup. Provides a trait-based interface for
//! whole-document persistence with file, SQLite, and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The store module abstracts document storage behind the [`DocumentStore`]
//! trait, allowing the permission engine to be storage-agnostic. The primary
//! implementation is [`FileStore`], with [`SqliteStore`] for embedders that
//! already use SQLite and [`MemoryStore`] for testing.
//!
//! ## Key Types
//!
//! - [`DocumentStore`] - The trait for all storage operations
//! - [`FileStore`] - One file per key, atomic replace on write
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests, with write-failure injection
//!
//! ## Usage
//!
//! ```rust,no_run
//! use permgroup_store::{DocumentStore, FileStore};
//!
//! let store = FileStore::open("./data").unwrap();
//! store.write_all("permission.json", br#"{"adminGroup":[],"userGroup":[]}"#).unwrap();
//! let bytes = store.read_all("permission.json").unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic writes**: a failed write leaves the previous document intact
//! - **Opaque bytes**: the store never interprets document contents

pub mod error;
pub mod file;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{DocumentStore, DocumentStoreExt};
