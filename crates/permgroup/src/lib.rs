//! # permgroup
//!
//! Group-based authorization: decides whether a principal may exercise a
//! named permission based on group membership, group grants, an admin list,
//! and an optional public fallback group.
//!
//! ## Overview
//!
//! - **Groups**: named bundles of permission tokens and member ids
//! - **Admins**: an ordered list of principal ids with the admin override
//! - **Public group**: a fallback permission set applied to everyone when enabled
//! - **Registry**: in-memory catalog of the capabilities an application defines
//!
//! ## Key Concepts
//!
//! - **Permission token**: 6-12 ASCII alphanumerics, matched exactly.
//! - **Resolution**: the union of tokens from every group a principal is in,
//!   with the list of groups that granted each token.
//! - **Two error tiers**: a mutator that cannot apply returns `Ok(false)`;
//!   only storage failures and disabled features are `Err`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use permgroup::PermissionStore;
//!
//! let mut perms = PermissionStore::open_file("./data/permission.json", true).unwrap();
//!
//! // Capabilities are registered at every startup
//! perms.register_permission("Fly", "flyperm1");
//!
//! perms.create_group("vip").unwrap();
//! perms.add_group_permission("vip", "flyperm1").unwrap();
//! perms.add_user_to_group("vip", "user-42").unwrap();
//!
//! assert!(perms.has_permission("user-42", "flyperm1"));
//! let resolved = perms.resolve_user_permissions("user-42");
//! assert_eq!(resolved.granted_by("flyperm1"), ["vip"]);
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `permgroup::core` - Document model and validation
//! - `permgroup::store` - Storage abstraction and backends

pub mod config;
pub mod engine;
pub mod error;
pub mod registry;

// Re-export component crates
pub use permgroup_core as core;
pub use permgroup_store as store;

// Re-export main types for convenience
pub use config::{PermissionConfig, DEFAULT_DOCUMENT_KEY};
pub use engine::PermissionStore;
pub use error::{PermissionError, Result};
pub use registry::PermissionRegistry;

// Re-export commonly used core types
pub use permgroup_core::{
    is_legal_name, is_legal_token, Group, PermissionDefinition, PermissionDocument, PublicGroup,
    ResolvedPermissions,
};
pub use permgroup_store::{DocumentStore, FileStore, MemoryStore, SqliteStore, StoreError};
