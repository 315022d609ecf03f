//! # permgroup Core
//!
//! Pure primitives for permgroup: groups, the persisted permission
//! document, and the legality rules for names and permission tokens.
//!
//! This crate contains no I/O. It is pure computation over the permission
//! model.
//!
//! ## Key Types
//!
//! - [`PermissionDocument`] - The durable aggregate (admins, groups, public group)
//! - [`Group`] - A named bundle of permission tokens and member ids
//! - [`PublicGroup`] - The fallback permission set
//! - [`PermissionDefinition`] - A registered capability (display name + token)
//! - [`ResolvedPermissions`] - A principal's aggregated permissions and their sources
//!
//! ## Encoding
//!
//! Documents are JSON. See the [`document`] module.

pub mod document;
pub mod error;
pub mod types;
pub mod validation;

pub use document::{decode_document, encode_document, PermissionDocument};
pub use error::{CoreError, ValidationError};
pub use types::{Group, PermissionDefinition, PublicGroup, ResolvedPermissions};
pub use validation::{is_legal_name, is_legal_token, validate_name, validate_token};
