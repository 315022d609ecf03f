//! # permgroup testkit
//!
//! Testing utilities for permgroup.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden documents**: permission documents in the on-disk layout with the
//!   facts any reader must agree on
//! - **Generators**: Proptest strategies for names, tokens, ids and groups
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Documents
//!
//! ```rust
//! use permgroup_testkit::vectors::all_documents;
//!
//! for vector in all_documents() {
//!     let doc = permgroup::core::decode_document(vector.json.as_bytes()).unwrap();
//!     assert_eq!(doc.groups.len(), vector.groups.len());
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use permgroup_testkit::generators::group_name;
//!
//! proptest! {
//!     #[test]
//!     fn created_group_exists(name in group_name()) {
//!         let mut fixture = permgroup_testkit::TestFixture::new();
//!         prop_assert!(fixture.store.create_group(&name).unwrap());
//!         prop_assert!(fixture.store.group_exists(&name));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use permgroup_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::new();
//! fixture.seed_group("vip", &["flyperm1"], &["user-42"]);
//! assert!(fixture.store.has_permission("user-42", "flyperm1"));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{FileFixture, TestFixture};
pub use generators::{
    group_name, invalid_group_name, invalid_token, overlapping_groups, permission_token,
    principal_id, GroupSpec,
};
pub use vectors::{all_documents, GoldenDocument};
