//! Error types for the permission engine.
//!
//! Ordinary policy rejections (illegal names, missing groups, duplicates)
//! are not errors: mutators report them as `Ok(false)`. Only the conditions
//! below surface as `Err`.

use permgroup_core::CoreError;
use permgroup_store::StoreError;
use thiserror::Error;

/// Errors that can occur during permission engine operations.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// Storage error: the document could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The persisted document could not be encoded or decoded.
    ///
    /// Belongs to the storage tier alongside [`PermissionError::Storage`]:
    /// match on [`PermissionError::is_storage`] to catch both.
    #[error("document error: {0}")]
    Document(#[from] CoreError),

    /// A public-group operation was called on a store opened without the feature.
    #[error("public group is not enabled")]
    FeatureDisabled,
}

impl PermissionError {
    /// True for failures of the durable document (I/O or malformed data).
    ///
    /// After such a failure the in-memory state may be ahead of what is
    /// stored; callers that care should `reload()`.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Document(_))
    }
}

/// Result type for permission engine operations.
pub type Result<T> = std::result::Result<T, PermissionError>;
