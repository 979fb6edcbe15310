//! Error types for the upsert workflow.

use basecoat_core::ValidationError;
use basecoat_storage::StorageError;

/// Errors returned by [`submit`](crate::submit).
#[derive(Debug, thiserror::Error)]
pub enum UpsertError {
    /// The submission was rejected before or during reconciliation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The datastore failed; the transaction was rolled back.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Convenience alias used throughout the upsert crate.
pub type Result<T> = std::result::Result<T, UpsertError>;

impl UpsertError {
    /// Returns `true` if the submission named a formula that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }

    /// Returns `true` for errors caused by the submission itself rather than
    /// the datastore.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
