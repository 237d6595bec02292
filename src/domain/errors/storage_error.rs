//! Session storage error types.

use thiserror::Error;

/// Secure session storage error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("failed to access secure storage: {0}")]
    AccessFailed(String),

    #[error("failed to retrieve stored session: {0}")]
    RetrievalFailed(String),

    #[error("failed to store session: {0}")]
    StorageFailed(String),

    #[error("failed to delete stored session: {0}")]
    DeletionFailed(String),
}
