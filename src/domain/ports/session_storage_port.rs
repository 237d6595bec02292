//! Session storage port definition.

use async_trait::async_trait;

use crate::domain::entities::SessionToken;
use crate::domain::errors::StorageError;

/// Port for refresh token persistence.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves stored refresh token.
    async fn get_refresh_token(&self) -> Result<Option<SessionToken>, StorageError>;

    /// Stores refresh token securely.
    async fn store_refresh_token(&self, token: &SessionToken) -> Result<(), StorageError>;

    /// Deletes stored refresh token.
    async fn delete_refresh_token(&self) -> Result<(), StorageError>;

    /// Checks if a refresh token exists.
    async fn has_token(&self) -> Result<bool, StorageError> {
        Ok(self.get_refresh_token().await?.is_some())
    }
}
