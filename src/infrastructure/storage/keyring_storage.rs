//! Keyring-based session storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::SessionToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "pchela";
const KEYRING_USER: &str = "refresh-token";

/// System keyring refresh token storage adapter.
pub struct KeyringSessionStorage {
    service: String,
    user: String,
}

impl KeyringSessionStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
            user: KEYRING_USER.to_string(),
        }
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, StorageError> {
        Entry::new(&self.service, &self.user)
            .map_err(|e| StorageError::AccessFailed(format!("failed to access keyring: {e}")))
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn get_refresh_token(&self) -> Result<Option<SessionToken>, StorageError> {
        debug!(service = %self.service, "Retrieving refresh token from keyring");

        let entry = self.entry()?;

        match entry.get_password() {
            Ok(secret) => {
                debug!("Refresh token found in keyring");
                Ok(SessionToken::new(secret))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No refresh token stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve refresh token from keyring");
                Err(StorageError::RetrievalFailed(e.to_string()))
            }
        }
    }

    async fn store_refresh_token(&self, token: &SessionToken) -> Result<(), StorageError> {
        debug!(service = %self.service, token = %token, "Storing refresh token in keyring");

        let entry = self.entry()?;

        entry.set_password(token.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to store refresh token in keyring");
            StorageError::StorageFailed(e.to_string())
        })?;

        debug!("Refresh token stored successfully");
        Ok(())
    }

    async fn delete_refresh_token(&self) -> Result<(), StorageError> {
        debug!(service = %self.service, "Deleting refresh token from keyring");

        let entry = self.entry()?;

        match entry.delete_credential() {
            Ok(()) => {
                debug!("Refresh token deleted from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No refresh token to delete");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete refresh token from keyring");
                Err(StorageError::DeletionFailed(e.to_string()))
            }
        }
    }
}
