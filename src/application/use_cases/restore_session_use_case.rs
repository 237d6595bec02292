//! Remembered session restoration.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{SessionSource, SignInResponse};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Restores a session from the refresh token in the keyring.
pub struct RestoreSessionUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl RestoreSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Attempts restoration.
    ///
    /// Returns `None` when no token is stored or the keyring is unreachable.
    /// A token the provider rejects is deleted.
    ///
    /// # Errors
    /// Returns network errors so the caller can tell an offline start from
    /// an expired session.
    pub async fn execute(&self) -> Result<Option<SignInResponse>, AuthError> {
        debug!("Checking keyring for stored refresh token");
        let token = match self.storage_port.get_refresh_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No refresh token found in keyring");
                return Ok(None);
            }
            Err(e) => {
                debug!(error = %e, "Failed to check keyring");
                return Ok(None);
            }
        };

        match self.auth_port.refresh(&token).await {
            Ok(session) => {
                info!(uid = %session.user.uid, "Session restored from keyring");
                if session.refresh_token != token
                    && let Err(e) = self
                        .storage_port
                        .store_refresh_token(&session.refresh_token)
                        .await
                {
                    warn!(error = %e, "Failed to persist rotated refresh token");
                }
                Ok(Some(SignInResponse::new(
                    session.user,
                    SessionSource::Keyring,
                    true,
                )))
            }
            Err(e) if e.is_network_error() => Err(e),
            Err(e) => {
                warn!(error = %e, "Stored refresh token rejected, discarding it");
                if let Err(e) = self.storage_port.delete_refresh_token().await {
                    warn!(error = %e, "Failed to delete rejected refresh token");
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SessionToken;
    use crate::domain::ports::mocks::{MockAuthPort, MockSessionStorage};

    #[tokio::test]
    async fn test_restores_from_keyring() {
        let auth = Arc::new(MockAuthPort::new());
        let storage = Arc::new(MockSessionStorage::with_token(SessionToken::new_unchecked(
            "old-refresh",
        )));

        let response = RestoreSessionUseCase::new(auth.clone(), storage.clone())
            .execute()
            .await
            .unwrap()
            .unwrap();

        assert_eq!(response.source, SessionSource::Keyring);
        assert!(auth.current_user().is_some());
        assert_eq!(
            storage.get_refresh_token().await.unwrap().unwrap().as_str(),
            "mock-refresh-token"
        );
    }

    #[tokio::test]
    async fn test_no_token_found() {
        let auth = Arc::new(MockAuthPort::new());
        let result = RestoreSessionUseCase::new(auth.clone(), Arc::new(MockSessionStorage::new()))
            .execute()
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_token_is_deleted() {
        let auth = Arc::new(MockAuthPort::new().fail_sign_in("auth/user-disabled"));
        let storage = Arc::new(MockSessionStorage::with_token(SessionToken::new_unchecked(
            "revoked",
        )));

        let result = RestoreSessionUseCase::new(auth, storage.clone())
            .execute()
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(!storage.has_token().await.unwrap());
    }
}
