//! Sign-out use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Ends the session and forgets the remembered refresh token.
#[derive(Clone)]
pub struct SignOutUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl SignOutUseCase {
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

    /// Executes sign-out.
    ///
    /// A keyring failure is logged; the provider sign-out result decides
    /// the outcome.
    ///
    /// # Errors
    /// Returns the provider error if sign-out is rejected.
    pub async fn execute(&self) -> Result<(), AuthError> {
        debug!("Deleting refresh token from secure storage");
        if let Err(e) = self.storage_port.delete_refresh_token().await {
            warn!(error = %e, "Failed to delete refresh token");
        }

        self.auth_port.sign_out().await?;
        info!("Signed out");
        Ok(())
    }
}
