//! Sign-in use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{SessionSource, SignInRequest, SignInResponse};
use crate::domain::entities::{Email, Password};
use crate::domain::errors::{AuthError, FormField, ValidationError};
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Handles the login workflow.
#[derive(Clone)]
pub struct SignInUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl SignInUseCase {
    /// Creates new sign-in use case.
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

    /// Checks that both login fields are present.
    ///
    /// Email format is left to the provider.
    ///
    /// # Errors
    /// Returns `Required` for the first empty field.
    pub fn validate(request: &SignInRequest) -> Result<(Email, Password), ValidationError> {
        let email = request.email.trim();
        if email.is_empty() {
            return Err(ValidationError::required(FormField::Email));
        }
        let password = Password::parse(&request.password)?;
        Ok((Email::new_unchecked(email), password))
    }

    /// Executes sign-in with provided request.
    ///
    /// # Errors
    /// Returns `Validation` if a field is empty, otherwise the provider error.
    pub async fn execute(&self, request: SignInRequest) -> Result<SignInResponse, AuthError> {
        let (email, password) = Self::validate(&request)?;

        debug!(%email, "Attempting sign-in");

        let session = self.auth_port.sign_in(&email, &password).await.map_err(|e| {
            warn!(error = %e, "Sign-in rejected");
            e
        })?;

        info!(uid = %session.user.uid, "Successfully signed in");

        let session_persisted = if request.remember {
            match self
                .storage_port
                .store_refresh_token(&session.refresh_token)
                .await
            {
                Ok(()) => {
                    info!("Refresh token persisted to secure storage");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist refresh token");
                    false
                }
            }
        } else {
            debug!("Session persistence disabled, skipping storage");
            false
        };

        Ok(SignInResponse::new(
            session.user,
            SessionSource::Credentials,
            session_persisted,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AuthFlow;
    use crate::domain::ports::mocks::{MockAuthPort, MockSessionStorage};

    #[tokio::test]
    async fn test_successful_sign_in() {
        let auth_port = Arc::new(MockAuthPort::new().with_display_name("Ana"));
        let storage_port = Arc::new(MockSessionStorage::new());

        let use_case = SignInUseCase::new(auth_port.clone(), storage_port.clone());
        let response = use_case
            .execute(SignInRequest::new(" ana@pchela.com ", "Secreta1"))
            .await
            .unwrap();

        assert_eq!(response.user.display_name_or_default(), "Ana");
        assert_eq!(response.source, SessionSource::Credentials);
        assert!(response.session_persisted);
        assert!(storage_port.has_token().await.unwrap());
        assert!(auth_port.current_user().is_some());
    }

    #[tokio::test]
    async fn test_missing_field_skips_provider() {
        let auth_port = Arc::new(MockAuthPort::new());
        let use_case = SignInUseCase::new(auth_port.clone(), Arc::new(MockSessionStorage::new()));

        let err = use_case
            .execute(SignInRequest::new("ana@pchela.com", ""))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(
            err.user_message(AuthFlow::SignIn),
            "Por favor ingrese ambos campos."
        );
        assert!(auth_port.calls().is_empty());
    }

    #[test]
    fn test_validate_checks_presence_only() {
        let err = SignInUseCase::validate(&SignInRequest::new("  ", "Secreta1")).unwrap_err();
        assert_eq!(err, ValidationError::required(FormField::Email));

        let (email, _) = SignInUseCase::validate(&SignInRequest::new("no-es-correo", "x")).unwrap();
        assert_eq!(email.as_str(), "no-es-correo");
    }

    #[tokio::test]
    async fn test_unmapped_provider_error_has_fallback_message() {
        let auth_port = Arc::new(MockAuthPort::new().fail_sign_in("auth/too-many-requests"));
        let use_case = SignInUseCase::new(auth_port, Arc::new(MockSessionStorage::new()));

        let err = use_case
            .execute(SignInRequest::new("ana@pchela.com", "Secreta1"))
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message(AuthFlow::SignIn),
            "Hubo un problema al iniciar sesión."
        );
    }

    #[tokio::test]
    async fn test_wrong_password_message() {
        let auth_port = Arc::new(MockAuthPort::new().fail_sign_in("auth/wrong-password"));
        let use_case = SignInUseCase::new(auth_port, Arc::new(MockSessionStorage::new()));

        let err = use_case
            .execute(SignInRequest::new("ana@pchela.com", "mala"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(AuthFlow::SignIn), "La contraseña es incorrecta.");
    }

    #[tokio::test]
    async fn test_sign_in_without_persistence() {
        let storage_port = Arc::new(MockSessionStorage::new());
        let use_case = SignInUseCase::new(Arc::new(MockAuthPort::new()), storage_port.clone());

        let response = use_case
            .execute(SignInRequest::new("ana@pchela.com", "Secreta1").without_persistence())
            .await
            .unwrap();

        assert!(!response.session_persisted);
        assert!(!storage_port.has_token().await.unwrap());
    }
}
