//! Registration use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{SignUpRequest, SignUpResponse};
use crate::domain::PasswordPolicy;
use crate::domain::entities::{Email, Password};
use crate::domain::errors::{AuthError, FormField, ValidationError};
use crate::domain::ports::AuthPort;

/// Registers an account, names it, and leaves it signed out.
#[derive(Clone)]
pub struct SignUpUseCase {
    auth_port: Arc<dyn AuthPort>,
    policy: PasswordPolicy,
}

impl SignUpUseCase {
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>, policy: PasswordPolicy) -> Self {
        Self { auth_port, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Validates the form without contacting the provider.
    ///
    /// # Errors
    /// Returns the first failing check: empty field, malformed email,
    /// mismatched confirmation, then password rules.
    pub fn validate(&self, request: &SignUpRequest) -> Result<(Email, Password), ValidationError> {
        for (value, field) in [
            (request.first_name.trim(), FormField::FirstName),
            (request.last_name.trim(), FormField::LastName),
            (request.email.trim(), FormField::Email),
            (request.password.as_str(), FormField::Password),
            (request.confirmation.as_str(), FormField::PasswordConfirmation),
        ] {
            if value.is_empty() {
                return Err(ValidationError::required(field));
            }
        }

        let email = Email::parse(&request.email)?;
        if request.password != request.confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        self.policy.check(&request.password)?;

        Ok((email, Password::new_unchecked(request.password.as_str())))
    }

    /// Executes sign-up, then update-profile, then sign-out.
    ///
    /// A failure in a later step is reported as is; the account created by
    /// an earlier step is kept.
    ///
    /// # Errors
    /// Returns `Validation` before any provider call, otherwise the first
    /// provider error.
    pub async fn execute(&self, request: SignUpRequest) -> Result<SignUpResponse, AuthError> {
        let (email, password) = self.validate(&request).map_err(|e| {
            debug!(error = %e, "Sign-up form rejected");
            e
        })?;
        let display_name = request.first_name.trim().to_string();

        debug!(%email, "Registering account");

        let session = self
            .auth_port
            .sign_up(&email, &password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Sign-up rejected");
                e
            })?;
        info!(uid = %session.user.uid, "Account created");

        self.auth_port.update_profile(&display_name).await?;
        debug!(%display_name, "Display name set");

        self.auth_port.sign_out().await?;
        info!("Registered account signed out");

        Ok(SignUpResponse {
            email: email.to_string(),
            display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AuthFlow;
    use crate::domain::ports::mocks::MockAuthPort;
    use test_case::test_case;

    fn request() -> SignUpRequest {
        SignUpRequest {
            first_name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            email: "ana@pchela.com".to_string(),
            password: "Secreta1".to_string(),
            confirmation: "Secreta1".to_string(),
        }
    }

    fn use_case(auth: &Arc<MockAuthPort>) -> SignUpUseCase {
        SignUpUseCase::new(auth.clone(), PasswordPolicy::default())
    }

    #[tokio::test]
    async fn test_successful_sign_up_call_order() {
        let auth = Arc::new(MockAuthPort::new());
        let response = use_case(&auth).execute(request()).await.unwrap();

        assert_eq!(response.display_name, "Ana");
        assert_eq!(auth.calls(), vec!["sign_up", "update_profile", "sign_out"]);
        assert!(auth.current_user().is_none());
    }

    #[test_case(|r: &mut SignUpRequest| r.last_name.clear(), "Todos los campos son obligatorios." ; "missing_last_name")]
    #[test_case(|r: &mut SignUpRequest| r.email = "ana@pchela".into(), "Ingrese un correo electrónico válido. Ejemplo: usuario@example.com" ; "bad_email")]
    #[test_case(|r: &mut SignUpRequest| r.confirmation = "Secreta2".into(), "Las contraseñas no coinciden." ; "mismatch")]
    #[tokio::test]
    async fn test_validation_never_calls_provider(edit: fn(&mut SignUpRequest), expected: &str) {
        let auth = Arc::new(MockAuthPort::new());
        let mut req = request();
        edit(&mut req);

        let err = use_case(&auth).execute(req).await.unwrap_err();

        assert_eq!(err.user_message(AuthFlow::SignUp), expected);
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_weak_password_rejected_locally() {
        let auth = Arc::new(MockAuthPort::new());
        let mut req = request();
        req.password = "secreta".to_string();
        req.confirmation = "secreta".to_string();

        let err = use_case(&auth).execute(req).await.unwrap_err();

        assert!(matches!(
            err,
            AuthError::Validation(ValidationError::WeakPassword { .. })
        ));
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_email_in_use_message() {
        let auth = Arc::new(MockAuthPort::new().fail_sign_up("auth/email-already-in-use"));
        let err = use_case(&auth).execute(request()).await.unwrap_err();

        assert_eq!(
            err.user_message(AuthFlow::SignUp),
            "El correo electrónico ya está registrado."
        );
        assert_eq!(auth.calls(), vec!["sign_up"]);
    }

    #[tokio::test]
    async fn test_profile_failure_stops_before_sign_out() {
        let auth = Arc::new(MockAuthPort::new().fail_update_profile("auth/internal-error"));
        let err = use_case(&auth).execute(request()).await.unwrap_err();

        assert_eq!(
            err.user_message(AuthFlow::SignUp),
            "Hubo un problema al registrar el usuario, intente nuevamente."
        );
        assert_eq!(auth.calls(), vec!["sign_up", "update_profile"]);
    }
}
