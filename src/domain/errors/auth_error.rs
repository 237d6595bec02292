//! Authentication error types.

use std::fmt;

use thiserror::Error;

use super::{FormField, StorageError, ValidationError};

/// Error code reported by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCode {
    /// `auth/invalid-email`
    InvalidEmail,
    /// `auth/wrong-password`
    WrongPassword,
    /// `auth/user-not-found`
    UserNotFound,
    /// `auth/network-request-failed`
    NetworkRequestFailed,
    /// `auth/email-already-in-use`
    EmailAlreadyInUse,
    /// `auth/weak-password`
    WeakPassword,
    /// Any code without a dedicated message.
    Other(String),
}

impl ProviderCode {
    /// Parses a provider code such as `auth/wrong-password`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/user-not-found" => Self::UserNotFound,
            "auth/network-request-failed" => Self::NetworkRequestFailed,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the provider code string.
    #[must_use]
    pub fn as_code(&self) -> &str {
        match self {
            Self::InvalidEmail => "auth/invalid-email",
            Self::WrongPassword => "auth/wrong-password",
            Self::UserNotFound => "auth/user-not-found",
            Self::NetworkRequestFailed => "auth/network-request-failed",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::WeakPassword => "auth/weak-password",
            Self::Other(code) => code,
        }
    }

    /// Returns the dedicated user-facing message, if this code has one.
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::InvalidEmail => Some("El formato del correo electrónico no es válido."),
            Self::WrongPassword => Some("La contraseña es incorrecta."),
            Self::UserNotFound => Some("No se encontró un usuario con este correo."),
            Self::NetworkRequestFailed => Some("Error de conexión, por favor intenta más tarde."),
            Self::EmailAlreadyInUse => Some("El correo electrónico ya está registrado."),
            Self::WeakPassword => Some("Mínimo de 6 caracteres en contraseña."),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for ProviderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Authentication flow an error surfaced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    /// Login screen.
    SignIn,
    /// Registration screen.
    SignUp,
    /// Logout from home or profile.
    SignOut,
}

impl AuthFlow {
    /// Generic message for errors without a dedicated mapping.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::SignIn => "Hubo un problema al iniciar sesión.",
            Self::SignUp => "Hubo un problema al registrar el usuario, intente nuevamente.",
            Self::SignOut => "Hubo un problema al cerrar sesión.",
        }
    }
}

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("provider rejected the request ({code}): {message}")]
    Provider { code: ProviderCode, message: String },

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("no signed-in session")]
    NoSession,

    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates provider error.
    #[must_use]
    pub fn provider(code: ProviderCode, message: impl Into<String>) -> Self {
        Self::Provider {
            code,
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the provider code this error maps to.
    #[must_use]
    pub fn code(&self) -> Option<ProviderCode> {
        match self {
            Self::Provider { code, .. } => Some(code.clone()),
            Self::NetworkError { .. } => Some(ProviderCode::NetworkRequestFailed),
            _ => None,
        }
    }

    /// Returns whether error was raised before contacting the provider.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }

    /// Returns the message shown to the user for the given flow.
    ///
    /// Never empty: unmapped codes fall back to the flow's generic message.
    #[must_use]
    pub fn user_message(&self, flow: AuthFlow) -> String {
        match self {
            Self::Validation(ValidationError::Required { field })
                if flow == AuthFlow::SignIn
                    && matches!(field, FormField::Email | FormField::Password) =>
            {
                "Por favor ingrese ambos campos.".to_string()
            }
            Self::Validation(err) => err.user_message(),
            _ => self
                .code()
                .and_then(|code| code.user_message())
                .unwrap_or_else(|| flow.fallback_message())
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("auth/invalid-email", "El formato del correo electrónico no es válido." ; "invalid_email")]
    #[test_case("auth/wrong-password", "La contraseña es incorrecta." ; "wrong_password")]
    #[test_case("auth/user-not-found", "No se encontró un usuario con este correo." ; "user_not_found")]
    #[test_case("auth/network-request-failed", "Error de conexión, por favor intenta más tarde." ; "network")]
    #[test_case("auth/email-already-in-use", "El correo electrónico ya está registrado." ; "email_in_use")]
    #[test_case("auth/weak-password", "Mínimo de 6 caracteres en contraseña." ; "weak_password")]
    fn test_mapped_codes(code: &str, expected: &str) {
        let err = AuthError::provider(ProviderCode::from_code(code), "rejected");
        assert_eq!(err.user_message(AuthFlow::SignIn), expected);
        assert_eq!(err.user_message(AuthFlow::SignUp), expected);
    }

    #[test]
    fn test_unmapped_code_uses_flow_fallback() {
        let code = ProviderCode::from_code("auth/too-many-requests");
        let err = AuthError::provider(code, "slow down");

        assert_eq!(
            err.user_message(AuthFlow::SignIn),
            "Hubo un problema al iniciar sesión."
        );
        assert_eq!(
            err.user_message(AuthFlow::SignUp),
            "Hubo un problema al registrar el usuario, intente nuevamente."
        );
        assert!(!err.user_message(AuthFlow::SignOut).is_empty());
    }

    #[test]
    fn test_code_round_trip_for_unknown() {
        let code = ProviderCode::from_code("auth/user-disabled");
        assert_eq!(code, ProviderCode::Other("auth/user-disabled".to_string()));
        assert_eq!(code.as_code(), "auth/user-disabled");
    }

    #[test]
    fn test_network_error_maps_to_network_message() {
        let err = AuthError::network("timed out");
        assert!(err.is_network_error());
        assert_eq!(
            err.user_message(AuthFlow::SignUp),
            "Error de conexión, por favor intenta más tarde."
        );
    }

    #[test]
    fn test_login_required_fields_message() {
        let err = AuthError::from(ValidationError::required(FormField::Password));
        assert!(err.is_validation());
        assert_eq!(
            err.user_message(AuthFlow::SignIn),
            "Por favor ingrese ambos campos."
        );
        assert_eq!(
            err.user_message(AuthFlow::SignUp),
            "Todos los campos son obligatorios."
        );
    }

    #[test]
    fn test_storage_error_uses_fallback() {
        let err = AuthError::from(StorageError::AccessFailed("locked".to_string()));
        assert_eq!(
            err.user_message(AuthFlow::SignOut),
            "Hubo un problema al cerrar sesión."
        );
    }
}
