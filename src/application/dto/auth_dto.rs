//! Authentication DTOs.

use crate::domain::entities::UserProfile;

/// Origin of an established session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Email and password typed on the login screen.
    Credentials,
    /// Refresh token from the system keyring.
    Keyring,
}

impl SessionSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Credentials => "login form",
            Self::Keyring => "system keyring",
        }
    }
}

impl std::fmt::Display for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Login form data.
#[derive(Clone)]
pub struct SignInRequest {
    /// Email as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
    /// Whether to persist the refresh token.
    pub remember: bool,
}

impl SignInRequest {
    /// Creates new sign-in request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember: true,
        }
    }

    /// Disables session persistence.
    #[must_use]
    pub const fn without_persistence(mut self) -> Self {
        self.remember = false;
        self
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("remember", &self.remember)
            .finish_non_exhaustive()
    }
}

/// Established session summary.
#[derive(Debug, Clone)]
pub struct SignInResponse {
    /// Signed-in user.
    pub user: UserProfile,
    /// Where the session came from.
    pub source: SessionSource,
    /// Whether the refresh token was persisted.
    pub session_persisted: bool,
}

impl SignInResponse {
    /// Creates new sign-in response.
    #[must_use]
    pub const fn new(user: UserProfile, source: SessionSource, session_persisted: bool) -> Self {
        Self {
            user,
            source,
            session_persisted,
        }
    }
}

/// Registration form data.
#[derive(Clone, Default)]
#[allow(missing_docs)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Registered account summary. The account is left signed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResponse {
    /// Registered email.
    pub email: String,
    /// Display name set on the account.
    pub display_name: String,
}
