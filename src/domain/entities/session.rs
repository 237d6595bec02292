//! Signed-in user and session state.

use chrono::{DateTime, Utc};

use super::SessionToken;

/// Profile of the signed-in user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Provider user id.
    pub uid: String,
    /// Account email.
    pub email: String,
    /// Optional display name set after registration.
    pub display_name: Option<String>,
    /// Optional avatar picture.
    pub photo_url: Option<String>,
}

impl UserProfile {
    const DEFAULT_NAME: &'static str = "Usuario";

    #[must_use]
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns display name, or `Usuario` when unset or blank.
    #[must_use]
    pub fn display_name_or_default(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::DEFAULT_NAME)
    }
}

/// Tokens issued for a signed-in user.
#[derive(Debug, Clone)]
pub struct Session {
    /// Signed-in user.
    pub user: UserProfile,
    /// Short-lived token sent with provider requests.
    pub id_token: SessionToken,
    /// Long-lived token used to restore the session.
    pub refresh_token: SessionToken,
    /// Expiry of `id_token`.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns whether the id token has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
