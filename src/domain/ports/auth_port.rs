//! Authentication provider port definition.

use async_trait::async_trait;

use super::AuthSubscription;
use crate::domain::entities::{Email, Password, Session, SessionToken, UserProfile};
use crate::domain::errors::AuthError;

/// Port for the external authentication provider.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Signs in with email and password.
    async fn sign_in(&self, email: &Email, password: &Password) -> Result<Session, AuthError>;

    /// Registers a new account and signs it in.
    async fn sign_up(&self, email: &Email, password: &Password) -> Result<Session, AuthError>;

    /// Sets display name of the signed-in user.
    async fn update_profile(&self, display_name: &str) -> Result<UserProfile, AuthError>;

    /// Exchanges a stored refresh token for a fresh session.
    async fn refresh(&self, refresh_token: &SessionToken) -> Result<Session, AuthError>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Returns the signed-in user, if any.
    fn current_user(&self) -> Option<UserProfile>;

    /// Subscribes to session changes.
    fn subscribe(&self) -> AuthSubscription;
}
