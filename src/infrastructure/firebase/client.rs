//! Firebase Authentication REST client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::dto::{
    ErrorEnvelope, LookupRequest, LookupResponse, PasswordRequest, PasswordResponse,
    RefreshRequest, RefreshResponse, UpdateProfileRequest, UpdateProfileResponse,
    expires_in_secs, provider_code,
};
use crate::domain::entities::{Email, Password, Session, SessionToken, UserProfile};
use crate::domain::errors::{AuthError, ProviderCode};
use crate::domain::ports::{AuthPort, AuthSubscription, SessionWatch};
use crate::infrastructure::config::FirebaseConfig;

const USER_AGENT: &str = concat!("pchela/", env!("CARGO_PKG_VERSION"));

/// Firebase Authentication client over the Identity Toolkit REST API.
pub struct FirebaseAuthClient {
    client: Client,
    api_key: Option<String>,
    auth_base_url: String,
    token_base_url: String,
    session: RwLock<Option<Session>>,
    watch: SessionWatch,
}

impl FirebaseAuthClient {
    /// Creates client from configuration.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(config: &FirebaseConfig, watch: SessionWatch) -> Result<Self, AuthError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let api_key = config.api_key.clone().filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("Firebase API key is not configured, authentication will fail");
        }

        Ok(Self {
            client,
            api_key,
            auth_base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            token_base_url: config.token_base_url.trim_end_matches('/').to_string(),
            session: RwLock::new(None),
            watch,
        })
    }

    fn api_key(&self) -> Result<&str, AuthError> {
        self.api_key.as_deref().ok_or_else(|| {
            AuthError::provider(
                ProviderCode::from_code("auth/invalid-api-key"),
                "Firebase API key is not configured",
            )
        })
    }

    async fn post<B, R>(&self, url: String, body: &B) -> Result<R, AuthError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let key = self.api_key()?;
        let response = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Firebase");
                if e.is_timeout() {
                    AuthError::network("request timed out")
                } else if e.is_connect() {
                    AuthError::network("failed to connect to Firebase")
                } else {
                    AuthError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response.json::<R>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse Firebase response");
            AuthError::unexpected(format!("failed to parse response: {e}"))
        })
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> AuthError {
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => {
                let code = provider_code(&envelope.error.message);
                debug!(%status, %code, "Firebase rejected request");
                AuthError::provider(code, envelope.error.message)
            }
            Err(_) if status.is_server_error() => {
                AuthError::network(format!("Firebase is temporarily unavailable ({status})"))
            }
            Err(_) => AuthError::unexpected(format!("unexpected response: {status}")),
        }
    }

    async fn password_call(
        &self,
        endpoint: &str,
        email: &Email,
        password: &Password,
    ) -> Result<Session, AuthError> {
        let url = format!("{}/accounts:{endpoint}", self.auth_base_url);
        let response: PasswordResponse = self
            .post(
                url,
                &PasswordRequest {
                    email: email.as_str(),
                    password: password.as_str(),
                    return_secure_token: true,
                },
            )
            .await?;

        let user = UserProfile {
            uid: response.local_id,
            email: response.email,
            display_name: response.display_name.filter(|name| !name.is_empty()),
            photo_url: None,
        };
        let session = Session {
            user,
            id_token: SessionToken::new_unchecked(response.id_token),
            refresh_token: SessionToken::new_unchecked(response.refresh_token),
            expires_at: Utc::now()
                + chrono::Duration::seconds(expires_in_secs(&response.expires_in)),
        };
        self.commit(session.clone()).await;
        Ok(session)
    }

    async fn commit(&self, session: Session) {
        let user = session.user.clone();
        *self.session.write().await = Some(session);
        self.watch.publish(Some(user));
    }

    async fn lookup(&self, id_token: &SessionToken) -> Result<UserProfile, AuthError> {
        let url = format!("{}/accounts:lookup", self.auth_base_url);
        let response: LookupResponse = self
            .post(
                url,
                &LookupRequest {
                    id_token: id_token.as_str(),
                },
            )
            .await?;

        let user = response
            .users
            .into_iter()
            .next()
            .ok_or(AuthError::NoSession)?;
        Ok(UserProfile {
            uid: user.local_id,
            email: user.email,
            display_name: user.display_name.filter(|name| !name.is_empty()),
            photo_url: user.photo_url,
        })
    }
}

#[async_trait]
impl AuthPort for FirebaseAuthClient {
    async fn sign_in(&self, email: &Email, password: &Password) -> Result<Session, AuthError> {
        debug!(%email, "Signing in with password");
        let session = self.password_call("signInWithPassword", email, password).await?;
        info!(uid = %session.user.uid, "Firebase sign-in succeeded");
        Ok(session)
    }

    async fn sign_up(&self, email: &Email, password: &Password) -> Result<Session, AuthError> {
        debug!(%email, "Creating account");
        let session = self.password_call("signUp", email, password).await?;
        info!(uid = %session.user.uid, "Firebase account created");
        Ok(session)
    }

    async fn update_profile(&self, display_name: &str) -> Result<UserProfile, AuthError> {
        let id_token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|session| session.id_token.clone())
            .ok_or(AuthError::NoSession)?;

        let url = format!("{}/accounts:update", self.auth_base_url);
        let response: UpdateProfileResponse = self
            .post(
                url,
                &UpdateProfileRequest {
                    id_token: id_token.as_str(),
                    display_name,
                    return_secure_token: false,
                },
            )
            .await?;

        let user = UserProfile {
            uid: response.local_id,
            email: response.email,
            display_name: response.display_name,
            photo_url: response.photo_url,
        };

        if let Some(session) = self.session.write().await.as_mut() {
            session.user = user.clone();
        }
        self.watch.publish(Some(user.clone()));
        debug!(uid = %user.uid, "Profile updated");
        Ok(user)
    }

    async fn refresh(&self, refresh_token: &SessionToken) -> Result<Session, AuthError> {
        debug!(token = %refresh_token, "Refreshing session");
        let url = format!("{}/token", self.token_base_url);
        let response: RefreshResponse = self
            .post(
                url,
                &RefreshRequest {
                    grant_type: "refresh_token",
                    refresh_token: refresh_token.as_str(),
                },
            )
            .await?;

        let id_token = SessionToken::new_unchecked(response.id_token);
        let user = self.lookup(&id_token).await?;
        if user.uid != response.user_id {
            return Err(AuthError::unexpected("refreshed token belongs to another user"));
        }

        let session = Session {
            user,
            id_token,
            refresh_token: SessionToken::new_unchecked(response.refresh_token),
            expires_at: Utc::now()
                + chrono::Duration::seconds(expires_in_secs(&response.expires_in)),
        };
        self.commit(session.clone()).await;
        info!(uid = %session.user.uid, "Session refreshed");
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let previous = self.session.write().await.take();
        self.watch.publish(None);
        if let Some(session) = previous {
            info!(uid = %session.user.uid, "Signed out");
        }
        Ok(())
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.watch.current()
    }

    fn subscribe(&self) -> AuthSubscription {
        self.watch.subscribe()
    }
}
