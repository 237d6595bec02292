//! Firebase Authentication REST payloads.

use serde::{Deserialize, Serialize};

use crate::domain::errors::ProviderCode;

/// Body of `accounts:signInWithPassword` and `accounts:signUp`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Response of `accounts:signInWithPassword` and `accounts:signUp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResponse {
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
}

/// Body of `accounts:update`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest<'a> {
    pub id_token: &'a str,
    pub display_name: &'a str,
    pub return_secure_token: bool,
}

/// Response of `accounts:update`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Body of `accounts:lookup`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest<'a> {
    pub id_token: &'a str,
}

/// Response of `accounts:lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupUser {
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Body of the Secure Token `token` endpoint.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub grant_type: &'static str,
    pub refresh_token: &'a str,
}

/// Response of the Secure Token `token` endpoint.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
    pub user_id: String,
}

/// Error envelope shared by both APIs.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    pub message: String,
}

/// Maps a REST error message such as `WEAK_PASSWORD : Password should be at
/// least 6 characters` to a provider code.
#[must_use]
pub fn provider_code(message: &str) -> ProviderCode {
    let reason = message.split(':').next().unwrap_or(message).trim();
    match reason {
        "INVALID_EMAIL" => ProviderCode::InvalidEmail,
        "EMAIL_NOT_FOUND" => ProviderCode::UserNotFound,
        "INVALID_PASSWORD" => ProviderCode::WrongPassword,
        "EMAIL_EXISTS" => ProviderCode::EmailAlreadyInUse,
        "WEAK_PASSWORD" => ProviderCode::WeakPassword,
        other => ProviderCode::Other(format!(
            "auth/{}",
            other.to_ascii_lowercase().replace('_', "-")
        )),
    }
}

/// Parses `expiresIn`, falling back to one hour.
#[must_use]
pub fn expires_in_secs(value: &str) -> i64 {
    value.trim().parse().unwrap_or(3600)
}
