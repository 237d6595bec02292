//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::domain::PasswordPolicy;

pub(crate) const APP_NAME: &str = "pchela";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "universalbeauty";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Authentication provider settings.
    #[serde(default)]
    pub firebase: FirebaseConfig,

    /// Session handling.
    #[serde(default)]
    pub session: SessionConfig,

    /// Password composition rules.
    #[serde(default)]
    pub password: PasswordConfig,

    /// Image picker.
    #[serde(default)]
    pub media: MediaConfig,

    /// Product catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Personal data shown on the profile screen.
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Firebase Authentication REST settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Identity Toolkit base URL.
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,

    /// Secure Token base URL.
    #[serde(default = "default_token_base_url")]
    pub token_base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            auth_base_url: default_auth_base_url(),
            token_base_url: default_token_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Keep the refresh token in the system keyring.
    #[serde(default = "default_true")]
    pub remember: bool,

    /// Delay before committing a session change, in milliseconds.
    #[serde(default)]
    pub settle_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            remember: true,
            settle_delay_ms: 0,
        }
    }
}

/// Password rules applied on registration.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// Minimum number of characters.
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Require an uppercase letter.
    #[serde(default = "default_true")]
    pub require_uppercase: bool,

    /// Require a lowercase letter.
    #[serde(default = "default_true")]
    pub require_lowercase: bool,

    /// Require a digit.
    #[serde(default = "default_true")]
    pub require_digit: bool,

    /// Require a special character.
    #[serde(default)]
    pub require_special: bool,
}

impl PasswordConfig {
    /// Builds the password policy.
    #[must_use]
    pub fn policy(&self) -> PasswordPolicy {
        PasswordPolicy::from_flags(
            self.min_length,
            self.require_uppercase,
            self.require_lowercase,
            self.require_digit,
            self.require_special,
        )
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: false,
        }
    }
}

/// Media picker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Command printing the chosen file path on stdout.
    #[serde(default = "default_picker_command")]
    pub picker_command: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            picker_command: default_picker_command(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Start with the demo products.
    #[serde(default = "default_true")]
    pub seed_demo_products: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_demo_products: true,
        }
    }
}

/// Profile data not held by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,

    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,

    /// Tax id (CUIT/CUIL).
    #[serde(default)]
    pub tax_id: Option<String>,
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

fn default_accent_color() -> String {
    "#D02985".to_string()
}

fn default_auth_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_token_base_url() -> String {
    "https://securetoken.googleapis.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_min_length() -> usize {
    PasswordPolicy::DEFAULT_MIN_LENGTH
}

fn default_picker_command() -> Vec<String> {
    vec!["zenity".to_string(), "--file-selection".to_string()]
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_key) = args.api_key.filter(|key| !key.trim().is_empty()) {
            self.firebase.api_key = Some(api_key);
        }
        if let Some(remember) = args.remember_session {
            self.session.remember = remember;
        }
        if let Some(delay) = args.settle_delay_ms {
            self.session.settle_delay_ms = delay;
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("pchela.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [session]
            settle_delay_ms = 100

            [password]
            require_special = true

            [profile]
            phone = "+54 11 5555-0000"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.session.settle_delay_ms, 100);
        assert!(config.session.remember);
        assert!(config.password.require_special);
        assert_eq!(config.password.min_length, 6);
        assert_eq!(config.profile.phone.as_deref(), Some("+54 11 5555-0000"));
        assert_eq!(config.profile.tax_id, None);
        assert_eq!(config.firebase.timeout_secs, 30);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.theme.accent_color, "#D02985");
        assert_eq!(config.session.settle_delay_ms, 0);
        assert!(config.catalog.seed_demo_products);
        assert_eq!(config.media.picker_command, ["zenity", "--file-selection"]);
        assert_eq!(config.password.policy(), PasswordPolicy::default());
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "pchela",
            "--api-key",
            "AIzaTest",
            "--remember-session",
            "false",
            "--settle-delay-ms",
            "250",
            "--accent-color",
            "magenta",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.firebase.api_key.as_deref(), Some("AIzaTest"));
        assert!(!config.session.remember);
        assert_eq!(config.session.settle_delay_ms, 250);
        assert_eq!(config.theme.accent_color, "magenta");
    }
}
