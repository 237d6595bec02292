use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pchela",
    version,
    about = "Pchelá Universal Beauty: storefront and inventory in your terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Firebase Web API key.
    #[arg(long, env = "PCHELA_FIREBASE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Keep the session in the system keyring.
    #[arg(long)]
    pub remember_session: Option<bool>,

    /// Delay before committing a session change, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub settle_delay_ms: Option<u64>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,
}
