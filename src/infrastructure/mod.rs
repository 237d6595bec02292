//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Firebase Authentication client.
pub mod firebase;
/// External image picker.
pub mod media_picker;
/// Session storage adapters.
pub mod storage;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use firebase::FirebaseAuthClient;
pub use media_picker::CommandMediaPicker;
pub use storage::KeyringSessionStorage;
