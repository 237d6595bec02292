//! Media picker error types.

use std::path::PathBuf;

use thiserror::Error;

/// Media picker error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum MediaError {
    #[error("image picker command is not configured")]
    NotConfigured,

    #[error("failed to launch image picker `{command}`: {message}")]
    LaunchFailed { command: String, message: String },

    #[error("image picker exited with status {code:?}")]
    PickerFailed { code: Option<i32> },

    #[error("unsupported image {}: {message}", path.display())]
    UnsupportedImage { path: PathBuf, message: String },
}

impl MediaError {
    /// Returns the message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedImage { .. } => {
                "El archivo seleccionado no es una imagen válida (PNG, JPEG o WebP).".to_string()
            }
            _ => "No se pudo abrir el selector de imágenes.".to_string(),
        }
    }
}
