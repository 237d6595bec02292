//! Command-driven local image picker.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::errors::MediaError;
use crate::domain::ports::{MediaPickerPort, PickedImage};

/// Runs an external file chooser and reads the chosen path from stdout.
///
/// Empty output or exit status 1 means the user cancelled.
pub struct CommandMediaPicker {
    command: Vec<String>,
}

impl CommandMediaPicker {
    /// Creates picker from a program and its arguments.
    #[must_use]
    pub const fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn run(command: &[String]) -> Result<Option<PathBuf>, MediaError> {
        let (program, args) = command.split_first().ok_or(MediaError::NotConfigured)?;

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| MediaError::LaunchFailed {
                command: program.clone(),
                message: e.to_string(),
            })?;

        interpret_output(output.status.code(), output.status.success(), &output.stdout)
    }
}

/// Turns picker exit status and stdout into a chosen path.
fn interpret_output(
    code: Option<i32>,
    success: bool,
    stdout: &[u8],
) -> Result<Option<PathBuf>, MediaError> {
    if !success {
        return if code == Some(1) {
            Ok(None)
        } else {
            Err(MediaError::PickerFailed { code })
        };
    }

    let text = String::from_utf8_lossy(stdout);
    let path = text.lines().next().map(str::trim).unwrap_or_default();
    if path.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(path)))
}

#[async_trait]
impl MediaPickerPort for CommandMediaPicker {
    async fn pick_image(&self) -> Result<Option<PickedImage>, MediaError> {
        let command = self.command.clone();
        debug!(?command, "Launching image picker");

        let chosen = tokio::task::spawn_blocking(move || Self::run(&command))
            .await
            .map_err(|e| MediaError::LaunchFailed {
                command: self.command.join(" "),
                message: format!("picker task panicked: {e}"),
            })??;

        let Some(path) = chosen else {
            debug!("Image picker cancelled");
            return Ok(None);
        };

        let probe = path.clone();
        let (width, height) = tokio::task::spawn_blocking(move || image::image_dimensions(&probe))
            .await
            .map_err(|e| MediaError::UnsupportedImage {
                path: path.clone(),
                message: format!("decode task panicked: {e}"),
            })?
            .map_err(|e| {
                warn!(path = %path.display(), error = %e, "Chosen file is not a supported image");
                MediaError::UnsupportedImage {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })?;

        info!(path = %path.display(), width, height, "Image picked");
        Ok(Some(PickedImage {
            path,
            width,
            height,
        }))
    }
}
