//! Local media picker port definition.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::MediaError;

/// Image chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    /// Local file path.
    pub path: PathBuf,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

/// Port for choosing a local picture.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaPickerPort: Send + Sync {
    /// Lets the user pick an image.
    ///
    /// Returns `None` when the user cancels.
    async fn pick_image(&self) -> Result<Option<PickedImage>, MediaError>;
}
