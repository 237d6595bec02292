//! Domain error types.

mod auth_error;
mod catalog_error;
mod media_error;
mod modal_error;
mod storage_error;
mod validation_error;

pub use auth_error::{AuthError, AuthFlow, ProviderCode};
pub use catalog_error::CatalogError;
pub use media_error::MediaError;
pub use modal_error::ModalError;
pub use storage_error::StorageError;
pub use validation_error::{FormField, ValidationError};
