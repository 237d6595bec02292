//! Domain layer with core business entities and port definitions.

/// Alert and confirmation payloads.
pub mod alert;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Password composition rules.
pub mod password_policy;
/// Port definitions.
pub mod ports;

pub use alert::{Alert, AlertKind, ConfirmPrompt};
pub use entities::{
    Email, ImageRef, Password, Price, Product, ProductDraft, ProductId, Session, UserProfile,
};
pub use errors::{AuthError, CatalogError, ValidationError};
pub use password_policy::{PasswordPolicy, PasswordRule};
pub use ports::{AuthPort, AuthSubscription, MediaPickerPort, SessionStoragePort, SessionWatch};
