//! Product catalog error types.

use thiserror::Error;

use super::ValidationError;
use crate::domain::alert::Alert;
use crate::domain::entities::ProductId;

/// Product catalog error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("product {0} not found")]
    NotFound(ProductId),
}

impl CatalogError {
    /// Returns the message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::NotFound(_) => "El producto ya no existe.".to_string(),
        }
    }

    /// Returns the error alert for this failure.
    #[must_use]
    pub fn alert(&self) -> Alert {
        Alert::error("Error", self.user_message())
    }
}
