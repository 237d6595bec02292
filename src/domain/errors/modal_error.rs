//! Modal presenter errors.

use thiserror::Error;

/// Raised when a modal request would make two modals visible at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ModalError {
    #[error("a confirmation is already pending")]
    ConfirmPending,

    #[error("an alert is currently visible")]
    AlertVisible,
}
