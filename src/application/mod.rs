//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Presenters and the product catalog.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{SessionSource, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse};
pub use services::{
    ActiveModal, AlertPresenter, CatalogChange, ConfirmPresenter, ModalLayer, ProductCatalog,
};
pub use use_cases::{RestoreSessionUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase};
