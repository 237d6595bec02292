//! Application services.

mod alert_presenter;
mod confirm_presenter;
mod modal_layer;
mod product_catalog;

pub use alert_presenter::AlertPresenter;
pub use confirm_presenter::ConfirmPresenter;
pub use modal_layer::{ActiveModal, ModalLayer};
pub use product_catalog::{CatalogChange, ProductCatalog};
