mod input;
mod modal;
mod password_rules;
mod status_bar;

pub use input::TextInput;
pub use modal::{ModalKeyOutcome, ModalView, handle_modal_key};
pub use password_rules::PasswordChecklist;
pub use status_bar::StatusBar;
