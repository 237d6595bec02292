mod auth_port;
mod media_picker_port;
mod session_storage_port;
mod session_watch;

pub use auth_port::AuthPort;
#[cfg(test)]
pub use media_picker_port::MockMediaPickerPort;
pub use media_picker_port::{MediaPickerPort, PickedImage};
pub use session_storage_port::SessionStoragePort;
pub use session_watch::{AuthSubscription, SessionWatch};
