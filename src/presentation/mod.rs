//! Presentation layer with UI components and event handling.

/// Event handling.
pub mod events;
/// Route stack and auth-gated navigation.
pub mod navigation;
/// Colors and styles.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use navigation::{AuthState, NavigationError, Route, Router};
pub use ui::App;
