//! UI screens.

mod app;
mod home_screen;
mod login_screen;
mod product_form;
mod products_screen;
mod profile_screen;
mod signup_screen;

pub use app::App;
pub use home_screen::{HomeAction, HomeFollowUp, HomeScreen, SECTIONS, Section};
pub use login_screen::{LoginAction, LoginFollowUp, LoginScreen};
pub use product_form::{ProductFormAction, ProductFormFollowUp, ProductFormMode, ProductFormScreen};
pub use products_screen::{ProductsAction, ProductsFollowUp, ProductsScreen, ProductsView};
pub use profile_screen::{ProfileAction, ProfileScreen};
pub use signup_screen::{SignUpAction, SignUpFollowUp, SignUpScreen};
