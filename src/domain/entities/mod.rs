//! Domain entity definitions.

mod credentials;
mod product;
mod seed;
mod session;
mod token;

pub use credentials::{Email, Password, filter_name, is_name_char};
pub use product::{ImageRef, Price, Product, ProductDraft, ProductFields, ProductId};
pub use seed::demo_products;
pub use session::{Session, UserProfile};
pub use token::SessionToken;
