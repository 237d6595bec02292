//! Demo catalog shown on first start.

use super::{ImageRef, Price, Product};

/// Returns the demo products, ids 1 through 5.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    [
        ("Tijera", 15_000, 20, "tijerita.jpg"),
        ("Lima", 9_000, 50, "limas.jpg"),
        ("Tijera Sm", 6_000, 10, "pinzaexpert.jpg"),
        ("Bob Cut", 11_000, 15, "muchas.jpg"),
        ("Pinzas", 5_000, 30, "pinzas.jpg"),
    ]
    .into_iter()
    .zip(1_u64..)
    .map(|((name, price, quantity, image), id)| {
        Product::new(
            id,
            name,
            Price::from_whole(price),
            quantity,
            ImageRef::Bundled(image.to_string()),
        )
    })
    .collect()
}
