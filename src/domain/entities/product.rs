//! Product entity and its editable draft.

use std::fmt;
use std::path::PathBuf;

use crate::domain::errors::{FormField, ValidationError};

/// Unique product identifier, assigned by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub u64);

impl ProductId {
    /// Returns raw id value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Non-negative unit price, held in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(u64);

impl Price {
    /// Creates price from a whole amount of pesos.
    #[must_use]
    pub const fn from_whole(pesos: u64) -> Self {
        Self(pesos.saturating_mul(100))
    }

    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Parses `12`, `12.5` or `12,50`. At most two decimals.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        let (whole, fraction) = match text.split_once(['.', ',']) {
            Some((whole, fraction)) if is_digits(fraction) && fraction.len() <= 2 => {
                (whole, fraction)
            }
            Some(_) => return None,
            None => (text, ""),
        };
        if !is_digits(whole) {
            return None;
        }

        let whole = whole.parse::<u64>().ok()?;
        let fraction = format!("{fraction:0<2}").parse::<u64>().ok()?;
        whole.checked_mul(100)?.checked_add(fraction).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, cents) = (self.0 / 100, self.0 % 100);
        if cents == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{cents:02}")
        }
    }
}

/// Reference to a product or avatar picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Asset shipped with the application.
    Bundled(String),
    /// File chosen through the media picker.
    Local(PathBuf),
}

impl ImageRef {
    const PLACEHOLDER: &'static str = "fondo.jpg";

    /// Picture assigned to products created without one.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::Bundled(Self::PLACEHOLDER.to_string())
    }

    /// Returns a short name for display.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Bundled(name) => name.clone(),
            Self::Local(path) => path.file_name().map_or_else(
                || path.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            ),
        }
    }
}

/// Catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    quantity: u32,
    image: ImageRef,
}

impl Product {
    /// Creates product record.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        quantity: u32,
        image: ImageRef,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            image,
        }
    }

    /// Creates product from validated draft fields.
    #[must_use]
    pub fn from_fields(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            quantity: fields.quantity,
            image: fields.image,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Units in stock.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Returns price formatted for product cards.
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("Precio ${}", self.price)
    }
}

/// Validated product fields, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ProductFields {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub image: ImageRef,
}

/// User-edited, not yet committed product state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Name as typed.
    pub name: String,
    /// Price as typed.
    pub price: String,
    /// Quantity as typed.
    pub quantity: String,
    /// Chosen picture, placeholder when unset.
    pub image: Option<ImageRef>,
}

impl ProductDraft {
    /// Creates draft from raw form text.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
            image: None,
        }
    }

    /// Pre-populates draft from an existing record.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            image: Some(product.image.clone()),
        }
    }

    /// Sets picture.
    #[must_use]
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    /// Validates draft into storable fields.
    ///
    /// Empty fields are reported before malformed numbers.
    ///
    /// # Errors
    /// Returns `Required` for an empty field, `InvalidNumber` for a negative
    /// or malformed price, or a quantity that is not a whole number.
    pub fn validate(&self) -> Result<ProductFields, ValidationError> {
        let name = self.name.trim();
        let price = self.price.trim();
        let quantity = self.quantity.trim();

        for (value, field) in [
            (name, FormField::ProductName),
            (price, FormField::Price),
            (quantity, FormField::Quantity),
        ] {
            if value.is_empty() {
                return Err(ValidationError::required(field));
            }
        }

        let price =
            Price::parse(price).ok_or(ValidationError::invalid_number(FormField::Price))?;
        let quantity = quantity
            .parse::<u32>()
            .map_err(|_| ValidationError::invalid_number(FormField::Quantity))?;

        Ok(ProductFields {
            name: name.to_string(),
            price,
            quantity,
            image: self.image.clone().unwrap_or_else(ImageRef::placeholder),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_valid_draft() {
        let fields = ProductDraft::new(" Tijera ", "15000", "20").validate().unwrap();
        assert_eq!(fields.name, "Tijera");
        assert_eq!(fields.price, Price::from_whole(15000));
        assert_eq!(fields.quantity, 20);
        assert_eq!(fields.image, ImageRef::placeholder());
    }

    #[test_case("", "1", "1", FormField::ProductName ; "empty_name")]
    #[test_case("Lima", "  ", "1", FormField::Price ; "blank_price")]
    #[test_case("Lima", "1", "", FormField::Quantity ; "empty_quantity")]
    #[test_case("", "abc", "", FormField::ProductName ; "required_before_number")]
    fn test_required_fields(name: &str, price: &str, quantity: &str, field: FormField) {
        let err = ProductDraft::new(name, price, quantity).validate().unwrap_err();
        assert_eq!(err, ValidationError::required(field));
    }

    #[test_case("-5", "1", FormField::Price ; "negative_price")]
    #[test_case("12.505", "1", FormField::Price ; "three_decimals")]
    #[test_case("12.", "1", FormField::Price ; "dangling_separator")]
    #[test_case("1e3", "1", FormField::Price ; "exponent")]
    #[test_case("100", "diez", FormField::Quantity ; "word_quantity")]
    fn test_invalid_numbers(price: &str, quantity: &str, field: FormField) {
        let err = ProductDraft::new("Pinzas", price, quantity)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::invalid_number(field));
    }

    #[test_case("12.5", 1250 ; "one_decimal")]
    #[test_case("12,50", 1250 ; "comma_separator")]
    #[test_case("0.99", 99 ; "under_one")]
    #[test_case("15000", 1_500_000 ; "whole")]
    fn test_decimal_prices(text: &str, cents: u64) {
        let fields = ProductDraft::new("Crema", text, "3").validate().unwrap();
        assert_eq!(fields.price, Price::from_cents(cents));
    }

    #[test]
    fn test_price_label_shows_cents_only_when_present() {
        let label = |price| {
            Product::new(1_u64, "Crema", price, 1, ImageRef::placeholder()).price_label()
        };
        assert_eq!(label(Price::from_whole(15000)), "Precio $15000");
        assert_eq!(label(Price::from_cents(1250)), "Precio $12.50");
    }

    #[test]
    fn test_zero_price_is_allowed() {
        assert!(ProductDraft::new("Muestra", "0", "3").validate().is_ok());
    }

    #[test]
    fn test_draft_from_product_keeps_image() {
        let product = Product::new(
            3_u64,
            "Tijera Sm",
            Price::from_whole(6000),
            10,
            ImageRef::Bundled("pinzaexpert.jpg".into()),
        );
        let draft = ProductDraft::from_product(&product);

        let fields = draft.validate().unwrap();
        assert_eq!(Product::from_fields(product.id(), fields), product);
    }

    #[test]
    fn test_local_image_display_name() {
        let image = ImageRef::Local(PathBuf::from("/tmp/fotos/tijera.png"));
        assert_eq!(image.display_name(), "tijera.png");
    }
}
