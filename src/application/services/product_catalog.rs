//! In-memory product list.

use tracing::{debug, info};

use crate::domain::entities::{Product, ProductDraft, ProductId, demo_products};
use crate::domain::errors::CatalogError;
use crate::domain::{Alert, ConfirmPrompt};

/// Successful catalog mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CatalogChange {
    Added(ProductId),
    Updated(ProductId),
    Removed(ProductId),
}

impl CatalogChange {
    #[must_use]
    pub const fn id(self) -> ProductId {
        match self {
            Self::Added(id) | Self::Updated(id) | Self::Removed(id) => id,
        }
    }

    /// Returns the success alert for this change.
    #[must_use]
    pub fn alert(self) -> Alert {
        let message = match self {
            Self::Added(_) => "Producto agregado correctamente.",
            Self::Updated(_) => "Producto actualizado correctamente.",
            Self::Removed(_) => "Producto eliminado correctamente.",
        };
        Alert::success("Éxito", message)
    }
}

/// Ordered product collection. Validation runs before any mutation.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Creates empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Creates catalog holding the demo products.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            products: demo_products(),
        }
    }

    /// Id the next added product will get.
    #[must_use]
    pub fn next_id(&self) -> ProductId {
        self.products
            .iter()
            .map(Product::id)
            .max()
            .map_or(ProductId(1), ProductId::next)
    }

    /// Validates draft and appends it under a fresh id.
    ///
    /// # Errors
    /// Returns `Validation` if the draft is incomplete or malformed.
    pub fn add(&mut self, draft: &ProductDraft) -> Result<CatalogChange, CatalogError> {
        let fields = draft.validate()?;
        let id = self.next_id();
        info!(%id, name = %fields.name, "Product added");
        self.products.push(Product::from_fields(id, fields));
        Ok(CatalogChange::Added(id))
    }

    /// Replaces the record with `id` by the draft.
    ///
    /// # Errors
    /// Returns `Validation` for a bad draft and `NotFound` for an unknown id.
    pub fn update(
        &mut self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<CatalogChange, CatalogError> {
        let fields = draft.validate()?;
        let slot = self
            .products
            .iter_mut()
            .find(|product| product.id() == id)
            .ok_or(CatalogError::NotFound(id))?;
        *slot = Product::from_fields(id, fields);
        info!(%id, "Product updated");
        Ok(CatalogChange::Updated(id))
    }

    /// Removes the record with `id`.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id.
    pub fn remove(&mut self, id: ProductId) -> Result<CatalogChange, CatalogError> {
        let index = self
            .products
            .iter()
            .position(|product| product.id() == id)
            .ok_or(CatalogError::NotFound(id))?;
        let removed = self.products.remove(index);
        info!(%id, name = %removed.name(), "Product removed");
        Ok(CatalogChange::Removed(id))
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id() == id)
    }

    /// Products in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Builds the delete confirmation for `id`.
    #[must_use]
    pub fn delete_prompt(&self, id: ProductId) -> Option<ConfirmPrompt> {
        let product = self.get(id)?;
        debug!(%id, "Delete confirmation built");
        Some(ConfirmPrompt::new(
            "Eliminar Producto",
            format!("¿Desea eliminar el producto \"{}\"?", product.name()),
        ))
    }
}

impl From<Vec<Product>> for ProductCatalog {
    fn from(products: Vec<Product>) -> Self {
        Self { products }
    }
}
