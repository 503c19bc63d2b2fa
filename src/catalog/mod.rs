//! Read-only product catalog.
//!
//! The catalog is a leaf dependency: it is never mutated after load and
//! needs no synchronization beyond sharing an `Arc`.

mod mock;
mod types;

use std::sync::Arc;

pub use types::{Category, Color, Offer, Product, ProductId};

/// Source of the static storefront collections.
///
/// All methods are pure and infallible. Lookups are linear searches by
/// identifier equality.
pub trait CatalogProvider: Send + Sync {
    fn list_products(&self) -> Vec<Product>;

    fn list_categories(&self) -> Vec<Category>;

    fn list_offers(&self) -> Vec<Offer>;

    fn product(&self, id: &str) -> Option<Product> {
        self.list_products().into_iter().find(|p| p.id.as_str() == id)
    }

    fn category(&self, code: &str) -> Option<Category> {
        self.list_categories().into_iter().find(|c| c.code == code)
    }

    fn offer(&self, code: &str) -> Option<Offer> {
        self.list_offers().into_iter().find(|o| o.code == code)
    }

    fn products_in_category(&self, code: &str) -> Vec<Product> {
        self.list_products()
            .into_iter()
            .filter(|p| p.in_category(code))
            .collect()
    }

    /// Fetch all three collections at once.
    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            products: Arc::from(self.list_products()),
            categories: Arc::from(self.list_categories()),
            offers: Arc::from(self.list_offers()),
        }
    }
}

/// One completed catalog fetch.
///
/// Collections are shared, so every published view state reuses them
/// without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Arc<[Product]>,
    pub categories: Arc<[Category]>,
    pub offers: Arc<[Offer]>,
}

/// In-memory catalog over fixed collections.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    offers: Vec<Offer>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>, offers: Vec<Offer>) -> Self {
        Self {
            products,
            categories,
            offers,
        }
    }

    /// The embedded demo catalog.
    pub fn mock() -> Self {
        let data = mock::mock_data();
        Self {
            products: data.products.clone(),
            categories: data.categories.clone(),
            offers: data.offers.clone(),
        }
    }

    /// A catalog with no records at all.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_products(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn list_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn list_offers(&self) -> Vec<Offer> {
        self.offers.clone()
    }

    fn product(&self, id: &str) -> Option<Product> {
        self.products.iter().find(|p| p.id.as_str() == id).cloned()
    }

    fn category(&self, code: &str) -> Option<Category> {
        self.categories.iter().find(|c| c.code == code).cloned()
    }

    fn offer(&self, code: &str) -> Option<Offer> {
        self.offers.iter().find(|o| o.code == code).cloned()
    }
}
