use std::borrow::Borrow;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Opaque product identifier (e.g., "PFI001").
///
/// Never validated against the catalog: any string is a valid id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Named color swatch offered for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    /// Packed 0xRRGGBB value.
    pub rgb: u32,
}

impl Color {
    pub fn new(name: &str, rgb: u32) -> Self {
        Self {
            name: name.to_string(),
            rgb,
        }
    }
}

/// Catalog category (e.g., "cat:fem").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub code: String,
    pub name: String,
}

impl Category {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// Immutable product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    /// Installment terms shown under the price.
    pub payment_details: String,
    pub colors: Vec<Color>,
    pub sizes: Vec<String>,
    /// Categories the product belongs to, held by value.
    pub categories: Vec<Category>,
    /// Shown in the storefront highlights.
    pub featured: bool,
    /// Discount in percent (0.0 when not on sale).
    pub discount_percent: f64,
}

impl Product {
    pub fn on_sale(&self) -> bool {
        self.discount_percent > 0.0
    }

    /// Price after discount, rounded half-up to cents.
    pub fn sale_price(&self) -> Decimal {
        if !self.on_sale() {
            return self.price;
        }
        let discount = Decimal::from_f64_retain(self.discount_percent).unwrap_or(Decimal::ZERO);
        let factor = (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED;
        (self.price * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn in_category(&self, code: &str) -> bool {
        self.categories.iter().any(|c| c.code == code)
    }
}

/// Curated collection of products (a storefront banner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Products in the collection, held by value.
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: Decimal, discount_percent: f64) -> Product {
        Product {
            id: ProductId::from("T001"),
            name: "Test".to_string(),
            brand: "Brand".to_string(),
            price,
            payment_details: String::new(),
            colors: Vec::new(),
            sizes: Vec::new(),
            categories: vec![Category::new("cat:test", "Test")],
            featured: false,
            discount_percent,
        }
    }

    #[test]
    fn test_sale_price_without_discount_is_price() {
        let p = product(Decimal::new(44990, 2), 0.0);
        assert!(!p.on_sale());
        assert_eq!(p.sale_price(), Decimal::new(44990, 2));
    }

    #[test]
    fn test_sale_price_half_off() {
        let p = product(Decimal::new(2990, 2), 50.0);
        assert!(p.on_sale());
        assert_eq!(p.sale_price(), Decimal::new(1495, 2));
    }

    #[test]
    fn test_in_category() {
        let p = product(Decimal::ONE, 0.0);
        assert!(p.in_category("cat:test"));
        assert!(!p.in_category("cat:other"));
    }

    #[test]
    fn test_product_id_display_and_borrow() {
        let id = ProductId::new("PFI001");
        assert_eq!(id.to_string(), "PFI001");
        let as_str: &str = id.borrow();
        assert_eq!(as_str, "PFI001");
    }
}
