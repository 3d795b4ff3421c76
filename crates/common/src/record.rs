//! Persisted records and the joined product view.

use serde::{Deserialize, Serialize};

use crate::{CategoryId, PriceValue, ProductId};

/// A product as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub barcode: Option<String>,
    pub name: String,
    pub price: PriceValue,
    /// [`CategoryId::NONE`] when uncategorised.
    pub category_id: CategoryId,
    pub notes: String,
}

/// Data required to insert a new [`ProductRecord`]. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub barcode: Option<String>,
    pub name: String,
    pub price: PriceValue,
    #[serde(default)]
    pub category_id: CategoryId,
    #[serde(default)]
    pub notes: String,
}

impl NewProduct {
    /// Creates an uncategorised product with no barcode and empty notes.
    pub fn new(name: impl Into<String>, price: PriceValue) -> Self {
        Self {
            barcode: None,
            name: name.into(),
            price,
            category_id: CategoryId::NONE,
            notes: String::new(),
        }
    }

    /// Sets the barcode.
    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Sets the category.
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = category_id;
        self
    }

    /// Sets the free-text notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Attaches a store-assigned id.
    pub fn with_id(self, id: ProductId) -> ProductRecord {
        ProductRecord {
            id,
            barcode: self.barcode,
            name: self.name,
            price: self.price,
            category_id: self.category_id,
            notes: self.notes,
        }
    }
}

/// A category as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
}

/// Data required to insert a new [`CategoryRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A product joined with its category.
///
/// `category` is `None` both for uncategorised products and for products
/// whose category id no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub product: ProductRecord,
    pub category: Option<CategoryRecord>,
}

impl ProductView {
    /// Joins a product with the category it references, if that resolves.
    pub fn join(product: ProductRecord, category: Option<CategoryRecord>) -> Self {
        let category =
            category.filter(|c| !product.category_id.is_none() && c.id == product.category_id);
        Self { product, category }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// Barcode as a string; a missing barcode reads as empty.
    pub fn barcode_str(&self) -> &str {
        self.product.barcode.as_deref().unwrap_or("")
    }

    pub fn price(&self) -> PriceValue {
        self.product.price
    }

    /// Name of the joined category, if any.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(major: i64, minor: i64) -> PriceValue {
        PriceValue::new(major, minor).unwrap()
    }

    #[test]
    fn new_product_builder_sets_fields() {
        let product = NewProduct::new("Taps", price(5, 99))
            .barcode("1234567890123")
            .category(CategoryId::new(1))
            .notes("chrome")
            .with_id(ProductId::new(1));

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.barcode.as_deref(), Some("1234567890123"));
        assert_eq!(product.category_id, CategoryId::new(1));
        assert_eq!(product.notes, "chrome");
    }

    #[test]
    fn join_keeps_matching_category() {
        let product = NewProduct::new("Sink", price(10, 99))
            .category(CategoryId::new(1))
            .with_id(ProductId::new(2));
        let category = CategoryRecord {
            id: CategoryId::new(1),
            name: "Bathroom".to_string(),
        };

        let view = ProductView::join(product, Some(category));
        assert_eq!(view.category_name(), Some("Bathroom"));
    }

    #[test]
    fn join_drops_category_for_uncategorised_product() {
        let product = NewProduct::new("Sweets", price(0, 99)).with_id(ProductId::new(4));
        let category = CategoryRecord {
            id: CategoryId::new(1),
            name: "Bathroom".to_string(),
        };

        let view = ProductView::join(product, Some(category));
        assert!(view.category.is_none());
    }

    #[test]
    fn missing_barcode_reads_as_empty() {
        let view = ProductView::join(
            NewProduct::new("Sweets", price(0, 99)).with_id(ProductId::new(4)),
            None,
        );
        assert_eq!(view.barcode_str(), "");
    }

    #[test]
    fn new_product_deserializes_with_defaults() {
        let json = serde_json::json!({"name": "Pillows", "price": {"major": 18, "minor": 99}});
        let product: NewProduct = serde_json::from_value(json).unwrap();
        assert_eq!(product.category_id, CategoryId::NONE);
        assert!(product.barcode.is_none());
        assert!(product.notes.is_empty());
    }
}
