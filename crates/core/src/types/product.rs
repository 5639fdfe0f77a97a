//! Catalog product.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as served by the catalog.
///
/// The identifier is written as `id`. On input `_id` is accepted too, since
/// the built-in mock catalog and document-store backends use that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "id", alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_underscore_id() {
        let json = r#"{"_id":"1","name":"Mock Product 1","description":"A sample product","price":19.99}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.price, Price::from_cents(1999));
    }

    #[test]
    fn test_deserialize_without_description() {
        let json = r#"{"id":"a1","name":"Widget","price":5}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_serialize_uses_plain_id() {
        let product = Product::new("7", "Lamp", "Bright", Price::from_cents(1250));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], "7");
        assert!(value.get("_id").is_none());
    }
}
