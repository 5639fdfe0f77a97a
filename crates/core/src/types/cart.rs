//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, Product};

/// A cart entry pairing a product with a quantity.
///
/// Stored flat: the product's fields and `quantity` sit side by side in one
/// JSON object, e.g.
/// `{"id":"1","name":"Mock Product 1","description":"A sample product","price":19.99,"quantity":1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    /// A line item for a single unit of `product`.
    ///
    /// Adding to the cart always creates one of these; there is no merging
    /// with an existing line for the same product.
    #[must_use]
    pub const fn single(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// The unit price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.product.price
    }
}
