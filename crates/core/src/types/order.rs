//! Order submission payload.

use serde::{Deserialize, Serialize};

use super::{LineItem, ProductId};

/// One entry of an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            quantity: item.quantity,
        }
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    /// Returns `true` if the order has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Builds the order from cart lines, one entry per line, in cart order.
impl From<&[LineItem]> for OrderRequest {
    fn from(lines: &[LineItem]) -> Self {
        Self {
            items: lines.iter().map(OrderItem::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Price, Product};

    #[test]
    fn test_wire_format() {
        let lines = vec![
            LineItem::single(Product::new("1", "A", "", Price::from_cents(100))),
            LineItem::single(Product::new("3", "C", "", Price::from_cents(300))),
            LineItem::single(Product::new("1", "A", "", Price::from_cents(100))),
        ];

        let order = OrderRequest::from(lines.as_slice());
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "items": [
                    {"productId": "1", "quantity": 1},
                    {"productId": "3", "quantity": 1},
                    {"productId": "1", "quantity": 1}
                ]
            })
        );
    }

    #[test]
    fn test_empty_order() {
        let order = OrderRequest::from(&[][..]);
        assert!(order.is_empty());
    }
}
