//! Product as seen by the order domain.

use serde::{Deserialize, Serialize};

use crate::order::{Money, ProductId};

/// A sellable product. Owned by the product store; the composer only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    /// Units available for sale.
    pub quantity: u32,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }
}
