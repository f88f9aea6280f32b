//! Order aggregate, composition pipeline, and related types.

mod aggregate;
mod composer;
mod policy;
mod value_objects;

pub use aggregate::{NewOrder, Order};
pub use composer::OrderComposer;
pub use policy::StockPolicy;
pub use value_objects::{CustomerId, Money, OrderLine, ProductId, RequestedLine, StockUpdate};

use serde::Serialize;
use thiserror::Error;

/// Reasons an order request can be rejected.
///
/// Every variant is a request-validation failure. None of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Customer ID is required.
    #[error("Customer ID is required")]
    CustomerIdRequired,

    /// A requested line asked for zero units.
    #[error("Invalid quantity {quantity} for product {product_id} (must be greater than 0)")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    /// The customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// None of the requested products exist.
    #[error("Invalid products: no requested product could be found")]
    NoProductsMatched,

    /// A requested product does not exist.
    #[error("Could not find product {0}")]
    ProductNotFound(ProductId),

    /// The same product was requested more than once.
    #[error("Duplicated product in request: {0}")]
    DuplicateProduct(ProductId),

    /// A line asks for more units than the product has available.
    #[error(
        "The quantity {requested} is not available for product {product_id} ({available} in stock)"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A requested product has no stock at all.
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// The line or order amount does not fit in the money representation.
    #[error("Order amount overflows at product {0}")]
    AmountOverflow(ProductId),
}

impl OrderError {
    /// Returns the stable kind for programmatic handling.
    pub fn kind(&self) -> RejectionKind {
        match self {
            OrderError::CustomerIdRequired => RejectionKind::CustomerIdRequired,
            OrderError::InvalidQuantity { .. } => RejectionKind::InvalidQuantity,
            OrderError::CustomerNotFound(_) => RejectionKind::CustomerNotFound,
            OrderError::NoProductsMatched => RejectionKind::NoProductsMatched,
            OrderError::ProductNotFound(_) => RejectionKind::ProductNotFound,
            OrderError::DuplicateProduct(_) => RejectionKind::DuplicateProduct,
            OrderError::InsufficientStock { .. } => RejectionKind::InsufficientStock,
            OrderError::OutOfStock(_) => RejectionKind::OutOfStock,
            OrderError::AmountOverflow(_) => RejectionKind::AmountOverflow,
        }
    }

    /// Returns true for the stock-violation family of rejections.
    pub fn is_stock_violation(&self) -> bool {
        matches!(
            self,
            OrderError::InsufficientStock { .. } | OrderError::OutOfStock(_)
        )
    }
}

/// Stable, machine-readable rejection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    CustomerIdRequired,
    InvalidQuantity,
    CustomerNotFound,
    NoProductsMatched,
    ProductNotFound,
    DuplicateProduct,
    InsufficientStock,
    OutOfStock,
    AmountOverflow,
}

impl RejectionKind {
    /// Returns the snake_case name, used as a metrics label and in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::CustomerIdRequired => "customer_id_required",
            RejectionKind::InvalidQuantity => "invalid_quantity",
            RejectionKind::CustomerNotFound => "customer_not_found",
            RejectionKind::NoProductsMatched => "no_products_matched",
            RejectionKind::ProductNotFound => "product_not_found",
            RejectionKind::DuplicateProduct => "duplicate_product",
            RejectionKind::InsufficientStock => "insufficient_stock",
            RejectionKind::OutOfStock => "out_of_stock",
            RejectionKind::AmountOverflow => "amount_overflow",
        }
    }
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_names_product_and_quantity() {
        let err = OrderError::InsufficientStock {
            product_id: ProductId::new("P2"),
            requested: 1,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "The quantity 1 is not available for product P2 (0 in stock)"
        );
        assert_eq!(err.kind(), RejectionKind::InsufficientStock);
        assert!(err.is_stock_violation());
    }

    #[test]
    fn test_kind_display_matches_serde_name() {
        let kind = RejectionKind::DuplicateProduct;
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{kind}\""));
    }

    #[test]
    fn test_non_stock_errors_are_not_stock_violations() {
        assert!(!OrderError::NoProductsMatched.is_stock_violation());
        assert!(!OrderError::DuplicateProduct(ProductId::new("P1")).is_stock_violation());
    }
}
