//! Stock acceptance rules.

use serde::{Deserialize, Serialize};

use crate::product::Product;

use super::OrderError;

/// How requested quantities are checked against available stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockPolicy {
    /// Reject a line asking for more than the product has, then decrement
    /// stock after the order is stored.
    #[default]
    RejectOverdraw,

    /// Reject only products with no stock at all. Stock is never decremented.
    RejectEmpty,
}

impl StockPolicy {
    /// Checks one requested quantity against a resolved product.
    pub fn check(&self, product: &Product, requested: u32) -> Result<(), OrderError> {
        match self {
            StockPolicy::RejectOverdraw if requested > product.quantity => {
                Err(OrderError::InsufficientStock {
                    product_id: product.id.clone(),
                    requested,
                    available: product.quantity,
                })
            }
            StockPolicy::RejectEmpty if product.quantity == 0 => {
                Err(OrderError::OutOfStock(product.id.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Returns true if a successful order is followed by a stock decrement.
    pub fn decrements_stock(&self) -> bool {
        matches!(self, StockPolicy::RejectOverdraw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockPolicy::RejectOverdraw => "reject-overdraw",
            StockPolicy::RejectEmpty => "reject-empty",
        }
    }
}

impl std::fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject-overdraw" | "overdraw" => Ok(StockPolicy::RejectOverdraw),
            "reject-empty" | "empty" => Ok(StockPolicy::RejectEmpty),
            other => Err(format!("unknown stock policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Money;

    fn product(quantity: u32) -> Product {
        Product::new("P1", "Widget", Money::from_cents(1000), quantity)
    }

    #[test]
    fn test_overdraw_allows_exact_quantity() {
        assert!(StockPolicy::RejectOverdraw.check(&product(5), 5).is_ok());
    }

    #[test]
    fn test_overdraw_rejects_excess() {
        let err = StockPolicy::RejectOverdraw
            .check(&product(5), 6)
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InsufficientStock {
                product_id: "P1".into(),
                requested: 6,
                available: 5,
            }
        );
    }

    #[test]
    fn test_empty_policy_ignores_requested_amount() {
        assert!(StockPolicy::RejectEmpty.check(&product(1), 50).is_ok());
        assert_eq!(
            StockPolicy::RejectEmpty.check(&product(0), 1).unwrap_err(),
            OrderError::OutOfStock("P1".into())
        );
    }

    #[test]
    fn test_only_overdraw_decrements() {
        assert!(StockPolicy::RejectOverdraw.decrements_stock());
        assert!(!StockPolicy::RejectEmpty.decrements_stock());
    }

    #[test]
    fn test_parse_round_trips_display() {
        for policy in [StockPolicy::RejectOverdraw, StockPolicy::RejectEmpty] {
            assert_eq!(policy.to_string().parse::<StockPolicy>().unwrap(), policy);
        }
        assert!("sometimes".parse::<StockPolicy>().is_err());
    }
}
