//! The order aggregate produced by a successful composition.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;

use super::{Money, OrderLine, ProductId};

/// A validated order ready to be persisted.
///
/// Built by the composer and handed to the order store, which assigns the
/// identity and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
}

/// A persisted order.
///
/// Lines keep the order in which the caller requested them. From this crate's
/// point of view the order is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Materializes a stored order from a validated one.
    pub fn from_new(id: OrderId, created_at: DateTime<Utc>, new_order: NewOrder) -> Self {
        Self {
            id,
            customer: new_order.customer,
            lines: new_order.lines,
            created_at,
        }
    }

    /// Returns the number of lines in the order.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&OrderLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Returns the sum of all line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::total_price).sum()
    }
}
