//! Request and response bodies for the order composer binary.

use domain::{Customer, CustomerId, DomainError, Order, RequestedLine};
use serde::{Deserialize, Serialize};

/// One request read from stdin: an order attempt or a customer registration.
///
/// A body with `customer_id` is an order; a body with `name` and `email` is a
/// registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Request {
    Order(OrderRequest),
    Customer(CustomerRequest),
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub products: Vec<RequestedLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name,
            email: customer.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub lines: Vec<OrderLineResponse>,
    pub total_cents: i64,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total_cents = order.total().cents();
        Self {
            id: order.id.to_string(),
            customer_id: order.customer.id.to_string(),
            customer_name: order.customer.name,
            lines: order
                .lines
                .into_iter()
                .map(|line| OrderLineResponse {
                    product_id: line.product_id.to_string(),
                    quantity: line.quantity,
                    unit_price_cents: line.unit_price.cents(),
                })
                .collect(),
            total_cents,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let message = match err {
            DomainError::Order(e) => e.to_string(),
            DomainError::Customer(e) => e.to_string(),
            DomainError::Repository(e) => e.to_string(),
        };
        Self {
            error: message,
            kind: err.kind(),
        }
    }
}

/// Result of handling one request that did not hit a store fault.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Created(OrderResponse),
    Registered(CustomerResponse),
    Rejected(ErrorResponse),
}

impl Outcome {
    /// Process exit status: success for a created order or customer, 2 for a rejection.
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Created(_) | Outcome::Registered(_) => 0,
            Outcome::Rejected(_) => 2,
        }
    }
}
