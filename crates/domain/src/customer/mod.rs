//! Customers and customer registration.

mod service;

pub use service::CustomerService;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::order::CustomerId;

/// A customer profile. Owned by the customer store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Errors that can occur while registering a customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    /// Customer name is required.
    #[error("Customer name is required")]
    NameRequired,

    /// The email address is malformed.
    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),

    /// Another customer already uses this email.
    #[error("This customer's email is already in use: {0}")]
    EmailInUse(String),
}

impl CustomerError {
    /// Returns the stable snake_case kind, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            CustomerError::NameRequired => "name_required",
            CustomerError::InvalidEmail(_) => "invalid_email",
            CustomerError::EmailInUse(_) => "email_in_use",
        }
    }
}
