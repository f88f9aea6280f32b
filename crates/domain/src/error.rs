//! Domain error types.

use thiserror::Error;

use crate::customer::CustomerError;
use crate::order::{OrderError, ProductId, RejectionKind};

/// Failures raised by a backing store rather than by request validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The store could not be reached or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stock update referenced a product the store does not hold.
    #[error("Unknown product in stock update: {0}")]
    UnknownProduct(ProductId),

    /// The background commit task ended without producing a result.
    #[error("Commit interrupted: {0}")]
    Interrupted(String),
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The order request was rejected.
    #[error("Order rejected: {0}")]
    Order(#[from] OrderError),

    /// The customer registration was rejected.
    #[error("Customer rejected: {0}")]
    Customer(#[from] CustomerError),

    /// A backing store failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl DomainError {
    /// Returns the rejection kind for order rejections.
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            DomainError::Order(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Returns the stable kind of any rejection, order or customer.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            DomainError::Order(err) => Some(err.kind().as_str()),
            DomainError::Customer(err) => Some(err.kind()),
            DomainError::Repository(_) => None,
        }
    }

    /// Returns true when the error describes an invalid request rather than a store fault.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, DomainError::Repository(_))
    }
}
