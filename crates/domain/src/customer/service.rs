//! Customer registration service.

use crate::error::DomainError;
use crate::repository::CustomerRepository;

use super::{Customer, CustomerError};

/// Service for registering customers.
///
/// Emails are unique across customers; the store assigns ids.
pub struct CustomerService<C: CustomerRepository> {
    customers: C,
}

impl<C: CustomerRepository> CustomerService<C> {
    /// Creates a new customer service backed by the given repository.
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    /// Registers a new customer.
    #[tracing::instrument(skip(self, name), fields(email = %email))]
    pub async fn create_customer(&self, name: &str, email: &str) -> Result<Customer, DomainError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() {
            return Err(CustomerError::NameRequired.into());
        }
        if !is_plausible_email(email) {
            return Err(CustomerError::InvalidEmail(email.to_string()).into());
        }

        if self.customers.find_by_email(email).await?.is_some() {
            tracing::warn!("Email already registered");
            return Err(CustomerError::EmailInUse(email.to_string()).into());
        }

        let customer = self
            .customers
            .create(name.to_string(), email.to_string())
            .await?;

        metrics::counter!("customers_created_total").increment(1);
        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
