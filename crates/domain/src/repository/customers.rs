//! Customer store port and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::customer::Customer;
use crate::error::RepositoryError;
use crate::order::CustomerId;

/// Trait for customer lookup and creation.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Finds a customer by id.
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Finds a customer by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError>;

    /// Stores a new customer and returns it with its assigned id.
    async fn create(&self, name: String, email: String) -> Result<Customer, RepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryCustomerState {
    customers: HashMap<CustomerId, Customer>,
    lookups: usize,
    fail_on_lookup: bool,
}

/// In-memory customer store. Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    state: Arc<RwLock<InMemoryCustomerState>>,
}

impl InMemoryCustomerRepository {
    /// Creates an empty in-memory customer store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a customer, keeping its id.
    pub fn insert(&self, customer: Customer) {
        self.state
            .write()
            .unwrap()
            .customers
            .insert(customer.id.clone(), customer);
    }

    /// Configures the store to fail every lookup.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.state.write().unwrap().fail_on_lookup = fail;
    }

    /// Returns the number of stored customers.
    pub fn customer_count(&self) -> usize {
        self.state.read().unwrap().customers.len()
    }

    /// Returns how many lookups (by id or email) have been served.
    pub fn lookup_count(&self) -> usize {
        self.state.read().unwrap().lookups
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_lookup {
            return Err(RepositoryError::Unavailable("customer store".to_string()));
        }
        state.lookups += 1;
        Ok(state.customers.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_lookup {
            return Err(RepositoryError::Unavailable("customer store".to_string()));
        }
        state.lookups += 1;
        Ok(state
            .customers
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, name: String, email: String) -> Result<Customer, RepositoryError> {
        let customer = Customer::new(Uuid::new_v4().to_string(), name, email);
        self.state
            .write()
            .unwrap()
            .customers
            .insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let repo = InMemoryCustomerRepository::new();
        repo.insert(Customer::new("C1", "Ada", "ada@example.com"));

        let found = repo.find_by_id(&CustomerId::new("C1")).await.unwrap();
        assert_eq!(found.unwrap().name, "Ada");
        assert!(repo.find_by_id(&CustomerId::new("C2")).await.unwrap().is_none());
        assert_eq!(repo.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let repo = InMemoryCustomerRepository::new();
        repo.insert(Customer::new("C1", "Ada", "Ada@Example.com"));

        let found = repo.find_by_email("ada@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, CustomerId::new("C1"));
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let repo = InMemoryCustomerRepository::new();
        let a = repo.create("A".into(), "a@example.com".into()).await.unwrap();
        let b = repo.create("B".into(), "b@example.com".into()).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.customer_count(), 2);
    }

    #[tokio::test]
    async fn test_fail_on_lookup() {
        let repo = InMemoryCustomerRepository::new();
        repo.set_fail_on_lookup(true);

        assert!(repo.find_by_id(&CustomerId::new("C1")).await.is_err());
        assert_eq!(repo.lookup_count(), 0);
    }
}
