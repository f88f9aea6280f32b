//! Order store port and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use common::OrderId;

use crate::error::RepositoryError;
use crate::order::{NewOrder, Order};

/// Trait for persisting and loading orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a validated order and returns the stored aggregate.
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// Loads an order by id.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Order>,
    creates: usize,
    fail_on_create: bool,
}

/// In-memory order store. Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderRepository {
    /// Creates an empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every create call.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }

    /// Returns how many create calls have been received, including failed ones.
    pub fn create_count(&self) -> usize {
        self.state.read().unwrap().creates
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.creates += 1;

        if state.fail_on_create {
            return Err(RepositoryError::Unavailable("order store".to_string()));
        }

        let order = Order::from_new(OrderId::new(), Utc::now(), order);
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.state.read().unwrap().orders.get(&id).cloned())
    }
}
