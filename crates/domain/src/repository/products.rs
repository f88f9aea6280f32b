//! Product store port and in-memory implementation.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::order::{ProductId, StockUpdate};
use crate::product::Product;

/// Trait for bulk product lookup and stock updates.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Resolves products by id in a single call.
    ///
    /// May return fewer products than ids requested. Repeated ids produce at
    /// most one product each.
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError>;

    /// Applies absolute stock levels for a batch of products.
    async fn update_quantities(&self, updates: Vec<StockUpdate>) -> Result<(), RepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryProductState {
    products: HashMap<ProductId, Product>,
    lookups: usize,
    updates: usize,
    fail_on_update: bool,
}

/// In-memory product store. Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<InMemoryProductState>>,
}

impl InMemoryProductRepository {
    /// Creates an empty in-memory product store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a product.
    pub fn insert(&self, product: Product) {
        self.state
            .write()
            .unwrap()
            .products
            .insert(product.id.clone(), product);
    }

    /// Returns a copy of a stored product.
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.state.read().unwrap().products.get(id).cloned()
    }

    /// Configures the store to fail every stock update.
    pub fn set_fail_on_update(&self, fail: bool) {
        self.state.write().unwrap().fail_on_update = fail;
    }

    /// Returns how many bulk lookups have been served.
    pub fn lookup_count(&self) -> usize {
        self.state.read().unwrap().lookups
    }

    /// Returns how many stock update batches have been applied.
    pub fn update_count(&self) -> usize {
        self.state.read().unwrap().updates
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.lookups += 1;

        let mut seen = HashSet::new();
        let found = ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| state.products.get(id).cloned())
            .collect();
        Ok(found)
    }

    async fn update_quantities(&self, updates: Vec<StockUpdate>) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_update {
            return Err(RepositoryError::Unavailable("product store".to_string()));
        }

        // All-or-nothing: reject the whole batch before touching anything.
        if let Some(unknown) = updates
            .iter()
            .find(|u| !state.products.contains_key(&u.product_id))
        {
            return Err(RepositoryError::UnknownProduct(unknown.product_id.clone()));
        }

        for update in updates {
            if let Some(product) = state.products.get_mut(&update.product_id) {
                product.quantity = update.quantity;
            }
        }
        state.updates += 1;
        Ok(())
    }
}
