//! Catalog fixtures used to preload the in-memory stores.

use std::path::Path;

use domain::{Customer, InMemoryCustomerRepository, InMemoryProductRepository, Product};
use serde::Deserialize;

use crate::error::AppError;

/// Customers and products to seed before handling a request.
///
/// ```json
/// {
///   "customers": [{ "id": "C1", "name": "Ada", "email": "ada@example.com" }],
///   "products": [{ "id": "P1", "name": "Widget", "price_cents": 1000, "quantity": 5 }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    /// Parses a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Copies every entry into the given stores.
    pub fn seed(self, customers: &InMemoryCustomerRepository, products: &InMemoryProductRepository) {
        tracing::info!(
            customers = self.customers.len(),
            products = self.products.len(),
            "Seeding catalog"
        );
        for customer in self.customers {
            customers.insert(customer);
        }
        for product in self.products {
            products.insert(product);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CustomerRepository, ProductId};

    const FIXTURE: &str = r#"{
        "customers": [{ "id": "C1", "name": "Ada", "email": "ada@example.com" }],
        "products": [
            { "id": "P1", "name": "Widget", "price_cents": 1000, "quantity": 5 },
            { "id": "P2", "name": "Gadget", "price_cents": 2000, "quantity": 0 }
        ]
    }"#;

    #[test]
    fn test_parse_fixture() {
        let catalog = Catalog::from_json(FIXTURE).unwrap();
        assert_eq!(catalog.customers.len(), 1);
        assert_eq!(catalog.products[0].price.cents(), 1000);
        assert_eq!(catalog.products[1].quantity, 0);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let catalog = Catalog::from_json("{}").unwrap();
        assert!(catalog.customers.is_empty());
        assert!(catalog.products.is_empty());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Catalog::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[tokio::test]
    async fn test_seed_fills_stores() {
        let customers = InMemoryCustomerRepository::new();
        let products = InMemoryProductRepository::new();

        Catalog::from_json(FIXTURE).unwrap().seed(&customers, &products);

        assert_eq!(customers.customer_count(), 1);
        assert!(customers.find_by_id(&"C1".into()).await.unwrap().is_some());
        assert_eq!(products.get(&ProductId::new("P1")).unwrap().quantity, 5);
    }
}
