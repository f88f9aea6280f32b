//! Repository ports consumed by the domain services, with in-memory implementations.

pub mod customers;
pub mod orders;
pub mod products;

pub use customers::{CustomerRepository, InMemoryCustomerRepository};
pub use orders::{InMemoryOrderRepository, OrderRepository};
pub use products::{InMemoryProductRepository, ProductRepository};
