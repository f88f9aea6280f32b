//! Domain layer for the order composer.
//!
//! This crate provides:
//! - Value objects and the `Order` aggregate produced by a successful composition
//! - `OrderComposer`, the validation pipeline that turns a customer id and
//!   requested product lines into a persisted order
//! - `CustomerService` for registering customers
//! - Repository ports with in-memory implementations

pub mod customer;
pub mod error;
pub mod order;
pub mod product;
pub mod repository;

pub use customer::{Customer, CustomerError, CustomerService};
pub use error::{DomainError, RepositoryError};
pub use order::{
    CustomerId, Money, NewOrder, Order, OrderComposer, OrderError, OrderLine, ProductId,
    RejectionKind, RequestedLine, StockPolicy, StockUpdate,
};
pub use product::Product;
pub use repository::{
    CustomerRepository, InMemoryCustomerRepository, InMemoryOrderRepository,
    InMemoryProductRepository, OrderRepository, ProductRepository,
};
