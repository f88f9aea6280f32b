//! Composition root for the order composer.
//!
//! Wires `OrderComposer` and `CustomerService` to the in-memory stores, seeds
//! them from a catalog fixture, and maps domain results to JSON outcomes.

pub mod catalog;
pub mod config;
pub mod error;
pub mod response;

use std::path::Path;

use domain::{
    CustomerService, DomainError, InMemoryCustomerRepository, InMemoryOrderRepository,
    InMemoryProductRepository, OrderComposer,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use catalog::Catalog;
use config::{Config, LogFormat};
use error::AppError;
use response::{ErrorResponse, Outcome, Request};

/// The composer as wired by this binary.
pub type AppComposer =
    OrderComposer<InMemoryCustomerRepository, InMemoryProductRepository, InMemoryOrderRepository>;

/// Stores and composer created at startup.
pub struct AppState {
    pub composer: AppComposer,
    pub customer_service: CustomerService<InMemoryCustomerRepository>,
    pub customers: InMemoryCustomerRepository,
    pub products: InMemoryProductRepository,
    pub orders: InMemoryOrderRepository,
}

/// Installs the global tracing subscriber. Logs go to stderr so stdout stays JSON.
///
/// `config.log_level` has already been validated by `Config::from_lookup`.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::new(&config.log_level);

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

/// Installs the global Prometheus recorder.
///
/// Fails if a recorder is already installed for this process.
pub fn install_metrics() -> Result<PrometheusHandle, AppError> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}

/// Writes the current metrics snapshot in Prometheus text format.
pub fn write_metrics(handle: &PrometheusHandle, path: &Path) -> Result<(), AppError> {
    std::fs::write(path, handle.render()).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates the stores and composer, seeding the stores from `catalog`.
pub fn create_state(config: &Config, catalog: Catalog) -> AppState {
    let customers = InMemoryCustomerRepository::new();
    let products = InMemoryProductRepository::new();
    let orders = InMemoryOrderRepository::new();

    catalog.seed(&customers, &products);

    let composer = OrderComposer::new(customers.clone(), products.clone(), orders.clone())
        .with_policy(config.stock_policy);
    let customer_service = CustomerService::new(customers.clone());

    AppState {
        composer,
        customer_service,
        customers,
        products,
        orders,
    }
}

/// Loads the configured catalog, or an empty one if none is configured.
pub fn load_catalog(config: &Config) -> Result<Catalog, AppError> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path),
        None => Ok(Catalog::default()),
    }
}

/// Handles one JSON request: an order attempt or a customer registration.
///
/// Rejections become an `Outcome::Rejected`; store faults are returned as errors.
#[tracing::instrument(skip_all)]
pub async fn handle_request(state: &AppState, request_json: &str) -> Result<Outcome, AppError> {
    let request: Request = serde_json::from_str(request_json)?;
    let result = match request {
        Request::Order(request) => state
            .composer
            .create_order(&request.customer_id, request.products)
            .await
            .map(|order| Outcome::Created(order.into())),
        Request::Customer(request) => state
            .customer_service
            .create_customer(&request.name, &request.email)
            .await
            .map(|customer| Outcome::Registered(customer.into())),
    };

    result.or_else(rejection_outcome)
}

fn rejection_outcome(err: DomainError) -> Result<Outcome, AppError> {
    if err.is_rejection() {
        Ok(Outcome::Rejected(ErrorResponse::from(&err)))
    } else {
        Err(err.into())
    }
}
