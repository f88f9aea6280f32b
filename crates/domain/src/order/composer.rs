//! Order composition: validate a request against the stores and persist it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::customer::Customer;
use crate::error::{DomainError, RepositoryError};
use crate::product::Product;
use crate::repository::{CustomerRepository, OrderRepository, ProductRepository};

use super::{
    CustomerId, Money, NewOrder, Order, OrderError, OrderLine, RequestedLine, StockPolicy, StockUpdate,
};

/// Turns a customer id plus requested product lines into a persisted order.
///
/// Every check runs before the first write. A rejected request therefore never
/// reaches the order store or the stock update.
pub struct OrderComposer<C, P, O> {
    customers: Arc<C>,
    products: Arc<P>,
    orders: Arc<O>,
    policy: StockPolicy,
}

impl<C, P, O> OrderComposer<C, P, O>
where
    C: CustomerRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    /// Creates a composer using the default stock policy.
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers: Arc::new(customers),
            products: Arc::new(products),
            orders: Arc::new(orders),
            policy: StockPolicy::default(),
        }
    }

    /// Replaces the stock policy.
    pub fn with_policy(mut self, policy: StockPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active stock policy.
    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Validates and persists an order.
    ///
    /// Checks run in a fixed order and the first violated rule is reported:
    /// request shape, customer, product resolution, duplicates, stock, amount.
    ///
    /// Dropping the returned future before the write stage cancels cleanly.
    /// Once the write stage has started it finishes on its own task.
    #[tracing::instrument(
        skip(self, lines),
        fields(customer_id = %customer_id, lines = lines.len(), policy = %self.policy)
    )]
    pub async fn create_order(
        &self,
        customer_id: &CustomerId,
        lines: Vec<RequestedLine>,
    ) -> Result<Order, DomainError> {
        let started = Instant::now();
        let result = self.compose(customer_id, lines).await;

        match &result {
            Ok(order) => {
                metrics::counter!("orders_created_total").increment(1);
                tracing::info!(order_id = %order.id, total = %order.total(), "Order created");
            }
            Err(DomainError::Order(err)) => {
                metrics::counter!("order_rejections_total", "kind" => err.kind().as_str())
                    .increment(1);
                tracing::warn!(kind = %err.kind(), error = %err, "Order rejected");
            }
            Err(err) => {
                tracing::error!(error = %err, "Order creation failed");
            }
        }
        metrics::histogram!("order_compose_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        result
    }

    async fn compose(
        &self,
        customer_id: &CustomerId,
        lines: Vec<RequestedLine>,
    ) -> Result<Order, DomainError> {
        check_request_shape(customer_id, &lines)?;

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| OrderError::CustomerNotFound(customer_id.clone()))?;

        let ids: Vec<_> = lines.iter().map(|l| l.product_id.clone()).collect();
        let resolved = self.products.find_by_ids(&ids).await?;
        tracing::debug!(resolved = resolved.len(), "Products resolved");

        let plan = plan_order(&lines, &resolved, self.policy)?;
        self.commit(customer, plan).await
    }

    /// Writes the order and, if the policy asks for it, the stock decrement.
    async fn commit(&self, customer: Customer, plan: OrderPlan) -> Result<Order, DomainError> {
        let orders = Arc::clone(&self.orders);
        let products = Arc::clone(&self.products);
        let new_order = NewOrder {
            customer,
            lines: plan.lines,
        };
        let stock_updates = plan.stock_updates;

        let task = tokio::spawn(
            async move {
                let order = orders.create(new_order).await?;
                if !stock_updates.is_empty() {
                    products.update_quantities(stock_updates).await?;
                }
                Ok::<_, RepositoryError>(order)
            }
            .in_current_span(),
        );

        let order = task
            .await
            .map_err(|e| RepositoryError::Interrupted(e.to_string()))??;
        Ok(order)
    }
}

/// Lines and stock writes for a request that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderPlan {
    pub(crate) lines: Vec<OrderLine>,
    pub(crate) stock_updates: Vec<StockUpdate>,
}

fn check_request_shape(customer_id: &CustomerId, lines: &[RequestedLine]) -> Result<(), OrderError> {
    if customer_id.is_blank() {
        return Err(OrderError::CustomerIdRequired);
    }
    if let Some(line) = lines.iter().find(|l| l.quantity == 0) {
        return Err(OrderError::InvalidQuantity {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
        });
    }
    Ok(())
}

/// Checks requested lines against resolved products and builds the order plan.
///
/// Missing products, duplicates, and stock violations are each reported for
/// the first offending line in request order.
pub(crate) fn plan_order(
    requested: &[RequestedLine],
    resolved: &[Product],
    policy: StockPolicy,
) -> Result<OrderPlan, OrderError> {
    if resolved.is_empty() {
        return Err(OrderError::NoProductsMatched);
    }

    let catalog: HashMap<_, _> = resolved.iter().map(|p| (&p.id, p)).collect();

    let mut matched = Vec::with_capacity(requested.len());
    for line in requested {
        match catalog.get(&line.product_id) {
            Some(product) => matched.push((line, *product)),
            None => return Err(OrderError::ProductNotFound(line.product_id.clone())),
        }
    }

    let mut seen = HashSet::with_capacity(requested.len());
    for line in requested {
        if !seen.insert(&line.product_id) {
            return Err(OrderError::DuplicateProduct(line.product_id.clone()));
        }
    }

    for (line, product) in &matched {
        policy.check(product, line.quantity)?;
    }

    let mut total = Money::zero();
    for (line, product) in &matched {
        total = product
            .price
            .checked_multiply(line.quantity)
            .and_then(|line_total| total.checked_add(line_total))
            .ok_or_else(|| OrderError::AmountOverflow(line.product_id.clone()))?;
    }

    let lines = matched
        .iter()
        .map(|(line, product)| OrderLine {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            unit_price: product.price,
        })
        .collect();

    let stock_updates = if policy.decrements_stock() {
        matched
            .iter()
            .map(|(line, product)| StockUpdate {
                product_id: product.id.clone(),
                quantity: product.quantity.saturating_sub(line.quantity),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(OrderPlan {
        lines,
        stock_updates,
    })
}
