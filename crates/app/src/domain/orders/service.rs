//! Orders service.

use async_trait::async_trait;
use canteen::{
    menu::Listing,
    orders::{Cancellation, CreateOrderResponse, Order, OrderSummary},
};
use mockall::automock;
use serde_json::json;
use tracing::info;

use crate::{
    client::{ApiClient, path_segment},
    domain::orders::errors::OrdersServiceError,
};

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    client: ApiClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_order(&self, order: Order) -> Result<String, OrdersServiceError> {
        let response: CreateOrderResponse = self
            .client
            .post("/orders", &order)
            .await
            .map_err(OrdersServiceError::rejected)?;

        info!(
            order_id = %response.order.id,
            canteen_id = %order.canteen_id,
            priority = order.priority.enabled,
            "order placed"
        );

        Ok(response.order.id)
    }

    async fn user_orders(&self, email: String) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let orders: Listing<OrderSummary> = self
            .client
            .get(&format!("/orders/user/{}", path_segment(&email)))
            .await?;

        Ok(orders.into_vec())
    }

    async fn cancel_order(&self, order_id: String) -> Result<Cancellation, OrdersServiceError> {
        let cancellation: Option<Cancellation> = self
            .client
            .put(
                &format!("/orders/{}/cancel", path_segment(&order_id)),
                &json!({}),
            )
            .await
            .map_err(|error| match error.status() {
                Some(400 | 409) => OrdersServiceError::NotCancellable,
                _ => OrdersServiceError::from(error),
            })?;

        info!(%order_id, "order cancelled");

        Ok(cancellation.unwrap_or_default())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Submit an order, returning the id the backend assigned.
    async fn create_order(&self, order: Order) -> Result<String, OrdersServiceError>;

    /// List the orders placed by a user.
    async fn user_orders(&self, email: String) -> Result<Vec<OrderSummary>, OrdersServiceError>;

    /// Cancel an order.
    async fn cancel_order(&self, order_id: String) -> Result<Cancellation, OrdersServiceError>;
}
