//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    client::{ApiClient, ApiError},
    config::ApiConfig,
    domain::{
        carts::{CartsService, HttpCartsService},
        exams::{ExamsService, HttpExamsService},
        feedback::{FeedbackService, HttpFeedbackService},
        menus::{HttpMenusService, MenusService},
        orders::{HttpOrdersService, OrdersService},
        payments::{HttpPaymentsService, PaymentsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build api client")]
    Client(#[source] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
    pub carts: Arc<dyn CartsService>,
    pub exams: Arc<dyn ExamsService>,
    pub menus: Arc<dyn MenusService>,
    pub payments: Arc<dyn PaymentsService>,
    pub feedback: Arc<dyn FeedbackService>,
}

impl AppContext {
    /// Build application context from API settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppInitError> {
        let client = ApiClient::new(&config.api_url, config.api_token.clone(), config.timeout())
            .map_err(AppInitError::Client)?;

        Ok(Self {
            orders: Arc::new(HttpOrdersService::new(client.clone())),
            carts: Arc::new(HttpCartsService::new(client.clone())),
            exams: Arc::new(HttpExamsService::new(client.clone())),
            menus: Arc::new(HttpMenusService::new(client.clone())),
            payments: Arc::new(HttpPaymentsService::new(client.clone())),
            feedback: Arc::new(HttpFeedbackService::new(client)),
        })
    }
}
