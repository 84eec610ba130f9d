//! Payments service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    client::ApiClient,
    domain::payments::{
        errors::PaymentsServiceError,
        models::{GatewayResponse, NewPayment, PaymentHandle, PaymentVerification},
    },
};

#[derive(Debug, Clone)]
pub struct HttpPaymentsService {
    client: ApiClient,
}

impl HttpPaymentsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentsService for HttpPaymentsService {
    async fn create_payment_order(
        &self,
        order_id: String,
    ) -> Result<PaymentHandle, PaymentsServiceError> {
        let handle: PaymentHandle = self
            .client
            .post("/payments/create-order", &NewPayment { order_id })
            .await?;

        info!(gateway_order_id = %handle.gateway_order_id, "payment order created");

        Ok(handle)
    }

    async fn verify_payment(
        &self,
        response: GatewayResponse,
    ) -> Result<PaymentVerification, PaymentsServiceError> {
        let verification: PaymentVerification =
            self.client.post("/payments/verify", &response).await?;

        if verification.verified {
            info!(order_id = %response.order_id, "payment verified");
        } else {
            warn!(order_id = %response.order_id, "payment verification failed");
        }

        Ok(verification)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Create the gateway order for a placed order.
    async fn create_payment_order(
        &self,
        order_id: String,
    ) -> Result<PaymentHandle, PaymentsServiceError>;

    /// Forward the gateway's signed response for verification.
    async fn verify_payment(
        &self,
        response: GatewayResponse,
    ) -> Result<PaymentVerification, PaymentsServiceError>;
}
