//! Checkout
//!
//! Validates the checkout form locally, submits the order and clears the cart once
//! the order is placed. The backend has the final say: a rejection of an order
//! that passed local checks is returned as-is.

use std::sync::Arc;

use canteen::{
    order_errors::{ClassifiedOrderError, ErrorPayload, OrderErrorKind, classify},
    orders::{CheckoutDetails, Order, OrderBuildError, PaymentMethod},
    priority::{Eligibility, PriorityReason, resolve},
    submission::SubmissionGate,
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    cart_store::CartStore,
    client::ApiError,
    context::AppContext,
    domain::{
        exams::{ExamsService, ExamsServiceError},
        orders::{OrdersService, OrdersServiceError},
    },
    session::Session,
};

/// Errors that stop checkout before an order is submitted.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Upcoming exams are needed for exam priority but could not be loaded.
    #[error("failed to load upcoming exams")]
    Exams(#[source] ExamsServiceError),
}

/// An order the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Order identifier.
    pub order_id: String,

    /// Amount charged.
    pub total: Decimal,

    /// Payment method.
    pub payment_method: PaymentMethod,
}

impl PlacedOrder {
    /// Total as money, for display.
    pub fn total_money(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.total, canteen::cart::currency())
    }

    /// Confirmation to show the user.
    pub fn notice(&self) -> String {
        format!(
            "Order {} placed. Total {}.",
            self.order_id,
            self.total_money()
        )
    }
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The order was placed and the cart cleared.
    Placed(PlacedOrder),

    /// There is nothing to order.
    EmptyCart,

    /// The priority section failed local checks; nothing was submitted.
    Invalid(Eligibility),

    /// The backend refused the order. The cart is unchanged.
    Rejected(ClassifiedOrderError),

    /// The backend accepted the request but its answer could not be read, so the
    /// order may exist. The cart is unchanged.
    Unconfirmed,

    /// Another submission is still in flight.
    AlreadySubmitting,
}

impl CheckoutOutcome {
    /// Shown for [`CheckoutOutcome::Unconfirmed`].
    pub const UNCONFIRMED_NOTICE: &str =
        "Your order may have been placed. Check your orders before ordering again.";
}

/// The checkout form's submit action.
pub struct Checkout {
    orders: Arc<dyn OrdersService>,
    exams: Arc<dyn ExamsService>,
    gate: SubmissionGate,
}

impl Checkout {
    /// Checkout backed by the application's services.
    pub fn new(ctx: &AppContext) -> Self {
        Self::with_services(Arc::clone(&ctx.orders), Arc::clone(&ctx.exams))
    }

    /// Checkout backed by the given services.
    pub fn with_services(orders: Arc<dyn OrdersService>, exams: Arc<dyn ExamsService>) -> Self {
        Self {
            orders,
            exams,
            gate: SubmissionGate::new(),
        }
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.gate.is_submitting()
    }

    /// Validate and submit the cart as an order.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if exam priority was requested and upcoming
    /// exams could not be loaded.
    pub async fn submit(
        &self,
        session: &Session,
        store: &mut CartStore,
        details: CheckoutDetails,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let Some(_submission) = self.gate.try_begin() else {
            warn!("checkout already in progress");

            return Ok(CheckoutOutcome::AlreadySubmitting);
        };

        if store.cart().is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let exams = if details.priority.enabled
            && details.priority.reason == Some(PriorityReason::Exam)
        {
            match self.exams.exams_next_24_hours().await {
                Ok(exams) => exams,
                Err(ExamsServiceError::Unauthorized) => {
                    return Ok(CheckoutOutcome::Rejected(ClassifiedOrderError::new(
                        OrderErrorKind::AuthenticationError,
                    )));
                }
                Err(error) => return Err(CheckoutError::Exams(error)),
            }
        } else {
            Vec::new()
        };

        let eligibility = resolve(
            session.role(),
            session.university_id(),
            &details.priority,
            &exams,
        );

        if !eligibility.allowed() {
            return Ok(CheckoutOutcome::Invalid(eligibility));
        }

        let order = match Order::from_cart(store.cart(), details) {
            Ok(order) => order,
            Err(OrderBuildError::EmptyCart) => return Ok(CheckoutOutcome::EmptyCart),
        };

        let total = order.total_amount;
        let payment_method = order.payment_method;

        match self.orders.create_order(order).await {
            Ok(order_id) => {
                if let Err(error) = store.clear().await {
                    warn!(%order_id, %error, "order placed but the cart could not be cleared");
                }

                info!(%order_id, %payment_method, "checkout complete");

                Ok(CheckoutOutcome::Placed(PlacedOrder {
                    order_id,
                    total,
                    payment_method,
                }))
            }
            Err(OrdersServiceError::Rejected(rejection)) => {
                warn!(kind = %rejection.kind(), "order rejected");

                Ok(CheckoutOutcome::Rejected(rejection))
            }
            Err(OrdersServiceError::Unauthorized) => Ok(CheckoutOutcome::Rejected(
                ClassifiedOrderError::new(OrderErrorKind::AuthenticationError),
            )),
            Err(OrdersServiceError::Api(error @ ApiError::Decode(_))) => {
                error!(%error, "order response could not be read");

                Ok(CheckoutOutcome::Unconfirmed)
            }
            Err(error) => {
                error!(%error, "order submission failed");

                Ok(CheckoutOutcome::Rejected(classify(
                    None,
                    &ErrorPayload::default(),
                )))
            }
        }
    }
}
