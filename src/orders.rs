//! Orders

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine, currency},
    priority::{PriorityRequest, UnknownOption},
};

/// Errors raised while assembling an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderBuildError {
    /// There is nothing to order.
    #[error("your cart is empty")]
    EmptyCart,
}

/// How the order is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay at the counter.
    #[default]
    Cash,

    /// Card through the payment gateway.
    Card,

    /// UPI through the payment gateway.
    Upi,
}

impl PaymentMethod {
    /// Whether the hosted gateway checkout is needed after the order is created.
    pub fn requires_gateway(self) -> bool {
        !matches!(self, Self::Cash)
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            _ => Err(UnknownOption::new("payment method", value)),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Upi => "upi",
        })
    }
}

/// Checkout form fields outside the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// Payment method.
    pub payment_method: PaymentMethod,

    /// Priority section.
    pub priority: PriorityRequest,

    /// Where to deliver; pickup when empty.
    pub delivery_address: String,

    /// Notes for the kitchen.
    pub special_instructions: String,
}

/// An order ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Snapshot of the cart lines.
    pub items: Vec<CartLine>,

    /// Canteen preparing the order.
    pub canteen_id: String,

    /// Sum of line totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    /// Payment method.
    pub payment_method: PaymentMethod,

    /// Priority section.
    #[serde(flatten)]
    pub priority: PriorityRequest,

    /// Delivery address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub delivery_address: String,

    /// Notes for the kitchen.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub special_instructions: String,
}

impl Order {
    /// Snapshot a cart into an order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderBuildError::EmptyCart`] for an empty cart.
    pub fn from_cart(cart: &Cart, details: CheckoutDetails) -> Result<Self, OrderBuildError> {
        let Some(canteen_id) = cart.canteen_id() else {
            return Err(OrderBuildError::EmptyCart);
        };

        let priority = if details.priority.enabled {
            details.priority
        } else {
            PriorityRequest::none()
        };

        Ok(Self {
            items: cart.lines().to_vec(),
            canteen_id: canteen_id.to_string(),
            total_amount: cart.total(),
            payment_method: details.payment_method,
            priority,
            delivery_address: details.delivery_address.trim().to_string(),
            special_instructions: details.special_instructions.trim().to_string(),
        })
    }

    /// Total as money, for display.
    pub fn total_money(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.total_amount, currency())
    }
}

/// Lifecycle state of an order, owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet accepted.
    Pending,

    /// Accepted by the canteen.
    Confirmed,

    /// Being cooked.
    Preparing,

    /// Ready for pickup or delivery.
    Ready,

    /// Handed over.
    #[serde(alias = "completed")]
    Delivered,

    /// Cancelled by the user or canteen.
    #[serde(alias = "canceled")]
    Cancelled,

    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Whether the user may still cancel.
    pub fn can_cancel(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether the order has reached the user, which gates feedback.
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        })
    }
}

/// A line of a past order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Item name.
    pub name: String,

    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units ordered.
    pub quantity: u32,
}

/// An order as listed in the user's history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Order identifier.
    #[serde(alias = "_id")]
    pub id: String,

    /// Canteen that prepared it.
    #[serde(default, alias = "canteen")]
    pub canteen_id: String,

    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderLine>,

    /// Amount charged.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    /// Current status.
    pub status: OrderStatus,

    /// Whether it was a priority order.
    #[serde(default)]
    pub is_priority: bool,

    /// Payment method.
    #[serde(default)]
    pub payment_method: PaymentMethod,

    /// When it was placed.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl OrderSummary {
    /// Total as money, for display.
    pub fn total_money(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.total_amount, currency())
    }
}

/// The created order as echoed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    /// Order identifier.
    #[serde(alias = "_id")]
    pub id: String,
}

/// Response to order creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateOrderResponse {
    /// The created order.
    pub order: CreatedOrder,
}

/// Refund information returned on cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Refund {
    /// Whether the refund already went through.
    #[serde(default)]
    pub processed: bool,
}

/// Response to order cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Cancellation {
    /// Refund, for prepaid orders.
    #[serde(default)]
    pub refund: Option<Refund>,
}

impl Cancellation {
    /// Message to show the user.
    pub fn notice(self) -> &'static str {
        match self.refund {
            Some(Refund { processed: true }) => "Order cancelled. Your refund has been processed.",
            Some(Refund { processed: false }) => {
                "Order cancelled. Your refund is being processed."
            }
            None => "Order cancelled.",
        }
    }
}
