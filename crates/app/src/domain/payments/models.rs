//! Payment Models

use canteen::cart::currency;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Gateway order to pay for a created order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHandle {
    /// Order id at the gateway.
    #[serde(alias = "id", alias = "orderId")]
    pub gateway_order_id: String,

    /// Amount to pay.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Public key the gateway checkout is opened with.
    #[serde(default, alias = "keyId")]
    pub key: Option<String>,
}

impl PaymentHandle {
    /// Amount as money, for display.
    pub fn amount_money(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.amount, currency())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewPayment {
    pub(crate) order_id: String,
}

/// The gateway's signed response after a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub order_id: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

/// Verdict of payment verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentVerification {
    #[serde(alias = "success")]
    pub verified: bool,

    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn handle_accepts_gateway_field_names() -> TestResult {
        let handle: PaymentHandle = serde_json::from_value(json!({
            "id": "order_Gw1",
            "amount": 120.5,
            "keyId": "pk_test"
        }))?;

        assert_eq!(handle.gateway_order_id, "order_Gw1");
        assert_eq!(handle.amount, Decimal::new(1205, 1));
        assert_eq!(handle.key.as_deref(), Some("pk_test"));

        Ok(())
    }

    #[test]
    fn verification_accepts_success_flag() -> TestResult {
        let verification: PaymentVerification =
            serde_json::from_value(json!({ "success": true }))?;

        assert!(verification.verified);

        Ok(())
    }
}
