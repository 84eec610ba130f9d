//! Cart Models

use canteen::cart::{Cart, CartLine};
use serde::{Deserialize, Serialize};

/// Item to add to the server-side cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub menu_item_id: String,
    pub quantity: u32,
    pub canteen_id: String,
}

impl From<&CartLine> for NewCartItem {
    fn from(line: &CartLine) -> Self {
        Self {
            menu_item_id: line.item_id.clone(),
            quantity: line.quantity,
            canteen_id: line.canteen_id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuantityUpdate {
    pub(crate) quantity: u32,
}

/// Cart responses come either bare or wrapped in `{ "cart": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CartResponse {
    Wrapped { cart: Cart },
    Bare(Cart),
}

impl From<CartResponse> for Cart {
    fn from(response: CartResponse) -> Self {
        match response {
            CartResponse::Wrapped { cart } | CartResponse::Bare(cart) => cart,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cart_response_accepts_wrapped_and_bare_carts() -> TestResult {
        let line = json!({ "menuItemId": "a", "name": "Tea", "price": 10, "quantity": 1, "canteenId": "x" });

        let wrapped: CartResponse = serde_json::from_value(json!({ "cart": { "items": [line.clone()] } }))?;
        let bare: CartResponse = serde_json::from_value(json!({ "items": [line] }))?;

        assert_eq!(Cart::from(wrapped).len(), 1);
        assert_eq!(Cart::from(bare).len(), 1);

        Ok(())
    }
}
