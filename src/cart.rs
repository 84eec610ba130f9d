//! Cart
//!
//! A cart only ever holds items from one canteen. Adding an item from another
//! canteen is refused with [`CartError::CanteenConflict`]; the caller confirms with
//! the user and then calls [`Cart::replace_with`] to clear the cart and add it.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency every canteen prices in.
pub fn currency() -> &'static Currency {
    iso::INR
}

/// Errors related to cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The item belongs to a different canteen than the cart.
    #[error(
        "Your cart has items from canteen {current}. Clear it to add items from canteen {requested}."
    )]
    CanteenConflict {
        /// Canteen of the existing cart.
        current: String,
        /// Canteen of the rejected item.
        requested: String,
    },

    /// Price must be greater than zero.
    #[error("item {0} has an invalid price")]
    InvalidPrice(String),

    /// Quantity must be at least one.
    #[error("item {0} must have a quantity of at least one")]
    InvalidQuantity(String),

    /// The item is not in the cart.
    #[error("item {0} is not in the cart")]
    NotFound(String),

    /// The menu item is currently unavailable.
    #[error("{0} is currently unavailable")]
    Unavailable(String),

    /// Lines loaded from storage span more than one canteen.
    #[error("cart contains items from more than one canteen")]
    MixedCanteens,
}

/// A single line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Menu item identifier.
    #[serde(alias = "menuItemId", alias = "menuItem")]
    pub item_id: String,

    /// Menu item name.
    pub name: String,

    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Number of units.
    pub quantity: u32,

    /// Canteen the item is sold by.
    #[serde(alias = "canteen")]
    pub canteen_id: String,
}

impl CartLine {
    /// Price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    fn validate(&self) -> Result<(), CartError> {
        if self.price <= Decimal::ZERO {
            return Err(CartError::InvalidPrice(self.item_id.clone()));
        }

        if self.quantity == 0 {
            return Err(CartError::InvalidQuantity(self.item_id.clone()));
        }

        Ok(())
    }
}

/// The selected items of one canteen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartPayload")]
pub struct Cart {
    items: Vec<CartLine>,
}

#[derive(Debug, Deserialize)]
struct CartPayload {
    #[serde(default)]
    items: Vec<CartLine>,
}

impl TryFrom<CartPayload> for Cart {
    type Error = CartError;

    fn try_from(payload: CartPayload) -> Result<Self, Self::Error> {
        Self::from_lines(payload.items)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if any line is invalid or the lines span canteens.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Result<Self, CartError> {
        let mut cart = Self::new();

        for line in lines {
            line.validate()?;

            if cart
                .canteen_id()
                .is_some_and(|canteen| canteen != line.canteen_id)
            {
                return Err(CartError::MixedCanteens);
            }

            cart.merge(line);
        }

        Ok(cart)
    }

    /// Canteen of the items in the cart, if any.
    pub fn canteen_id(&self) -> Option<&str> {
        self.items.first().map(|line| line.canteen_id.as_str())
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    /// Look up a line by item id.
    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.items.iter().find(|line| line.item_id == item_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Cart total as money, for display.
    pub fn total_money(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.total(), currency())
    }

    /// Add a line, merging quantities when the item is already present.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CanteenConflict`] when the cart holds items from another
    /// canteen, leaving the cart unchanged, or a validation error for bad lines.
    pub fn add(&mut self, line: CartLine) -> Result<(), CartError> {
        line.validate()?;

        if let Some(current) = self.canteen_id()
            && current != line.canteen_id
        {
            return Err(CartError::CanteenConflict {
                current: current.to_string(),
                requested: line.canteen_id,
            });
        }

        self.merge(line);

        Ok(())
    }

    /// Clear the cart and add the line; the confirmed form of [`Cart::add`].
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad lines, leaving the cart unchanged.
    pub fn replace_with(&mut self, line: CartLine) -> Result<(), CartError> {
        line.validate()?;

        self.items.clear();
        self.items.push(line);

        Ok(())
    }

    /// Set the quantity of a line. A quantity of zero removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] when the item is not in the cart.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(item_id).map(|_removed| ());
        }

        let line = self
            .items
            .iter_mut()
            .find(|line| line.item_id == item_id)
            .ok_or_else(|| CartError::NotFound(item_id.to_string()))?;

        line.quantity = quantity;

        Ok(())
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] when the item is not in the cart.
    pub fn remove(&mut self, item_id: &str) -> Result<CartLine, CartError> {
        let position = self
            .items
            .iter()
            .position(|line| line.item_id == item_id)
            .ok_or_else(|| CartError::NotFound(item_id.to_string()))?;

        Ok(self.items.remove(position))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn merge(&mut self, line: CartLine) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.item_id == line.item_id)
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => self.items.push(line),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_decimal::Decimal;

    use super::CartLine;

    pub(crate) fn line(item_id: &str, canteen_id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            item_id: item_id.to_string(),
            name: item_id.to_string(),
            price: Decimal::from(price),
            quantity,
            canteen_id: canteen_id.to_string(),
        }
    }
}
