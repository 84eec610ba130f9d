//! Canteens and Menus
//!
//! The backend has sent menu availability in more than one shape over time. Every
//! accepted shape is folded into [`MenuItem::available`] here, at deserialization,
//! so nothing downstream has to care.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{CartError, CartLine};

/// A food outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canteen {
    /// Canteen identifier.
    #[serde(alias = "_id")]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Where on campus it is.
    #[serde(default)]
    pub location: String,

    /// Whether it is currently taking orders.
    #[serde(default = "default_true", alias = "open")]
    pub is_open: bool,
}

/// A dish on a canteen's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MenuItemPayload")]
pub struct MenuItem {
    /// Item identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Menu section.
    pub category: String,

    /// Canteen selling the item.
    pub canteen_id: String,

    /// Whether it can be ordered right now.
    pub available: bool,
}

impl MenuItem {
    /// Build a cart line for this item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Unavailable`] when the item cannot be ordered.
    pub fn cart_line(&self, quantity: u32) -> Result<CartLine, CartError> {
        if !self.available {
            return Err(CartError::Unavailable(self.name.clone()));
        }

        Ok(CartLine {
            item_id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity,
            canteen_id: self.canteen_id.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuItemPayload {
    #[serde(alias = "_id")]
    id: String,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default)]
    category: String,
    #[serde(default, alias = "canteen")]
    canteen_id: String,
    #[serde(default)]
    is_available: Option<bool>,
    #[serde(default)]
    availability: Option<Availability>,
    #[serde(default)]
    available: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Availability {
    Flag(bool),
    Label(String),
}

impl Availability {
    fn is_available(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Label(label) => !matches!(
                label.trim().to_ascii_lowercase().as_str(),
                "unavailable" | "out_of_stock" | "out of stock" | "sold out" | "false"
            ),
        }
    }
}

impl From<MenuItemPayload> for MenuItem {
    fn from(payload: MenuItemPayload) -> Self {
        let available = payload
            .is_available
            .or_else(|| payload.availability.as_ref().map(Availability::is_available))
            .or(payload.available)
            .unwrap_or(true);

        Self {
            id: payload.id,
            name: payload.name,
            price: payload.price,
            category: payload.category,
            canteen_id: payload.canteen_id,
            available,
        }
    }
}

/// A list response that is either a bare array or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    /// `[ ... ]`
    Bare(Vec<T>),

    /// `{ "<key>": [ ... ] }` under any of the usual keys.
    Wrapped {
        /// The wrapped list.
        #[serde(
            alias = "data",
            alias = "items",
            alias = "canteens",
            alias = "orders",
            alias = "exams"
        )]
        results: Vec<T>,
    },
}

impl<T> Listing<T> {
    /// The listed values, whichever shape they arrived in.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(values) | Self::Wrapped { results: values } => values,
        }
    }
}

fn default_true() -> bool {
    true
}
