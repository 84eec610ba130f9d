//! Campus canteen client: API services, cart syncing and checkout.

pub mod cart_store;
pub mod checkout;
pub mod client;
pub mod config;
pub mod context;
pub mod domain;
pub mod local_cart;
pub mod observability;
pub mod session;

#[cfg(test)]
mod test;
