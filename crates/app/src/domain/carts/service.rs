//! Carts service.

use async_trait::async_trait;
use canteen::cart::Cart;
use mockall::automock;

use crate::{
    client::{ApiClient, path_segment},
    domain::carts::{
        errors::CartsServiceError,
        models::{CartResponse, NewCartItem, QuantityUpdate},
    },
};

#[derive(Debug, Clone)]
pub struct HttpCartsService {
    client: ApiClient,
}

impl HttpCartsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartsService for HttpCartsService {
    async fn get_cart(&self) -> Result<Cart, CartsServiceError> {
        let cart: CartResponse = self.client.get("/cart").await?;

        Ok(cart.into())
    }

    async fn add_item(&self, item: NewCartItem) -> Result<Cart, CartsServiceError> {
        let cart: CartResponse = self.client.post("/cart/items", &item).await?;

        Ok(cart.into())
    }

    async fn update_quantity(
        &self,
        item_id: String,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let cart: CartResponse = self
            .client
            .put(
                &format!("/cart/items/{}", path_segment(&item_id)),
                &QuantityUpdate { quantity },
            )
            .await?;

        Ok(cart.into())
    }

    async fn remove_item(&self, item_id: String) -> Result<Cart, CartsServiceError> {
        let cart: CartResponse = self
            .client
            .delete(&format!("/cart/items/{}", path_segment(&item_id)))
            .await?;

        Ok(cart.into())
    }

    async fn clear_cart(&self) -> Result<(), CartsServiceError> {
        self.client.delete_empty("/cart").await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the signed-in user's cart.
    async fn get_cart(&self) -> Result<Cart, CartsServiceError>;

    /// Add an item, returning the updated cart.
    async fn add_item(&self, item: NewCartItem) -> Result<Cart, CartsServiceError>;

    /// Set an item's quantity, returning the updated cart.
    async fn update_quantity(
        &self,
        item_id: String,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove an item, returning the updated cart.
    async fn remove_item(&self, item_id: String) -> Result<Cart, CartsServiceError>;

    /// Empty the cart.
    async fn clear_cart(&self) -> Result<(), CartsServiceError>;
}
