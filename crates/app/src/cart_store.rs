//! Cart store
//!
//! Cart mutations are applied locally first and then synced. Signed-in carts sync
//! to the server; when that fails the store replaces its state with a fresh read
//! from the server. Signed-out carts are written to the local cart file.

use std::sync::Arc;

use canteen::cart::{Cart, CartError, CartLine};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    domain::carts::{CartsService, CartsServiceError, models::NewCartItem},
    local_cart::{LocalCartError, LocalCartFile},
    session::Session,
};

/// Errors raised by cart store operations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The change breaks a cart rule; nothing was synced.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The cart could not be loaded.
    #[error("failed to load your cart")]
    Load(#[source] CartsServiceError),

    /// The server refused the change; the server's cart was reloaded.
    #[error("failed to update your cart, showing the saved cart instead")]
    SyncFailed(#[source] CartsServiceError),

    /// The server refused the change and could not be re-read.
    #[error("failed to update your cart")]
    ReloadFailed(#[source] CartsServiceError),

    /// The local cart file could not be used.
    #[error(transparent)]
    Local(#[from] LocalCartError),
}

enum Backend {
    Remote(Arc<dyn CartsService>),
    Local(LocalCartFile),
}

enum CartSync {
    Add(NewCartItem),
    Replace(NewCartItem),
    Update { item_id: String, quantity: u32 },
    Remove(String),
    Clear,
}

/// The user's cart and where it is persisted.
pub struct CartStore {
    cart: Cart,
    backend: Backend,
}

impl CartStore {
    /// Load the cart for a session: from the server when signed in, otherwise from
    /// the session's cart file.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the cart cannot be loaded.
    pub async fn open(
        session: &Session,
        carts: Arc<dyn CartsService>,
    ) -> Result<Self, CartStoreError> {
        if session.is_authenticated() {
            let cart = carts.get_cart().await.map_err(CartStoreError::Load)?;

            return Ok(Self::remote(carts, cart));
        }

        let file = LocalCartFile::new(session.cart_file());

        let cart = match file.load() {
            Ok(cart) => cart,
            Err(error @ LocalCartError::Corrupt { .. }) => {
                warn!(%error, "discarding unreadable cart file");

                Cart::new()
            }
            Err(error) => return Err(error.into()),
        };

        Ok(Self::local(file, cart))
    }

    /// A store syncing to the server.
    pub fn remote(carts: Arc<dyn CartsService>, cart: Cart) -> Self {
        Self {
            cart,
            backend: Backend::Remote(carts),
        }
    }

    /// A store persisting to a local file.
    pub fn local(file: LocalCartFile, cart: Cart) -> Self {
        Self {
            cart,
            backend: Backend::Local(file),
        }
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CanteenConflict`] without syncing when the cart holds
    /// another canteen's items, or a sync error.
    pub async fn add(&mut self, line: CartLine) -> Result<(), CartStoreError> {
        let item = NewCartItem::from(&line);

        self.cart.add(line)?;

        self.sync(CartSync::Add(item)).await
    }

    /// Clear the cart and add a line from another canteen.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the line is invalid or the sync fails.
    pub async fn replace_with(&mut self, line: CartLine) -> Result<(), CartStoreError> {
        let item = NewCartItem::from(&line);

        self.cart.replace_with(line)?;

        self.sync(CartSync::Replace(item)).await
    }

    /// Set a line's quantity; zero removes it.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the item is not in the cart or the sync fails.
    pub async fn update_quantity(
        &mut self,
        item_id: &str,
        quantity: u32,
    ) -> Result<(), CartStoreError> {
        self.cart.update_quantity(item_id, quantity)?;

        let change = if quantity == 0 {
            CartSync::Remove(item_id.to_string())
        } else {
            CartSync::Update {
                item_id: item_id.to_string(),
                quantity,
            }
        };

        self.sync(change).await
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the item is not in the cart or the sync fails.
    pub async fn remove(&mut self, item_id: &str) -> Result<(), CartStoreError> {
        self.cart.remove(item_id)?;

        self.sync(CartSync::Remove(item_id.to_string())).await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the sync fails.
    pub async fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();

        self.sync(CartSync::Clear).await
    }

    async fn sync(&mut self, change: CartSync) -> Result<(), CartStoreError> {
        let carts = match &self.backend {
            Backend::Local(file) => return Ok(file.save(&self.cart)?),
            Backend::Remote(carts) => Arc::clone(carts),
        };

        match push(carts.as_ref(), change).await {
            Ok(server_cart) => {
                if let Some(server_cart) = server_cart {
                    self.cart = server_cart;
                }

                info!(lines = self.cart.len(), "cart synced");

                Ok(())
            }
            Err(sync_error) => {
                warn!(error = %sync_error, "cart sync failed, reloading");

                match carts.get_cart().await {
                    Ok(cart) => {
                        self.cart = cart;

                        Err(CartStoreError::SyncFailed(sync_error))
                    }
                    Err(reload_error) => {
                        error!(error = %reload_error, "cart reload failed");

                        Err(CartStoreError::ReloadFailed(sync_error))
                    }
                }
            }
        }
    }
}

async fn push(
    carts: &dyn CartsService,
    change: CartSync,
) -> Result<Option<Cart>, CartsServiceError> {
    match change {
        CartSync::Add(item) => carts.add_item(item).await.map(Some),
        CartSync::Replace(item) => {
            carts.clear_cart().await?;

            carts.add_item(item).await.map(Some)
        }
        CartSync::Update { item_id, quantity } => {
            carts.update_quantity(item_id, quantity).await.map(Some)
        }
        CartSync::Remove(item_id) => carts.remove_item(item_id).await.map(Some),
        CartSync::Clear => carts.clear_cart().await.map(|()| None),
    }
}
