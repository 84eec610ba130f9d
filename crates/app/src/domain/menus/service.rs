//! Menus service.

use async_trait::async_trait;
use canteen::menu::{Canteen, Listing, MenuItem};
use mockall::automock;

use crate::{
    client::{ApiClient, path_segment},
    domain::menus::errors::MenusServiceError,
};

#[derive(Debug, Clone)]
pub struct HttpMenusService {
    client: ApiClient,
}

impl HttpMenusService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MenusService for HttpMenusService {
    async fn list_canteens(&self) -> Result<Vec<Canteen>, MenusServiceError> {
        let canteens: Listing<Canteen> = self.client.get("/canteens").await?;

        Ok(canteens.into_vec())
    }

    async fn menu(&self, canteen_id: String) -> Result<Vec<MenuItem>, MenusServiceError> {
        let items: Listing<MenuItem> = self
            .client
            .get(&format!("/menu/canteen/{}", path_segment(&canteen_id)))
            .await?;

        // Some menus omit the canteen on each item.
        Ok(items
            .into_vec()
            .into_iter()
            .map(|mut item| {
                if item.canteen_id.is_empty() {
                    item.canteen_id.clone_from(&canteen_id);
                }

                item
            })
            .collect())
    }
}

#[automock]
#[async_trait]
pub trait MenusService: Send + Sync {
    /// List every canteen.
    async fn list_canteens(&self) -> Result<Vec<Canteen>, MenusServiceError>;

    /// A canteen's menu.
    async fn menu(&self, canteen_id: String) -> Result<Vec<MenuItem>, MenusServiceError>;
}
