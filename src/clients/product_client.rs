use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::ProductError;

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, i64, ProductError, product, products);

impl ProductClient {
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::from)
    }
}
