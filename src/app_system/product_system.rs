use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

use super::StorageConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::ProductClient;
use crate::domain::Product;
use crate::store::{MemoryStore, SqlStore, Store, StoreError};

/// The application system that owns the product actor.
///
/// Responsible for choosing the store, starting the actor, and handling shutdown.
pub struct ProductSystem {
    pub product_client: ProductClient,
    handle: JoinHandle<()>,
}

impl ProductSystem {
    /// Starts the product actor on the store selected by `config`.
    pub async fn start(config: &StorageConfig) -> Result<Self, StoreError> {
        let store: Box<dyn Store<Product>> = match &config.database_url {
            Some(url) => {
                let store = SqlStore::connect(url, config.max_connections).await?;
                info!(max_connections = config.max_connections, "Using PostgreSQL store");
                Box::new(store)
            }
            None => {
                info!("Using in-memory store");
                Box::new(MemoryStore::<Product>::new())
            }
        };
        Ok(Self::with_store(config.mailbox_size, store))
    }

    /// Starts the product actor on an already built store.
    pub fn with_store(mailbox_size: usize, store: Box<dyn Store<Product>>) -> Self {
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(mailbox_size, store);
        let product_client = ProductClient::new(product_resource_client);
        let handle = tokio::spawn(product_actor.run());

        Self { product_client, handle }
    }

    /// Waits for the actor to drain its mailbox and stop.
    ///
    /// The actor stops once every clone of the client is gone, so any router
    /// holding one must have been dropped before this resolves.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");
        drop(self.product_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(e);
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductCreate;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_memory_system_round_trip_and_shutdown() {
        let system = ProductSystem::start(&StorageConfig::default()).await.unwrap();

        let payload = ProductCreate { name: "Widget".into(), price: Decimal::new(1999, 2), stock: 10 };
        let created = system.product_client.create_product(payload).await.unwrap();
        assert_eq!(created.id, 1);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // requires DATABASE_URL
    async fn test_database_system_keeps_products_across_restarts() {
        let config = StorageConfig {
            database_url: Some(std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests")),
            ..StorageConfig::default()
        };

        let system = ProductSystem::start(&config).await.unwrap();
        let payload = ProductCreate { name: "Widget".into(), price: Decimal::new(1999, 2), stock: 10 };
        let created = system.product_client.create_product(payload).await.unwrap();
        system.shutdown().await.unwrap();

        let restarted = ProductSystem::start(&config).await.unwrap();
        let fetched = restarted.product_client.get_product(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        restarted.shutdown().await.unwrap();
    }
}
