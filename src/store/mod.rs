//! Persistence backends for [`ResourceActor`](crate::actor_framework::ResourceActor).
//!
//! The actor owns exactly one store and calls it one request at a time, so
//! implementations take `&mut self` for writes and need no internal locking.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::SqlStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::actor_framework::Entity;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Row already exists: {0}")]
    Duplicate(String),
    #[error("Row not found: {0}")]
    Missing(String),
}

/// Generic table of entities keyed by `T::Id`.
#[async_trait]
pub trait Store<T: Entity>: Send + Sync + 'static {
    /// Issues the identifier for the next row. Identifiers are never reissued,
    /// even when the row is never inserted.
    async fn next_id(&mut self) -> Result<T::Id, StoreError>;

    async fn insert(&mut self, item: T) -> Result<(), StoreError>;

    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError>;

    /// All rows in ascending id order, which is also insertion order.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Replaces an existing row.
    async fn update(&mut self, item: T) -> Result<(), StoreError>;

    async fn remove(&mut self, id: &T::Id) -> Result<Option<T>, StoreError>;
}
