use std::fmt::{Debug, Display};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

use crate::store::{Store, StoreError};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and DTOs)
// =============================================================================

/// Identifier types the store can issue in sequence.
pub trait SequentialId: Sized {
    fn first() -> Self;
    fn successor(&self) -> Self;
}

impl SequentialId for i64 {
    fn first() -> Self {
        1
    }

    fn successor(&self) -> Self {
        self + 1
    }
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Ord + Clone + Send + Sync + Display + Debug + SequentialId;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---
    // Returning Err rejects the request; the store is left untouched.

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

impl From<StoreError> for FrameworkError {
    fn from(e: StoreError) -> Self {
        FrameworkError::Store(e.to_string())
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Box<dyn Store<T>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, store: Box<dyn Store<T>>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, store };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Serves requests until every [`ResourceClient`] has been dropped.
    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(self.handle_get(id).await);
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(self.handle_list().await);
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id).await);
                }
            }
        }
        info!("ResourceActor stopped");
    }

    #[instrument(skip(self, payload))]
    async fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let id = self.store.next_id().await?;
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Rejected)?;
        if let Err(reason) = item.on_create() {
            warn!(%id, %reason, "Create rejected by hook");
            return Err(FrameworkError::Rejected(reason));
        }
        self.store.insert(item.clone()).await.inspect_err(|e| error!(error = %e, "Insert failed"))?;
        info!(%id, "Item created");
        Ok(item)
    }

    #[instrument(fields(id = %id), skip(self, id))]
    async fn handle_get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let item = self.store.get(&id).await?;
        if item.is_none() {
            debug!("Item not found");
        }
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn handle_list(&self) -> Result<Vec<T>, FrameworkError> {
        let items = self.store.list().await?;
        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    #[instrument(fields(id = %id), skip(self, id, patch))]
    async fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let Some(mut item) = self.store.get(&id).await? else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(reason) = item.on_update(patch) {
            warn!(%reason, "Update rejected by hook");
            return Err(FrameworkError::Rejected(reason));
        }
        self.store.update(item.clone()).await.inspect_err(|e| error!(error = %e, "Update failed"))?;
        info!("Item updated");
        Ok(item)
    }

    #[instrument(fields(id = %id), skip(self, id))]
    async fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let Some(item) = self.store.get(&id).await? else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(reason) = item.on_delete() {
            warn!(%reason, "Delete rejected by hook");
            return Err(FrameworkError::Rejected(reason));
        }
        self.store.remove(&id).await.inspect_err(|e| error!(error = %e, "Delete failed"))?;
        info!("Item deleted");
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R: Send>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T> + Send,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
