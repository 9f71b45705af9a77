use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors surfaced by [`ProductClient`](crate::clients::ProductClient) operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product rejected: {0}")]
    Rejected(String),
    #[error("Product database error: {0}")]
    DatabaseError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Rejected(reason) => ProductError::Rejected(reason),
            FrameworkError::Store(message) => ProductError::DatabaseError(message),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ProductError::ActorCommunicationError(e.to_string())
            }
        }
    }
}
