//! # Mock Framework
//!
//! Utilities for testing clients and handlers in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_list`] to assert requests
//! and answer them with whatever result the test needs, failures included.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};

/// Creates a mock client and a receiver for asserting requests.
///
/// No `ResourceActor` runs behind the client: every request lands on `receiver`,
/// and the test decides how (and whether) to answer it.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreatePayload, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ProductClient;
    use crate::domain::{Product, ProductCreate, ProductPatch};
    use crate::product_actor::ProductError;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        // Test Create
        let create_task = tokio::spawn(async move {
            let payload = ProductCreate { name: "Test".to_string(), price: Decimal::new(100, 2), stock: 1 };
            client.create_product(payload).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        let product = Product::new(1, payload.name, payload.price, payload.stock);
        responder.send(Ok(product.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(product));
    }

    #[tokio::test]
    async fn test_dropped_responder_surfaces_as_communication_error() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let update_task = tokio::spawn(async move {
            let patch = ProductPatch { stock: Some(3), ..ProductPatch::default() };
            client.update_product(7, patch).await
        });

        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, 7);
        assert_eq!(patch.stock, Some(3));
        drop(responder);

        let result = update_task.await.unwrap();
        assert_eq!(result, Err(ProductError::ActorCommunicationError("Actor dropped".into())));
    }
}
