//! HTTP surface for the product resource.

mod error;
mod extract;
mod handlers;

pub use handlers::AppState;

use axum::routing::{get, MethodRouter};
use axum::Router;
use tower_http::trace::TraceLayer;

use handlers::*;

/// Collection routes; each is also served with a trailing slash.
const COLLECTION: &str = "/productos";
const DETAIL: &str = "/productos/{id}";

fn collection_routes() -> MethodRouter<AppState> {
    get(list_productos).post(create_producto)
}

fn detail_routes() -> MethodRouter<AppState> {
    get(retrieve_producto)
        .put(update_producto)
        .patch(partial_update_producto)
        .delete(destroy_producto)
}

/// Builds the dispatch table:
///
/// | verb   | path               | handler                   |
/// |--------|--------------------|---------------------------|
/// | GET    | `/productos`       | `list_productos`          |
/// | POST   | `/productos`       | `create_producto`         |
/// | GET    | `/productos/{id}`  | `retrieve_producto`       |
/// | PUT    | `/productos/{id}`  | `update_producto`         |
/// | PATCH  | `/productos/{id}`  | `partial_update_producto` |
/// | DELETE | `/productos/{id}`  | `destroy_producto`        |
/// | GET    | `/health`          | `health_check`            |
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(COLLECTION, collection_routes())
        .route(&format!("{COLLECTION}/"), collection_routes())
        .route(DETAIL, detail_routes())
        .route(&format!("{DETAIL}/"), detail_routes())
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
