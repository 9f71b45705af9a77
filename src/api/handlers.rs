use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, instrument};

use super::error::ApiError;
use super::extract::RequestData;
use crate::clients::ProductClient;
use crate::domain::Product;
use crate::product_actor::{validate_create, validate_update};

#[derive(Clone)]
pub struct AppState {
    pub products: ProductClient,
}

impl AppState {
    pub fn new(products: ProductClient) -> Self {
        Self { products }
    }
}

/// Body errors are held back so handlers can report a missing row first.
pub type JsonBody = Result<RequestData, ApiError>;

/// Lookup ids that are not integers cannot match any row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::NotFound)
}

#[instrument(skip(state))]
pub async fn list_productos(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.list_products().await?;
    Ok(Json(products))
}

#[instrument(skip(state, body))]
pub async fn create_producto(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let RequestData(body) = body?;
    let payload = validate_create(&body)?;
    let product = state.products.create_product(payload).await?;
    info!(id = product.id, name = %product, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state))]
pub async fn retrieve_producto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let product = state.products.get_product(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(product))
}

#[instrument(skip(state, body))]
pub async fn update_producto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<Product>, ApiError> {
    apply_update(&state, &id, body, false).await
}

#[instrument(skip(state, body))]
pub async fn partial_update_producto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<Product>, ApiError> {
    apply_update(&state, &id, body, true).await
}

/// Shared by PUT and PATCH. Existence is checked before the body, so an
/// unknown id is reported as such even when the body is also invalid.
async fn apply_update(state: &AppState, raw_id: &str, body: JsonBody, partial: bool) -> Result<Json<Product>, ApiError> {
    let id = parse_id(raw_id)?;
    if state.products.get_product(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let RequestData(body) = body?;
    let patch = validate_update(&body, partial)?;
    let product = state.products.update_product(id, patch).await?;
    info!(id, partial, "Product updated");
    Ok(Json(product))
}

#[instrument(skip(state))]
pub async fn destroy_producto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.products.delete_product(id).await?;
    info!(id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
