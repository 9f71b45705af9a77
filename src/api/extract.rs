use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{Map, Value};

use super::error::ApiError;

/// Parsed request body.
///
/// A zero-length body is read as an empty object whatever its content type,
/// so a bare PATCH changes nothing and a bare POST reports every required
/// field. Any other body must be JSON sent as `application/json`.
#[derive(Debug)]
pub struct RequestData(pub Value);

impl<S> FromRequest<S> for RequestData
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content_type = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;

        if bytes.is_empty() {
            return Ok(Self(Value::Object(Map::new())));
        }
        if !json_content_type {
            return Err(ApiError::UnsupportedMediaType);
        }
        let Json(value) = Json::<Value>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}
