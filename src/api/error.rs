use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::product_actor::{ProductError, ValidationErrors};

/// Errors returned by the HTTP handlers.
///
/// Validation failures answer with the field map itself; every other kind
/// answers with `{"detail": "..."}`. Server-side causes are logged, never sent.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found.")]
    NotFound,
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),
    #[error("JSON parse error - {0}")]
    MalformedBody(String),
    #[error("Unsupported media type in request.")]
    UnsupportedMediaType,
    #[error("A server error occurred.")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) => ApiError::NotFound,
            ProductError::Rejected(reason) => ApiError::Validation(ValidationErrors::non_field(reason)),
            ProductError::DatabaseError(_) | ProductError::ActorCommunicationError(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
            other => ApiError::MalformedBody(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(errors) => json!(errors),
            ApiError::Internal(cause) => {
                error!(%cause, "Request failed");
                json!({ "detail": self.to_string() })
            }
            _ => json!({ "detail": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Validation(ValidationErrors::new()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MalformedBody("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UnsupportedMediaType.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(ApiError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_product_errors_map_to_api_errors() {
        assert!(matches!(ApiError::from(ProductError::NotFound("1".into())), ApiError::NotFound));
        assert!(matches!(
            ApiError::from(ProductError::DatabaseError("disk full".into())),
            ApiError::Internal(_)
        ));
        match ApiError::from(ProductError::Rejected("locked".into())) {
            ApiError::Validation(errors) => assert_eq!(errors.field("non_field_errors").unwrap(), ["locked"]),
            other => panic!("Unexpected error: {:?}", other),
        }
    }
}
