use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

use crate::envelope::{format_not_found, format_validation};
use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Unknown id, or a path segment that is not an id at all
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Malformed request body: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ProductError::NotFound(id.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::Validation(_) => ErrorKind::Validation,
            ProductError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            ProductError::Database(_) => ErrorKind::Database,
            ProductError::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    MalformedPayload,
    Database,
    Internal,
}

impl ErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MalformedPayload => StatusCode::BAD_REQUEST,
            ErrorKind::Database => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert ProductError to AppError for the infrastructure response format
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Validation(errors) => AppError::UnprocessableEntity(errors.to_string()),
            ProductError::MalformedPayload(e) => AppError::SerdeJson(e),
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status();

        match self {
            ProductError::NotFound(id) => {
                tracing::info!(product_id = %id, "Product not found");
                (status, Json(format_not_found().into_body())).into_response()
            }
            ProductError::Validation(errors) => {
                tracing::info!(fields = errors.len(), "Rejected product payload");
                (status, Json(format_validation(errors).into_body())).into_response()
            }
            infrastructure => {
                let mut response = AppError::from(infrastructure).into_response();
                *response.status_mut() = status;
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_table() {
        assert_eq!(ErrorKind::Validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::MalformedPayload.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Database.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorKind::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_not_found_renders_envelope() {
        let response = ProductError::not_found(99).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["errors"]["code"], "ERROR-2");
    }

    #[tokio::test]
    async fn test_validation_renders_envelope() {
        let mut errors = FieldErrors::new();
        errors.add("name", "El nombre del articulo no es enviado en la solicitud");

        let response = ProductError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await["errors"]["message"],
            json!({"name": ["El nombre del articulo no es enviado en la solicitud"]})
        );
    }

    #[tokio::test]
    async fn test_infrastructure_errors_use_app_error_body() {
        let err = serde_json::from_slice::<Value>(b"{oops").unwrap_err();
        let response = ProductError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "INVALID_JSON");

        let response = ProductError::from(DbErr::Custom("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await.get("errors").is_none());
    }
}
