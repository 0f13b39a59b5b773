// server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::StorefrontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authorization Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Storefront Error: {source}")]
  Storefront {
    #[from]
    source: StorefrontError,
  },
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    if self.is_client_error() {
      tracing::warn!(application_error = %self, "Rejecting request");
    } else {
      tracing::error!(application_error = %self, "Responding with error");
    }
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Conflict(m) => HttpResponse::Conflict().json(json!({"error": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Storefront { source } => match source {
        StorefrontError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
        StorefrontError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
        StorefrontError::Upload(m) => {
          HttpResponse::BadGateway().json(json!({"error": "Image host error", "detail": m}))
        }
        StorefrontError::Http(_) => HttpResponse::BadGateway().json(json!({"error": "Image host unreachable"})),
        StorefrontError::Backend { .. } => {
          HttpResponse::InternalServerError().json(json!({"error": "Product store operation failed"}))
        }
        other => HttpResponse::InternalServerError()
          .json(json!({"error": "An internal error occurred", "detail": other.to_string()})),
      },
    }
  }
}

impl AppError {
  pub fn is_client_error(&self) -> bool {
    match self {
      AppError::Validation(_) | AppError::Auth(_) | AppError::NotFound(_) | AppError::Conflict(_) => true,
      AppError::Storefront { source } => source.is_client_error(),
      _ => false,
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
