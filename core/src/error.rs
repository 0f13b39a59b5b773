// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Image upload failed: {0}")]
  Upload(String),

  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Local storage error for key '{key}': {message}")]
  Storage { key: String, message: String },

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Document store backend error. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl StorefrontError {
  pub fn validation(message: impl Into<String>) -> Self {
    StorefrontError::Validation(message.into())
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    StorefrontError::NotFound(message.into())
  }

  /// True for failures caused by the caller's input rather than by a backend.
  pub fn is_client_error(&self) -> bool {
    matches!(self, StorefrontError::Validation(_) | StorefrontError::NotFound(_))
  }
}

// Store implementations report through anyhow; keep an already-typed error intact.
impl From<AnyhowError> for StorefrontError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<StorefrontError>() {
      Ok(typed) => typed,
      Err(err) => StorefrontError::Backend { source: err },
    }
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
