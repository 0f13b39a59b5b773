// server/src/web/extractors.rs

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::errors::AppError;

pub const SESSION_HEADER: &str = "X-Session-ID";
pub const ADMIN_HEADER: &str = "X-Admin";

const MAX_SESSION_ID_LEN: usize = 128;

/// The shopper session a cart belongs to, taken from the `X-Session-ID` header.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

impl SessionId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl FromRequest for SessionId {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let session = req
      .headers()
      .get(SESSION_HEADER)
      .and_then(|value| value.to_str().ok())
      .map(str::trim)
      .filter(|id| !id.is_empty() && id.len() <= MAX_SESSION_ID_LEN);
    match session {
      Some(id) => ready(Ok(SessionId(id.to_string()))),
      None => {
        warn!("SessionId extractor: Missing or invalid {} header.", SESSION_HEADER);
        ready(Err(AppError::Validation(format!(
          "A non-empty {} header is required.",
          SESSION_HEADER
        ))))
      }
    }
  }
}

/// Gate for admin routes.
///
/// The storefront has no accounts; the admin dashboard sets `X-Admin: true` from a
/// client-side toggle, so this is a routing guard rather than authentication.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequest for AdminAccess {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let granted = req
      .headers()
      .get(ADMIN_HEADER)
      .and_then(|value| value.to_str().ok())
      .map_or(false, |value| value.trim().eq_ignore_ascii_case("true"));
    if granted {
      ready(Ok(AdminAccess))
    } else {
      warn!("AdminAccess extractor: {} header not set.", ADMIN_HEADER);
      ready(Err(AppError::Auth("Admin access required.".to_string())))
    }
  }
}
