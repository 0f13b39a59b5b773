// server/src/web/handlers/contact_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use storefront::{submit_contact, ContactForm};
use tracing::{info, instrument};

use crate::errors::Result;
use crate::state::AppState;

#[instrument(name = "handler::contact", skip_all)]
pub async fn submit_contact_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<ContactForm>,
) -> Result<HttpResponse> {
  let submission = submit_contact(req_payload.into_inner(), &app_state.storage, app_state.config.contact_delay).await?;
  info!(submission_id = %submission.id, "Contact message recorded.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Thank you for your message. We'll get back to you soon.",
      "submission": submission,
  })))
}
