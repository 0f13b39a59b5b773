// server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::{order_history, place_order, CustomerInfo};
use tracing::{error, info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::extractors::SessionId;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequestPayload {
  pub customer_info: CustomerInfo,
}

#[instrument(name = "handler::checkout", skip(app_state, req_payload, session), fields(session = %session.as_str()))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  req_payload: web::Json<CheckoutRequestPayload>,
) -> Result<HttpResponse> {
  // One checkout per session at a time, so an order is never recorded twice.
  let Some(_checkout) = app_state.carts.begin_checkout(session.as_str()) else {
    warn!("Checkout already in progress for this session.");
    return Err(AppError::Conflict("A checkout is already in progress.".to_string()));
  };

  // Work on a copy: the session lock cannot be held across the processing delay.
  let mut cart = app_state.carts.snapshot(session.as_str());

  let order = place_order(
    &mut cart,
    req_payload.into_inner().customer_info,
    &app_state.storage,
    &app_state.pricing,
    app_state.config.checkout_delay,
  )
  .await
  .inspect_err(|e| error!(error = %e, "Checkout failed."))?;

  // Units added while the order was processed stay in the cart.
  let cart = app_state.carts.with_cart(session.as_str(), |cart| {
    cart.deduct(&order.items);
    cart.clone()
  });

  info!(order_id = %order.id, "Checkout completed.");
  Ok(HttpResponse::Created().json(json!({
      "order": order,
      "cart": cart,
  })))
}

#[instrument(name = "handler::list_orders", skip_all)]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let orders = order_history(&app_state.storage)?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}
