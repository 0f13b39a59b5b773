// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::{Cart, Product};
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::extractors::SessionId;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: String,
  #[serde(default = "one")]
  pub quantity: u32,
}

fn one() -> u32 {
  1
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub quantity: i64,
}

pub(crate) fn cart_response(app_state: &AppState, cart: &Cart) -> HttpResponse {
  HttpResponse::Ok().json(json!({
      "cart": cart,
      "summary": cart.summary(&app_state.pricing),
  }))
}

async fn fetch_active(app_state: &AppState, product_id: &str) -> Result<Product> {
  match app_state.products.get_by_id(product_id).await? {
    Some(product) if product.is_active => Ok(product),
    _ => {
      warn!("Cart request for unknown product {}.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}

fn ensure_stock(product: &Product, wanted: u64) -> Result<()> {
  let available = u64::from(product.stock_count());
  if wanted > available {
    warn!(product_id = %product.id, wanted, available, "Cart quantity exceeds stock.");
    return Err(AppError::Validation(format!(
      "Only {} of {} available.",
      available, product.name
    )));
  }
  Ok(())
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip_all, fields(session = %session.as_str()))]
pub async fn get_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> HttpResponse {
  let cart = app_state.carts.snapshot(session.as_str());
  cart_response(&app_state, &cart)
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, session),
    fields(session = %session.as_str(), product_id = %req_payload.product_id, quantity = req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse> {
  let payload = req_payload.into_inner();
  if payload.quantity == 0 {
    return Err(AppError::Validation("Quantity must be at least 1.".to_string()));
  }

  let product = fetch_active(&app_state, &payload.product_id).await?;
  if !product.in_stock() {
    warn!("Add to cart for out-of-stock product {}.", payload.product_id);
    return Err(AppError::Validation(format!("{} is out of stock.", product.name)));
  }

  // Check and add under one lock so concurrent adds cannot both pass the stock check.
  let cart = app_state.carts.with_cart(session.as_str(), |cart| {
    let in_cart = u64::from(cart.quantity_of(&product.id).unwrap_or(0));
    ensure_stock(&product, in_cart + u64::from(payload.quantity))?;
    cart.add_items(product, payload.quantity);
    Ok::<_, AppError>(cart.clone())
  })?;
  info!(item_count = cart.item_count(), total = cart.total(), "Item added to cart.");
  Ok(cart_response(&app_state, &cart))
}

/// Sets a line's quantity. Zero or less removes the line; more than the product's
/// current stock is rejected and leaves the cart unchanged.
#[instrument(
    name = "handler::update_cart_item",
    skip(app_state, path, session, req_payload),
    fields(session = %session.as_str(), quantity = req_payload.quantity)
)]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  path: web::Path<String>,
  req_payload: web::Json<UpdateQuantityPayload>,
) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  let quantity = req_payload.quantity;
  if quantity > 0 {
    let product = fetch_active(&app_state, &product_id).await?;
    ensure_stock(&product, quantity.unsigned_abs())?;
  }
  let cart = app_state.carts.with_cart(session.as_str(), |cart| {
    cart.update_quantity(&product_id, quantity);
    cart.clone()
  });
  Ok(cart_response(&app_state, &cart))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, path, session), fields(session = %session.as_str()))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  path: web::Path<String>,
) -> HttpResponse {
  let product_id = path.into_inner();
  let cart = app_state.carts.with_cart(session.as_str(), |cart| {
    cart.remove_item(&product_id);
    cart.clone()
  });
  cart_response(&app_state, &cart)
}

#[instrument(name = "handler::clear_cart", skip_all, fields(session = %session.as_str()))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> HttpResponse {
  let cart = app_state.carts.with_cart(session.as_str(), |cart| {
    cart.clear();
    cart.clone()
  });
  info!("Cart cleared.");
  cart_response(&app_state, &cart)
}
