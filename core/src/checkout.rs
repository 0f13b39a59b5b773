// core/src/checkout.rs

//! Simulated checkout and contact-form submission. Nothing is charged or sent; orders
//! and messages are appended to local storage after a short artificial delay.

use chrono::Utc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::cart::{Cart, PricingPolicy};
use crate::error::{StorefrontError, StorefrontResult};
use crate::local_storage::{LocalStorage, CONTACT_SUBMISSIONS_KEY, ORDERS_KEY};
use crate::models::{ContactForm, ContactSubmission, CustomerInfo, Order, OrderStatus};

pub const DEFAULT_ORDER_PROCESSING_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_CONTACT_DELAY: Duration = Duration::from_millis(1500);

/// Every checkout field is required.
pub fn validate_customer(info: &CustomerInfo) -> StorefrontResult<()> {
  let missing: Vec<&str> = info
    .fields()
    .iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| *name)
    .collect();
  if missing.is_empty() {
    Ok(())
  } else {
    Err(StorefrontError::validation(format!(
      "missing required fields: {}",
      missing.join(", ")
    )))
  }
}

/// Records the cart as a confirmed order and empties it.
///
/// The cart is only cleared after the order has been stored; on any error it is
/// returned to the caller exactly as it was.
#[instrument(
  name = "checkout::place_order",
  skip_all,
  fields(item_count = cart.item_count(), subtotal = cart.total())
)]
pub async fn place_order(
  cart: &mut Cart,
  customer: CustomerInfo,
  storage: &LocalStorage,
  policy: &PricingPolicy,
  processing_delay: Duration,
) -> StorefrontResult<Order> {
  if cart.is_empty() {
    warn!("Checkout attempted with an empty cart.");
    return Err(StorefrontError::validation("cart is empty"));
  }
  if let Err(e) = validate_customer(&customer) {
    warn!(error = %e, "Checkout form rejected.");
    return Err(e);
  }

  if !processing_delay.is_zero() {
    tokio::time::sleep(processing_delay).await;
  }

  let summary = cart.summary(policy);
  let now = Utc::now();
  let order = Order {
    id: now.timestamp_millis().to_string(),
    items: cart.items().to_vec(),
    total: summary.grand_total,
    customer_info: customer,
    order_date: now,
    status: OrderStatus::Confirmed,
  };

  storage
    .append(ORDERS_KEY, &order)
    .inspect_err(|e| error!(order_id = %order.id, error = %e, "Failed to record order"))?;
  cart.clear();

  info!(order_id = %order.id, total = order.total, "Order placed.");
  Ok(order)
}

/// Orders recorded so far, oldest first.
pub fn order_history(storage: &LocalStorage) -> StorefrontResult<Vec<Order>> {
  storage.read_list(ORDERS_KEY)
}

#[instrument(name = "contact::submit", skip_all, fields(email = %form.email))]
pub async fn submit_contact(
  form: ContactForm,
  storage: &LocalStorage,
  delay: Duration,
) -> StorefrontResult<ContactSubmission> {
  for (field, value) in [("name", &form.name), ("email", &form.email), ("message", &form.message)] {
    if value.trim().is_empty() {
      warn!(field, "Contact form rejected.");
      return Err(StorefrontError::validation(format!("{} is required", field)));
    }
  }

  if !delay.is_zero() {
    tokio::time::sleep(delay).await;
  }

  let now = Utc::now();
  let submission = ContactSubmission {
    form,
    timestamp: now,
    id: now.timestamp_millis().to_string(),
  };
  storage
    .append(CONTACT_SUBMISSIONS_KEY, &submission)
    .inspect_err(|e| error!(error = %e, "Failed to record contact submission"))?;
  info!(submission_id = %submission.id, "Contact message received.");
  Ok(submission)
}
