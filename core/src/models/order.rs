// core/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart_item::CartItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Confirmed,
  Shipped,
  Delivered,
  Cancelled,
}

/// Shipping, contact and (simulated) card details captured by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub city: String,
  pub state: String,
  pub zip_code: String,
  pub card_number: String,
  pub expiry_date: String,
  pub cvv: String,
  pub cardholder_name: String,
}

impl CustomerInfo {
  /// Field names paired with their values, in form order.
  pub fn fields(&self) -> [(&'static str, &str); 12] {
    [
      ("firstName", self.first_name.as_str()),
      ("lastName", self.last_name.as_str()),
      ("email", self.email.as_str()),
      ("phone", self.phone.as_str()),
      ("address", self.address.as_str()),
      ("city", self.city.as_str()),
      ("state", self.state.as_str()),
      ("zipCode", self.zip_code.as_str()),
      ("cardNumber", self.card_number.as_str()),
      ("expiryDate", self.expiry_date.as_str()),
      ("cvv", self.cvv.as_str()),
      ("cardholderName", self.cardholder_name.as_str()),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: String,
  pub items: Vec<CartItem>,
  pub total: f64,
  pub customer_info: CustomerInfo,
  pub order_date: DateTime<Utc>,
  pub status: OrderStatus,
}
