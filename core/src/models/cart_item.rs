// core/src/models/cart_item.rs

use serde::{Deserialize, Serialize};

use super::product::Product;

/// A product held in a cart together with the chosen quantity.
/// On the wire the product fields are flattened next to `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  #[serde(flatten)]
  pub product: Product,
  pub quantity: u32,
}

impl CartItem {
  pub fn product_id(&self) -> &str {
    &self.product.id
  }

  pub fn line_total(&self) -> f64 {
    self.product.price * f64::from(self.quantity)
  }
}
