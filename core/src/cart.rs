// core/src/cart.rs

//! The shopper's pending order.
//!
//! A [`Cart`] is a plain owned value: whoever holds it (a UI state container, a
//! server-side session map) decides how it is shared. Every mutation recomputes the
//! derived `total` and `item_count`, so reads never observe stale aggregates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CartItem, Product};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredCart")]
pub struct Cart {
  items: Vec<CartItem>,
  total: f64,
  item_count: u64,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds one unit of `product`. An existing entry for the same id is incremented
  /// instead of duplicated. Stock limits are the caller's concern; a line saturates at
  /// `u32::MAX` units.
  pub fn add_item(&mut self, product: Product) {
    match self.items.iter_mut().find(|item| item.product.id == product.id) {
      Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
      None => self.items.push(CartItem { product, quantity: 1 }),
    }
    self.recompute();
  }

  /// Same as calling [`Cart::add_item`] `quantity` times.
  pub fn add_items(&mut self, product: Product, quantity: u32) {
    if quantity == 0 {
      return;
    }
    match self.items.iter_mut().find(|item| item.product.id == product.id) {
      Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
      None => self.items.push(CartItem { product, quantity }),
    }
    self.recompute();
  }

  /// Sets the quantity directly. Zero or negative removes the item; an unknown id is a no-op.
  pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
    if quantity <= 0 {
      self.remove_item(product_id);
      return;
    }
    let Some(item) = self.items.iter_mut().find(|item| item.product.id == product_id) else {
      debug!(product_id, "update_quantity ignored for product not in cart");
      return;
    };
    item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
    self.recompute();
  }

  pub fn remove_item(&mut self, product_id: &str) {
    let before = self.items.len();
    self.items.retain(|item| item.product.id != product_id);
    if self.items.len() != before {
      self.recompute();
    }
  }

  /// Takes `ordered` lines out of the cart, unit by unit. Lines that drop to zero are
  /// removed; units added after the order was taken stay.
  pub fn deduct(&mut self, ordered: &[CartItem]) {
    for line in ordered {
      if let Some(item) = self.items.iter_mut().find(|item| item.product.id == line.product.id) {
        item.quantity = item.quantity.saturating_sub(line.quantity);
      }
    }
    self.items.retain(|item| item.quantity > 0);
    self.recompute();
  }

  pub fn clear(&mut self) {
    self.items.clear();
    self.recompute();
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  pub fn total(&self) -> f64 {
    self.total
  }

  /// Sum of quantities, not the number of distinct entries.
  pub fn item_count(&self) -> u64 {
    self.item_count
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn quantity_of(&self, product_id: &str) -> Option<u32> {
    self
      .items
      .iter()
      .find(|item| item.product.id == product_id)
      .map(|item| item.quantity)
  }

  pub fn summary(&self, policy: &PricingPolicy) -> OrderSummary {
    policy.summarize(self.total, self.item_count)
  }

  fn recompute(&mut self) {
    self.total = self.items.iter().map(CartItem::line_total).sum();
    // u64 holds the sum of any number of u32 lines without wrapping.
    self.item_count = self.items.iter().map(|item| u64::from(item.quantity)).sum();
  }
}

// Aggregates are never trusted from the wire.
#[derive(Deserialize)]
struct StoredCart {
  #[serde(default)]
  items: Vec<CartItem>,
}

impl From<StoredCart> for Cart {
  fn from(stored: StoredCart) -> Self {
    let mut cart = Cart {
      items: stored.items,
      ..Cart::default()
    };
    cart.recompute();
    cart
  }
}

/// Shipping and tax rules applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
  pub free_shipping_threshold: f64,
  pub flat_shipping: f64,
  pub tax_rate: f64,
}

impl Default for PricingPolicy {
  fn default() -> Self {
    Self {
      free_shipping_threshold: 50.0,
      flat_shipping: 9.99,
      tax_rate: 0.08,
    }
  }
}

impl PricingPolicy {
  pub fn summarize(&self, subtotal: f64, item_count: u64) -> OrderSummary {
    let qualifies = subtotal >= self.free_shipping_threshold;
    let shipping = if qualifies { 0.0 } else { self.flat_shipping };
    let tax = subtotal * self.tax_rate;
    OrderSummary {
      item_count,
      subtotal,
      shipping,
      tax,
      grand_total: subtotal + shipping + tax,
      amount_to_free_shipping: if qualifies {
        0.0
      } else {
        self.free_shipping_threshold - subtotal
      },
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
  pub item_count: u64,
  pub subtotal: f64,
  pub shipping: f64,
  pub tax: f64,
  pub grand_total: f64,
  pub amount_to_free_shipping: f64,
}
