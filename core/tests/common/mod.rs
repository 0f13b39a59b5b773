// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use storefront::{
  CustomerInfo, Document, DocumentBody, DocumentQuery, DocumentStore, Product, ProductDraft, StorefrontError,
  StorefrontResult,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::Level;

// --- Product Fixtures ---
pub fn product(id: &str, name: &str, price: f64) -> Product {
  Product::new(id, name, "Acme", price, "engine-parts").with_stock(10)
}

/// A small catalog with varied brands, categories, prices and ratings.
pub fn sample_catalog() -> Vec<Product> {
  vec![
    Product::new("p1", "Ceramic Brake Pads", "StopTech", 49.99, "brake-system")
      .with_description("Low-dust pads for daily driving")
      .with_stock(25)
      .with_rating(4.5),
    Product::new("p2", "Oil Filter", "Bosch", 12.5, "engine-parts")
      .with_description("Premium filter media")
      .with_stock(100)
      .with_rating(4.0),
    Product::new("p3", "Performance Rotor", "Brembo", 189.0, "brake-system")
      .with_description("Drilled and slotted, pairs with any brake kit")
      .with_stock(0)
      .with_rating(5.0),
    Product::new("p4", "Shock Absorber", "Bilstein", 129.0, "suspension")
      .with_description("Gas-charged monotube")
      .with_stock(8)
      .with_rating(4.5),
    Product::new("p5", "Racing Seat", "BrakeLine Interiors", 720.0, "interior")
      .with_description("Bucket seat")
      .with_stock(2)
      .with_rating(3.5),
  ]
}

pub fn draft(name: &str, stock_count: u32) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    brand: "Bosch".to_string(),
    price: 24.99,
    original_price: Some(29.99),
    description: "Iridium spark plug".to_string(),
    image: "https://example.com/plug.jpg".to_string(),
    image_public_id: None,
    category: "engine-parts".to_string(),
    stock_count,
    specifications: BTreeMap::from([("Gap".to_string(), "0.044 in".to_string())]),
    features: vec!["Long life".to_string()],
  }
}

pub fn customer() -> CustomerInfo {
  CustomerInfo {
    first_name: "Sam".to_string(),
    last_name: "Rivera".to_string(),
    email: "sam@example.com".to_string(),
    phone: "555-0100".to_string(),
    address: "1 Main St".to_string(),
    city: "Springfield".to_string(),
    state: "IL".to_string(),
    zip_code: "62701".to_string(),
    card_number: "4242424242424242".to_string(),
    expiry_date: "12/30".to_string(),
    cvv: "123".to_string(),
    cardholder_name: "Sam Rivera".to_string(),
  }
}

// --- A store whose every call fails ---
#[derive(Default)]
pub struct FailingStore {
  pub calls: AtomicUsize,
}

impl FailingStore {
  fn fail<T>(&self) -> StorefrontResult<T> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Err(anyhow::anyhow!("connection refused").into())
  }
}

#[async_trait]
impl DocumentStore for FailingStore {
  async fn insert(&self, _collection: &str, _body: DocumentBody) -> StorefrontResult<String> {
    self.fail()
  }

  async fn get(&self, _collection: &str, _id: &str) -> StorefrontResult<Option<Document>> {
    self.fail()
  }

  async fn update(&self, _collection: &str, _id: &str, _fields: DocumentBody) -> StorefrontResult<()> {
    self.fail()
  }

  async fn query(&self, _collection: &str, _query: &DocumentQuery) -> StorefrontResult<Vec<Document>> {
    self.fail()
  }
}

pub fn is_backend_error(err: &StorefrontError) -> bool {
  matches!(err, StorefrontError::Backend { .. })
}

pub fn ids(products: &[Product]) -> Vec<&str> {
  products.iter().map(|p| p.id.as_str()).collect()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
