// core/src/models/product.rs

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::category::find_category;

/// A sellable catalog entry as stored in the `products` collection.
///
/// `in_stock` is derived from `stock_count` and has no setter of its own; every path
/// that changes the stock count goes through [`Product::set_stock_count`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  /// Document id. Empty until the store assigns one, and never written into the document body.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub id: String,
  pub name: String,
  pub brand: String,
  pub price: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_price: Option<f64>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub image: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_public_id: Option<String>,
  pub category: String,
  #[serde(default)]
  in_stock: bool,
  #[serde(default)]
  stock_count: u32,
  #[serde(default)]
  pub rating: f64,
  #[serde(default)]
  pub reviews: u32,
  #[serde(default)]
  pub specifications: BTreeMap<String, String>,
  #[serde(default)]
  pub features: Vec<String>,
  #[serde(default = "default_active")]
  pub is_active: bool,
  #[serde(default = "Utc::now", with = "chrono::serde::ts_milliseconds")]
  pub created_at: DateTime<Utc>,
  #[serde(default = "Utc::now", with = "chrono::serde::ts_milliseconds")]
  pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
  true
}

impl Product {
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    brand: impl Into<String>,
    price: f64,
    category: impl Into<String>,
  ) -> Self {
    let now = Utc::now().trunc_subsecs(3);
    Self {
      id: id.into(),
      name: name.into(),
      brand: brand.into(),
      price,
      original_price: None,
      description: String::new(),
      image: String::new(),
      image_public_id: None,
      category: category.into(),
      in_stock: false,
      stock_count: 0,
      rating: 0.0,
      reviews: 0,
      specifications: BTreeMap::new(),
      features: Vec::new(),
      is_active: true,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_stock(mut self, stock_count: u32) -> Self {
    self.set_stock_count(stock_count);
    self
  }

  pub fn with_rating(mut self, rating: f64) -> Self {
    self.rating = rating;
    self
  }

  pub fn in_stock(&self) -> bool {
    self.in_stock
  }

  pub fn stock_count(&self) -> u32 {
    self.stock_count
  }

  pub fn set_stock_count(&mut self, stock_count: u32) {
    self.stock_count = stock_count;
    self.in_stock = stock_count > 0;
  }

  /// Builds a fresh product from admin form data with the creation defaults applied.
  /// Timestamps are stored with millisecond precision.
  pub fn from_draft(draft: ProductDraft, now: DateTime<Utc>) -> Self {
    let now = now.trunc_subsecs(3);
    let mut product = Self {
      id: String::new(),
      name: draft.name,
      brand: draft.brand,
      price: draft.price,
      original_price: draft.original_price,
      description: draft.description,
      image: draft.image,
      image_public_id: draft.image_public_id.filter(|id| !id.is_empty()),
      category: draft.category,
      in_stock: false,
      stock_count: 0,
      rating: 5.0,
      reviews: 0,
      specifications: draft.specifications,
      features: draft.features,
      is_active: true,
      created_at: now,
      updated_at: now,
    };
    product.set_stock_count(draft.stock_count);
    product
  }

  /// Decodes a stored document body, re-deriving `in_stock` from the stored count.
  pub fn from_document(id: &str, body: serde_json::Map<String, serde_json::Value>) -> StorefrontResult<Self> {
    let mut product: Product = serde_json::from_value(serde_json::Value::Object(body))?;
    product.id = id.to_string();
    let stock_count = product.stock_count;
    product.set_stock_count(stock_count);
    Ok(product)
  }

  /// The document body written to the store (no `id` field).
  pub fn to_document(&self) -> StorefrontResult<serde_json::Map<String, serde_json::Value>> {
    match serde_json::to_value(self)? {
      serde_json::Value::Object(mut map) => {
        map.remove("id");
        Ok(map)
      }
      _ => Err(StorefrontError::validation("product did not serialize to an object")),
    }
  }
}

/// Admin-editable product fields, as submitted by the product form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
  pub name: String,
  pub brand: String,
  pub price: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_price: Option<f64>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub image: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_public_id: Option<String>,
  pub category: String,
  #[serde(default)]
  pub stock_count: u32,
  #[serde(default)]
  pub specifications: BTreeMap<String, String>,
  #[serde(default)]
  pub features: Vec<String>,
}

impl ProductDraft {
  /// Trims specification pairs (dropping blank ones) and drops blank features.
  pub fn clean(mut self) -> Self {
    self.specifications = clean_specifications(self.specifications);
    self.features = clean_features(self.features);
    self
  }

  pub fn validate(&self) -> StorefrontResult<()> {
    validate_text("name", &self.name)?;
    validate_text("brand", &self.brand)?;
    validate_price("price", self.price)?;
    if let Some(original) = self.original_price {
      validate_price("originalPrice", original)?;
    }
    validate_category(&self.category)
  }
}

/// Partial product update. Fields left as `None` are not sent to the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub brand: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub price: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_price: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_public_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stock_count: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub specifications: Option<BTreeMap<String, String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub features: Option<Vec<String>>,
}

impl ProductPatch {
  pub fn is_empty(&self) -> bool {
    *self == ProductPatch::default()
  }

  pub fn clean(mut self) -> Self {
    self.specifications = self.specifications.map(clean_specifications);
    self.features = self.features.map(clean_features);
    self
  }

  pub fn validate(&self) -> StorefrontResult<()> {
    if let Some(name) = &self.name {
      validate_text("name", name)?;
    }
    if let Some(brand) = &self.brand {
      validate_text("brand", brand)?;
    }
    if let Some(price) = self.price {
      validate_price("price", price)?;
    }
    if let Some(original) = self.original_price {
      validate_price("originalPrice", original)?;
    }
    if let Some(category) = &self.category {
      validate_category(category)?;
    }
    Ok(())
  }
}

impl From<ProductDraft> for ProductPatch {
  fn from(draft: ProductDraft) -> Self {
    Self {
      name: Some(draft.name),
      brand: Some(draft.brand),
      price: Some(draft.price),
      original_price: draft.original_price,
      description: Some(draft.description),
      image: Some(draft.image),
      image_public_id: draft.image_public_id,
      category: Some(draft.category),
      stock_count: Some(draft.stock_count),
      specifications: Some(draft.specifications),
      features: Some(draft.features),
    }
  }
}

fn clean_specifications(specs: BTreeMap<String, String>) -> BTreeMap<String, String> {
  specs
    .into_iter()
    .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
    .filter(|(key, value)| !key.is_empty() && !value.is_empty())
    .collect()
}

fn clean_features(features: Vec<String>) -> Vec<String> {
  features.into_iter().filter(|f| !f.trim().is_empty()).collect()
}

fn validate_text(field: &str, value: &str) -> StorefrontResult<()> {
  if value.trim().is_empty() {
    return Err(StorefrontError::validation(format!("{} is required", field)));
  }
  Ok(())
}

fn validate_price(field: &str, value: f64) -> StorefrontResult<()> {
  if !value.is_finite() || value < 0.0 {
    return Err(StorefrontError::validation(format!(
      "{} must be a non-negative number, got {}",
      field, value
    )));
  }
  Ok(())
}

fn validate_category(category: &str) -> StorefrontResult<()> {
  if find_category(category).is_none() {
    return Err(StorefrontError::validation(format!("unknown category '{}'", category)));
  }
  Ok(())
}
