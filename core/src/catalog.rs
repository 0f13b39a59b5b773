// core/src/catalog.rs

//! Filtering and ordering of the in-memory product list for the shop and admin views.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Product;

pub const DEFAULT_MAX_PRICE: f64 = 500.0;
pub const DEFAULT_RELATED_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
  #[default]
  #[serde(rename = "name")]
  Name,
  #[serde(rename = "price-low")]
  PriceLow,
  #[serde(rename = "price-high")]
  PriceHigh,
  #[serde(rename = "rating")]
  Rating,
}

impl SortKey {
  pub fn as_str(&self) -> &'static str {
    match self {
      SortKey::Name => "name",
      SortKey::PriceLow => "price-low",
      SortKey::PriceHigh => "price-high",
      SortKey::Rating => "rating",
    }
  }

  /// Lenient parse used for query strings: unknown keys order by name.
  pub fn parse_or_default(raw: &str) -> Self {
    raw.parse().unwrap_or_default()
  }

  fn compare(&self, a: &Product, b: &Product) -> Ordering {
    match self {
      SortKey::Name => a.name.cmp(&b.name),
      SortKey::PriceLow => a.price.total_cmp(&b.price),
      SortKey::PriceHigh => b.price.total_cmp(&a.price),
      SortKey::Rating => b.rating.total_cmp(&a.rating),
    }
  }
}

impl FromStr for SortKey {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "name" => Ok(SortKey::Name),
      "price-low" => Ok(SortKey::PriceLow),
      "price-high" => Ok(SortKey::PriceHigh),
      "rating" => Ok(SortKey::Rating),
      other => Err(format!("unknown sort key '{}'", other)),
    }
  }
}

impl fmt::Display for SortKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
  #[default]
  All,
  Only(String),
}

impl CategoryFilter {
  /// `"all"` (and an empty selection) is the sentinel for no category restriction.
  pub fn parse(raw: &str) -> Self {
    if raw.is_empty() || raw == "all" {
      CategoryFilter::All
    } else {
      CategoryFilter::Only(raw.to_string())
    }
  }

  pub fn matches(&self, category: &str) -> bool {
    match self {
      CategoryFilter::All => true,
      CategoryFilter::Only(selected) => selected == category,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
  pub term: String,
  pub category: CategoryFilter,
  pub min_price: f64,
  pub max_price: f64,
  pub sort: SortKey,
}

impl Default for CatalogQuery {
  fn default() -> Self {
    Self {
      term: String::new(),
      category: CategoryFilter::All,
      min_price: 0.0,
      max_price: DEFAULT_MAX_PRICE,
      sort: SortKey::Name,
    }
  }
}

impl CatalogQuery {
  pub fn matches(&self, product: &Product) -> bool {
    let term = self.term.to_lowercase();
    contains_any(&term, &[product.name.as_str(), product.description.as_str(), product.brand.as_str()])
      && self.category.matches(&product.category)
      && self.min_price <= product.price
      && product.price <= self.max_price
  }

  /// Matching products in a new, stably sorted vector. The input is left untouched.
  pub fn apply(&self, products: &[Product]) -> Vec<Product> {
    let mut matched: Vec<Product> = products.iter().filter(|p| self.matches(p)).cloned().collect();
    // `sort_by` is stable: equal keys keep their input order.
    matched.sort_by(|a, b| self.sort.compare(a, b));
    matched
  }
}

/// Case-insensitive substring test of an already-lowercased term against each field.
pub(crate) fn contains_any(term_lower: &str, fields: &[&str]) -> bool {
  fields.iter().any(|field| field.to_lowercase().contains(term_lower))
}

/// Other products in the same category, in input order.
pub fn related_products(products: &[Product], product_id: &str, limit: usize) -> Vec<Product> {
  let Some(category) = products.iter().find(|p| p.id == product_id).map(|p| p.category.as_str()) else {
    return Vec::new();
  };
  products
    .iter()
    .filter(|p| p.id != product_id && p.category == category)
    .take(limit)
    .cloned()
    .collect()
}

/// Dashboard filter: the term matches name or brand only; no category means any.
pub fn admin_filter(products: &[Product], term: &str, category: Option<&str>) -> Vec<Product> {
  let term = term.to_lowercase();
  products
    .iter()
    .filter(|p| term.is_empty() || contains_any(&term, &[p.name.as_str(), p.brand.as_str()]))
    .filter(|p| category.map_or(true, |c| c.is_empty() || p.category == c))
    .cloned()
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
  pub total_products: usize,
  pub in_stock_products: usize,
  /// Σ price × stock count.
  pub total_value: f64,
  /// `total_value / total_products`, zero for an empty list.
  pub average_price: f64,
}

impl InventoryStats {
  pub fn compute(products: &[Product]) -> Self {
    let total_products = products.len();
    let in_stock_products = products.iter().filter(|p| p.in_stock()).count();
    let total_value: f64 = products.iter().map(|p| p.price * f64::from(p.stock_count())).sum();
    let average_price = if total_products > 0 {
      total_value / total_products as f64
    } else {
      0.0
    };
    Self {
      total_products,
      in_stock_products,
      total_value,
      average_price,
    }
  }
}
