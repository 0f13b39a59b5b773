// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::catalog::DEFAULT_RELATED_LIMIT;
use storefront::{related_products, CatalogQuery, CategoryFilter, Product, SortKey, CATEGORIES};
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::state::AppState;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
  pub term: Option<String>,
  pub category: Option<String>,
  pub min_price: Option<f64>,
  pub max_price: Option<f64>,
  pub sort: Option<String>,
}

impl ListProductsQuery {
  pub fn to_catalog_query(&self) -> CatalogQuery {
    let defaults = CatalogQuery::default();
    CatalogQuery {
      term: self.term.clone().unwrap_or_default(),
      category: self
        .category
        .as_deref()
        .map_or(CategoryFilter::All, CategoryFilter::parse),
      min_price: self.min_price.unwrap_or(defaults.min_price),
      max_price: self.max_price.unwrap_or(defaults.max_price),
      sort: self.sort.as_deref().map_or(SortKey::default(), SortKey::parse_or_default),
    }
  }
}

pub async fn list_categories_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "categories": CATEGORIES }))
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse> {
  let query = query_params.to_catalog_query();
  let active = app_state.products.list_active().await?;
  let products = query.apply(&active);

  info!(matched = products.len(), of = active.len(), sort = query.sort.as_str(), "Listed products.");
  Ok(HttpResponse::Ok().json(json!({
      "products": products,
      "count": products.len(),
  })))
}

// Soft-deleted products are hidden from the shop.
async fn fetch_active(app_state: &AppState, product_id: &str) -> Result<Product> {
  match app_state.products.get_by_id(product_id).await? {
    Some(product) if product.is_active => Ok(product),
    _ => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn get_product_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  let product = fetch_active(&app_state, &product_id).await?;
  info!("Product {} fetched successfully.", product_id);
  Ok(HttpResponse::Ok().json(json!({ "product": product })))
}

#[instrument(name = "handler::related_products", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn related_products_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  fetch_active(&app_state, &product_id).await?;
  let active = app_state.products.list_active().await?;
  let related = related_products(&active, &product_id, DEFAULT_RELATED_LIMIT);
  Ok(HttpResponse::Ok().json(json!({ "products": related })))
}
