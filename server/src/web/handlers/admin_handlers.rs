// server/src/web/handlers/admin_handlers.rs

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::{admin_filter, ImageFile, InventoryStats, ProductDraft, ProductPatch, TransformOptions};
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::extractors::AdminAccess;

pub const FILE_NAME_HEADER: &str = "X-File-Name";

#[derive(Deserialize, Debug, Default)]
pub struct AdminProductsQuery {
  pub term: Option<String>,
  pub category: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockPayload {
  pub stock_count: u32,
}

#[derive(Deserialize, Debug, Default)]
pub struct ImageUrlQuery {
  pub width: Option<u32>,
  pub height: Option<u32>,
  pub quality: Option<String>,
  pub format: Option<String>,
}

impl ImageUrlQuery {
  fn to_options(&self) -> TransformOptions {
    let defaults = TransformOptions::default();
    TransformOptions {
      width: self.width.unwrap_or(defaults.width),
      height: self.height.unwrap_or(defaults.height),
      quality: self.quality.clone().unwrap_or(defaults.quality),
      format: self.format.clone().unwrap_or(defaults.format),
    }
  }
}

#[instrument(name = "handler::admin_list_products", skip(app_state, _admin))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  query_params: web::Query<AdminProductsQuery>,
) -> Result<HttpResponse> {
  let products = app_state.products.list_active().await?;
  let filtered = admin_filter(
    &products,
    query_params.term.as_deref().unwrap_or_default(),
    query_params.category.as_deref(),
  );
  Ok(HttpResponse::Ok().json(json!({
      "products": filtered,
      "count": filtered.len(),
  })))
}

#[instrument(name = "handler::admin_stats", skip_all)]
pub async fn stats_handler(app_state: web::Data<AppState>, _admin: AdminAccess) -> Result<HttpResponse> {
  let products = app_state.products.list_active().await?;
  Ok(HttpResponse::Ok().json(InventoryStats::compute(&products)))
}

#[instrument(name = "handler::admin_categories", skip_all)]
pub async fn categories_handler(app_state: web::Data<AppState>, _admin: AdminAccess) -> Result<HttpResponse> {
  let categories = app_state.products.categories().await?;
  Ok(HttpResponse::Ok().json(json!({ "categories": categories })))
}

#[instrument(name = "handler::create_product", skip(app_state, _admin, req_payload), fields(name = %req_payload.name))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  req_payload: web::Json<ProductDraft>,
) -> Result<HttpResponse> {
  let id = app_state.products.create(req_payload.into_inner()).await?;
  info!(product_id = %id, "Product created via admin API.");
  Ok(HttpResponse::Created().json(json!({ "id": id })))
}

#[instrument(name = "handler::update_product", skip(app_state, _admin, path, req_payload), fields(product_id = %path.as_str()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<String>,
  req_payload: web::Json<ProductPatch>,
) -> Result<HttpResponse> {
  let patch = req_payload.into_inner();
  if patch.is_empty() {
    return Err(AppError::Validation("No fields to update.".to_string()));
  }
  app_state.products.update(&path, patch).await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::delete_product", skip(app_state, _admin, path), fields(product_id = %path.as_str()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<String>,
) -> Result<HttpResponse> {
  app_state.products.soft_delete(&path).await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::update_stock", skip(app_state, _admin, path, req_payload), fields(product_id = %path.as_str()))]
pub async fn update_stock_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<String>,
  req_payload: web::Json<UpdateStockPayload>,
) -> Result<HttpResponse> {
  app_state.products.update_stock(&path, req_payload.stock_count).await?;
  Ok(HttpResponse::NoContent().finish())
}

/// Raw image upload: the body is the file, typed by `Content-Type` and named by `X-File-Name`.
#[instrument(name = "handler::upload_image", skip(app_state, _admin, req, body), fields(size = body.len()))]
pub async fn upload_image_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  req: HttpRequest,
  body: web::Bytes,
) -> Result<HttpResponse> {
  let header = |name: &str| {
    req
      .headers()
      .get(name)
      .and_then(|value| value.to_str().ok())
      .map(str::to_string)
      .unwrap_or_default()
  };
  let file_name = header(FILE_NAME_HEADER);
  let file = ImageFile {
    file_name: if file_name.is_empty() { "upload".to_string() } else { file_name },
    content_type: header(CONTENT_TYPE.as_str()),
    bytes: body.to_vec(),
  };

  let uploaded = app_state.images.upload(file).await?;
  let thumbnail = app_state
    .images
    .optimized_url(&uploaded.public_id, &TransformOptions::default());
  Ok(HttpResponse::Created().json(json!({
      "image": uploaded,
      "optimizedUrl": thumbnail,
  })))
}

#[instrument(name = "handler::image_url", skip(app_state, _admin, path), fields(public_id = %path.as_str()))]
pub async fn image_url_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<String>,
  query_params: web::Query<ImageUrlQuery>,
) -> HttpResponse {
  let url = app_state.images.optimized_url(&path, &query_params.to_options());
  HttpResponse::Ok().json(json!({ "url": url }))
}

#[instrument(name = "handler::delete_image", skip(app_state, _admin, path), fields(public_id = %path.as_str()))]
pub async fn delete_image_handler(
  app_state: web::Data<AppState>,
  _admin: AdminAccess,
  path: web::Path<String>,
) -> HttpResponse {
  app_state.images.request_deletion(&path);
  HttpResponse::Accepted().json(json!({
      "deleted": false,
      "message": "Hosted image deletion requires a signed backend request; the image was kept.",
  }))
}
