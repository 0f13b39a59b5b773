// server/src/state.rs
use crate::config::AppConfig;
use crate::sessions::SessionCarts;
use std::sync::Arc;
use storefront::{ImageUploader, LocalStorage, PricingPolicy, ProductService};

#[derive(Clone)]
pub struct AppState {
  pub products: ProductService,
  pub images: Arc<ImageUploader>,
  pub storage: Arc<LocalStorage>,
  pub carts: SessionCarts,
  pub pricing: PricingPolicy,
  pub config: Arc<AppConfig>, // Share loaded config
}
