// server/src/lib.rs

//! HTTP API for the auto-parts storefront: catalog browsing, session carts, simulated
//! checkout, and the admin dashboard's product and image management.

pub mod config;
pub mod db;
pub mod errors;
pub mod seed;
pub mod sessions;
pub mod state;
pub mod web;

use std::sync::Arc;

use sqlx::PgPool;
use storefront::{DocumentStore, ImageUploader, InMemoryDocumentStore, LocalStorage, PricingPolicy, ProductService};
use tracing::info;

use crate::config::AppConfig;
use crate::db::PgDocumentStore;
use crate::errors::Result;
use crate::sessions::SessionCarts;
use crate::state::AppState;

/// Largest request body accepted; leaves headroom over the image size limit.
pub const MAX_PAYLOAD_BYTES: usize = 6 * 1024 * 1024;

/// Wires the stores and services described by `config`.
pub async fn build_state(config: AppConfig) -> Result<AppState> {
  let store: Arc<dyn DocumentStore> = match &config.database_url {
    Some(url) => {
      let pool = PgPool::connect(url).await?;
      info!("Successfully connected to the database.");
      let store = PgDocumentStore::new(pool);
      store.ensure_schema().await?;
      Arc::new(store)
    }
    None => {
      info!("DATABASE_URL not set; using the in-memory product store.");
      Arc::new(InMemoryDocumentStore::new())
    }
  };

  let storage = match &config.local_storage_dir {
    Some(dir) => LocalStorage::in_directory(dir)?,
    None => LocalStorage::in_memory(),
  };

  Ok(state_with(store, storage, config))
}

/// Assembles the application state from already-built backends.
pub fn state_with(store: Arc<dyn DocumentStore>, storage: LocalStorage, config: AppConfig) -> AppState {
  AppState {
    products: ProductService::new(store),
    images: Arc::new(ImageUploader::new(config.image_host.clone())),
    storage: Arc::new(storage),
    carts: SessionCarts::new(),
    pricing: PricingPolicy::default(),
    config: Arc::new(config),
  }
}
