// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use storefront::ImageHostConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Postgres document store; the in-memory store is used when unset.
  pub database_url: Option<String>,

  pub image_host: ImageHostConfig,

  /// Directory for the order and contact lists; kept in memory when unset.
  pub local_storage_dir: Option<PathBuf>,

  pub checkout_delay: Duration,
  pub contact_delay: Duration,

  // Seeds sample products into an empty collection on startup
  pub seed_db: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      image_host: ImageHostConfig::default(),
      local_storage_dir: None,
      checkout_delay: storefront::checkout::DEFAULT_ORDER_PROCESSING_DELAY,
      contact_delay: storefront::checkout::DEFAULT_CONTACT_DELAY,
      seed_db: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source; unset variables take defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = Self::default();
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let server_host = get("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_var(&get, "SERVER_PORT")?.unwrap_or(defaults.server_port);
    let database_url = get("DATABASE_URL");

    let image_defaults = defaults.image_host;
    let image_host = ImageHostConfig {
      cloud_name: get("IMAGE_CLOUD_NAME").unwrap_or(image_defaults.cloud_name),
      upload_preset: get("IMAGE_UPLOAD_PRESET").unwrap_or(image_defaults.upload_preset),
      api_base_url: get("IMAGE_API_BASE").unwrap_or(image_defaults.api_base_url),
      delivery_base_url: get("IMAGE_DELIVERY_BASE").unwrap_or(image_defaults.delivery_base_url),
    };

    let local_storage_dir = get("LOCAL_STORAGE_DIR").map(PathBuf::from);
    let checkout_delay = parse_var::<u64>(&get, "CHECKOUT_DELAY_MS")?
      .map(Duration::from_millis)
      .unwrap_or(defaults.checkout_delay);
    let contact_delay = parse_var::<u64>(&get, "CONTACT_DELAY_MS")?
      .map(Duration::from_millis)
      .unwrap_or(defaults.contact_delay);
    let seed_db = parse_var(&get, "SEED_DB")?.unwrap_or(defaults.seed_db);

    tracing::info!("Application configuration loaded successfully.");
    // database_url may carry credentials; only log whether it is set.
    tracing::debug!(
      server_host = %server_host,
      server_port,
      database_configured = database_url.is_some(),
      cloud_name = %image_host.cloud_name,
      "Loaded config details"
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      image_host,
      local_storage_dir,
      checkout_delay,
      contact_delay,
      seed_db,
    })
  }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  get(name)
    .map(|raw| {
      raw
        .trim()
        .parse::<T>()
        .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e)))
    })
    .transpose()
}
