// core/src/images.rs

//! Client for the hosted image service: unsigned multipart uploads and delivery URLs
//! with on-the-fly transformations.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::error::{StorefrontError, StorefrontResult};

/// Largest accepted upload, 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHostConfig {
  pub cloud_name: String,
  pub upload_preset: String,
  /// Upload API root, e.g. `https://api.cloudinary.com/v1_1`.
  pub api_base_url: String,
  /// Delivery root, e.g. `https://res.cloudinary.com`.
  pub delivery_base_url: String,
}

impl Default for ImageHostConfig {
  fn default() -> Self {
    Self {
      cloud_name: "demo".to_string(),
      upload_preset: "storefront_unsigned".to_string(),
      api_base_url: "https://api.cloudinary.com/v1_1".to_string(),
      delivery_base_url: "https://res.cloudinary.com".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
  pub file_name: String,
  pub content_type: String,
  pub bytes: Vec<u8>,
}

/// Response of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
  pub public_id: String,
  pub secure_url: String,
  pub url: String,
  pub format: String,
  pub width: u32,
  pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
  pub width: u32,
  pub height: u32,
  pub quality: String,
  pub format: String,
}

impl Default for TransformOptions {
  fn default() -> Self {
    Self {
      width: 400,
      height: 400,
      quality: "auto".to_string(),
      format: "auto".to_string(),
    }
  }
}

/// Client-side checks run before any request is made.
pub fn validate_image(file: &ImageFile) -> StorefrontResult<()> {
  if !file.content_type.starts_with("image/") {
    return Err(StorefrontError::validation(format!(
      "'{}' is not an image (content type {})",
      file.file_name, file.content_type
    )));
  }
  if file.bytes.len() > MAX_IMAGE_BYTES {
    return Err(StorefrontError::validation(format!(
      "'{}' is {} bytes; images must not exceed {} bytes",
      file.file_name,
      file.bytes.len(),
      MAX_IMAGE_BYTES
    )));
  }
  Ok(())
}

#[derive(Debug, Clone)]
pub struct ImageUploader {
  client: reqwest::Client,
  config: ImageHostConfig,
}

impl ImageUploader {
  pub fn new(config: ImageHostConfig) -> Self {
    Self::with_client(reqwest::Client::new(), config)
  }

  pub fn with_client(client: reqwest::Client, config: ImageHostConfig) -> Self {
    Self { client, config }
  }

  pub fn config(&self) -> &ImageHostConfig {
    &self.config
  }

  pub fn upload_endpoint(&self) -> String {
    format!(
      "{}/{}/image/upload",
      self.config.api_base_url.trim_end_matches('/'),
      self.config.cloud_name
    )
  }

  #[instrument(
    name = "images::upload",
    skip(self, file),
    fields(file_name = %file.file_name, content_type = %file.content_type, size = file.bytes.len())
  )]
  pub async fn upload(&self, file: ImageFile) -> StorefrontResult<UploadedImage> {
    if let Err(e) = validate_image(&file) {
      warn!(error = %e, "Rejected image before upload");
      return Err(e);
    }

    let part = Part::bytes(file.bytes)
      .file_name(file.file_name)
      .mime_str(&file.content_type)?;
    let form = Form::new()
      .part("file", part)
      .text("upload_preset", self.config.upload_preset.clone())
      .text("cloud_name", self.config.cloud_name.clone());

    let response = self
      .client
      .post(self.upload_endpoint())
      .multipart(form)
      .send()
      .await
      .inspect_err(|e| error!(error = %e, "Error uploading to image host"))?;

    let status = response.status();
    if !status.is_success() {
      error!(%status, "Image host rejected the upload");
      return Err(StorefrontError::Upload(format!("image host responded with {}", status)));
    }

    let uploaded: UploadedImage = response
      .json()
      .await
      .inspect_err(|e| error!(error = %e, "Image host returned an unreadable response"))?;
    info!(public_id = %uploaded.public_id, "Image uploaded.");
    Ok(uploaded)
  }

  /// Delivery URL for `public_id` with fill-crop, size, quality and format applied.
  /// Pure string composition; no request is made.
  pub fn optimized_url(&self, public_id: &str, options: &TransformOptions) -> String {
    format!(
      "{}/{}/image/upload/w_{},h_{},c_fill,q_{},f_{}/{}",
      self.config.delivery_base_url.trim_end_matches('/'),
      self.config.cloud_name,
      options.width,
      options.height,
      options.quality,
      options.format,
      public_id
    )
  }

  /// Deleting a hosted image needs the signed API and therefore a trusted backend;
  /// this client keeps the image and only records the request.
  pub fn request_deletion(&self, public_id: &str) {
    info!(public_id, "Image deletion must be handled by a trusted backend; hosted image kept.");
  }
}
