// tests/image_upload_tests.rs
mod common;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::*;
use serial_test::serial;
use std::net::SocketAddr;
use storefront::images::MAX_IMAGE_BYTES;
use storefront::{validate_image, ImageFile, ImageHostConfig, ImageUploader, StorefrontError, TransformOptions};

fn png(bytes: usize) -> ImageFile {
  ImageFile {
    file_name: "rotor.png".to_string(),
    content_type: "image/png".to_string(),
    bytes: vec![0u8; bytes],
  }
}

fn config_for(addr: SocketAddr) -> ImageHostConfig {
  ImageHostConfig {
    cloud_name: "demo".to_string(),
    upload_preset: "storefront_unsigned".to_string(),
    api_base_url: format!("http://{}/v1_1", addr),
    delivery_base_url: "https://res.cloudinary.com".to_string(),
  }
}

// Spawns a stand-in image host that answers every upload with `status` and `body`.
async fn spawn_host(status: StatusCode, body: serde_json::Value) -> SocketAddr {
  let app = Router::new().route(
    "/v1_1/demo/image/upload",
    post(move || {
      let body = body.clone();
      async move { (status, Json(body)) }
    }),
  );
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  addr
}

#[test]
fn test_validation_rejects_non_images() {
  let pdf = ImageFile {
    file_name: "manual.pdf".to_string(),
    content_type: "application/pdf".to_string(),
    bytes: vec![1, 2, 3],
  };
  assert!(matches!(validate_image(&pdf), Err(StorefrontError::Validation(_))));
}

#[test]
fn test_validation_size_limit_is_inclusive() {
  assert!(validate_image(&png(MAX_IMAGE_BYTES)).is_ok());
  assert!(matches!(
    validate_image(&png(MAX_IMAGE_BYTES + 1)),
    Err(StorefrontError::Validation(_))
  ));
}

#[test]
fn test_optimized_url_defaults_and_overrides() {
  let uploader = ImageUploader::new(ImageHostConfig::default());
  assert_eq!(
    uploader.optimized_url("parts/rotor", &TransformOptions::default()),
    "https://res.cloudinary.com/demo/image/upload/w_400,h_400,c_fill,q_auto,f_auto/parts/rotor"
  );

  let thumb = TransformOptions {
    width: 120,
    height: 80,
    quality: "60".to_string(),
    format: "webp".to_string(),
  };
  assert_eq!(
    uploader.optimized_url("parts/rotor", &thumb),
    "https://res.cloudinary.com/demo/image/upload/w_120,h_80,c_fill,q_60,f_webp/parts/rotor"
  );
}

#[test]
fn test_upload_endpoint_uses_cloud_name() {
  let uploader = ImageUploader::new(ImageHostConfig {
    api_base_url: "https://api.cloudinary.com/v1_1/".to_string(),
    cloud_name: "shop".to_string(),
    ..ImageHostConfig::default()
  });
  assert_eq!(uploader.upload_endpoint(), "https://api.cloudinary.com/v1_1/shop/image/upload");
}

#[tokio::test]
#[serial]
async fn test_upload_returns_hosted_image() {
  setup_tracing();
  let addr = spawn_host(
    StatusCode::OK,
    serde_json::json!({
      "public_id": "parts/rotor",
      "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/parts/rotor.png",
      "url": "http://res.cloudinary.com/demo/image/upload/v1/parts/rotor.png",
      "format": "png",
      "width": 800,
      "height": 600,
      "bytes": 1024
    }),
  )
  .await;
  let uploader = ImageUploader::new(config_for(addr));

  let uploaded = uploader.upload(png(1024)).await.unwrap();
  assert_eq!(uploaded.public_id, "parts/rotor");
  assert_eq!(uploaded.format, "png");
  assert_eq!((uploaded.width, uploaded.height), (800, 600));
}

#[tokio::test]
#[serial]
async fn test_upload_failure_status_is_upload_error() {
  setup_tracing();
  let addr = spawn_host(StatusCode::BAD_REQUEST, serde_json::json!({"error": {"message": "bad preset"}})).await;
  let uploader = ImageUploader::new(config_for(addr));

  let result = uploader.upload(png(16)).await;
  assert!(matches!(result, Err(StorefrontError::Upload(_))));
}

#[tokio::test]
#[serial]
async fn test_invalid_file_never_reaches_the_host() {
  setup_tracing();
  // Nothing listens here; a request would surface as an HTTP error instead.
  let uploader = ImageUploader::new(ImageHostConfig {
    api_base_url: "http://127.0.0.1:9/v1_1".to_string(),
    ..ImageHostConfig::default()
  });
  let mut file = png(16);
  file.content_type = "text/plain".to_string();

  assert!(matches!(uploader.upload(file).await, Err(StorefrontError::Validation(_))));
}
