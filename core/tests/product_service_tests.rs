// tests/product_service_tests.rs
mod common;
use common::*;
use serial_test::serial;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use storefront::{
  DocumentStore, InMemoryDocumentStore, ProductPatch, ProductService, StorefrontError, PRODUCTS_COLLECTION,
};

fn service() -> (ProductService, InMemoryDocumentStore) {
  let store = InMemoryDocumentStore::new();
  (ProductService::new(Arc::new(store.clone())), store)
}

// createdAt has millisecond resolution; keep consecutive creations apart.
async fn tick() {
  tokio::time::sleep(Duration::from_millis(3)).await;
}

#[tokio::test]
#[serial]
async fn test_create_applies_defaults_regardless_of_input() {
  setup_tracing();
  let (service, _store) = service();
  let id = service.create(draft("Spark Plug", 12)).await.unwrap();

  let product = service.get_by_id(&id).await.unwrap().expect("created product should exist");
  assert_eq!(product.id, id);
  assert_eq!(product.rating, 5.0);
  assert_eq!(product.reviews, 0);
  assert!(product.is_active);
  assert!(product.in_stock());
  assert_eq!(product.stock_count(), 12);
  assert_eq!(product.created_at, product.updated_at);
  assert_eq!(product.original_price, Some(29.99));
  assert_eq!(product.specifications.get("Gap").map(String::as_str), Some("0.044 in"));
}

#[tokio::test]
#[serial]
async fn test_create_with_zero_stock_is_out_of_stock() {
  setup_tracing();
  let (service, _store) = service();
  let id = service.create(draft("Gasket", 0)).await.unwrap();
  let product = service.get_by_id(&id).await.unwrap().unwrap();
  assert!(!product.in_stock());
}

#[tokio::test]
#[serial]
async fn test_create_cleans_form_data() {
  setup_tracing();
  let (service, _store) = service();
  let mut messy = draft("Wiper Blade", 3);
  messy.specifications.insert("  Length ".to_string(), " 22 in ".to_string());
  messy.specifications.insert("Blank".to_string(), "   ".to_string());
  messy.features = vec!["All-season".to_string(), "  ".to_string(), String::new()];

  let id = service.create(messy).await.unwrap();
  let product = service.get_by_id(&id).await.unwrap().unwrap();
  assert_eq!(product.specifications.get("Length").map(String::as_str), Some("22 in"));
  assert!(!product.specifications.contains_key("Blank"));
  assert_eq!(product.features, vec!["All-season".to_string()]);
}

#[tokio::test]
#[serial]
async fn test_create_rejects_invalid_draft_without_writing() {
  setup_tracing();
  let (service, store) = service();

  let mut negative = draft("Bad Price", 1);
  negative.price = -1.0;
  assert!(matches!(service.create(negative).await, Err(StorefrontError::Validation(_))));

  let mut unknown = draft("Bad Category", 1);
  unknown.category = "hovercraft".to_string();
  assert!(matches!(service.create(unknown).await, Err(StorefrontError::Validation(_))));

  assert!(store.is_empty(PRODUCTS_COLLECTION));
}

#[tokio::test]
#[serial]
async fn test_list_active_newest_first() {
  setup_tracing();
  let (service, _store) = service();
  let first = service.create(draft("First", 1)).await.unwrap();
  tick().await;
  let second = service.create(draft("Second", 1)).await.unwrap();
  tick().await;
  let third = service.create(draft("Third", 1)).await.unwrap();

  let listed = service.list_active().await.unwrap();
  let listed_ids: Vec<&str> = ids(&listed);
  assert_eq!(listed_ids, vec![third.as_str(), second.as_str(), first.as_str()]);
}

#[tokio::test]
#[serial]
async fn test_soft_delete_hides_but_keeps_record() {
  setup_tracing();
  let (service, store) = service();
  let keep = service.create(draft("Keep", 1)).await.unwrap();
  let gone = service.create(draft("Gone", 1)).await.unwrap();

  service.soft_delete(&gone).await.unwrap();

  let listed = service.list_active().await.unwrap();
  assert_eq!(ids(&listed), vec![keep.as_str()]);

  // Still present in the store, just inactive.
  assert_eq!(store.len(PRODUCTS_COLLECTION), 2);
  let raw = store.get(PRODUCTS_COLLECTION, &gone).await.unwrap().unwrap();
  assert_eq!(raw.body["isActive"], serde_json::json!(false));
  let fetched = service.get_by_id(&gone).await.unwrap().unwrap();
  assert!(!fetched.is_active);
}

#[tokio::test]
#[serial]
async fn test_list_by_category_only_active_matches() {
  setup_tracing();
  let (service, _store) = service();
  let engine = service.create(draft("Plug", 1)).await.unwrap();
  let mut brake = draft("Pads", 1);
  brake.category = "brake-system".to_string();
  let brake = service.create(brake).await.unwrap();
  let retired = service.create(draft("Old Plug", 1)).await.unwrap();
  service.soft_delete(&retired).await.unwrap();

  let engine_parts = service.list_by_category("engine-parts").await.unwrap();
  assert_eq!(ids(&engine_parts), vec![engine.as_str()]);
  let brakes = service.list_by_category("brake-system").await.unwrap();
  assert_eq!(ids(&brakes), vec![brake.as_str()]);
  assert!(service.list_by_category("interior").await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_get_by_id_missing_is_none() {
  setup_tracing();
  let (service, _store) = service();
  assert_eq!(service.get_by_id("nope").await.unwrap(), None);
}

#[tokio::test]
#[serial]
async fn test_update_merges_only_present_fields() {
  setup_tracing();
  let (service, _store) = service();
  let id = service.create(draft("Spark Plug", 5)).await.unwrap();
  let before = service.get_by_id(&id).await.unwrap().unwrap();
  tick().await;

  let patch = ProductPatch {
    price: Some(19.99),
    description: Some("Now cheaper".to_string()),
    ..ProductPatch::default()
  };
  service.update(&id, patch).await.unwrap();

  let after = service.get_by_id(&id).await.unwrap().unwrap();
  assert_eq!(after.price, 19.99);
  assert_eq!(after.description, "Now cheaper");
  assert_eq!(after.name, before.name);
  assert_eq!(after.brand, before.brand);
  assert_eq!(after.stock_count(), 5);
  assert!(after.in_stock());
  assert_eq!(after.rating, 5.0);
  assert_eq!(after.created_at, before.created_at);
  assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
#[serial]
async fn test_update_stock_count_to_zero_flips_in_stock() {
  setup_tracing();
  let (service, store) = service();
  let id = service.create(draft("Spark Plug", 5)).await.unwrap();

  let patch = ProductPatch {
    stock_count: Some(0),
    ..ProductPatch::default()
  };
  service.update(&id, patch).await.unwrap();

  let raw = store.get(PRODUCTS_COLLECTION, &id).await.unwrap().unwrap();
  assert_eq!(raw.body["inStock"], serde_json::json!(false));
  assert_eq!(raw.body["stockCount"], serde_json::json!(0));
}

#[tokio::test]
#[serial]
async fn test_update_missing_product_is_not_found() {
  setup_tracing();
  let (service, _store) = service();
  let result = service.update("ghost", ProductPatch::default()).await;
  assert!(matches!(result, Err(StorefrontError::NotFound(_))));
  assert!(matches!(service.soft_delete("ghost").await, Err(StorefrontError::NotFound(_))));
  assert!(matches!(service.update_stock("ghost", 3).await, Err(StorefrontError::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn test_update_stock_sets_count_and_flag() {
  setup_tracing();
  let (service, _store) = service();
  let id = service.create(draft("Spark Plug", 0)).await.unwrap();

  service.update_stock(&id, 7).await.unwrap();
  let restocked = service.get_by_id(&id).await.unwrap().unwrap();
  assert_eq!(restocked.stock_count(), 7);
  assert!(restocked.in_stock());

  service.update_stock(&id, 0).await.unwrap();
  let sold_out = service.get_by_id(&id).await.unwrap().unwrap();
  assert!(!sold_out.in_stock());
}

#[tokio::test]
#[serial]
async fn test_search_covers_category_and_skips_inactive() {
  setup_tracing();
  let (service, _store) = service();
  let plug = service.create(draft("Spark Plug", 1)).await.unwrap();
  let mut pads = draft("Ceramic Pads", 1);
  pads.category = "brake-system".to_string();
  pads.brand = "StopTech".to_string();
  pads.description = "Quiet".to_string();
  let pads = service.create(pads).await.unwrap();
  let retired = service.create(draft("Retired Plug", 1)).await.unwrap();
  service.soft_delete(&retired).await.unwrap();

  // category id match
  let by_category = service.search("BRAKE").await.unwrap();
  assert_eq!(ids(&by_category), vec![pads.as_str()]);

  let by_name = service.search("plug").await.unwrap();
  assert_eq!(ids(&by_name), vec![plug.as_str()]);

  assert_eq!(service.search("").await.unwrap().len(), 2);
}

#[tokio::test]
#[serial]
async fn test_categories_are_distinct_and_sorted() {
  setup_tracing();
  let (service, _store) = service();
  for (name, category) in [
    ("Pads", "brake-system"),
    ("Plug", "engine-parts"),
    ("Rotor", "brake-system"),
    ("Mat", "interior"),
  ] {
    let mut d = draft(name, 1);
    d.category = category.to_string();
    service.create(d).await.unwrap();
  }
  let retired = {
    let mut d = draft("Jack", 1);
    d.category = "tools-equipment".to_string();
    service.create(d).await.unwrap()
  };
  service.soft_delete(&retired).await.unwrap();

  let categories = service.categories().await.unwrap();
  assert_eq!(categories, vec!["brake-system", "engine-parts", "interior"]);
}

#[tokio::test]
#[serial]
async fn test_store_failures_propagate_after_single_attempt() {
  setup_tracing();
  let store = Arc::new(FailingStore::default());
  let service = ProductService::new(store.clone());

  assert!(is_backend_error(&service.list_active().await.unwrap_err()));
  assert!(is_backend_error(&service.list_by_category("interior").await.unwrap_err()));
  assert!(is_backend_error(&service.get_by_id("x").await.unwrap_err()));
  assert!(is_backend_error(&service.create(draft("Plug", 1)).await.unwrap_err()));
  assert!(is_backend_error(&service.update("x", ProductPatch::default()).await.unwrap_err()));
  assert!(is_backend_error(&service.soft_delete("x").await.unwrap_err()));
  assert!(is_backend_error(&service.search("plug").await.unwrap_err()));
  assert!(is_backend_error(&service.categories().await.unwrap_err()));
  assert!(is_backend_error(&service.update_stock("x", 1).await.unwrap_err()));

  // one store call per operation: no retries
  assert_eq!(store.calls.load(Ordering::SeqCst), 9);
}
