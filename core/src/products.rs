// core/src/products.rs

//! CRUD façade over the `products` collection used by the admin tools and the shop.
//!
//! Every operation is a single attempt: failures are logged and returned to the caller
//! unchanged. Products are never hard-deleted; [`ProductService::soft_delete`] only
//! clears `isActive`, which removes the product from the listing queries.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::catalog::contains_any;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{Product, ProductDraft, ProductPatch};
use crate::store::{Direction, DocumentBody, DocumentQuery, DocumentStore};

pub const PRODUCTS_COLLECTION: &str = "products";

#[derive(Clone)]
pub struct ProductService {
  store: Arc<dyn DocumentStore>,
}

impl ProductService {
  pub fn new(store: Arc<dyn DocumentStore>) -> Self {
    Self { store }
  }

  /// Active products, newest first.
  #[instrument(name = "products::list_active", skip(self))]
  pub async fn list_active(&self) -> StorefrontResult<Vec<Product>> {
    let query = DocumentQuery::new()
      .where_eq("isActive", true)
      .order_by("createdAt", Direction::Descending);
    log_failure("list_active", self.fetch(&query).await)
  }

  #[instrument(name = "products::list_by_category", skip(self))]
  pub async fn list_by_category(&self, category: &str) -> StorefrontResult<Vec<Product>> {
    let query = DocumentQuery::new()
      .where_eq("category", category)
      .where_eq("isActive", true)
      .order_by("createdAt", Direction::Descending);
    log_failure("list_by_category", self.fetch(&query).await)
  }

  /// `Ok(None)` when no document has this id. Inactive products are still returned.
  #[instrument(name = "products::get_by_id", skip(self))]
  pub async fn get_by_id(&self, id: &str) -> StorefrontResult<Option<Product>> {
    let result = match self.store.get(PRODUCTS_COLLECTION, id).await {
      Ok(Some(doc)) => Product::from_document(&doc.id, doc.body).map(Some),
      Ok(None) => Ok(None),
      Err(e) => Err(e),
    };
    log_failure("get_by_id", result)
  }

  /// Creates a product from form data. Rating starts at 5.0 with no reviews, the product
  /// is active, and both timestamps are now. Returns the new id.
  #[instrument(name = "products::create", skip(self, draft), fields(name = %draft.name))]
  pub async fn create(&self, draft: ProductDraft) -> StorefrontResult<String> {
    let draft = draft.clean();
    if let Err(e) = draft.validate() {
      warn!(error = %e, "Rejected product draft");
      return Err(e);
    }
    let product = Product::from_draft(draft, Utc::now());
    let result = match product.to_document() {
      Ok(body) => self.store.insert(PRODUCTS_COLLECTION, body).await,
      Err(e) => Err(e),
    };
    let id = log_failure("create", result)?;
    info!(product_id = %id, "Product created.");
    Ok(id)
  }

  /// Merges the fields present in `patch`. A stock count in the patch (zero included)
  /// also rewrites `inStock`.
  #[instrument(name = "products::update", skip(self, patch))]
  pub async fn update(&self, id: &str, patch: ProductPatch) -> StorefrontResult<()> {
    let patch = patch.clean();
    if let Err(e) = patch.validate() {
      warn!(error = %e, "Rejected product patch");
      return Err(e);
    }
    let result = match to_body(&patch) {
      Ok(mut fields) => {
        if let Some(stock_count) = patch.stock_count {
          fields.insert("inStock".to_string(), Value::Bool(stock_count > 0));
        }
        touch(&mut fields);
        self.store.update(PRODUCTS_COLLECTION, id, fields).await
      }
      Err(e) => Err(e),
    };
    log_failure("update", result)?;
    info!(product_id = %id, "Product updated.");
    Ok(())
  }

  #[instrument(name = "products::soft_delete", skip(self))]
  pub async fn soft_delete(&self, id: &str) -> StorefrontResult<()> {
    let mut fields = DocumentBody::new();
    fields.insert("isActive".to_string(), Value::Bool(false));
    touch(&mut fields);
    log_failure("soft_delete", self.store.update(PRODUCTS_COLLECTION, id, fields).await)?;
    info!(product_id = %id, "Product deactivated.");
    Ok(())
  }

  /// Naive search: loads every active product and matches the term client-side against
  /// name, description, brand and category.
  // TODO: replace the full scan with a query against a search index once one is provisioned.
  #[instrument(name = "products::search", skip(self))]
  pub async fn search(&self, term: &str) -> StorefrontResult<Vec<Product>> {
    let products = self.list_active().await?;
    let term = term.to_lowercase();
    Ok(
      products
        .into_iter()
        .filter(|p| {
          contains_any(
            &term,
            &[p.name.as_str(), p.description.as_str(), p.brand.as_str(), p.category.as_str()],
          )
        })
        .collect(),
    )
  }

  /// Distinct categories of the active products, sorted.
  #[instrument(name = "products::categories", skip(self))]
  pub async fn categories(&self) -> StorefrontResult<Vec<String>> {
    let products = self.list_active().await?;
    let categories: BTreeSet<String> = products.into_iter().map(|p| p.category).collect();
    Ok(categories.into_iter().collect())
  }

  #[instrument(name = "products::update_stock", skip(self))]
  pub async fn update_stock(&self, id: &str, stock_count: u32) -> StorefrontResult<()> {
    let mut fields = DocumentBody::new();
    fields.insert("stockCount".to_string(), Value::from(stock_count));
    fields.insert("inStock".to_string(), Value::Bool(stock_count > 0));
    touch(&mut fields);
    log_failure("update_stock", self.store.update(PRODUCTS_COLLECTION, id, fields).await)?;
    info!(product_id = %id, stock_count, "Product stock updated.");
    Ok(())
  }

  async fn fetch(&self, query: &DocumentQuery) -> StorefrontResult<Vec<Product>> {
    let documents = self.store.query(PRODUCTS_COLLECTION, query).await?;
    documents
      .into_iter()
      .map(|doc| Product::from_document(&doc.id, doc.body))
      .collect()
  }
}

fn log_failure<T>(operation: &'static str, result: StorefrontResult<T>) -> StorefrontResult<T> {
  result.inspect_err(|e| error!(operation, error = %e, "Product store operation failed"))
}

fn to_body<T: Serialize>(value: &T) -> StorefrontResult<DocumentBody> {
  match serde_json::to_value(value)? {
    Value::Object(map) => Ok(map),
    other => Err(StorefrontError::validation(format!("expected an object, got {}", other))),
  }
}

fn touch(fields: &mut DocumentBody) {
  fields.insert("updatedAt".to_string(), Value::from(Utc::now().timestamp_millis()));
}
