// core/src/store.rs

//! A minimal document-store abstraction: collections of JSON object documents keyed by
//! a store-assigned id, with equality filters and single-field ordering.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{StorefrontError, StorefrontResult};

pub type DocumentBody = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  pub id: String,
  pub body: DocumentBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Ascending,
  Descending,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentQuery {
  pub filters: Vec<(String, Value)>,
  pub order_by: Option<(String, Direction)>,
}

impl DocumentQuery {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
    self.filters.push((field.into(), value.into()));
    self
  }

  pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
    self.order_by = Some((field.into(), direction));
    self
  }

  pub fn matches(&self, body: &DocumentBody) -> bool {
    self
      .filters
      .iter()
      .all(|(field, expected)| body.get(field).map_or(false, |actual| actual == expected))
  }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Stores a new document and returns its assigned id.
  async fn insert(&self, collection: &str, body: DocumentBody) -> StorefrontResult<String>;

  async fn get(&self, collection: &str, id: &str) -> StorefrontResult<Option<Document>>;

  /// Merges `fields` into the top level of an existing document.
  /// Fails with [`StorefrontError::NotFound`] when the document does not exist.
  async fn update(&self, collection: &str, id: &str, fields: DocumentBody) -> StorefrontResult<()>;

  async fn query(&self, collection: &str, query: &DocumentQuery) -> StorefrontResult<Vec<Document>>;
}

/// HashMap-backed store for tests and for running without a database.
/// Clone-friendly via Arc; documents keep insertion order within a collection.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
  collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl InMemoryDocumentStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self, collection: &str) -> usize {
    self.collections.read().get(collection).map_or(0, Vec::len)
  }

  pub fn is_empty(&self, collection: &str) -> bool {
    self.len(collection) == 0
  }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
  async fn insert(&self, collection: &str, body: DocumentBody) -> StorefrontResult<String> {
    let id = Uuid::new_v4().simple().to_string();
    self
      .collections
      .write()
      .entry(collection.to_string())
      .or_default()
      .push(Document { id: id.clone(), body });
    Ok(id)
  }

  async fn get(&self, collection: &str, id: &str) -> StorefrontResult<Option<Document>> {
    let guard = self.collections.read();
    Ok(guard.get(collection).and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
  }

  async fn update(&self, collection: &str, id: &str, fields: DocumentBody) -> StorefrontResult<()> {
    let mut guard = self.collections.write();
    let document = guard
      .get_mut(collection)
      .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
      .ok_or_else(|| StorefrontError::not_found(format!("document {}/{}", collection, id)))?;
    document.body.extend(fields);
    Ok(())
  }

  async fn query(&self, collection: &str, query: &DocumentQuery) -> StorefrontResult<Vec<Document>> {
    let mut matched: Vec<Document> = {
      let guard = self.collections.read();
      guard
        .get(collection)
        .map(|docs| docs.iter().filter(|d| query.matches(&d.body)).cloned().collect())
        .unwrap_or_default()
    };
    if let Some((field, direction)) = &query.order_by {
      matched.sort_by(|a, b| {
        let ordering = compare_values(a.body.get(field), b.body.get(field));
        match direction {
          Direction::Ascending => ordering,
          Direction::Descending => ordering.reverse(),
        }
      });
    }
    Ok(matched)
  }
}

// Missing and null sort first; values of different kinds compare as equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
  match (a, b) {
    (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
    (None | Some(Value::Null), _) => Ordering::Less,
    (_, None | Some(Value::Null)) => Ordering::Greater,
    (Some(Value::Number(x)), Some(Value::Number(y))) => {
      let x = x.as_f64().unwrap_or_default();
      let y = y.as_f64().unwrap_or_default();
      x.total_cmp(&y)
    }
    (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
    (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
    _ => Ordering::Equal,
  }
}
