// server/src/db.rs

//! Postgres-backed [`DocumentStore`]: every collection shares one `documents` table and
//! each document is a JSONB object.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use storefront::{Direction, Document, DocumentBody, DocumentQuery, DocumentStore, StorefrontError, StorefrontResult};
use tracing::{debug, instrument};
use uuid::Uuid;

const CREATE_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
  collection TEXT NOT NULL,
  id TEXT NOT NULL,
  body JSONB NOT NULL,
  PRIMARY KEY (collection, id)
)"#;

#[derive(Clone)]
pub struct PgDocumentStore {
  pool: PgPool,
}

impl PgDocumentStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Creates the `documents` table when it does not exist yet.
  pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_DOCUMENTS_TABLE).execute(&self.pool).await?;
    Ok(())
  }
}

fn into_document(id: String, body: Value) -> StorefrontResult<Document> {
  match body {
    Value::Object(body) => Ok(Document { id, body }),
    other => Err(StorefrontError::from(anyhow!(
      "document {} is not a JSON object (found {})",
      id,
      other
    ))),
  }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
  #[instrument(name = "pg::insert", skip(self, body))]
  async fn insert(&self, collection: &str, body: DocumentBody) -> StorefrontResult<String> {
    let id = Uuid::new_v4().simple().to_string();
    sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
      .bind(collection)
      .bind(&id)
      .bind(Json(Value::Object(body)))
      .execute(&self.pool)
      .await
      .with_context(|| format!("inserting into {}", collection))?;
    Ok(id)
  }

  #[instrument(name = "pg::get", skip(self))]
  async fn get(&self, collection: &str, id: &str) -> StorefrontResult<Option<Document>> {
    let row: Option<(String, Json<Value>)> =
      sqlx::query_as("SELECT id, body FROM documents WHERE collection = $1 AND id = $2")
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("fetching {}/{}", collection, id))?;
    row.map(|(id, Json(body))| into_document(id, body)).transpose()
  }

  #[instrument(name = "pg::update", skip(self, fields))]
  async fn update(&self, collection: &str, id: &str, fields: DocumentBody) -> StorefrontResult<()> {
    // `||` on two JSONB objects is a top-level merge.
    let result = sqlx::query("UPDATE documents SET body = body || $3 WHERE collection = $1 AND id = $2")
      .bind(collection)
      .bind(id)
      .bind(Json(Value::Object(fields)))
      .execute(&self.pool)
      .await
      .with_context(|| format!("updating {}/{}", collection, id))?;
    if result.rows_affected() == 0 {
      return Err(StorefrontError::not_found(format!("document {}/{}", collection, id)));
    }
    Ok(())
  }

  #[instrument(name = "pg::query", skip(self, query))]
  async fn query(&self, collection: &str, query: &DocumentQuery) -> StorefrontResult<Vec<Document>> {
    // Equality filters become one containment check.
    let containment: DocumentBody = query.filters.iter().cloned().collect();
    let mut sql = String::from("SELECT id, body FROM documents WHERE collection = $1 AND body @> $2");
    if let Some((_, direction)) = &query.order_by {
      let direction = match direction {
        Direction::Ascending => "ASC NULLS FIRST",
        Direction::Descending => "DESC NULLS LAST",
      };
      sql.push_str(&format!(" ORDER BY body -> $3 {}", direction));
    }
    debug!(%sql, "Running document query.");

    let mut statement = sqlx::query_as::<_, (String, Json<Value>)>(&sql)
      .bind(collection)
      .bind(Json(Value::Object(containment)));
    if let Some((field, _)) = &query.order_by {
      statement = statement.bind(field.as_str());
    }
    let rows = statement
      .fetch_all(&self.pool)
      .await
      .with_context(|| format!("querying {}", collection))?;

    rows.into_iter().map(|(id, Json(body))| into_document(id, body)).collect()
  }
}
