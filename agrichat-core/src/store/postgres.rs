use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::{check_filter, DocumentStore, Record, StoreError, StoredDocument};

/// Document store backed by the `documents` table. Filters use JSONB
/// containment; with scalar-only filters that is plain field equality.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for StoredDocument {
    type Error = StoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let fields = match row.body {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::InvalidRecord(format!(
                    "document {} has non-object body: {}",
                    row.id, other
                )))
            }
        };
        Ok(StoredDocument {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            fields,
        })
    }
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create_document(&self, collection: &str, record: Record) -> Result<String, StoreError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(Value::Object(record))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(collection, %id, "Inserted document");
        Ok(id.to_string())
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Record,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        check_filter(filter)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq ASC
            LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(Value::Object(filter.clone()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StoredDocument::try_from).collect()
    }

    async fn list_collection_names(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT collection
            FROM documents
            GROUP BY collection
            ORDER BY collection
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
