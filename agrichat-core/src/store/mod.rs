//! Document store gateway
//!
//! Schema-flexible records grouped into named collections. Every insert is
//! stamped with a generated id plus `created_at` / `updated_at`; reads return
//! records in insertion order with those fields rendered as text.

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub type Record = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => StoreError::Unavailable(e.to_string()),
            other => StoreError::Database(other),
        }
    }
}

/// A record as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub fields: Record,
}

impl StoredDocument {
    /// Flatten into a JSON object with `_id` and timestamps as strings.
    /// Store-assigned fields replace same-named caller fields.
    pub fn into_json(self) -> Value {
        let mut obj = self.fields;
        obj.insert("_id".to_string(), Value::String(self.id.to_string()));
        obj.insert(
            "created_at".to_string(),
            Value::String(self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        obj.insert(
            "updated_at".to_string(),
            Value::String(self.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        Value::Object(obj)
    }

    /// True when every filter entry is present with an equal value.
    /// Filters are expected to have passed [`check_filter`].
    pub fn matches(&self, filter: &Record) -> bool {
        filter
            .iter()
            .all(|(key, expected)| self.fields.get(key) == Some(expected))
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `record` into `collection`, returning the new document id.
    async fn create_document(&self, collection: &str, record: Record) -> Result<String, StoreError>;

    /// Up to `limit` documents of `collection` whose fields equal every
    /// entry of `filter`, oldest first. Filter values must be scalars; an
    /// array or object value is rejected with [`StoreError::InvalidRecord`].
    async fn get_documents(
        &self,
        collection: &str,
        filter: &Record,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Names of non-empty collections, sorted, at most `limit`.
    async fn list_collection_names(&self, limit: usize) -> Result<Vec<String>, StoreError>;

    fn name(&self) -> &str;
}

/// Reject filters with array or object values.
///
/// Backends differ on nested values (JSONB containment accepts a superset,
/// in-memory matching needs equality), so only scalar equality is offered.
pub fn check_filter(filter: &Record) -> Result<(), StoreError> {
    match filter
        .iter()
        .find(|(_, value)| value.is_array() || value.is_object())
    {
        Some((key, _)) => Err(StoreError::InvalidRecord(format!(
            "filter field `{}` must be a scalar",
            key
        ))),
        None => Ok(()),
    }
}

/// Serialize a typed record into the field map the store accepts.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidRecord(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}
