use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{check_filter, DocumentStore, Record, StoreError, StoredDocument};

/// In-process document store. Backs tests and `--memory` runs; contents
/// are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<BTreeMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all collections.
    pub async fn len(&self) -> usize {
        self.collections.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_document(&self, collection: &str, record: Record) -> Result<String, StoreError> {
        let now = Utc::now();
        let doc = StoredDocument {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            fields: record,
        };
        let id = doc.id.to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        Ok(id)
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Record,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        check_filter(filter)?;
        let guard = self.collections.read().await;
        let docs = match guard.get(collection) {
            Some(docs) => docs,
            None => return Ok(Vec::new()),
        };
        Ok(docs
            .iter()
            .filter(|doc| doc.matches(filter))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_collection_names(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .take(limit)
            .collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_unique_ids() {
        let store = MemoryDocumentStore::new();
        let a = store.create_document("chatsession", record(json!({"language": "en"}))).await.unwrap();
        let b = store.create_document("chatsession", record(json!({"language": "en"}))).await.unwrap();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_get_filters_and_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        for (session, content) in [("s1", "first"), ("s2", "other"), ("s1", "second"), ("s1", "third")] {
            store
                .create_document("chatmessage", record(json!({"session_id": session, "content": content})))
                .await
                .unwrap();
        }

        let filter = record(json!({"session_id": "s1"}));
        let docs = store.get_documents("chatmessage", &filter, 100).await.unwrap();
        let contents: Vec<_> = docs.iter().map(|d| d.fields["content"].clone()).collect();
        assert_eq!(contents, vec![json!("first"), json!("second"), json!("third")]);

        let limited = store.get_documents("chatmessage", &filter, 2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[1].fields["content"], "second");
    }

    #[tokio::test]
    async fn test_get_rejects_nested_filter_values() {
        let store = MemoryDocumentStore::new();
        store
            .create_document("chatmessage", record(json!({"tags": ["soil", "ph"]})))
            .await
            .unwrap();

        let filter = record(json!({"tags": ["soil"]}));
        let result = store.get_documents("chatmessage", &filter, 10).await;
        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_get_unknown_collection_is_empty() {
        let store = MemoryDocumentStore::new();
        let docs = store.get_documents("nothing", &Record::new(), 10).await.unwrap();
        assert!(docs.is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_collection_names_sorted_and_limited() {
        let store = MemoryDocumentStore::new();
        for name in ["chatsession", "chatmessage", "audit"] {
            store.create_document(name, Record::new()).await.unwrap();
        }
        assert_eq!(
            store.list_collection_names(10).await.unwrap(),
            vec!["audit", "chatmessage", "chatsession"]
        );
        assert_eq!(store.list_collection_names(1).await.unwrap(), vec!["audit"]);
    }
}
