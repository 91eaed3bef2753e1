//! # In-Memory Document Client
//!
//! A process-local `DocumentClient` with the same observable semantics as the
//! hosted service: upsert replaces whole documents by `$id`, deleting a
//! missing document fails, timestamps are maintained by the store.
//!
//! Used by tests and by the `--in-memory` development mode.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use super::client::DocumentClient;
use super::document::{
    document_id, unique_id, Document, DocumentList, Query, CREATED_AT_FIELD, ID_FIELD,
    UPDATED_AT_FIELD,
};
use super::errors::{DocumentError, DocumentResult};

type CollectionKey = (String, String);

#[derive(Debug, Default)]
pub struct InMemoryDocumentClient {
    collections: RwLock<HashMap<CollectionKey, Vec<Document>>>,
}

impl InMemoryDocumentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub async fn len(&self, database_id: &str, collection_id: &str) -> usize {
        self.collections
            .read()
            .await
            .get(&key(database_id, collection_id))
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn key(database_id: &str, collection_id: &str) -> CollectionKey {
    (database_id.to_string(), collection_id.to_string())
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Apply limit queries; the smallest one wins
fn select(documents: &[Document], queries: &[Query]) -> Vec<Document> {
    let limit = queries
        .iter()
        .map(|Query::Limit(n)| *n as usize)
        .min()
        .unwrap_or(usize::MAX);
    documents.iter().take(limit).cloned().collect()
}

#[async_trait]
impl DocumentClient for InMemoryDocumentClient {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DocumentResult<DocumentList> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(&key(database_id, collection_id))
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(DocumentList {
            total: documents.len() as u64,
            documents: select(documents, queries),
        })
    }

    async fn upsert_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        documents: Vec<Document>,
    ) -> DocumentResult<DocumentList> {
        // The batch is rejected as a whole before anything is written
        let mut keyed = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = match document_id(&document) {
                Some(id) => id.to_string(),
                None if document.contains_key(ID_FIELD) => {
                    return Err(DocumentError::Api {
                        code: 400,
                        kind: "document_invalid_structure".to_string(),
                        message: "Document ID must be a string".to_string(),
                    });
                }
                None => {
                    let id = unique_id();
                    document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                    id
                }
            };
            keyed.push((id, document));
        }

        let mut collections = self.collections.write().await;
        let stored = collections
            .entry(key(database_id, collection_id))
            .or_default();

        let timestamp = now();
        let mut written = Vec::with_capacity(keyed.len());

        for (id, mut document) in keyed {
            let existing = stored
                .iter()
                .position(|d| document_id(d) == Some(id.as_str()));

            let created_at = existing
                .and_then(|i| stored[i].get(CREATED_AT_FIELD).cloned())
                .unwrap_or_else(|| Value::String(timestamp.clone()));
            document.insert(CREATED_AT_FIELD.to_string(), created_at);
            document.insert(
                UPDATED_AT_FIELD.to_string(),
                Value::String(timestamp.clone()),
            );

            match existing {
                Some(i) => stored[i] = document.clone(),
                None => stored.push(document.clone()),
            }
            written.push(document);
        }

        Ok(DocumentList::from_documents(written))
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        id: &str,
    ) -> DocumentResult<()> {
        let mut collections = self.collections.write().await;
        let stored = collections
            .get_mut(&key(database_id, collection_id))
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;

        let index = stored
            .iter()
            .position(|d| document_id(d) == Some(id))
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;
        stored.remove(index);
        Ok(())
    }

    async fn delete_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DocumentResult<DocumentList> {
        let mut collections = self.collections.write().await;
        let Some(stored) = collections.get_mut(&key(database_id, collection_id)) else {
            return Ok(DocumentList::default());
        };

        let removed = if queries.is_empty() {
            std::mem::take(stored)
        } else {
            let doomed = select(stored, queries);
            stored.retain(|d| !doomed.iter().any(|x| document_id(x) == document_id(d)));
            doomed
        };

        Ok(DocumentList::from_documents(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_upsert_generates_missing_ids() {
        let client = InMemoryDocumentClient::new();
        let written = client
            .upsert_documents("db", "crm", vec![doc(json!({ "name": "Ann" }))])
            .await
            .unwrap();

        assert_eq!(written.total, 1);
        let id = document_id(&written.documents[0]).unwrap();
        assert_eq!(id.len(), 20);
        assert!(written.documents[0].contains_key(CREATED_AT_FIELD));
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id_and_keeps_created_at() {
        let client = InMemoryDocumentClient::new();
        let first = client
            .upsert_documents(
                "db",
                "crm",
                vec![doc(json!({ "$id": "a", "name": "Ann", "phone": "1" }))],
            )
            .await
            .unwrap();
        let created = first.documents[0][CREATED_AT_FIELD].clone();

        client
            .upsert_documents("db", "crm", vec![doc(json!({ "$id": "a", "name": "Anne" }))])
            .await
            .unwrap();

        let listed = client.list_documents("db", "crm", &[]).await.unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.documents[0]["name"], "Anne");
        assert!(listed.documents[0].get("phone").is_none());
        assert_eq!(listed.documents[0][CREATED_AT_FIELD], created);
    }

    #[tokio::test]
    async fn test_list_applies_limit_but_reports_total() {
        let client = InMemoryDocumentClient::new();
        let docs = (0..5)
            .map(|i| doc(json!({ "$id": format!("c{}", i) })))
            .collect();
        client.upsert_documents("db", "crm", docs).await.unwrap();

        let listed = client
            .list_documents("db", "crm", &[Query::Limit(2)])
            .await
            .unwrap();
        assert_eq!(listed.total, 5);
        assert_eq!(listed.documents.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_document_fails() {
        let client = InMemoryDocumentClient::new();
        let err = client
            .delete_document("db", "crm", "nope")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_documents_without_queries_clears_collection() {
        let client = InMemoryDocumentClient::new();
        let docs = (0..3)
            .map(|i| doc(json!({ "$id": format!("c{}", i) })))
            .collect();
        client.upsert_documents("db", "crm", docs).await.unwrap();

        let removed = client.delete_documents("db", "crm", &[]).await.unwrap();
        assert_eq!(removed.total, 3);
        assert_eq!(client.len("db", "crm").await, 0);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let client = InMemoryDocumentClient::new();
        client
            .upsert_documents("db", "crm", vec![doc(json!({ "$id": "a" }))])
            .await
            .unwrap();

        let other = client.list_documents("db", "other", &[]).await.unwrap();
        assert_eq!(other.total, 0);
    }
}
