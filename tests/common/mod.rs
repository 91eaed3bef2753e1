//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use crm_contacts::api::ContactsApi;
use crm_contacts::store::{
    ContactStore, ContactStoreConfig, Document, DocumentClient, DocumentError, DocumentList,
    DocumentResult, InMemoryDocumentClient, Query,
};

/// A client whose every call fails as an unreachable service would
#[derive(Debug, Default)]
pub struct FailingClient;

fn unavailable() -> DocumentError {
    DocumentError::Api {
        code: 503,
        kind: "general_unavailable".to_string(),
        message: "Service unavailable".to_string(),
    }
}

#[async_trait]
impl DocumentClient for FailingClient {
    async fn list_documents(&self, _: &str, _: &str, _: &[Query]) -> DocumentResult<DocumentList> {
        Err(unavailable())
    }

    async fn upsert_documents(
        &self,
        _: &str,
        _: &str,
        _: Vec<Document>,
    ) -> DocumentResult<DocumentList> {
        Err(unavailable())
    }

    async fn delete_document(&self, _: &str, _: &str, _: &str) -> DocumentResult<()> {
        Err(unavailable())
    }

    async fn delete_documents(
        &self,
        _: &str,
        _: &str,
        _: &[Query],
    ) -> DocumentResult<DocumentList> {
        Err(unavailable())
    }
}

pub fn memory_client() -> Arc<InMemoryDocumentClient> {
    Arc::new(InMemoryDocumentClient::new())
}

pub fn api_over(client: Arc<dyn DocumentClient>) -> ContactsApi {
    ContactsApi::new(ContactStore::new(client, ContactStoreConfig::default()))
}
