//! # Document Client
//!
//! The seam to the hosted document database. Each call maps to exactly one
//! request against the service.

use async_trait::async_trait;

use super::document::{Document, DocumentList, Query};
use super::errors::DocumentResult;

/// Generic document database client
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// List documents of a collection
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DocumentResult<DocumentList>;

    /// Create or replace documents in one batch, keyed by `$id`
    async fn upsert_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        documents: Vec<Document>,
    ) -> DocumentResult<DocumentList>;

    /// Delete one document; a missing document is an error
    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> DocumentResult<()>;

    /// Delete every document matched by `queries` (all of them when empty)
    async fn delete_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DocumentResult<DocumentList>;
}
