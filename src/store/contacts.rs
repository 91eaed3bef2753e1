//! # Contact Store
//!
//! Typed, narrow interface over a `DocumentClient` for exactly one
//! database/collection pair. Every operation is one client call: no caching,
//! no retries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::client::DocumentClient;
use super::contact::{decode_contacts, Contact, ContactInput, ContactList};
use super::document::{Document, Query};
use super::errors::{DocumentError, StoreError, StoreOp, StoreResult};

/// Database used when none is configured
pub const DEFAULT_DATABASE_ID: &str = "db";

/// Collection used when none is configured
pub const DEFAULT_COLLECTION_ID: &str = "crm";

/// Which collection the store is bound to, and how it lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStoreConfig {
    #[serde(default = "default_database_id")]
    pub database_id: String,

    #[serde(default = "default_collection_id")]
    pub collection_id: String,

    /// Page cap sent with list calls; `None` leaves it to the store
    #[serde(default)]
    pub list_limit: Option<u32>,
}

fn default_database_id() -> String {
    DEFAULT_DATABASE_ID.to_string()
}

fn default_collection_id() -> String {
    DEFAULT_COLLECTION_ID.to_string()
}

impl Default for ContactStoreConfig {
    fn default() -> Self {
        Self {
            database_id: default_database_id(),
            collection_id: default_collection_id(),
            list_limit: None,
        }
    }
}

#[derive(Clone)]
pub struct ContactStore {
    client: Arc<dyn DocumentClient>,
    config: ContactStoreConfig,
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ContactStore {
    pub fn new(client: Arc<dyn DocumentClient>, config: ContactStoreConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ContactStoreConfig {
        &self.config
    }

    /// Fetch the contacts of the collection, capped by `list_limit` if set
    pub async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let queries: Vec<Query> = self.config.list_limit.map(Query::Limit).into_iter().collect();

        let list = self
            .client
            .list_documents(&self.config.database_id, &self.config.collection_id, &queries)
            .await
            .map_err(|e| self.fail(StoreOp::List, e))?;

        let contacts = decode_contacts(list.documents).map_err(|e| self.fail(StoreOp::List, e))?;
        tracing::info!(count = contacts.len(), total = list.total, "contacts listed");
        Ok(contacts)
    }

    /// Create or replace contacts in a single batch call
    pub async fn upsert_contacts(&self, contacts: Vec<ContactInput>) -> StoreResult<ContactList> {
        let documents: Vec<Document> = contacts
            .into_iter()
            .map(ContactInput::into_document)
            .collect();

        let written = self
            .client
            .upsert_documents(
                &self.config.database_id,
                &self.config.collection_id,
                documents,
            )
            .await
            .map_err(|e| self.fail(StoreOp::Upsert, e))?;

        let list = ContactList::try_from(written).map_err(|e| self.fail(StoreOp::Upsert, e))?;
        tracing::info!(ids = ?list.ids(), "contacts upserted");
        Ok(list)
    }

    /// Delete one contact; an unknown id is an error
    pub async fn delete_contact(&self, id: &str) -> StoreResult<()> {
        self.client
            .delete_document(&self.config.database_id, &self.config.collection_id, id)
            .await
            .map_err(|e| self.fail(StoreOp::Delete, e))?;

        tracing::info!(id, "contact deleted");
        Ok(())
    }

    /// Delete every contact in the collection. Irreversible, no guard.
    ///
    /// Returns the number of removed contacts.
    pub async fn delete_all_contacts(&self) -> StoreResult<u64> {
        let removed = self
            .client
            .delete_documents(&self.config.database_id, &self.config.collection_id, &[])
            .await
            .map_err(|e| self.fail(StoreOp::DeleteAll, e))?;

        tracing::info!(count = removed.total, "all contacts deleted");
        Ok(removed.total)
    }

    fn fail(&self, op: StoreOp, source: DocumentError) -> StoreError {
        tracing::error!(
            database_id = %self.config.database_id,
            collection_id = %self.config.collection_id,
            error = %source,
            "failed to {}",
            op
        );
        StoreError::new(op, source)
    }
}
