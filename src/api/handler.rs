//! API Handler for contacts
//!
//! Executes a parsed `Request` against the contact store. Both entry
//! points (HTTP server and serverless function) route through here.

use serde_json::Value;

use crate::store::{Contact, ContactList, ContactStore};

use super::errors::ApiResult;
use super::request::{parse_upsert_body, Request};
use super::response::{DeleteResponse, Response};

/// Contacts API over one store
#[derive(Debug, Clone)]
pub struct ContactsApi {
    store: ContactStore,
}

impl ContactsApi {
    pub fn new(store: ContactStore) -> Self {
        Self { store }
    }

    /// Handle a request
    pub async fn handle(&self, request: Request) -> ApiResult<Response> {
        match request {
            Request::List => self.list().await.map(Response::Contacts),
            Request::Upsert(contacts) => {
                let written = self.store.upsert_contacts(contacts).await?;
                Ok(Response::Upserted(written))
            }
            Request::Delete { id } => self.delete(id.as_deref()).await.map(Response::Deleted),
            Request::Preflight => Ok(Response::Preflight),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Contact>> {
        Ok(self.store.list_contacts().await?)
    }

    /// Validate an upsert body and write it
    pub async fn upsert(&self, body: Option<&Value>) -> ApiResult<ContactList> {
        let contacts = parse_upsert_body(body)?;
        Ok(self.store.upsert_contacts(contacts).await?)
    }

    /// Delete one contact, or every contact when `id` is `None`
    pub async fn delete(&self, id: Option<&str>) -> ApiResult<DeleteResponse> {
        match id {
            Some(id) => {
                self.store.delete_contact(id).await?;
                Ok(DeleteResponse::one())
            }
            None => {
                let deleted = self.store.delete_all_contacts().await?;
                Ok(DeleteResponse::all(deleted))
            }
        }
    }
}
