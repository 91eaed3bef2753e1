//! Contacts HTTP Routes
//!
//! `GET`, `POST` and `DELETE` on `/contacts`, backed by [`ContactsApi`].
//! Bodies are read raw and parsed here so that malformed JSON yields the
//! contract's own 400 instead of an extractor rejection.

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{on, MethodFilter},
    Json, Router,
};
use serde::Deserialize;

use crate::api::{
    delete_target, parse_body, ApiError, ApiResult, ContactsApi, DeleteResponse, CONTACTS_PATH,
};
use crate::store::{Contact, ContactList};

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub id: Option<String>,
}

// ==================
// Contacts Routes
// ==================

/// Create contacts routes
pub fn contacts_routes(api: ContactsApi) -> Router {
    Router::new()
        .route(
            CONTACTS_PATH,
            // Not `get`, which would also answer HEAD
            on(MethodFilter::GET, list_contacts_handler)
                .post(upsert_contacts_handler)
                .delete(delete_contacts_handler)
                .fallback(method_not_allowed),
        )
        .with_state(api)
}

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Method fallback for known paths
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

// ==================
// Handlers
// ==================

async fn list_contacts_handler(State(api): State<ContactsApi>) -> ApiResult<Json<Vec<Contact>>> {
    Ok(Json(api.list().await?))
}

async fn upsert_contacts_handler(
    State(api): State<ContactsApi>,
    body: Bytes,
) -> ApiResult<Json<ContactList>> {
    let body = parse_body(&body).map_err(|_| ApiError::invalid_contacts())?;
    Ok(Json(api.upsert(body.as_ref()).await?))
}

async fn delete_contacts_handler(
    State(api): State<ContactsApi>,
    query: Option<Query<DeleteQuery>>,
    body: Bytes,
) -> ApiResult<Json<DeleteResponse>> {
    let query_id = query.and_then(|Query(q)| q.id);
    let body = parse_body(&body)?;
    let id = delete_target(query_id.as_deref(), body.as_ref())?;
    Ok(Json(api.delete(id.as_deref()).await?))
}
