//! API request types
//!
//! Route resolution and request-body parsing, shared by the native HTTP
//! server and the serverless function.

use axum::http::Method;
use serde::Deserialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::CONTACTS_PATH;
use crate::store::ContactInput;

/// Operation selected by method and path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Upsert,
    Delete,
    Preflight,
}

impl Operation {
    /// Resolve an operation. OPTIONS is a preflight on any path.
    pub fn resolve(method: &Method, path: &str) -> ApiResult<Self> {
        if method == Method::OPTIONS {
            return Ok(Operation::Preflight);
        }
        if path != CONTACTS_PATH {
            return Err(ApiError::NotFound);
        }
        match *method {
            Method::GET => Ok(Operation::List),
            Method::POST => Ok(Operation::Upsert),
            Method::DELETE => Ok(Operation::Delete),
            _ => Err(ApiError::MethodNotAllowed),
        }
    }
}

/// Unified request envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Upsert(Vec<ContactInput>),
    /// Delete one contact, or all of them when `id` is `None`
    Delete { id: Option<String> },
    Preflight,
}

impl Request {
    /// Build the request for a resolved operation.
    ///
    /// `body` is the parsed JSON body, `None` when the request had none.
    pub fn parse(op: Operation, query_id: Option<&str>, body: Option<&Value>) -> ApiResult<Self> {
        match op {
            Operation::List => Ok(Request::List),
            Operation::Upsert => parse_upsert_body(body).map(Request::Upsert),
            Operation::Delete => Ok(Request::Delete {
                id: delete_target(query_id, body)?,
            }),
            Operation::Preflight => Ok(Request::Preflight),
        }
    }
}

/// Extract `contacts` from an upsert body.
///
/// The body must be an object whose `contacts` member is an array of
/// objects; anything else is rejected before the store is touched.
pub fn parse_upsert_body(body: Option<&Value>) -> ApiResult<Vec<ContactInput>> {
    let contacts = body
        .and_then(|b| b.get("contacts"))
        .and_then(Value::as_array)
        .ok_or_else(ApiError::invalid_contacts)?;

    contacts
        .iter()
        .enumerate()
        .map(|(index, contact)| {
            if !contact.is_object() {
                return Err(ApiError::Validation(format!(
                    "Invalid contact at index {}: expected an object",
                    index
                )));
            }
            ContactInput::deserialize(contact).map_err(|e| {
                ApiError::Validation(format!("Invalid contact at index {}: {}", index, e))
            })
        })
        .collect()
}

/// Pick the id to delete: query string first, then the body's `id`.
/// Empty strings count as absent; `None` means delete everything.
///
/// A body that is not an object, or whose `id` is neither a string nor
/// null, is rejected so that it can never widen into a delete-all.
pub fn delete_target(query_id: Option<&str>, body: Option<&Value>) -> ApiResult<Option<String>> {
    if let Some(id) = query_id.filter(|id| !id.is_empty()) {
        return Ok(Some(id.to_string()));
    }

    let id = match body {
        None => return Ok(None),
        Some(Value::Object(fields)) => fields.get("id"),
        Some(_) => {
            return Err(ApiError::Validation(
                "Invalid delete body: expected an object".to_string(),
            ))
        }
    };
    match id {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) if id.is_empty() => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(_) => Err(ApiError::Validation(
            "Invalid delete body: id must be a string".to_string(),
        )),
    }
}

/// Parse a raw body. Empty bodies yield `None`, malformed JSON is a 400.
pub fn parse_body(bytes: &[u8]) -> ApiResult<Option<Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {}", e)))
}
