//! API response types
//!
//! JSON response shaping for all operations.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Contact, ContactList};

/// Delete acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,

    /// Number of removed contacts, reported by delete-all only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
}

impl DeleteResponse {
    pub fn one() -> Self {
        Self {
            success: true,
            deleted: None,
        }
    }

    pub fn all(count: u64) -> Self {
        Self {
            success: true,
            deleted: Some(count),
        }
    }
}

/// Successful outcome of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Listed contacts, rendered as a bare array
    Contacts(Vec<Contact>),
    /// Upsert batch result, rendered as `{total, documents}`
    Upserted(ContactList),
    Deleted(DeleteResponse),
    /// Preflight acknowledgement, no body
    Preflight,
}

impl Response {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Response::Preflight => StatusCode::NO_CONTENT,
            _ => StatusCode::OK,
        }
    }

    /// JSON body, `None` for bodiless responses
    pub fn to_json(&self) -> Option<Value> {
        let value = match self {
            Response::Contacts(contacts) => serde_json::to_value(contacts),
            Response::Upserted(list) => serde_json::to_value(list),
            Response::Deleted(deleted) => serde_json::to_value(deleted),
            Response::Preflight => return None,
        };
        // Plain structs with string keys always serialize
        value.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delete_response_serialization() {
        assert_eq!(
            serde_json::to_value(DeleteResponse::one()).unwrap(),
            json!({ "success": true })
        );
        assert_eq!(
            serde_json::to_value(DeleteResponse::all(3)).unwrap(),
            json!({ "success": true, "deleted": 3 })
        );
    }

    #[test]
    fn test_list_renders_as_array() {
        let response = Response::Contacts(vec![]);
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.to_json(), Some(json!([])));
    }

    #[test]
    fn test_preflight_has_no_body() {
        assert_eq!(Response::Preflight.status_code(), StatusCode::NO_CONTENT);
        assert_eq!(Response::Preflight.to_json(), None);
    }
}
