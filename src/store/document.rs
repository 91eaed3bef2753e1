//! # Documents
//!
//! Wire shapes shared by every document client: raw documents, list
//! responses, list queries and identifier generation.

use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw document as exchanged with the document database
pub type Document = Map<String, Value>;

/// Identifier attribute of every document
pub const ID_FIELD: &str = "$id";

/// Creation timestamp attribute, managed by the store
pub const CREATED_AT_FIELD: &str = "$createdAt";

/// Last update timestamp attribute, managed by the store
pub const UPDATED_AT_FIELD: &str = "$updatedAt";

/// Random hex digits appended to a generated identifier
const ID_PADDING: usize = 7;

/// List response returned by list, upsert and bulk delete calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    /// Number of documents matched by the call (not only the returned page)
    pub total: u64,

    /// Documents in the returned page
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl DocumentList {
    /// Build a list whose total is the page length
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self {
            total: documents.len() as u64,
            documents,
        }
    }
}

/// Query modifiers accepted by list and bulk delete calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Return at most N documents
    Limit(u32),
}

#[derive(Serialize)]
struct QueryRepr {
    method: &'static str,
    values: Vec<Value>,
}

impl Query {
    fn repr(&self) -> QueryRepr {
        match self {
            Query::Limit(n) => QueryRepr {
                method: "limit",
                values: vec![Value::from(*n)],
            },
        }
    }
}

/// Queries travel as JSON strings, e.g. `{"method":"limit","values":[100]}`
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = serde_json::to_string(&self.repr()).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

/// Generate a new unique document identifier.
///
/// Layout: hex unix seconds, then the millisecond part as 5 zero-padded hex
/// digits, then 7 random hex digits.
pub fn unique_id() -> String {
    let now = Utc::now();
    let mut rng = rand::thread_rng();
    let padding: String = (0..ID_PADDING)
        .map(|_| format!("{:x}", rng.gen_range(0..16u8)))
        .collect();

    format!(
        "{:x}{:05x}{}",
        now.timestamp(),
        now.timestamp_subsec_millis(),
        padding
    )
}

/// Read the identifier of a raw document
pub fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unique_id_shape() {
        let id = unique_id();
        assert_eq!(id.len(), 20);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_unique_ids_differ() {
        let a = unique_id();
        let b = unique_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_query_encoding() {
        assert_eq!(
            Query::Limit(100).to_string(),
            r#"{"method":"limit","values":[100]}"#
        );
    }

    #[test]
    fn test_document_list_tolerates_missing_documents() {
        let list: DocumentList = serde_json::from_value(json!({ "total": 0 })).unwrap();
        assert!(list.documents.is_empty());
    }

    #[test]
    fn test_document_id() {
        let doc = json!({ "$id": "abc", "name": "Ann" });
        let doc = doc.as_object().unwrap();
        assert_eq!(document_id(doc), Some("abc"));
    }
}
