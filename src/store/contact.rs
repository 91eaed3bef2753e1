//! # Contact Records
//!
//! The only entity. Field contents are opaque JSON values and are never
//! validated here; the store decides what it accepts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{unique_id, Document, DocumentList, ID_FIELD};
use super::errors::DocumentError;

/// A stored contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "$id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<Value>,

    #[serde(default)]
    pub email: Option<Value>,

    #[serde(default)]
    pub phone: Option<Value>,

    #[serde(default)]
    pub notes: Option<Value>,

    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A contact as submitted for upsert; `$id` (or `id`) is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(
        rename = "$id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<Value>,

    #[serde(default)]
    pub email: Option<Value>,

    #[serde(default)]
    pub phone: Option<Value>,

    #[serde(default)]
    pub notes: Option<Value>,
}

impl ContactInput {
    /// Shape the input into a stored document.
    ///
    /// An absent or empty identifier is replaced by a freshly generated one;
    /// only the four contact fields are carried over.
    pub fn into_document(self) -> Document {
        let id = self.id.filter(|id| !id.is_empty()).unwrap_or_else(unique_id);

        let mut document = Document::new();
        document.insert(ID_FIELD.to_string(), Value::String(id));
        document.insert("name".to_string(), self.name.unwrap_or(Value::Null));
        document.insert("email".to_string(), self.email.unwrap_or(Value::Null));
        document.insert("phone".to_string(), self.phone.unwrap_or(Value::Null));
        document.insert("notes".to_string(), self.notes.unwrap_or(Value::Null));
        document
    }
}

/// Batch response for an upsert: `{total, documents}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactList {
    pub total: u64,
    pub documents: Vec<Contact>,
}

impl ContactList {
    /// Identifiers of the contained contacts, in order
    pub fn ids(&self) -> Vec<&str> {
        self.documents.iter().map(|c| c.id.as_str()).collect()
    }
}

impl TryFrom<DocumentList> for ContactList {
    type Error = DocumentError;

    fn try_from(list: DocumentList) -> Result<Self, Self::Error> {
        Ok(Self {
            total: list.total,
            documents: decode_contacts(list.documents)?,
        })
    }
}

/// Decode raw documents into contacts
pub fn decode_contacts(documents: Vec<Document>) -> Result<Vec<Contact>, DocumentError> {
    documents
        .into_iter()
        .map(|d| serde_json::from_value(Value::Object(d)).map_err(DocumentError::from))
        .collect()
}
