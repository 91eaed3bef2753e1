//! # Contact Storage
//!
//! Everything between the request handlers and the hosted document
//! database:
//!
//! - `client` - the `DocumentClient` seam
//! - `appwrite` - REST implementation of the seam
//! - `memory` - process-local implementation of the seam
//! - `contacts` - the contact store bound to one collection

pub mod appwrite;
pub mod client;
pub mod contact;
pub mod contacts;
pub mod document;
pub mod errors;
pub mod memory;

pub use appwrite::{AppwriteClient, AppwriteConfig};
pub use client::DocumentClient;
pub use contact::{Contact, ContactInput, ContactList};
pub use contacts::{ContactStore, ContactStoreConfig, DEFAULT_COLLECTION_ID, DEFAULT_DATABASE_ID};
pub use document::{unique_id, Document, DocumentList, Query};
pub use errors::{DocumentError, DocumentResult, StoreError, StoreOp, StoreResult};
pub use memory::InMemoryDocumentClient;
