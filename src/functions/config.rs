//! # Function Configuration
//!
//! Settings read once at start-up, plus the [`ClientProvider`] seam that
//! yields a document client for each invocation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::request::FunctionRequest;
use crate::api::cors::DEFAULT_ORIGIN;
use crate::store::{
    AppwriteClient, AppwriteConfig, ContactStoreConfig, DocumentClient, DocumentResult,
};

/// Request header carrying the per-invocation API key
pub const KEY_HEADER: &str = "x-appwrite-key";

/// Function configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// Value of `Access-Control-Allow-Origin` on every response
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Collection the function operates on
    #[serde(default)]
    pub store: ContactStoreConfig,
}

fn default_cors_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            cors_origin: default_cors_origin(),
            store: ContactStoreConfig::default(),
        }
    }
}

/// Yields the document client an invocation talks to
pub trait ClientProvider: Send + Sync {
    fn client(&self, req: &FunctionRequest) -> DocumentResult<Arc<dyn DocumentClient>>;
}

/// Builds a fresh Appwrite client per invocation.
///
/// Endpoint and project come from the platform environment; the key comes
/// from the invocation's `x-appwrite-key` header, empty when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppwriteProvider {
    pub endpoint: String,
    pub project_id: String,
}

impl AppwriteProvider {
    pub fn new(endpoint: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
        }
    }

    fn config_for(&self, req: &FunctionRequest) -> AppwriteConfig {
        AppwriteConfig {
            endpoint: self.endpoint.clone(),
            project_id: self.project_id.clone(),
            api_key: req.header(KEY_HEADER).unwrap_or_default().to_string(),
        }
    }
}

impl ClientProvider for AppwriteProvider {
    fn client(&self, req: &FunctionRequest) -> DocumentResult<Arc<dyn DocumentClient>> {
        let client = AppwriteClient::new(&self.config_for(req))?;
        Ok(Arc::new(client))
    }
}

/// Hands every invocation the same client
#[derive(Clone)]
pub struct StaticProvider {
    client: Arc<dyn DocumentClient>,
}

impl StaticProvider {
    pub fn new(client: Arc<dyn DocumentClient>) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for StaticProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticProvider").finish_non_exhaustive()
    }
}

impl ClientProvider for StaticProvider {
    fn client(&self, _req: &FunctionRequest) -> DocumentResult<Arc<dyn DocumentClient>> {
        Ok(self.client.clone())
    }
}
