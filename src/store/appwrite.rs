//! # Appwrite REST Client
//!
//! `DocumentClient` over the hosted service's HTTP API.
//!
//! - `GET    /databases/{db}/collections/{col}/documents?queries[]=...`
//! - `PUT    /databases/{db}/collections/{col}/documents`
//! - `DELETE /databases/{db}/collections/{col}/documents/{id}`
//! - `DELETE /databases/{db}/collections/{col}/documents`

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::client::DocumentClient;
use super::document::{Document, DocumentList, Query};
use super::errors::{DocumentError, DocumentResult};

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";

/// Connection settings for the hosted service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppwriteConfig {
    /// API endpoint, e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,

    /// Project identifier
    pub project_id: String,

    /// Server API key
    #[serde(skip_serializing)]
    pub api_key: String,
}

/// Error body returned by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

#[derive(Clone)]
pub struct AppwriteClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl std::fmt::Debug for AppwriteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl AppwriteClient {
    pub fn new(config: &AppwriteConfig) -> DocumentResult<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| DocumentError::Config(format!("endpoint {:?}: {}", config.endpoint, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(DocumentError::Config(format!(
                "endpoint {:?} is not a base URL",
                config.endpoint
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            header_value(PROJECT_HEADER, &config.project_id)?,
        );
        headers.insert(
            HeaderName::from_static(KEY_HEADER),
            header_value(KEY_HEADER, &config.api_key)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { endpoint, client })
    }

    fn documents_url(&self, database_id: &str, collection_id: &str) -> Url {
        self.url_for(&["databases", database_id, "collections", collection_id, "documents"])
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn header_value(name: &str, value: &str) -> DocumentResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| DocumentError::Config(format!("{} contains invalid characters", name)))
}

fn query_params(queries: &[Query]) -> Vec<(&'static str, String)> {
    queries.iter().map(|q| ("queries[]", q.to_string())).collect()
}

#[async_trait]
trait ResponseExt {
    async fn map_document_error(self) -> DocumentResult<Response>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn map_document_error(self) -> DocumentResult<Response> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }

        let text = self.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ErrorBody>(&text).unwrap_or(ErrorBody {
            message: text,
            kind: String::new(),
        });

        Err(DocumentError::Api {
            code: status.as_u16(),
            kind: body.kind,
            message: body.message,
        })
    }
}

async fn decode_list(response: Response) -> DocumentResult<DocumentList> {
    let bytes = response.map_document_error().await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl DocumentClient for AppwriteClient {
    #[tracing::instrument(skip(self, queries), level = "debug")]
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DocumentResult<DocumentList> {
        let response = self
            .client
            .get(self.documents_url(database_id, collection_id))
            .query(&query_params(queries))
            .send()
            .await?;
        decode_list(response).await
    }

    #[tracing::instrument(skip(self, documents), fields(count = documents.len()), level = "debug")]
    async fn upsert_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        documents: Vec<Document>,
    ) -> DocumentResult<DocumentList> {
        let response = self
            .client
            .put(self.documents_url(database_id, collection_id))
            .json(&json!({ "documents": documents }))
            .send()
            .await?;
        decode_list(response).await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> DocumentResult<()> {
        let url = self.url_for(&[
            "databases",
            database_id,
            "collections",
            collection_id,
            "documents",
            document_id,
        ]);
        self.client
            .delete(url)
            .send()
            .await?
            .map_document_error()
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, queries), level = "debug")]
    async fn delete_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DocumentResult<DocumentList> {
        let queries: Vec<String> = queries.iter().map(Query::to_string).collect();
        let response = self
            .client
            .delete(self.documents_url(database_id, collection_id))
            .json(&json!({ "queries": queries }))
            .send()
            .await?;
        decode_list(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> AppwriteConfig {
        AppwriteConfig {
            endpoint: endpoint.to_string(),
            project_id: "proj".to_string(),
            api_key: "secret".to_string(),
        }
    }

    #[test]
    fn test_documents_url() {
        let client = AppwriteClient::new(&config("https://cloud.example.io/v1")).unwrap();
        assert_eq!(
            client.documents_url("db", "crm").as_str(),
            "https://cloud.example.io/v1/databases/db/collections/crm/documents"
        );
    }

    #[test]
    fn test_documents_url_with_trailing_slash() {
        let client = AppwriteClient::new(&config("https://cloud.example.io/v1/")).unwrap();
        assert_eq!(
            client.documents_url("db", "crm").as_str(),
            "https://cloud.example.io/v1/databases/db/collections/crm/documents"
        );
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = AppwriteClient::new(&config("not a url")).unwrap_err();
        assert!(matches!(err, DocumentError::Config(_)));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let mut cfg = config("https://cloud.example.io/v1");
        cfg.api_key = "bad\nkey".to_string();
        let err = AppwriteClient::new(&cfg).unwrap_err();
        assert!(matches!(err, DocumentError::Config(_)));
    }

    #[test]
    fn test_query_params() {
        let params = query_params(&[Query::Limit(100)]);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].0, "queries[]");
        assert_eq!(params[0].1, r#"{"method":"limit","values":[100]}"#);
    }
}
