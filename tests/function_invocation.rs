//! Function Invocation Tests
//!
//! The serverless variant of the contract, run through the invoker and
//! through the local HTTP host.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{memory_client, FailingClient};
use crm_contacts::functions::{
    AppwriteProvider, ContactsFunction, FunctionConfig, FunctionHost, FunctionRequest, Invoker,
    LogLevel, StaticProvider,
};
use crm_contacts::store::{ContactStoreConfig, DocumentClient};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

const ORIGIN: &str = "https://app.example";

fn config() -> FunctionConfig {
    FunctionConfig {
        cors_origin: ORIGIN.to_string(),
        store: ContactStoreConfig::default(),
    }
}

fn invoker_over(client: Arc<dyn DocumentClient>) -> Invoker {
    Invoker::new(ContactsFunction::new(
        config(),
        Arc::new(StaticProvider::new(client)),
    ))
}

fn invoker() -> Invoker {
    invoker_over(memory_client())
}

// =============================================================================
// Contract
// =============================================================================

#[tokio::test]
async fn test_preflight_on_any_path() {
    let invoker = invoker();
    for path in ["/contacts", "/", "/elsewhere"] {
        let result = invoker.invoke(FunctionRequest::new("OPTIONS", path)).await;
        let res = &result.response;
        assert_eq!(res.status_code, 204);
        assert!(res.body.is_empty());
        assert_eq!(res.header("Access-Control-Allow-Origin"), Some(ORIGIN));
        assert_eq!(
            res.header("access-control-allow-methods"),
            Some("POST, GET, DELETE, OPTIONS")
        );
        assert_eq!(res.header("access-control-allow-headers"), Some("Content-Type"));
    }
}

#[tokio::test]
async fn test_upsert_list_delete() {
    let invoker = invoker();

    let upsert = FunctionRequest::new("POST", "/contacts").with_json(&json!({
        "contacts": [{ "name": "Ann", "email": "a@x.com", "phone": "1", "notes": "" }]
    }));
    let result = invoker.invoke(upsert).await;
    assert!(result.is_success());
    let body = result.response.json().unwrap();
    assert_eq!(body["total"], 1);
    let id = body["documents"][0]["$id"].as_str().unwrap().to_string();
    assert_eq!(result.response.header("content-type"), Some("application/json"));
    assert_eq!(
        result.response.header("access-control-allow-origin"),
        Some(ORIGIN)
    );

    let listed = invoker
        .invoke(FunctionRequest::new("GET", "/contacts"))
        .await
        .response
        .json()
        .unwrap();
    assert_eq!(listed[0]["$id"], id.as_str());
    assert_eq!(listed[0]["email"], "a@x.com");

    let deleted = invoker
        .invoke(FunctionRequest::new("DELETE", "/contacts").with_query("id", id.clone()))
        .await;
    assert_eq!(deleted.response.status_code, 200);
    assert_eq!(deleted.response.json(), Some(json!({ "success": true })));

    let again = invoker
        .invoke(FunctionRequest::new("DELETE", "/contacts").with_query("id", id))
        .await;
    assert_eq!(again.response.status_code, 500);
}

#[tokio::test]
async fn test_delete_all() {
    let invoker = invoker();
    invoker
        .invoke(
            FunctionRequest::new("POST", "/contacts")
                .with_json(&json!({ "contacts": [{ "name": "A" }, { "name": "B" }] })),
        )
        .await;

    let result = invoker.invoke(FunctionRequest::new("DELETE", "/contacts")).await;
    assert_eq!(
        result.response.json(),
        Some(json!({ "success": true, "deleted": 2 }))
    );

    let listed = invoker.invoke(FunctionRequest::new("GET", "/contacts")).await;
    assert_eq!(listed.response.json(), Some(json!([])));
}

#[tokio::test]
async fn test_routing_errors() {
    let invoker = invoker();

    let result = invoker.invoke(FunctionRequest::new("GET", "/people")).await;
    assert_eq!(result.response.status_code, 404);
    assert_eq!(result.response.json(), Some(json!({ "error": "Not Found" })));
    assert_eq!(
        result.response.header("access-control-allow-origin"),
        Some(ORIGIN)
    );

    let result = invoker.invoke(FunctionRequest::new("PATCH", "/contacts")).await;
    assert_eq!(result.response.status_code, 405);
    assert_eq!(
        result.response.json(),
        Some(json!({ "error": "Method Not Allowed" }))
    );
}

#[tokio::test]
async fn test_invalid_contacts_rejected() {
    let result = invoker()
        .invoke(FunctionRequest::new("POST", "/contacts").with_json(&json!({ "contacts": 1 })))
        .await;
    assert_eq!(result.response.status_code, 400);
    assert_eq!(
        result.response.json(),
        Some(json!({ "error": "Invalid contacts data" }))
    );
}

#[tokio::test]
async fn test_malformed_delete_body_keeps_contacts() {
    let client = memory_client();
    let invoker = invoker_over(client.clone());
    let seed = FunctionRequest::new("POST", "/contacts").with_json(&json!({
        "contacts": [{ "$id": "a" }, { "$id": "b" }, { "$id": "c" }]
    }));
    assert!(invoker.invoke(seed).await.is_success());

    for body in [r#"{"id": 42}"#, r#"{"id": "a""#, r#"["a"]"#] {
        let result = invoker
            .invoke(FunctionRequest::new("DELETE", "/contacts").with_body(body))
            .await;
        assert_eq!(result.response.status_code, 400, "body {}", body);
        assert_eq!(
            result.response.header("access-control-allow-origin"),
            Some(ORIGIN)
        );
    }
    assert_eq!(client.len("db", "crm").await, 3);
}

#[tokio::test]
async fn test_list_ignores_request_body() {
    let result = invoker()
        .invoke(FunctionRequest::new("GET", "/contacts").with_body("{"))
        .await;
    assert_eq!(result.response.status_code, 200);
    assert_eq!(result.response.json(), Some(json!([])));
}

#[tokio::test]
async fn test_store_failure_is_logged_and_500() {
    let result = invoker_over(Arc::new(FailingClient))
        .invoke(FunctionRequest::new("GET", "/contacts"))
        .await;

    assert_eq!(result.response.status_code, 500);
    assert_eq!(
        result.response.json(),
        Some(json!({ "error": "Failed to list contacts" }))
    );
    assert!(result
        .logs
        .iter()
        .any(|line| line.level == LogLevel::Error && line.message.contains("Service unavailable")));
}

/// A client that cannot be built surfaces as a store failure.
#[tokio::test]
async fn test_unusable_endpoint_is_500() {
    let invoker = Invoker::new(ContactsFunction::new(
        config(),
        Arc::new(AppwriteProvider::new("not a url", "proj")),
    ));
    let result = invoker
        .invoke(FunctionRequest::new("DELETE", "/contacts").with_query("id", "a"))
        .await;
    assert_eq!(result.response.status_code, 500);
    assert_eq!(
        result.response.json(),
        Some(json!({ "error": "Failed to delete contact" }))
    );
}

// =============================================================================
// Host
// =============================================================================

#[tokio::test]
async fn test_host_round_trip() {
    let router = FunctionHost::new("127.0.0.1:0", invoker()).router();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/contacts")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "contacts": [{ "$id": "h1", "name": "Host" }] }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], ORIGIN);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/contacts?id=h1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "success": true }));

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/whatever")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
