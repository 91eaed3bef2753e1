//! # Invocation Response
//!
//! The `res` side of the invocation model: `json`, `send` and `empty`
//! each produce a finished [`FunctionResponse`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A finished response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub status_code: u16,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub body: String,
}

impl FunctionResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Body parsed as JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Response builder handed to the function
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// JSON body with `content-type: application/json`
    pub fn json<I, K, V>(&self, body: &Value, status_code: u16, headers: I) -> FunctionResponse
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut response = self.send(body.to_string(), status_code, headers);
        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        response
    }

    /// Raw text body
    pub fn send<I, K, V>(
        &self,
        body: impl Into<String>,
        status_code: u16,
        headers: I,
    ) -> FunctionResponse
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        FunctionResponse {
            status_code,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
                .collect(),
            body: body.into(),
        }
    }

    /// 204 with no body and no headers
    pub fn empty(&self) -> FunctionResponse {
        FunctionResponse {
            status_code: 204,
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_sets_content_type() {
        let res = ResponseBuilder.json(
            &json!({ "ok": true }),
            200,
            [("Access-Control-Allow-Origin", "*")],
        );
        assert_eq!(res.status_code, 200);
        assert_eq!(res.header("content-type"), Some("application/json"));
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));
        assert_eq!(res.json(), Some(json!({ "ok": true })));
    }

    #[test]
    fn test_empty() {
        let res = ResponseBuilder.empty();
        assert_eq!(res.status_code, 204);
        assert!(res.body.is_empty());
        assert!(res.headers.is_empty());
    }
}
