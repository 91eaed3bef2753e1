//! # Contacts Function
//!
//! The serverless variant of the contacts contract. Preflight is answered
//! before routing on any path; every other response carries the configured
//! allow-origin header. The store client is built per invocation.

use std::sync::Arc;

use axum::http::Method;
use serde_json::Value;

use super::config::{ClientProvider, FunctionConfig};
use super::context::InvocationContext;
use super::response::FunctionResponse;
use crate::api::cors::{origin_header, preflight_headers};
use crate::api::{ApiError, ApiResult, ContactsApi, Operation, Request, Response};
use crate::store::{ContactStore, StoreError, StoreOp};

pub struct ContactsFunction {
    config: FunctionConfig,
    provider: Arc<dyn ClientProvider>,
}

impl std::fmt::Debug for ContactsFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactsFunction")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ContactsFunction {
    pub fn new(config: FunctionConfig, provider: Arc<dyn ClientProvider>) -> Self {
        Self { config, provider }
    }

    /// Run one invocation to a finished response
    pub async fn run(&self, ctx: &InvocationContext) -> FunctionResponse {
        let req = &ctx.req;
        let method = match Method::from_bytes(req.method.as_bytes()) {
            Ok(method) => method,
            Err(_) => return self.error(ctx, ApiError::MethodNotAllowed),
        };

        let op = match Operation::resolve(&method, &req.path) {
            Ok(op) => op,
            Err(err) => return self.error(ctx, err),
        };
        if op == Operation::Preflight {
            return ctx
                .res
                .send("", 204, preflight_headers(&self.config.cors_origin));
        }

        match self.execute(ctx, op).await {
            Ok(response) => {
                ctx.log(format!(
                    "{} {} succeeded with {}",
                    req.method,
                    req.path,
                    response.status_code().as_u16()
                ));
                let body = response.to_json().unwrap_or(Value::Null);
                ctx.res.json(
                    &body,
                    response.status_code().as_u16(),
                    [origin_header(&self.config.cors_origin)],
                )
            }
            Err(err) => self.error(ctx, err),
        }
    }

    async fn execute(&self, ctx: &InvocationContext, op: Operation) -> ApiResult<Response> {
        let req = &ctx.req;
        let body = match op {
            Operation::Upsert => req.body_json().map_err(|_| ApiError::invalid_contacts())?,
            Operation::Delete => req.body_json()?,
            Operation::List | Operation::Preflight => None,
        };
        let request = Request::parse(op, req.query_param("id"), body.as_ref())?;

        let client = self
            .provider
            .client(req)
            .map_err(|e| StoreError::new(store_op(&request), e))?;
        let api = ContactsApi::new(ContactStore::new(client, self.config.store.clone()));

        api.handle(request).await
    }

    fn error(&self, ctx: &InvocationContext, err: ApiError) -> FunctionResponse {
        match &err {
            ApiError::Store(store) => ctx.error(format!("{}: {}", store, store.cause())),
            other => ctx.log(format!(
                "{} {} rejected: {}",
                ctx.req.method, ctx.req.path, other
            )),
        }
        let body = serde_json::to_value(err.body()).unwrap_or(Value::Null);
        ctx.res.json(
            &body,
            err.status_code().as_u16(),
            [origin_header(&self.config.cors_origin)],
        )
    }
}

fn store_op(request: &Request) -> StoreOp {
    match request {
        Request::Upsert(_) => StoreOp::Upsert,
        Request::Delete { id: Some(_) } => StoreOp::Delete,
        Request::Delete { id: None } => StoreOp::DeleteAll,
        Request::List | Request::Preflight => StoreOp::List,
    }
}
