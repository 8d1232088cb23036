use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info};

use super::item::{coerce_integral_numbers, Item};
use super::request::{ApiRequest, ApiResponse};
use super::route::Operation;
use super::store::{ItemStore, StoreError};

/// Routes one inbound request to its operation against the store and
/// shapes the outcome into a response envelope. Holds no state of its own;
/// safe for unlimited concurrent invocation.
pub struct Dispatcher {
    store: Arc<dyn ItemStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// The single fault boundary: any failure outcome from an operation
    /// becomes the uniform 500 carrying the fault description.
    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        info!(method = %request.method, path = %request.path, "Dispatching request");
        match self.run(request).await {
            Ok(response) => response,
            Err(fault) => {
                error!(%fault, "Dispatch failed");
                ApiResponse::json(500, &json!({ "message": fault.to_string() }))
            }
        }
    }

    async fn run(&self, request: ApiRequest) -> Result<ApiResponse, DispatchError> {
        let operation = match Operation::resolve(&request.method, &request.path) {
            Some(operation) => operation,
            None => {
                return Ok(ApiResponse::json_without_headers(
                    400,
                    &json!({"message": "Invalid request"}),
                ))
            }
        };
        match operation {
            Operation::List => self.list().await,
            Operation::GetOne(id) => self.get_one(&id).await,
            Operation::Create => self.create(request.body.as_deref()).await,
            Operation::Replace(id) => self.replace(&id, request.body.as_deref()).await,
            Operation::Delete(id) => self.delete(&id).await,
        }
    }

    async fn list(&self) -> Result<ApiResponse, DispatchError> {
        let items: Vec<Value> = self
            .store
            .scan()
            .await?
            .into_iter()
            .map(|item| coerce_integral_numbers(item.into_value()))
            .collect();
        Ok(ApiResponse::json(200, &Value::Array(items)))
    }

    async fn get_one(&self, id: &str) -> Result<ApiResponse, DispatchError> {
        match self.store.get(id).await? {
            Some(item) => Ok(ApiResponse::json(
                200,
                &coerce_integral_numbers(item.into_value()),
            )),
            None => Ok(ApiResponse::json_without_headers(
                404,
                &json!({"message": "Item not found"}),
            )),
        }
    }

    // Unconditional upsert keyed by whatever id the body carries; a body
    // with no id flows to the store as-is and surfaces as a store fault.
    async fn create(&self, body: Option<&str>) -> Result<ApiResponse, DispatchError> {
        let item = parse_body(body)?;
        self.store.put(item.clone()).await?;
        Ok(ApiResponse::json(
            201,
            &json!({"message": "Item created", "item": item.into_value()}),
        ))
    }

    // Upsert-by-path-id: the body's id, if any, is discarded.
    async fn replace(&self, id: &str, body: Option<&str>) -> Result<ApiResponse, DispatchError> {
        let mut item = parse_body(body)?;
        item.set_id(id);
        self.store.put(item.clone()).await?;
        Ok(ApiResponse::json(
            200,
            &json!({"message": "Item updated", "item": item.into_value()}),
        ))
    }

    async fn delete(&self, id: &str) -> Result<ApiResponse, DispatchError> {
        self.store.delete(id).await?;
        Ok(ApiResponse::json(200, &json!({"message": "Item deleted"})))
    }
}

fn parse_body(body: Option<&str>) -> Result<Item, DispatchError> {
    let text = body.ok_or(DispatchError::MissingBody)?;
    Item::parse(text).map_err(DispatchError::ParseError)
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Request has no body")]
    MissingBody,
    #[error("Malformed item body: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error(transparent)]
    StoreFailure(#[from] StoreError),
}
