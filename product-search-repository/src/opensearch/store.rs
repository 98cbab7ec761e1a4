//! OpenSearch document store implementation.
//!
//! This module provides the concrete implementation of `DocumentStore`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::response::Response,
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch, SearchParts,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::OpenSearchConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::DocumentStore;
use crate::query::StructuredQuery;
use crate::schema::IndexSchema;
use crate::types::{BulkItemResult, BulkOperation, BulkWriteResponse};

/// OpenSearch document store.
///
/// Provides full-text search and bulk indexing using OpenSearch as the backend.
///
/// # Example
///
/// ```ignore
/// use product_search_repository::{OpenSearchConfig, OpenSearchStore};
///
/// let store = OpenSearchStore::new(&OpenSearchConfig::default())?;
/// store.ping().await?;
/// let exists = store.index_exists("products").await?;
/// ```
pub struct OpenSearchStore {
    client: OpenSearch,
}

impl OpenSearchStore {
    /// Create a new OpenSearch store for the configured URL.
    ///
    /// No request is sent; use [`OpenSearchStore::ping`] to verify the server is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchStore)` - A new store instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(config: &OpenSearchConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some((username, password)) = config.credentials() {
            builder = builder.auth(Credentials::Basic(username, password));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            authenticated = config.username.is_some(),
            "Created OpenSearch store"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Check that the server answers.
    pub async fn ping(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchIndexError::connection(format!(
                "Ping failed with status {}",
                status
            )));
        }
        Ok(())
    }

    /// Render bulk operations as alternating action-metadata and document lines.
    fn bulk_body(operations: &[BulkOperation]) -> Result<Vec<JsonBody<Value>>, SearchIndexError> {
        let mut body = Vec::with_capacity(operations.len() * 2);
        for operation in operations {
            let document = serde_json::to_value(&operation.document)
                .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
            body.push(json!({ "index": { "_id": operation.id } }).into());
            body.push(document.into());
        }
        Ok(body)
    }

    /// Read an error response body for logging and error messages.
    async fn error_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct RawBulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, RawBulkItem>>,
}

#[derive(Debug, Deserialize)]
struct RawBulkItem {
    #[serde(rename = "_id")]
    id: Option<String>,
    #[serde(default)]
    status: u16,
    error: Option<Value>,
}

/// Render a bulk item error as `type: reason` when the backend provides both.
fn describe_item_error(error: &Value) -> String {
    match (
        error.get("type").and_then(Value::as_str),
        error.get("reason").and_then(Value::as_str),
    ) {
        (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
        _ => match error.as_str() {
            Some(message) => message.to_string(),
            None => error.to_string(),
        },
    }
}

/// Interpret a `_bulk` response body.
///
/// Items are matched to operations by position; an item without `_id` takes the id of the
/// operation it answers. Operations the backend did not report on are marked failed so
/// that every submitted document is accounted for.
pub(crate) fn parse_bulk_response(
    raw: Value,
    operations: &[BulkOperation],
) -> Result<BulkWriteResponse, SearchIndexError> {
    let parsed: RawBulkResponse = serde_json::from_value(raw)
        .map_err(|e| SearchIndexError::invalid_response(format!("bulk response: {}", e)))?;

    if parsed.items.len() != operations.len() {
        warn!(
            submitted = operations.len(),
            reported = parsed.items.len(),
            "Bulk response item count does not match submitted operations"
        );
    }

    let mut reported = parsed.items.into_iter();
    let items = operations
        .iter()
        .map(|operation| {
            let item = reported
                .next()
                .and_then(|actions| actions.into_values().next());
            match item {
                Some(item) => {
                    let id = item.id.unwrap_or_else(|| operation.id.clone());
                    match item.error {
                        Some(error) => {
                            BulkItemResult::failed(id, item.status, describe_item_error(&error))
                        }
                        None => BulkItemResult::ok(id, item.status),
                    }
                }
                None => BulkItemResult::failed(
                    operation.id.clone(),
                    0,
                    "no result reported for this document",
                ),
            }
        })
        .collect();

    Ok(BulkWriteResponse {
        errors: parsed.errors,
        items,
    })
}

#[async_trait]
impl DocumentStore for OpenSearchStore {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => {
                let error_body = Self::error_body(response).await;
                error!(status, body = %error_body, "Index exists request failed");
                Err(SearchIndexError::index_creation(format!(
                    "Index exists check failed with status {}: {}",
                    status, error_body
                )))
            }
        }
    }

    /// Create an index with the given settings and mappings.
    ///
    /// A `resource_already_exists_exception` (another process created the index between
    /// the existence check and this call) is treated as success.
    async fn create_index(
        &self,
        index: &str,
        schema: &IndexSchema,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(schema.body().clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index, "Created index");
            return Ok(());
        }

        let error_body = Self::error_body(response).await;
        if error_body.contains("resource_already_exists_exception") {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }

        error!(status = %status, body = %error_body, "Create index request failed");
        Err(SearchIndexError::index_creation(format!(
            "Create index failed with status {}: {}",
            status, error_body
        )))
    }

    async fn bulk_write(
        &self,
        index: &str,
        operations: &[BulkOperation],
    ) -> Result<BulkWriteResponse, SearchIndexError> {
        if operations.is_empty() {
            return Ok(BulkWriteResponse::default());
        }

        let body = Self::bulk_body(operations)?;

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_write(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_write(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let raw = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::invalid_response(e.to_string()))?;

        let result = parse_bulk_response(raw, operations)?;
        debug!(
            index = %index,
            submitted = operations.len(),
            succeeded = result.succeeded(),
            "Bulk request completed"
        );
        Ok(result)
    }

    async fn query(&self, index: &str, query: &StructuredQuery) -> Result<Value, SearchIndexError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(query.to_body())
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchIndexError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::invalid_response(e.to_string()))
    }
}
