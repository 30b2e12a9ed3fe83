use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::Transaction;

/// Continuation token returned by `GET /transaction`.
///
/// The gateway decides its shape (a DynamoDB key object today); the client
/// only hands it back on the next request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(Value);

impl PageCursor {
    #[cfg(test)]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Compact JSON text of the token, as the `lastEvaluatedKey` query value
    pub fn to_query_value(&self) -> String {
        self.0.to_string()
    }
}

/// One page of `GET /transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    #[serde(default)]
    pub items: Vec<Transaction>,
    /// `None` when this was the last page
    #[serde(default)]
    pub last_evaluated_key: Option<PageCursor>,
}

/// Failure talking to the gateway. Response bodies are carried for logs only.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other non-2xx statuses
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body was not the expected JSON
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
