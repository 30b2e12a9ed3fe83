use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{ApiError, PageCursor, TransactionPage};
use super::Gateway;
use crate::models::{Transaction, User};

/// HTTP client for the SINPE móvil backend
pub struct SinpeClient {
    http_client: HttpClient,
    base_url: String,
}

impl SinpeClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://p9si8vsth0.execute-api.us-east-1.amazonaws.com";

    /// Create a client against `base_url` (no trailing slash needed)
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .default_headers(Self::create_headers())
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Map a non-2xx status to an error. The body is kept as text, never parsed.
    async fn handle_error_response(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            404 => ApiError::NotFound(body_text),
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// Send the request and decode a JSON body of type `T`
    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

/// Value of the `lastEvaluatedKey` query parameter; empty on the first page
pub(crate) fn cursor_query_value(cursor: Option<&PageCursor>) -> String {
    cursor.map(PageCursor::to_query_value).unwrap_or_default()
}

#[async_trait]
impl Gateway for SinpeClient {
    /// GET /user/{user_id}
    async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        let url = self.endpoint(&format!("user/{}", user_id));
        debug!("GET {}", url);
        Self::execute(self.http_client.get(&url)).await
    }

    /// PUT /user/{user_id}
    ///
    /// Replaces the whole record, so `user` must be a full copy of what
    /// `get_user` returned with only the changed fields edited.
    async fn update_user(&self, user_id: &str, user: &User) -> Result<User, ApiError> {
        let url = self.endpoint(&format!("user/{}", user_id));
        debug!("PUT {} (amount: {})", url, user.amount);
        Self::execute(self.http_client.put(&url).json(user)).await
    }

    /// POST /transaction
    async fn create_transaction(&self, transaction: &Transaction) -> Result<Transaction, ApiError> {
        let url = self.endpoint("transaction");
        debug!("POST {} (amount: {})", url, transaction.amount);
        Self::execute(self.http_client.post(&url).json(transaction)).await
    }

    /// GET /transaction?lastEvaluatedKey={cursor}
    async fn list_transactions(&self, cursor: Option<&PageCursor>) -> Result<TransactionPage, ApiError> {
        let url = self.endpoint("transaction");
        let key = cursor_query_value(cursor);
        debug!("GET {} (lastEvaluatedKey: {:?})", url, key);
        Self::execute(self.http_client.get(&url).query(&[("lastEvaluatedKey", key)])).await
    }

    /// GET /transaction/{transaction_id}
    async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction, ApiError> {
        let url = self.endpoint(&format!("transaction/{}", transaction_id));
        debug!("GET {}", url);
        Self::execute(self.http_client.get(&url)).await
    }
}
