//! Core HTTP client for the aqua backend.

use std::time::Duration;

use aqua_core::error::{AquaError, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

/// Standard success envelope used by most backend endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Error body returned by the backend on failures.
///
/// Some endpoints use `message`, others (Django REST style) use `detail`.
#[derive(Debug, Deserialize, Default)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Typed HTTP client for the aqua backend API.
///
/// Holds a shared connection pool; clones are cheap and share it.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client from the given configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AquaError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the absolute URL for an API path (leading slash expected).
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Sends a request and decodes a JSON success body.
    ///
    /// Non-2xx responses become [`AquaError::Api`] carrying the HTTP status
    /// and the server's `message`/`detail` field when present.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(Self::transport_error)?;
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AquaError::Serialization {
                format: "JSON".to_string(),
                message: e.to_string(),
            })
    }

    /// Sends a request where only success/failure matters.
    pub(crate) async fn send_unit(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await.map_err(Self::transport_error)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .message
            .or(body.detail)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        tracing::debug!(status = status.as_u16(), %message, "API request rejected");
        Err(AquaError::api(status.as_u16(), message))
    }

    fn transport_error(err: reqwest::Error) -> AquaError {
        AquaError::data_access(format!("HTTP request failed: {}", err))
    }
}
