//! Shared HTTP client for the treasury API.

use council_domain::core::string::truncate;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest error body kept from a failed response
pub(crate) const ERROR_BODY_LEN: usize = 300;

/// Failures talking to the treasury API, mapped onto port errors by callers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreasuryHttpError {
    #[error("{0}")]
    Unreachable(String),

    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Decode(String),
}

/// Thin JSON client bound to one treasury API base URL
#[derive(Clone)]
pub struct TreasuryClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TreasuryClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, TreasuryHttpError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TreasuryHttpError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON document; `Ok(None)` on 404
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, TreasuryHttpError> {
        let response = self.send(self.client.get(self.url(path))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(Self::check(response).await?).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TreasuryHttpError> {
        let response = self.send(self.client.get(self.url(path))).await?;
        Self::decode(Self::check(response).await?).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TreasuryHttpError> {
        let response = self
            .send(self.client.post(self.url(path)).json(body))
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, mut request: RequestBuilder) -> Result<Response, TreasuryHttpError> {
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| TreasuryHttpError::Unreachable(e.to_string()))?;
        debug!(url = %response.url(), status = %response.status(), "Treasury API response");
        Ok(response)
    }

    async fn check(response: Response) -> Result<Response, TreasuryHttpError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(TreasuryHttpError::Status {
            status: status.as_u16(),
            message: truncate(message.trim(), ERROR_BODY_LEN),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TreasuryHttpError> {
        response
            .json()
            .await
            .map_err(|e| TreasuryHttpError::Decode(e.to_string()))
    }
}
