//! JSON helpers for calling the demo API.
//!
//! Both helpers append the endpoint to the configured base URL, fail with
//! `API error: <reason>` on any non-2xx answer and decode the body as JSON.

mod error;

pub use error::ClientError;

use crate::APP_USER_AGENT;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
/// Fallback variable kept for front ends that already export it.
pub const LEGACY_API_URL_ENV: &str = "REACT_APP_API_URL";

/// Default request timeout applied to every call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pick the base URL: explicit value first, then the legacy variable, then the default.
#[must_use]
pub fn resolve_base_url(explicit: Option<String>, legacy: Option<String>) -> String {
    explicit
        .filter(|value| !value.is_empty())
        .or_else(|| legacy.filter(|value| !value.is_empty()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// # Errors
    /// Returns `ClientError::Config` if the base URL is not absolute or the HTTP
    /// client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();

        Url::parse(&base_url)
            .map_err(|err| ClientError::Config(format!("invalid API URL {base_url}: {err}")))?;

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|err| ClientError::Config(format!("Error creating HTTP client: {err}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET `endpoint` and decode the JSON answer.
    ///
    /// # Errors
    /// Returns an error on transport failures, non-2xx statuses or invalid JSON.
    #[instrument(skip(self))]
    pub async fn fetch_data<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(endpoint)).send().await?;

        handle_json_response(response).await
    }

    /// POST `data` as JSON to `endpoint` and decode the JSON answer.
    ///
    /// # Errors
    /// Returns an error on transport failures, non-2xx statuses or invalid JSON.
    #[instrument(skip(self, data))]
    pub async fn post_data<B, T>(&self, endpoint: &str, data: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(data)
            .map_err(|err| ClientError::Serialization(format!("Failed to encode request: {err}")))?;

        let response = self
            .http
            .post(self.url(endpoint))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        handle_json_response(response).await
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    debug!("{} -> {}", response.url(), status);

    if !status.is_success() {
        return Err(ClientError::Http {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| ClientError::Parse(format!("Failed to decode response: {err}")))
}
