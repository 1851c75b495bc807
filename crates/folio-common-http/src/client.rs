//! HTTP client configuration.

use crate::request::RequestBuilder;
use crate::response::{parse_json, ResponseError};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout, including reading the body.
    pub request_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            user_agent: format!("folio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Same defaults with a different request timeout. The connect timeout
    /// never exceeds the request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let defaults = Self::default();
        Self {
            connect_timeout: defaults.connect_timeout.min(timeout),
            request_timeout: timeout,
            ..defaults
        }
    }
}

/// Build a configured reqwest client.
pub fn build_client(config: &HttpConfig) -> Result<Client, HttpError> {
    ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(HttpError::ClientBuild)
}

/// HTTP errors.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("server error: {status}")]
    ServerError { status: u16, body: String },

    #[error("client error: {status}")]
    ClientError { status: u16, body: String },

    #[error(transparent)]
    Decode(#[from] ResponseError),
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Request(e)
        }
    }
}

/// Shared outbound HTTP client. Cloning is cheap; clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Create a new HTTP client with custom config.
    pub fn with_config(config: &HttpConfig) -> Result<Self, HttpError> {
        let inner = build_client(config)?;
        Ok(Self { inner })
    }

    /// Make a GET request carrying the builder's headers.
    pub async fn get(
        &self,
        request: &RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response, HttpError> {
        let url = request.url(path);
        tracing::debug!(url = %url, "GET");
        let response = self
            .inner
            .get(&url)
            .headers(request.headers().clone())
            .send()
            .await?;
        tracing::debug!(url = %url, status = response.status().as_u16(), "GET response");
        Ok(response)
    }

    /// GET, require a 2xx status, and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        request: &RequestBuilder,
        path: &str,
    ) -> Result<T, HttpError> {
        let response = self.get(request, path).await?;
        let response = Self::check_response(response).await?;
        Ok(parse_json(response).await?)
    }

    /// Check response status and convert errors.
    pub async fn check_response(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, HttpError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            Err(HttpError::ServerError {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(HttpError::ClientError {
                status: status.as_u16(),
                body,
            })
        }
    }
}
