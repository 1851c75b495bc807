//! Request targets and headers.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

/// Common HTTP header values.
pub mod headers {
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Base URL plus default headers for a family of requests.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    headers: HeaderMap,
    base_url: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Ask for a JSON response.
    pub fn accept_json(mut self) -> Self {
        self.headers
            .insert(ACCEPT, HeaderValue::from_static(headers::CONTENT_TYPE_JSON));
        self
    }

    /// Get the built headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Join `path` onto the base URL with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) if path.is_empty() => base.trim_end_matches('/').to_string(),
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let builder = RequestBuilder::new().base_url("https://stats.example.com");
        assert_eq!(builder.url("/someone"), "https://stats.example.com/someone");
        assert_eq!(builder.url("someone"), "https://stats.example.com/someone");

        let builder = RequestBuilder::new().base_url("https://stats.example.com/");
        assert_eq!(builder.url("/api/content"), "https://stats.example.com/api/content");
        assert_eq!(builder.url(""), "https://stats.example.com");
    }

    #[test]
    fn test_url_without_base() {
        assert_eq!(RequestBuilder::new().url("/api/content"), "/api/content");
    }

    #[test]
    fn test_headers() {
        let builder = RequestBuilder::new().accept_json().accept_json();

        assert_eq!(builder.headers().get(ACCEPT).unwrap(), "application/json");
        assert_eq!(builder.headers().len(), 1);
    }
}
