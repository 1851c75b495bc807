//! Cache-control policy for content responses.

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use folio_common_config::ExecutionMode;

/// `Cache-Control` value for responses that must never be reused.
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// How a response may be cached by browsers and intermediaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Never cache: `Cache-Control`, `Pragma` and `Expires` all forbid it.
    NoStore,
    /// Leave caching to the client; no headers are added.
    Default,
}

impl CachePolicy {
    /// Development serves every edit immediately; other modes allow caching.
    pub fn for_mode(mode: ExecutionMode) -> Self {
        if mode.is_development() {
            Self::NoStore
        } else {
            Self::Default
        }
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Self::NoStore = self {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
            headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
        }
    }
}

/// A response with a cache policy applied to its headers.
pub struct Cached<T>(pub CachePolicy, pub T);

impl<T: IntoResponse> IntoResponse for Cached<T> {
    fn into_response(self) -> Response {
        let Cached(policy, inner) = self;
        let mut response = inner.into_response();
        policy.apply(response.headers_mut());
        response
    }
}
