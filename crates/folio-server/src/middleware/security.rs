//! Response hardening headers.

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Response};
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use tower::{Layer, Service};

const HARDENING: [(&str, &str); 5] = [
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "origin-when-cross-origin"),
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
];

/// Adds security headers to every response.
///
/// `X-DNS-Prefetch-Control: on` is always sent; the rest only when
/// `secure_headers` is enabled.
#[derive(Debug, Clone, Copy)]
pub struct SecurityHeadersLayer {
    secure_headers: bool,
}

impl SecurityHeadersLayer {
    pub fn new(secure_headers: bool) -> Self {
        Self { secure_headers }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeaders {
            inner,
            secure_headers: self.secure_headers,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SecurityHeaders<S> {
    inner: S,
    secure_headers: bool,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SecurityHeaders<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let secure_headers = self.secure_headers;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            apply(response.headers_mut(), secure_headers);
            Ok(response)
        })
    }
}

fn apply(headers: &mut HeaderMap, secure_headers: bool) {
    if secure_headers {
        for (name, value) in HARDENING {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
    }
    headers.insert(
        HeaderName::from_static("x-dns-prefetch-control"),
        HeaderValue::from_static("on"),
    );
}
