//! CORS middleware layer.
//!
//! Paths under `/api/` answer with a single allowed origin, the site's own
//! public URL. Preflight `OPTIONS` requests are answered here and never
//! reach a handler.

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, Response, StatusCode},
};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::{Layer, Service};

/// CORS settings.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin`.
    pub allow_origin: HeaderValue,
    pub allow_methods: HeaderValue,
    pub allow_headers: HeaderValue,
    pub max_age: Duration,
    /// Only paths with this prefix get CORS headers.
    pub path_prefix: String,
}

impl CorsConfig {
    /// Allow `origin` on `/api/` routes.
    ///
    /// An origin that is not a valid header value disables the
    /// `Access-Control-Allow-Origin` header.
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            allow_origin: HeaderValue::from_str(origin)
                .unwrap_or_else(|_| HeaderValue::from_static("null")),
            allow_methods: HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
            allow_headers: HeaderValue::from_static("Content-Type, Authorization"),
            max_age: Duration::from_secs(86400),
            path_prefix: "/api/".to_string(),
        }
    }

    fn applies_to(&self, path: &str) -> bool {
        path.starts_with(&self.path_prefix)
    }
}

/// CORS middleware layer.
#[derive(Clone)]
pub struct CorsLayer {
    config: CorsConfig,
}

impl CorsLayer {
    pub fn new(config: CorsConfig) -> Self {
        Self { config }
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsMiddleware {
            inner,
            config: self.config.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CorsMiddleware<S> {
    inner: S,
    config: CorsConfig,
}

impl<S> Service<Request<Body>> for CorsMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let config = self.config.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let applies = config.applies_to(req.uri().path());

            if req.method() == Method::OPTIONS {
                return Ok(handle_preflight(&config, applies));
            }

            let mut response = inner.call(req).await?;
            if applies {
                add_cors_headers(&mut response, &config);
            }
            Ok(response)
        })
    }
}

fn handle_preflight(config: &CorsConfig, applies: bool) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;

    if applies {
        add_cors_headers(&mut response, config);
    }

    response
}

fn add_cors_headers(response: &mut Response<Body>, config: &CorsConfig) {
    let headers = response.headers_mut();

    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, config.allow_origin.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, config.allow_methods.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, config.allow_headers.clone());
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from(config.max_age.as_secs()),
    );
}
