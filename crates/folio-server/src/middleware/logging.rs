//! Request logging middleware.

use axum::http::{Request, Response};
use futures::future::BoxFuture;
use std::{
    task::{Context, Poll},
    time::{Duration, Instant},
};
use tower::{Layer, Service};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Requests slower than this are logged at `warn`.
pub const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_millis(1000);

/// Request logging layer.
#[derive(Clone, Default)]
pub struct LoggingLayer;

impl LoggingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct LoggingMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for LoggingMiddleware<S>
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
        let mut inner = self.inner.clone();

        let path = req.uri().path().to_string();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let client_ip = req
            .headers()
            .get("x-forwarded-for")
            .or_else(|| req.headers().get("x-real-ip"))
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
            client_ip = %client_ip,
        );

        Box::pin(
            async move {
                info!(
                    event = "request_started",
                    uri = %uri,
                    user_agent = %user_agent,
                );

                let start = Instant::now();
                let response = inner.call(req).await?;
                let duration = start.elapsed();
                let status = response.status();

                info!(
                    event = "request_completed",
                    status = status.as_u16(),
                    duration_ms = duration.as_millis() as u64,
                );

                if duration > SLOW_REQUEST_THRESHOLD {
                    warn!(
                        event = "slow_request",
                        uri = %uri,
                        duration_ms = duration.as_millis() as u64,
                        "Slow request detected"
                    );
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}
