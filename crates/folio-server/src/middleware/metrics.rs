//! Request metrics middleware.

use crate::monitoring::ProcessMemory;
use axum::http::{Request, Response};
use folio_common_metrics::MetricsState;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// Feeds every request into the shared [`MetricsState`].
#[derive(Clone)]
pub struct MetricsLayer {
    metrics: Arc<MetricsState>,
}

impl MetricsLayer {
    pub fn new(metrics: Arc<MetricsState>) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware {
            inner,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

#[derive(Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
    metrics: Arc<MetricsState>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
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
        let metrics = Arc::clone(&self.metrics);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let start = Instant::now();
            let response = inner.call(req).await?;
            let status = response.status().as_u16();

            metrics.record_request(status < 400);
            metrics.record_response_time(start.elapsed().as_millis() as u64);
            if status >= 400 {
                metrics.record_error(&format!("http_{status}"));
            }
            if let Ok(memory) = ProcessMemory::sample() {
                metrics.record_memory(memory.used);
            }

            Ok(response)
        })
    }
}
