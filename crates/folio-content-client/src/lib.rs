//! Client for the Folio content API.
//!
//! A [`ContentClient`] holds the latest [`ContentBundle`] it has seen. It
//! starts out with [`ContentBundle::empty`], so renderers always have
//! something to read, and replaces it only when a fetch succeeds. Failed
//! fetches are logged and leave the current bundle in place.
//!
//! ```no_run
//! # async fn demo() -> Result<(), folio_common_http::HttpError> {
//! use folio_content::Section;
//! use folio_content_client::{ClientConfig, ContentClient};
//!
//! let client = ContentClient::new(ClientConfig::new("http://localhost:3000"))?;
//! client.refresh().await;
//! println!("{}", client.text_or_loading(Section::Hero, "/title"));
//! # Ok(())
//! # }
//! ```

use folio_common_http::{HttpClient, HttpConfig, HttpError, RequestBuilder};
use folio_content::{ContentBundle, Section};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Path of the bundle endpoint, relative to the base URL.
pub const CONTENT_PATH: &str = "/api/content";

/// Copy shown in place of a field that has not loaded.
pub const LOADING_TEXT: &str = "Loading...";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the site serving the content API.
    pub base_url: String,
    /// Timeout for a whole fetch.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// What a refresh did to the held bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The bundle was replaced with fresh content.
    Updated,
    /// The fetch failed and the previous bundle was kept.
    Retained { reason: String },
}

impl FetchOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

type InFlight = Shared<BoxFuture<'static, FetchOutcome>>;

struct Inner {
    http: HttpClient,
    request: RequestBuilder,
    current: watch::Sender<ContentBundle>,
    in_flight: Mutex<Option<InFlight>>,
}

impl Inner {
    async fn fetch(&self) -> FetchOutcome {
        match self
            .http
            .get_json::<ContentBundle>(&self.request, CONTENT_PATH)
            .await
        {
            Ok(bundle) => {
                debug!(missing = bundle.missing().len(), "Content refreshed");
                self.current.send_replace(bundle);
                FetchOutcome::Updated
            }
            Err(e) => {
                warn!(error = %e, "Content fetch failed, keeping current content");
                FetchOutcome::Retained {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Shared handle to the content API. Clones share the held bundle and the
/// in-flight request.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<Inner>,
}

impl ContentClient {
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let http = HttpClient::with_config(&HttpConfig::with_timeout(config.timeout))?;
        let request = RequestBuilder::new().base_url(config.base_url).accept_json();
        let (current, _) = watch::channel(ContentBundle::empty());

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                request,
                current,
                in_flight: Mutex::new(None),
            }),
        })
    }

    /// Snapshot of the held bundle.
    pub fn bundle(&self) -> ContentBundle {
        self.inner.current.borrow().clone()
    }

    pub fn section(&self, section: Section) -> Option<Value> {
        self.inner.current.borrow().get(section).cloned()
    }

    /// The string at `pointer` inside `section`, or [`LOADING_TEXT`].
    pub fn text_or_loading(&self, section: Section, pointer: &str) -> String {
        self.inner
            .current
            .borrow()
            .text_at(section, pointer)
            .unwrap_or(LOADING_TEXT)
            .to_string()
    }

    /// Receiver notified whenever the bundle is replaced.
    pub fn subscribe(&self) -> watch::Receiver<ContentBundle> {
        self.inner.current.subscribe()
    }

    /// Fetch the bundle and replace the held one on success.
    ///
    /// Concurrent calls share a single request and all observe its outcome.
    /// A caller that gives up early does not cancel the request. Must be
    /// called from within a Tokio runtime.
    pub async fn refresh(&self) -> FetchOutcome {
        let fetch = {
            let mut slot = self.inner.in_flight.lock();
            match slot.as_ref() {
                Some(pending) => pending.clone(),
                None => {
                    // The fetch runs as its own task so it finishes and frees
                    // the slot even when every caller stops waiting.
                    let inner = Arc::clone(&self.inner);
                    let task = tokio::spawn(async move {
                        let outcome = inner.fetch().await;
                        inner.in_flight.lock().take();
                        outcome
                    });
                    let pending = async move {
                        task.await.unwrap_or_else(|e| {
                            warn!(error = %e, "Content refresh task failed");
                            FetchOutcome::Retained {
                                reason: e.to_string(),
                            }
                        })
                    }
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };
        fetch.await
    }
}
