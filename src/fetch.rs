//! The asynchronous request primitive every panel builds on.
//!
//! A [`Resource`] owns one GET for one URL. It starts in
//! [`FetchState::Loading`] and moves exactly once to `Ready` or `Failed`.
//! Changing the URL abandons the in-flight request and starts a fresh one.
//!
//! Each request runs as its own tokio task. The task carries a
//! [`Lifetime`] tied to its owner; once the owner is dropped or moves to a
//! new URL the lifetime ends and a late response is discarded instead of
//! being published.

use crate::error::FetchError;
use crate::utils::redact_url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

/// Snapshot of one request: `{data, loading, error}` as a sum type.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for FetchState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => FetchState::Ready(data),
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }
}

/// Thin JSON-over-GET client shared by every resource.
///
/// No retry, no timeout, no caching: two resources with the same URL make
/// two requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// The URL is logged with its credential parameters masked.
    ///
    /// # Arguments
    ///
    /// * `url` - Fully built request URL, credentials included
    ///
    /// # Returns
    ///
    /// The decoded body, or a [`FetchError`]:
    /// * `RequestFailed` for any non-2xx status
    /// * `Decode` when a 2xx body is not the expected JSON
    /// * `Transport` when no response arrived
    ///
    /// Error messages never contain the request URL.
    #[instrument(level = "info", skip_all, fields(url = %redact_url(url)))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), elapsed_ms = t0.elapsed().as_millis() as u64, "Request failed");
            return Err(FetchError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body = response.json::<T>().await?;
        debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "Request succeeded");
        Ok(body)
    }
}

/// Cancellation signal shared between an owner and the task it started.
#[derive(Debug, Clone, Default)]
pub struct Lifetime {
    ended: Arc<AtomicBool>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn end(&self) {
        self.ended.store(true, Ordering::Release);
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::Acquire)
    }
}

/// One URL's request state, owned by a panel.
#[derive(Debug)]
pub struct Resource<T> {
    fetcher: HttpFetcher,
    url: String,
    state: watch::Receiver<FetchState<T>>,
    lifetime: Lifetime,
}

impl<T> Resource<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Start fetching `url` on the current tokio runtime.
    pub fn spawn(fetcher: &HttpFetcher, url: impl Into<String>) -> Self {
        let url = url.into();
        let (state, lifetime) = start(fetcher.clone(), url.clone());
        Self {
            fetcher: fetcher.clone(),
            url,
            state,
            lifetime,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current snapshot.
    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.clone()
    }

    /// Point the resource at `url`. Returns `true` when a new request was started.
    pub fn set_url(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if url == self.url {
            return false;
        }
        debug!(from = %redact_url(&self.url), to = %redact_url(&url), "URL changed; refetching");
        self.lifetime.end();
        let (state, lifetime) = start(self.fetcher.clone(), url.clone());
        self.url = url;
        self.state = state;
        self.lifetime = lifetime;
        true
    }

    /// Wait until the current request has settled and return its state.
    pub async fn settled(&mut self) -> FetchState<T> {
        match self.state.wait_for(|s| !s.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => FetchState::Failed("request ended before completing".to_string()),
        }
    }
}

impl<T> Drop for Resource<T> {
    fn drop(&mut self) {
        self.lifetime.end();
    }
}

fn start<T>(fetcher: HttpFetcher, url: String) -> (watch::Receiver<FetchState<T>>, Lifetime)
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(FetchState::Loading);
    let lifetime = Lifetime::new();
    let guard = lifetime.clone();

    tokio::spawn(async move {
        let next = FetchState::from(fetcher.get_json::<T>(&url).await);
        if guard.is_ended() {
            debug!(url = %redact_url(&url), "Owner gone; discarding response");
            return;
        }
        // Receiver may be gone as well; nothing to update then.
        let _ = tx.send(next);
    });

    (rx, lifetime)
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::Router;

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}
